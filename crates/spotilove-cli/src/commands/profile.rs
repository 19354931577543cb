use anyhow::Result;
use clap::Args;
use spotilove_application::ProfileSetup;
use spotilove_core::validation::BasicProfileForm;

use super::utils::show_navigation;
use crate::app::App;

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub age: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    /// Men, Women or Everyone
    #[arg(long)]
    pub interest: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    /// Leave the basic profile for later
    #[arg(long, conflicts_with_all = ["age", "gender", "interest", "bio"])]
    pub skip: bool,
}

pub async fn complete(app: &App, args: ProfileArgs) -> Result<()> {
    let session = app.require_session().await?;
    let setup = ProfileSetup::new(app.api.clone(), app.presenter.clone());

    let navigation = if args.skip {
        setup.skip(session.user_id)
    } else {
        let form = BasicProfileForm {
            age: args.age.unwrap_or_default(),
            gender: args.gender,
            interest: args.interest,
            bio: args.bio,
        };
        setup.submit(session.user_id, &form).await?
    };
    show_navigation(app.presenter.as_ref(), &navigation);
    Ok(())
}
