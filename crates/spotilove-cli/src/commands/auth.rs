use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use rustyline::DefaultEditor;
use spotilove_core::validation::RegistrationForm;

use super::utils::{prompt, show_outcome};
use crate::app::App;

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "SPOTILOVE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long)]
    pub age: String,
    /// Male, Female or Other
    #[arg(long)]
    pub gender: String,
    /// Men, Women or Everyone
    #[arg(long)]
    pub interest: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    /// Profile image URL
    #[arg(long)]
    pub image: Option<String>,
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let mut rl = DefaultEditor::new()?;
    match prompt(&mut rl, "Password: ")? {
        Some(password) => Ok(password),
        None => bail!("Cancelled"),
    }
}

pub async fn login(app: &App, email: &str, password: Option<String>, remember_me: bool) -> Result<()> {
    let password = password_or_prompt(password)?;
    let outcome = app.auth.login(email, &password, remember_me).await?;
    show_outcome(app.presenter.as_ref(), &outcome);
    Ok(())
}

pub async fn register(app: &App, args: RegisterArgs) -> Result<()> {
    let form = RegistrationForm {
        password: password_or_prompt(args.password)?,
        name: args.name,
        email: args.email,
        age: args.age,
        gender: Some(args.gender),
        interest: args.interest,
        bio: args.bio,
        profile_image: args.image,
    };
    let outcome = app.auth.register(&form).await?;
    show_outcome(app.presenter.as_ref(), &outcome);
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.auth.logout().await?;
    println!("{}", "Signed out.".green());
    Ok(())
}

pub async fn status(app: &App) -> Result<()> {
    let outcome = app.auth.resume().await?;
    show_outcome(app.presenter.as_ref(), &outcome);
    Ok(())
}

pub async fn callback(app: &App, uri: &str) -> Result<()> {
    if !app.bootstrap.accepts(uri) {
        println!("{}", "Not a SpotiLove sign-in link, ignoring.".bright_black());
        return Ok(());
    }
    let outcome = app.bootstrap.handle_callback(uri).await?;
    show_outcome(app.presenter.as_ref(), &outcome);
    Ok(())
}
