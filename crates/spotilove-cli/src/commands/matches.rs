use anyhow::Result;
use colored::Colorize;
use spotilove_application::ChatList;

use crate::app::App;

pub async fn list(app: &App, filter: Option<&str>) -> Result<()> {
    let session = app.require_session().await?;
    let mut chats = ChatList::new(app.api.clone());
    chats.load(&session).await?;

    let shown = chats.filter(filter.unwrap_or_default());
    if shown.is_empty() {
        println!("{}", "No matches yet.".bright_black());
        return Ok(());
    }
    for chat in shown {
        println!("{}  {}", chat.name.bold(), chat.last_message.bright_black());
    }
    Ok(())
}
