//! Terminal rendering of notices and retry prompts.

use async_trait::async_trait;
use colored::Colorize;
use rustyline::DefaultEditor;
use spotilove_application::Presenter;
use spotilove_core::navigation::Notice;
use tracing::warn;

pub struct TerminalPresenter;

#[async_trait]
impl Presenter for TerminalPresenter {
    fn notify(&self, notice: Notice) {
        let title = notice.title().to_string();
        let message = notice.message();
        if notice.is_error() {
            eprintln!("{} {}", format!("[{}]", title).red().bold(), message.red());
        } else {
            println!("{} {}", format!("[{}]", title).bright_green().bold(), message);
        }
    }

    async fn confirm_retry(&self, title: &str, message: &str) -> bool {
        println!("{} {}", format!("[{}]", title).yellow().bold(), message.yellow());
        let answer = tokio::task::spawn_blocking(|| {
            let mut rl = DefaultEditor::new()?;
            rl.readline("Retry? [y/N] ")
        })
        .await;

        match answer {
            Ok(Ok(line)) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(Err(e)) => {
                warn!("Retry prompt closed: {}", e);
                false
            }
            Err(e) => {
                warn!("Retry prompt task failed: {}", e);
                false
            }
        }
    }
}
