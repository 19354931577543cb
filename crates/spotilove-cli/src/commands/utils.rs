use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use spotilove_application::{BootstrapOutcome, Presenter};
use spotilove_core::navigation::{Navigation, Screen};

/// Reads one line; `None` on Ctrl-C or Ctrl-D.
pub fn prompt(rl: &mut DefaultEditor, label: &str) -> Result<Option<String>> {
    match rl.readline(label) {
        Ok(line) => {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                let _ = rl.add_history_entry(trimmed);
            }
            Ok(Some(trimmed.to_string()))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Prints where the user ended up and the command that continues from there.
pub fn show_navigation(presenter: &dyn Presenter, navigation: &Navigation) {
    if let Some(notice) = &navigation.notice {
        presenter.notify(notice.clone());
    }
    let next = match &navigation.screen {
        Screen::Login => "spotilove login <email>",
        Screen::CompleteProfile { .. } => "spotilove profile --age <age> --gender <gender> --interest <interest>",
        Screen::ArtistSelection { .. } | Screen::SongSelection { .. } => "spotilove music",
        Screen::MainFeed => "spotilove feed",
    };
    println!("{} {}", "Next:".bright_black(), next.bright_cyan());
}

pub fn show_outcome(presenter: &dyn Presenter, outcome: &BootstrapOutcome) {
    match outcome {
        BootstrapOutcome::Ready {
            session, profile, navigation,
        } => {
            println!(
                "{} {} ({})",
                "Signed in as".green(),
                profile.display_name().bold(),
                session.user_email.as_deref().unwrap_or("no email")
            );
            show_navigation(presenter, navigation);
        }
        BootstrapOutcome::SignedOut { navigation } => show_navigation(presenter, navigation),
        BootstrapOutcome::Deferred { error } => {
            println!(
                "{} {}",
                "Could not load your profile:".yellow(),
                error.to_string().yellow()
            );
            println!("{}", "Your session was kept. Run `spotilove status` to try again.".bright_black());
        }
    }
}
