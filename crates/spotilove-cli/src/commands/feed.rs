use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use spotilove_application::SwipeFeed;
use spotilove_core::profile::SwipeCandidate;

use super::utils::prompt;
use crate::app::App;

fn print_card(candidate: &SwipeCandidate) {
    println!();
    println!("{}", candidate.card_title().bright_magenta().bold());
    println!("{}", candidate.location_label().bright_black());
    let tags = candidate.genre_tags();
    if !tags.is_empty() {
        println!("{}", tags.join(" · ").cyan());
    }
    if let Some(bio) = candidate.bio.as_deref().filter(|b| !b.is_empty()) {
        println!("{}", bio);
    }
}

pub async fn run(app: &App) -> Result<()> {
    let session = app.require_session().await?;
    let feed = SwipeFeed::new(
        app.api.clone(),
        app.presenter.clone(),
        &session,
        app.config.candidate_batch_size,
    );
    feed.refill().await?;

    let mut rl = DefaultEditor::new()?;
    println!("{}", "=== SpotiLove ===".bright_magenta().bold());
    println!("{}", "'l' to like, 'd' to pass, 'q' to quit.".bright_black());

    let mut current = feed.current().await;
    loop {
        let Some(candidate) = &current else {
            println!("{}", "No more people nearby. Check back later!".bright_black());
            return Ok(());
        };
        print_card(candidate);

        let Some(line) = prompt(&mut rl, ">> ")? else {
            return Ok(());
        };
        let result = match line.as_str() {
            "l" | "like" => feed.like().await,
            "d" | "dislike" | "pass" => feed.dislike().await,
            "q" | "quit" | "exit" => return Ok(()),
            _ => {
                println!("{}", "Unknown command".bright_black());
                continue;
            }
        };
        // Failures are already reported; the same card is shown again.
        if let Ok(next) = result {
            current = next;
        }
    }
}
