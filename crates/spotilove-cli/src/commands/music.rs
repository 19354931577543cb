use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use spotilove_application::{ArtistChoice, ArtistSelection, SongChoice, SongSelection};
use spotilove_core::music::PreviewSource;
use spotilove_core::navigation::Screen;

use super::utils::{prompt, show_navigation};
use crate::app::App;

fn print_artists(choices: &[ArtistChoice]) {
    for (i, choice) in choices.iter().enumerate() {
        let mark = if choice.selected { "[x]".green() } else { "[ ]".normal() };
        println!("{:>3} {} {}", i + 1, mark, choice.artist.name);
    }
}

fn print_songs(choices: &[SongChoice]) {
    for (i, choice) in choices.iter().enumerate() {
        let mark = if choice.selected { "[x]".green() } else { "[ ]".normal() };
        println!("{:>3} {} {}", i + 1, mark, choice.track.label());
    }
}

/// Parses "3" or "1 4 7" into zero-based indexes.
fn indexes(input: &str) -> Vec<usize> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map(|n| n - 1)
        .collect()
}

pub async fn select(app: &App) -> Result<()> {
    let session = app.require_session().await?;
    let mut rl = DefaultEditor::new()?;

    let mut artists = ArtistSelection::new(
        app.api.clone(),
        app.presenter.clone(),
        session.user_id,
        &app.config,
    );
    print_artists(artists.load_popular().await?);
    println!(
        "{}",
        "Numbers toggle artists, '/search <name>' searches, '/done' continues.".bright_black()
    );

    let navigation = loop {
        let Some(line) = prompt(&mut rl, "artists> ")? else {
            return Ok(());
        };
        if line == "/done" {
            match artists.continue_to_songs() {
                Ok(navigation) => break navigation,
                Err(e) => eprintln!("{}", e.to_string().red()),
            }
        } else if let Some(query) = line.strip_prefix("/search") {
            if let Ok(shown) = artists.search(query).await {
                print_artists(shown);
            }
        } else {
            let names: Vec<String> = indexes(&line)
                .into_iter()
                .filter_map(|i| artists.shown().get(i).map(|c| c.artist.name.clone()))
                .collect();
            for name in names {
                artists.toggle(&name);
            }
            print_artists(artists.shown());
            println!("{} selected", artists.selected().len());
        }
    };

    let Screen::SongSelection { user_id, artists } = navigation.screen else {
        return Ok(());
    };
    let mut songs = SongSelection::new(
        app.api.clone(),
        app.presenter.clone(),
        user_id,
        artists,
        app.config.top_tracks_limit,
    );
    print_songs(songs.load_tracks().await);
    println!(
        "{}",
        "Numbers toggle songs, '/play <n>' shows a preview, '/done' saves.".bright_black()
    );

    loop {
        let Some(line) = prompt(&mut rl, "songs> ")? else {
            return Ok(());
        };
        if line == "/done" {
            match songs.submit().await {
                Ok(navigation) => {
                    show_navigation(app.presenter.as_ref(), &navigation);
                    return Ok(());
                }
                Err(e) if e.is_validation() => eprintln!("{}", e.to_string().red()),
                Err(_) => {}
            }
        } else if let Some(arg) = line.strip_prefix("/play") {
            match indexes(arg).first().and_then(|&i| songs.preview(i)) {
                Some(PreviewSource::Spotify(url)) | Some(PreviewSource::Deezer(url)) => {
                    println!("Preview: {}", url.bright_cyan())
                }
                Some(PreviewSource::External {
                    youtube_search,
                    spotify_search,
                }) => {
                    println!("No preview clip. Try:");
                    println!("  {}", youtube_search.bright_cyan());
                    println!("  {}", spotify_search.bright_cyan());
                }
                None => println!("{}", "No such song".bright_black()),
            }
        } else {
            let picks: Vec<(String, String)> = indexes(&line)
                .into_iter()
                .filter_map(|i| songs.songs().get(i))
                .map(|c| (c.track.title.clone(), c.track.artist.clone()))
                .collect();
            for (title, artist) in picks {
                songs.toggle(&title, &artist);
            }
            print_songs(songs.songs());
            println!("{} selected", songs.selected().count());
        }
    }
}
