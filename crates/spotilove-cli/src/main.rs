use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;
mod presenter;

#[derive(Parser)]
#[command(name = "spotilove")]
#[command(about = "SpotiLove - find matches by music taste", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config.toml)
    #[arg(long, global = true, env = "SPOTILOVE_BASE_URL")]
    base_url: Option<String>,

    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        email: String,
        #[arg(long, env = "SPOTILOVE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long)]
        remember_me: bool,
    },
    /// Create an account
    Register(commands::auth::RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Resume the stored session and show where it leads
    Status,
    /// Print the Spotify sign-in URL
    OauthUrl,
    /// Complete sign-in from a spotilove://auth link
    Callback { uri: String },
    /// Fill in age, gender, interest and bio
    Profile(commands::profile::ProfileArgs),
    /// Pick favourite artists and songs
    Music,
    /// Swipe through candidates
    Feed,
    /// List matches
    Matches {
        /// Filter by name or message
        #[arg(long)]
        filter: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "spotilove=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let app = app::App::build(cli.config, cli.base_url, cli.ephemeral)?;

    match cli.command {
        Commands::Login {
            email,
            password,
            remember_me,
        } => commands::auth::login(&app, &email, password, remember_me).await?,
        Commands::Register(args) => commands::auth::register(&app, args).await?,
        Commands::Logout => commands::auth::logout(&app).await?,
        Commands::Status => commands::auth::status(&app).await?,
        Commands::OauthUrl => println!("{}", app.auth.oauth_login_url()),
        Commands::Callback { uri } => commands::auth::callback(&app, &uri).await?,
        Commands::Profile(args) => commands::profile::complete(&app, args).await?,
        Commands::Music => commands::music::select(&app).await?,
        Commands::Feed => commands::feed::run(&app).await?,
        Commands::Matches { filter } => commands::matches::list(&app, filter.as_deref()).await?,
    }

    Ok(())
}
