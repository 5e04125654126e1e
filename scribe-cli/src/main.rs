use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use url::Url;

mod commands;
mod config;
mod context;
mod log_level;
mod logging;
mod notify;
mod render;

use commands::{AdminCommand, CommentsCommand, PostsCommand, ProfileArgs, RegisterArgs};
use config::ConfigToml;
use context::Context;
use log_level::LogLevel;

#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Command line client for the Scribe blog API")]
struct Cli {
    /// Configuration file. Defaults to `<config dir>/scribe/config.toml`.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API base URL, e.g. `http://localhost:5000/api`.
    #[arg(long, global = true, env = "SCRIBE_API_URL")]
    base_url: Option<Url>,

    /// Default log level, overridden by `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email and password.
    Login {
        email: String,
        /// Prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account.
    Register(RegisterArgs),
    /// Sign out and forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Update your profile.
    Profile(ProfileArgs),
    /// Change your password.
    Password,
    /// Exchange the stored refresh token for a new access token.
    Refresh,
    /// Request a password reset email.
    ForgotPassword { email: String },
    /// Set a new password with the token from a reset email.
    ResetPassword { token: String },
    /// Browse and manage posts.
    #[command(subcommand)]
    Posts(PostsCommand),
    /// Browse and manage comments.
    #[command(subcommand)]
    Comments(CommentsCommand),
    /// Administration.
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Render a markdown file to sanitized HTML.
    Preview {
        file: PathBuf,
        /// Print the plain text instead of HTML.
        #[arg(long)]
        text: bool,
    },
    /// Apply a toolbar action to a range of a markdown file in place.
    Format(commands::FormatArgs),
    /// Embed an image into a markdown file as a data URL.
    EmbedImage {
        file: PathBuf,
        image: PathBuf,
        /// Character offset to insert at. Defaults to the end.
        #[arg(long)]
        at: Option<usize>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        if !e.is::<notify::Reported>() {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ConfigToml::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.api.base_url = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    logging::init_tracing_logs(&config.logging)?;
    tracing::debug!(base_url = %config.api.base_url, "Loaded configuration");

    let ctx = Context::from_config(&config).await?;
    match cli.command {
        Command::Login { email, password } => commands::auth::login(&ctx, &email, password).await,
        Command::Register(args) => commands::auth::register(&ctx, args).await,
        Command::Logout => commands::auth::logout(&ctx).await,
        Command::Whoami => commands::auth::whoami(&ctx).await,
        Command::Profile(args) => commands::auth::update_profile(&ctx, args).await,
        Command::Password => commands::auth::change_password(&ctx).await,
        Command::Refresh => commands::auth::refresh(&ctx).await,
        Command::ForgotPassword { email } => commands::auth::forgot_password(&ctx, &email).await,
        Command::ResetPassword { token } => commands::auth::reset_password(&ctx, &token).await,
        Command::Posts(cmd) => commands::posts::run(&ctx, cmd).await,
        Command::Comments(cmd) => commands::comments::run(&ctx, cmd).await,
        Command::Admin(cmd) => commands::admin::run(&ctx, cmd).await,
        Command::Preview { file, text } => commands::editor::preview(&file, text).await,
        Command::Format(args) => commands::editor::format(args).await,
        Command::EmbedImage { file, image, at } => {
            commands::editor::embed_image(&file, &image, at).await
        }
    }
}
