use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod inputs;
mod session;
mod view;

use commands::configure::handle_configure;
use commands::session::build_session;

#[derive(Parser)]
#[command(author, version, about = "Chat assistant for the operations dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Set the base URL of the agent API
    Configure {
        /// Base URL, e.g. https://your-api-url.com (prompted for if omitted)
        url: Option<String>,
    },
    /// Start an interactive chat session (the default)
    Session {
        /// Redraw the full transcript each turn instead of the compact widget
        #[arg(long)]
        page: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Session { page: false }) {
        Command::Configure { url } => handle_configure(url),
        Command::Session { page } => {
            let mut session = build_session(page)?;
            session.start().await
        }
    }
}
