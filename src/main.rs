use clap::{Parser, Subcommand};
use std::process::ExitCode;

use turnos::commands::{
    cmd_board, cmd_config_get, cmd_config_set, cmd_config_show, cmd_demo, cmd_ls,
};
use turnos::types::{TicketStatus, VALID_STATUSES};

#[derive(Parser)]
#[command(name = "turnos")]
#[command(about = "Live queue display for small-business counters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the fullscreen queue board (default)
    #[command(visible_alias = "b")]
    Board,

    /// Run the board against a synthetic in-memory queue
    Demo,

    /// Print the current queue snapshot and exit
    #[command(visible_alias = "l")]
    Ls {
        /// Only show tickets with this status
        #[arg(short, long, value_parser = parse_status)]
        status: Option<TicketStatus>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Print a single value (dot notation, e.g. store.url)
    Get { key: String },

    /// Set a configuration value
    Set { key: String, value: String },
}

fn parse_status(s: &str) -> Result<TicketStatus, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid status. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Commands::Board) => cmd_board().await,
        Some(Commands::Demo) => cmd_demo().await,
        Some(Commands::Ls { status }) => cmd_ls(status).await,
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(),
            ConfigCommands::Get { key } => cmd_config_get(&key),
            ConfigCommands::Set { key, value } => cmd_config_set(&key, &value),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
