//! Permgate CLI - permission document administration and diagnostics.
//!
//! ```bash
//! permgate roles set MANAGER manager.json
//! permgate token issue u42 MANAGER
//! permgate check <TOKEN> tasks edit
//! ```
//!
//! Settings come from `permgate.toml` and `PERMGATE_*` environment variables;
//! see `permgate --help` for all commands.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use permgate_core::logging::init_logging;
use permgate_core::PermgateConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "permgate", about = "Permgate authorization administration tool", version)]
struct Cli {
    /// Configuration file (defaults to ./permgate.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or replace role permission documents
    Roles {
        #[command(subcommand)]
        command: RolesCommand,
    },
    /// Issue or verify bearer tokens
    Token {
        #[command(subcommand)]
        command: TokenCommand,
    },
    /// Decide whether a token may perform an action on a resource
    Check {
        token: String,
        resource: String,
        action: String,
    },
    /// Project a JSON record (or array of records) for a token
    Project {
        token: String,
        resource: String,
        mode: ProjectMode,
        /// JSON file holding the payload
        file: PathBuf,

        /// Authorize the write as a creation instead of an edit
        #[arg(long)]
        create: bool,
    },
}

#[derive(Subcommand)]
enum RolesCommand {
    /// List roles that have a stored document
    List,
    /// Print a role's document
    Get { role: String },
    /// Replace a role's document with the contents of a JSON file
    Set { role: String, file: PathBuf },
}

#[derive(Subcommand)]
enum TokenCommand {
    /// Issue a signed token
    Issue { user_id: String, role: String },
    /// Verify a token and print its claims
    Verify { token: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProjectMode {
    Read,
    Write,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<PermgateConfig> {
    match path {
        Some(path) => PermgateConfig::load_from(path),
        None => PermgateConfig::load(),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config)?;
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Roles { command } => match command {
            RolesCommand::List => commands::roles::list(&config).await,
            RolesCommand::Get { role } => commands::roles::get(&config, &role).await,
            RolesCommand::Set { role, file } => commands::roles::set(&config, &role, &file).await,
        },
        Commands::Token { command } => match command {
            TokenCommand::Issue { user_id, role } => commands::token::issue(&config, &user_id, &role),
            TokenCommand::Verify { token } => commands::token::verify(&config, &token),
        },
        Commands::Check { token, resource, action } => {
            commands::check::run(&config, &token, &resource, &action).await
        }
        Commands::Project { token, resource, mode, file, create } => {
            commands::project::run(&config, &token, &resource, mode, &file, create).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
