//! CLI Adapter.

mod confirm;
mod proposals;
mod vote;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "shield-vote")]
#[command(version)]
#[command(
    about = "Browse treasury proposals and cast confirmed, single-use votes",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./shield-vote.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List proposals
    #[clap(visible_alias = "ls")]
    List {
        /// Only proposals with this status (active, passed, rejected, encrypted)
        #[arg(short, long)]
        status: Option<String>,
        /// Only encrypted proposals
        #[arg(long, conflicts_with = "public")]
        encrypted: bool,
        /// Only proposals with visible tallies
        #[arg(long, conflicts_with = "encrypted")]
        public: bool,
    },
    /// Show one proposal
    Show {
        /// Proposal id (e.g. PROP-001)
        id: String,
        /// Also report whether this voter has voted
        #[arg(long)]
        voter: Option<String>,
    },
    /// Print treasury statistics
    Stats,
    /// Cast a vote after explicit confirmation
    #[clap(visible_alias = "v")]
    Vote {
        /// Proposal id (e.g. PROP-001)
        id: String,
        /// Voter identity (wallet address or handle)
        #[arg(long)]
        voter: String,
        /// for or against
        #[arg(long)]
        choice: String,
        /// Confirm without prompting by repeating the proposal id
        #[arg(long, value_name = "PROPOSAL_ID")]
        confirm: Option<String>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result: Result<(), AppError> = match cli.command {
        Commands::List { status, encrypted, public } => {
            proposals::run_list(config, status, encrypted, public)
        }
        Commands::Show { id, voter } => proposals::run_show(config, &id, voter.as_deref()),
        Commands::Stats => proposals::run_stats(config),
        Commands::Vote { id, voter, choice, confirm } => {
            vote::run_vote(config, &id, &voter, &choice, confirm.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
