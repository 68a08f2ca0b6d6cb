pub mod backup;
pub mod banks;
pub mod categories;
pub mod demo;
pub mod ingest;
pub mod init;
pub mod parse;
pub mod queue;
pub mod review;
pub mod status;
pub mod transactions;

use clap::{Parser, Subcommand};

use crate::settings::Settings;

/// Ledger rows are scoped per user; an unset name maps to "default".
pub(crate) fn resolve_user(settings: &Settings) -> String {
    let name = settings.user_name.trim();
    if name.is_empty() {
        "default".to_string()
    } else {
        name.to_string()
    }
}

#[derive(Parser)]
#[command(name = "khata", about = "Turns bank SMS alerts into a reviewed transaction ledger.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up khata: choose a data directory and initialize the database.
    Init {
        /// Path for khata data (default: ~/Documents/khata)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Parse a single SMS and print the outcome without recording anything.
    Parse {
        /// The SMS text, quoted
        text: String,
        /// Sender id, e.g. VM-HDFCBK
        #[arg(long)]
        sender: Option<String>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse messages and reconcile them into the queue or the ledger.
    Ingest {
        /// A single SMS text (omit when using --file)
        text: Option<String>,
        /// CSV file of messages: sender,text per row (sender may be blank)
        #[arg(long)]
        file: Option<String>,
        /// Sender id for a single text
        #[arg(long)]
        sender: Option<String>,
        /// Record clean parses directly instead of queueing them
        #[arg(long = "auto-approve")]
        auto_approve: bool,
    },
    /// Inspect and work the review queue.
    Queue {
        #[command(subcommand)]
        command: QueueCommands,
    },
    /// Interactively review pending queue items.
    Review,
    /// List recent transactions.
    Transactions {
        /// Maximum rows to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// List categories.
    Categories,
    /// Show supported banks, their sender ids and pattern counts.
    Banks,
    /// Show current database and summary statistics.
    Status,
    /// Load sample SMS messages to explore khata.
    Demo,
    /// Back up the database.
    Backup {
        /// Output path (default: <data_dir>/backups/khata-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Generate shell completions.
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum QueueCommands {
    /// List queue items.
    List {
        /// Filter by status: pending, approved, rejected, duplicate
        #[arg(long)]
        status: Option<String>,
    },
    /// Approve a pending item into the ledger.
    Approve {
        /// Queue item ID (shown in `khata queue list`)
        id: i64,
        /// Override the amount
        #[arg(long)]
        amount: Option<f64>,
        /// Override the merchant
        #[arg(long)]
        merchant: Option<String>,
        /// Override the category
        #[arg(long)]
        category: Option<String>,
        /// Override the date (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Attach a note
        #[arg(long)]
        notes: Option<String>,
    },
    /// Reject a pending item.
    Reject {
        /// Queue item ID
        id: i64,
    },
}
