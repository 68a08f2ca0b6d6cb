mod banks;
mod classifier;
mod cli;
mod db;
mod error;
mod fmt;
mod models;
mod normalize;
mod parser;
mod queue;
mod settings;
mod tui;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, QueueCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Parse { text, sender, json } => cli::parse::run(&text, sender.as_deref(), json),
        Commands::Ingest {
            text,
            file,
            sender,
            auto_approve,
        } => cli::ingest::run(text, file, sender, auto_approve),
        Commands::Queue { command } => match command {
            QueueCommands::List { status } => cli::queue::list(status),
            QueueCommands::Approve {
                id,
                amount,
                merchant,
                category,
                date,
                notes,
            } => cli::queue::approve(id, amount, merchant, category, date, notes),
            QueueCommands::Reject { id } => cli::queue::reject(id),
        },
        Commands::Review => cli::review::run(),
        Commands::Transactions { limit } => cli::transactions::run(limit),
        Commands::Categories => cli::categories::run(),
        Commands::Banks => cli::banks::run(),
        Commands::Status => cli::status::run(),
        Commands::Demo => cli::demo::run(),
        Commands::Backup { output } => cli::backup::run(output),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "khata", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
