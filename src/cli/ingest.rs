use std::path::Path;

use colored::Colorize;
use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::db::get_connection;
use crate::error::{KhataError, Result};
use crate::fmt::{money, percent};
use crate::models::QueueStatus;
use crate::parser;
use crate::queue::{submit, QueueConfig, Submitted};
use crate::settings::{get_data_dir, load_settings, Settings};

pub fn run(
    text: Option<String>,
    file: Option<String>,
    sender: Option<String>,
    auto_approve: bool,
) -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&get_data_dir().join("khata.db"))?;
    let user = crate::cli::resolve_user(&settings);
    let auto = auto_approve || settings.auto_approve;

    match (text, file) {
        (Some(t), None) => ingest_one(&conn, &user, &t, sender.as_deref(), auto, &settings),
        (None, Some(f)) => ingest_file(&conn, &user, Path::new(&f), auto, &settings),
        (Some(_), Some(_)) => Err(KhataError::Other(
            "pass a message or --file, not both".to_string(),
        )),
        (None, None) => Err(KhataError::Other("pass a message or --file".to_string())),
    }
}

fn queue_config(settings: &Settings) -> QueueConfig {
    QueueConfig {
        duplicate_window_hours: settings.duplicate_window_hours,
        review_threshold: settings.review_threshold,
    }
}

fn ingest_one(
    conn: &Connection,
    user: &str,
    text: &str,
    sender: Option<&str>,
    auto: bool,
    settings: &Settings,
) -> Result<()> {
    let outcome = parser::parse(text, sender, settings.salary_threshold)?;
    let cfg = queue_config(settings);
    match submit(conn, user, &outcome, auto, &cfg)? {
        Submitted::Transaction(id) => {
            println!(
                "{} transaction #{id}: {} {} ({})",
                "Recorded".green(),
                money(outcome.amount),
                outcome.merchant,
                outcome.category
            );
        }
        Submitted::Queued {
            id,
            status: QueueStatus::Duplicate,
        } => {
            println!(
                "{} queue item #{id}: matches an existing transaction ({} {})",
                "Duplicate".yellow(),
                money(outcome.amount),
                outcome.merchant
            );
        }
        Submitted::Queued { id, .. } => {
            println!(
                "{} #{id} for review: {} {} ({}, confidence {})",
                "Queued".cyan(),
                money(outcome.amount),
                outcome.merchant,
                outcome.category,
                percent(outcome.confidence)
            );
        }
    }
    Ok(())
}

pub(crate) struct IngestSummary {
    pub total: usize,
    pub recorded: usize,
    pub queued: usize,
    pub duplicates: usize,
    pub unparsed: usize,
}

/// Parse and submit a batch. Unparseable messages are counted and skipped;
/// storage errors abort the batch.
pub(crate) fn ingest_batch(
    conn: &Connection,
    user: &str,
    messages: &[(Option<String>, String)],
    auto: bool,
    settings: &Settings,
) -> Result<IngestSummary> {
    let cfg = queue_config(settings);
    let mut summary = IngestSummary {
        total: messages.len(),
        recorded: 0,
        queued: 0,
        duplicates: 0,
        unparsed: 0,
    };
    for (sender, text) in messages {
        match parser::parse(text, sender.as_deref(), settings.salary_threshold) {
            Ok(outcome) => match submit(conn, user, &outcome, auto, &cfg)? {
                Submitted::Transaction(_) => summary.recorded += 1,
                Submitted::Queued {
                    status: QueueStatus::Duplicate,
                    ..
                } => summary.duplicates += 1,
                Submitted::Queued { .. } => summary.queued += 1,
            },
            Err(KhataError::EmptyInput) | Err(KhataError::NoMatch) => summary.unparsed += 1,
            Err(e) => return Err(e),
        }
    }
    Ok(summary)
}

fn ingest_file(
    conn: &Connection,
    user: &str,
    path: &Path,
    auto: bool,
    settings: &Settings,
) -> Result<()> {
    let checksum = compute_checksum(path)?;
    {
        let mut stmt = conn.prepare("SELECT 1 FROM ingests WHERE checksum = ?1")?;
        if stmt.exists([checksum.as_str()])? {
            println!("This file has already been ingested (duplicate checksum).");
            return Ok(());
        }
    }

    let messages = read_messages(path)?;
    let summary = ingest_batch(conn, user, &messages, auto, settings)?;

    conn.execute(
        "INSERT INTO ingests (filename, checksum, message_count, parsed_count) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            path.file_name().and_then(|n| n.to_str()).unwrap_or(""),
            checksum,
            summary.total as i64,
            (summary.total - summary.unparsed) as i64,
        ],
    )?;

    println!(
        "{} messages: {} recorded, {} queued, {} duplicates, {} unparsed",
        summary.total,
        summary.recorded.to_string().green(),
        summary.queued.to_string().cyan(),
        summary.duplicates.to_string().yellow(),
        summary.unparsed.to_string().red(),
    );
    if summary.queued > 0 {
        println!("Run `khata review` to work the queue.");
    }
    Ok(())
}

/// Rows are `sender,text`. A blank sender column means no sender id, and a
/// row with a single column is treated as bare text. Unquoted commas inside
/// the message body are tolerated by joining the trailing columns back up.
fn read_messages(path: &Path) -> Result<Vec<(Option<String>, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut messages = Vec::new();
    for record in reader.records() {
        let record = record?;
        let (sender, text) = match record.len() {
            0 => continue,
            1 => (None, record[0].to_string()),
            _ => {
                let s = record[0].trim().to_string();
                let text = record.iter().skip(1).collect::<Vec<_>>().join(",");
                (if s.is_empty() { None } else { Some(s) }, text)
            }
        };
        if text.trim().is_empty() {
            continue;
        }
        messages.push((sender, text));
    }
    Ok(messages)
}

fn compute_checksum(path: &Path) -> Result<String> {
    let data = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}
