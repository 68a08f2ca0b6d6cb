use std::path::PathBuf;

use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::cli::ingest::{ingest_batch, IngestSummary};
use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{load_settings, Settings};

// (sender id, message text); an empty sender means the message arrived
// without one. The corpus covers every bank rule set, one deliberate repeat
// and two fee messages that parse ambiguously.
const SAMPLE_MESSAGES: &[(&str, &str)] = &[
    (
        "VM-HDFCBK",
        "Rs.749.00 debited from A/c XX3341 on 12-08-26 by UPI/SWIGGY BANGALORE",
    ),
    (
        "VM-HDFCBK",
        "Rs.82,500.00 credited to A/c XX3341 on 01-08-26 by NEFT/ACME TECHNOLOGIES PVT LTD",
    ),
    (
        "AD-ICICIB",
        "INR 1,150.00 paid to BIGBASKET on 02-08-26. Ref No: 77812. Avl Bal INR 23,410.55",
    ),
    ("BZ-SBIIN", "A/c XX9021 debited by Rs.3,200.00 on 03-08-26"),
    (
        "AX-AXISBK",
        "Rs.180.00 paid to UBER INDIA on 04-08-26 Ref No: AXI2231",
    ),
    // Same purchase delivered twice; lands in the queue as a repeat.
    (
        "VM-HDFCBK",
        "Rs.749.00 debited from A/c XX3341 on 12-08-26 by UPI/SWIGGY BANGALORE",
    ),
    ("", "Convenience fee paid 29, Spent INR 1,299 on 07-08-26"),
    ("BZ-SBIIN", "Rs.1,200.00 credited to A/c XX9021 on 06-08-26"),
    (
        "AX-AXISBK",
        "Rs.349.00 debited from A/c XX5510 on 05-08-26 UPI/NETFLIX",
    ),
    ("BZ-SBIIN", "UPI/BLINKIT Rs.465.00 debited Avl Bal Rs.8,770.10"),
    ("", "Late fee paid 59, Spent INR 899 on 09-08-26"),
];

fn corpus_checksum() -> String {
    let mut hasher = Sha256::new();
    for (sender, text) in SAMPLE_MESSAGES {
        hasher.update(sender.as_bytes());
        hasher.update(text.as_bytes());
    }
    hex::encode(hasher.finalize())
}

fn insert_demo_data(conn: &Connection, user: &str, settings: &Settings) -> Result<IngestSummary> {
    let messages: Vec<(Option<String>, String)> = SAMPLE_MESSAGES
        .iter()
        .map(|(sender, text)| {
            let sender = if sender.is_empty() {
                None
            } else {
                Some(sender.to_string())
            };
            (sender, text.to_string())
        })
        .collect();
    ingest_batch(conn, user, &messages, true, settings)
}

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = PathBuf::from(&settings.data_dir).join("khata.db");

    if !db_path.exists() {
        eprintln!("No database found. Run `khata init` first.");
        std::process::exit(1);
    }

    let conn = get_connection(&db_path)?;
    init_db(&conn)?;

    // Idempotency guard
    let checksum = corpus_checksum();
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM ingests WHERE checksum = ?1)",
        [checksum.as_str()],
        |r| r.get(0),
    )?;
    if exists {
        println!("Demo data already loaded.");
        return Ok(());
    }

    let user = crate::cli::resolve_user(&settings);
    let summary = insert_demo_data(&conn, &user, &settings)?;

    conn.execute(
        "INSERT INTO ingests (filename, checksum, message_count, parsed_count) VALUES ('demo', ?1, ?2, ?3)",
        rusqlite::params![
            checksum,
            summary.total as i64,
            (summary.total - summary.unparsed) as i64,
        ],
    )?;

    println!("Demo data loaded!");
    println!("  Messages:  {}", summary.total);
    println!("  Recorded:  {}", summary.recorded);
    println!("  Queued:    {}", summary.queued);
    println!();
    println!("Try these next:");
    println!("  khata transactions");
    println!("  khata queue list");
    println!("  khata review");
    println!("  khata status");

    Ok(())
}
