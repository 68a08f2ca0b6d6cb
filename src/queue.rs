use chrono::{Duration, SecondsFormat};
use rusqlite::Connection;

use crate::error::{KhataError, Result};
use crate::models::{ParseOutcome, QueueItem, QueueStatus};

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Where a submitted parse ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Submitted {
    /// Recorded straight into the ledger.
    Transaction(i64),
    /// Held in the review queue.
    Queued { id: i64, status: QueueStatus },
}

pub struct QueueConfig {
    pub duplicate_window_hours: i64,
    pub review_threshold: f64,
}

/// An existing transaction with the same amount and merchant inside the
/// window counts as a duplicate. A failed probe aborts the submit; it must
/// never pass as "not a duplicate".
fn has_duplicate(
    conn: &Connection,
    user_id: &str,
    outcome: &ParseOutcome,
    window_hours: i64,
) -> Result<bool> {
    let start =
        (outcome.date - Duration::hours(window_hours)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let end =
        (outcome.date + Duration::hours(window_hours)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM transactions WHERE user_id = ?1 AND amount = ?2 AND merchant = ?3 AND date BETWEEN ?4 AND ?5",
    )?;
    let found = stmt.exists(rusqlite::params![
        user_id,
        outcome.amount,
        outcome.merchant,
        start,
        end
    ])?;
    Ok(found)
}

/// Routes a parse into the ledger or the review queue.
///
/// Duplicates without auto-approve land in the queue already closed as
/// `duplicate`. Auto-approve writes a transaction directly, unless rival
/// rule sets matched with different amounts and confidence sits below the
/// review threshold, in which case the item is queued for a human.
pub fn submit(
    conn: &Connection,
    user_id: &str,
    outcome: &ParseOutcome,
    auto_approve: bool,
    cfg: &QueueConfig,
) -> Result<Submitted> {
    let duplicate = has_duplicate(conn, user_id, outcome, cfg.duplicate_window_hours)?;
    let ambiguous = !outcome.candidates.is_empty() && outcome.confidence < cfg.review_threshold;
    let date = outcome.date.to_rfc3339_opts(SecondsFormat::Secs, true);
    let parsed_json = serde_json::to_string(outcome)?;

    if auto_approve && !duplicate && !ambiguous {
        conn.execute(
            "INSERT INTO transactions (user_id, date, amount, direction, merchant, category, source, raw_sms, parsed_json) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'sms', ?7, ?8)",
            rusqlite::params![
                user_id,
                date,
                outcome.amount,
                outcome.direction.as_str(),
                outcome.merchant,
                outcome.category,
                outcome.raw_sms,
                parsed_json,
            ],
        )?;
        return Ok(Submitted::Transaction(conn.last_insert_rowid()));
    }

    let status = if duplicate && !auto_approve {
        QueueStatus::Duplicate
    } else {
        QueueStatus::Pending
    };
    conn.execute(
        "INSERT INTO queue_items (user_id, raw_sms, bank_name, amount, direction, merchant, date, category, confidence, status, parsed_json) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            user_id,
            outcome.raw_sms,
            outcome.bank_name,
            outcome.amount,
            outcome.direction.as_str(),
            outcome.merchant,
            date,
            outcome.category,
            outcome.confidence,
            status.as_str(),
            parsed_json,
        ],
    )?;
    Ok(Submitted::Queued {
        id: conn.last_insert_rowid(),
        status,
    })
}

// ---------------------------------------------------------------------------
// Approve / reject
// ---------------------------------------------------------------------------

/// Caller edits applied on top of the suggested transaction at approval.
#[derive(Debug, Default, Clone)]
pub struct ApproveOverrides {
    pub amount: Option<f64>,
    pub merchant: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// Flips a pending item to approved and writes the ledger row, as one unit.
/// Returns the new transaction id.
pub fn approve(conn: &Connection, item_id: i64, overrides: &ApproveOverrides) -> Result<i64> {
    let item = get_queue_item(conn, item_id)?;

    if let Some(name) = &overrides.category {
        let mut stmt = conn.prepare_cached("SELECT 1 FROM categories WHERE name = ?1")?;
        if !stmt.exists([name.as_str()])? {
            return Err(KhataError::UnknownCategory(name.clone()));
        }
    }

    let tx = conn.unchecked_transaction()?;
    let flipped = tx.execute(
        "UPDATE queue_items SET status = 'approved', updated_at = datetime('now') WHERE id = ?1 AND status = 'pending'",
        [item_id],
    )?;
    if flipped == 0 {
        return Err(KhataError::InvalidStateTransition(format!(
            "cannot approve queue item {item_id} in '{}' state",
            item.status
        )));
    }
    tx.execute(
        "INSERT INTO transactions (user_id, date, amount, direction, merchant, category, source, notes, raw_sms, parsed_json) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'sms', ?7, ?8, ?9)",
        rusqlite::params![
            item.user_id,
            overrides.date.as_deref().unwrap_or(&item.date),
            overrides.amount.unwrap_or(item.amount),
            item.direction,
            overrides.merchant.as_deref().unwrap_or(&item.merchant),
            overrides.category.as_deref().unwrap_or(&item.category),
            overrides.notes,
            item.raw_sms,
            item.parsed_json,
        ],
    )?;
    let txn_id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(txn_id)
}

/// Only legal from pending. No transaction is written.
pub fn reject(conn: &Connection, item_id: i64) -> Result<()> {
    let item = get_queue_item(conn, item_id)?;
    let flipped = conn.execute(
        "UPDATE queue_items SET status = 'rejected', updated_at = datetime('now') WHERE id = ?1 AND status = 'pending'",
        [item_id],
    )?;
    if flipped == 0 {
        return Err(KhataError::InvalidStateTransition(format!(
            "cannot reject queue item {item_id} in '{}' state",
            item.status
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

const ITEM_COLUMNS: &str = "id, user_id, raw_sms, bank_name, amount, direction, merchant, date, category, confidence, status, parsed_json, created_at, updated_at";

fn item_from_row(row: &rusqlite::Row) -> rusqlite::Result<QueueItem> {
    Ok(QueueItem {
        id: row.get(0)?,
        user_id: row.get(1)?,
        raw_sms: row.get(2)?,
        bank_name: row.get(3)?,
        amount: row.get(4)?,
        direction: row.get(5)?,
        merchant: row.get(6)?,
        date: row.get(7)?,
        category: row.get(8)?,
        confidence: row.get(9)?,
        status: row.get(10)?,
        parsed_json: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

pub fn get_queue_item(conn: &Connection, item_id: i64) -> Result<QueueItem> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM queue_items WHERE id = ?1");
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.query_row([item_id], item_from_row)
        .map_err(|_| KhataError::UnknownQueueItem(item_id))
}

pub fn list_queue(
    conn: &Connection,
    user_id: &str,
    status: Option<QueueStatus>,
) -> Result<Vec<QueueItem>> {
    let items = match status {
        Some(s) => {
            let sql = format!(
                "SELECT {ITEM_COLUMNS} FROM queue_items WHERE user_id = ?1 AND status = ?2 ORDER BY created_at DESC, id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params![user_id, s.as_str()], item_from_row)?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        }
        None => {
            let sql = format!(
                "SELECT {ITEM_COLUMNS} FROM queue_items WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([user_id], item_from_row)?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(items)
}

pub fn list_pending(conn: &Connection, user_id: &str) -> Result<Vec<QueueItem>> {
    list_queue(conn, user_id, Some(QueueStatus::Pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, Direction, ParseMetadata};
    use chrono::{DateTime, TimeZone, Utc};

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = crate::db::get_connection(&dir.path().join("test.db")).unwrap();
        crate::db::init_db(&conn).unwrap();
        (dir, conn)
    }

    fn cfg() -> QueueConfig {
        QueueConfig {
            duplicate_window_hours: 24,
            review_threshold: 0.9,
        }
    }

    fn sample_outcome(amount: f64, merchant: &str, date: DateTime<Utc>) -> ParseOutcome {
        ParseOutcome {
            amount,
            direction: Direction::Expense,
            merchant: merchant.to_string(),
            date,
            category: "Food & Dining".to_string(),
            confidence: 0.9,
            bank_name: "HDFC".to_string(),
            raw_sms: format!("Rs.{amount} debited by UPI/{merchant}"),
            metadata: ParseMetadata::default(),
            candidates: Vec::new(),
        }
    }

    fn noon(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn txn_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_submit_queues_without_auto_approve() {
        let (_dir, conn) = test_db();
        let out = sample_outcome(500.0, "SWIGGY", noon(10, 12));
        let result = submit(&conn, "default", &out, false, &cfg()).unwrap();
        match result {
            Submitted::Queued { id, status } => {
                assert_eq!(status, QueueStatus::Pending);
                let item = get_queue_item(&conn, id).unwrap();
                assert_eq!(item.merchant, "SWIGGY");
                assert_eq!(item.status, "pending");
            }
            other => panic!("expected queued, got {other:?}"),
        }
        assert_eq!(txn_count(&conn), 0);
    }

    #[test]
    fn test_submit_auto_approve_writes_transaction() {
        let (_dir, conn) = test_db();
        let out = sample_outcome(500.0, "SWIGGY", noon(10, 12));
        let result = submit(&conn, "default", &out, true, &cfg()).unwrap();
        let id = match result {
            Submitted::Transaction(id) => id,
            other => panic!("expected transaction, got {other:?}"),
        };
        let source: String = conn
            .query_row("SELECT source FROM transactions WHERE id = ?1", [id], |r| r.get(0))
            .unwrap();
        assert_eq!(source, "sms");
    }

    #[test]
    fn test_duplicate_an_hour_apart_is_flagged() {
        let (_dir, conn) = test_db();
        submit(&conn, "default", &sample_outcome(500.0, "SWIGGY", noon(10, 12)), true, &cfg()).unwrap();
        let result = submit(&conn, "default", &sample_outcome(500.0, "SWIGGY", noon(10, 13)), false, &cfg()).unwrap();
        match result {
            Submitted::Queued { status, .. } => assert_eq!(status, QueueStatus::Duplicate),
            other => panic!("expected queued duplicate, got {other:?}"),
        }
        assert_eq!(txn_count(&conn), 1);
    }

    #[test]
    fn test_duplicate_under_auto_approve_stays_pending() {
        let (_dir, conn) = test_db();
        submit(&conn, "default", &sample_outcome(500.0, "SWIGGY", noon(10, 12)), true, &cfg()).unwrap();
        let result = submit(&conn, "default", &sample_outcome(500.0, "SWIGGY", noon(10, 13)), true, &cfg()).unwrap();
        match result {
            Submitted::Queued { status, .. } => assert_eq!(status, QueueStatus::Pending),
            other => panic!("expected queued, got {other:?}"),
        }
        assert_eq!(txn_count(&conn), 1);
    }

    #[test]
    fn test_thirty_hours_apart_is_not_a_duplicate() {
        let (_dir, conn) = test_db();
        submit(&conn, "default", &sample_outcome(500.0, "SWIGGY", noon(10, 6)), true, &cfg()).unwrap();
        let result = submit(&conn, "default", &sample_outcome(500.0, "SWIGGY", noon(11, 12)), true, &cfg()).unwrap();
        assert!(matches!(result, Submitted::Transaction(_)));
        assert_eq!(txn_count(&conn), 2);
    }

    #[test]
    fn test_duplicate_scoped_to_user() {
        let (_dir, conn) = test_db();
        submit(&conn, "asha", &sample_outcome(500.0, "SWIGGY", noon(10, 12)), true, &cfg()).unwrap();
        let result = submit(&conn, "ravi", &sample_outcome(500.0, "SWIGGY", noon(10, 13)), true, &cfg()).unwrap();
        assert!(matches!(result, Submitted::Transaction(_)));
    }

    #[test]
    fn test_ambiguous_parse_is_queued_despite_auto_approve() {
        let (_dir, conn) = test_db();
        let mut out = sample_outcome(89.0, "Unknown", noon(10, 12));
        out.confidence = 0.8;
        out.candidates.push(Candidate {
            bank_name: "Generic".to_string(),
            amount: 15.0,
        });
        let result = submit(&conn, "default", &out, true, &cfg()).unwrap();
        match result {
            Submitted::Queued { status, .. } => assert_eq!(status, QueueStatus::Pending),
            other => panic!("expected queued, got {other:?}"),
        }
        assert_eq!(txn_count(&conn), 0);
    }

    #[test]
    fn test_approve_pending_creates_matching_transaction() {
        let (_dir, conn) = test_db();
        let out = sample_outcome(500.0, "SWIGGY", noon(10, 12));
        let id = match submit(&conn, "default", &out, false, &cfg()).unwrap() {
            Submitted::Queued { id, .. } => id,
            other => panic!("expected queued, got {other:?}"),
        };
        let txn_id = approve(&conn, id, &ApproveOverrides::default()).unwrap();
        let (amount, merchant, category, source): (f64, String, String, String) = conn
            .query_row(
                "SELECT amount, merchant, category, source FROM transactions WHERE id = ?1",
                [txn_id],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .unwrap();
        assert_eq!(amount, 500.0);
        assert_eq!(merchant, "SWIGGY");
        assert_eq!(category, "Food & Dining");
        assert_eq!(source, "sms");
        assert_eq!(get_queue_item(&conn, id).unwrap().status, "approved");
    }

    #[test]
    fn test_approve_applies_overrides() {
        let (_dir, conn) = test_db();
        let out = sample_outcome(500.0, "SWIGGY", noon(10, 12));
        let id = match submit(&conn, "default", &out, false, &cfg()).unwrap() {
            Submitted::Queued { id, .. } => id,
            other => panic!("expected queued, got {other:?}"),
        };
        let overrides = ApproveOverrides {
            amount: Some(550.0),
            category: Some("Shopping".to_string()),
            notes: Some("late fee included".to_string()),
            ..Default::default()
        };
        let txn_id = approve(&conn, id, &overrides).unwrap();
        let (amount, category, notes): (f64, String, Option<String>) = conn
            .query_row(
                "SELECT amount, category, notes FROM transactions WHERE id = ?1",
                [txn_id],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(amount, 550.0);
        assert_eq!(category, "Shopping");
        assert_eq!(notes.as_deref(), Some("late fee included"));
    }

    #[test]
    fn test_approve_rejects_unknown_category() {
        let (_dir, conn) = test_db();
        let out = sample_outcome(500.0, "SWIGGY", noon(10, 12));
        let id = match submit(&conn, "default", &out, false, &cfg()).unwrap() {
            Submitted::Queued { id, .. } => id,
            other => panic!("expected queued, got {other:?}"),
        };
        let overrides = ApproveOverrides {
            category: Some("Gambling".to_string()),
            ..Default::default()
        };
        let err = approve(&conn, id, &overrides).unwrap_err();
        assert!(matches!(err, KhataError::UnknownCategory(_)));
        assert_eq!(get_queue_item(&conn, id).unwrap().status, "pending");
        assert_eq!(txn_count(&conn), 0);
    }

    #[test]
    fn test_approve_after_reject_fails_without_transaction() {
        let (_dir, conn) = test_db();
        let out = sample_outcome(500.0, "SWIGGY", noon(10, 12));
        let id = match submit(&conn, "default", &out, false, &cfg()).unwrap() {
            Submitted::Queued { id, .. } => id,
            other => panic!("expected queued, got {other:?}"),
        };
        reject(&conn, id).unwrap();
        let err = approve(&conn, id, &ApproveOverrides::default()).unwrap_err();
        assert!(matches!(err, KhataError::InvalidStateTransition(_)));
        assert_eq!(txn_count(&conn), 0);
        assert_eq!(get_queue_item(&conn, id).unwrap().status, "rejected");
    }

    #[test]
    fn test_reject_twice_fails() {
        let (_dir, conn) = test_db();
        let out = sample_outcome(500.0, "SWIGGY", noon(10, 12));
        let id = match submit(&conn, "default", &out, false, &cfg()).unwrap() {
            Submitted::Queued { id, .. } => id,
            other => panic!("expected queued, got {other:?}"),
        };
        reject(&conn, id).unwrap();
        let err = reject(&conn, id).unwrap_err();
        assert!(matches!(err, KhataError::InvalidStateTransition(_)));
    }

    #[test]
    fn test_approve_missing_item() {
        let (_dir, conn) = test_db();
        let err = approve(&conn, 999, &ApproveOverrides::default()).unwrap_err();
        assert!(matches!(err, KhataError::UnknownQueueItem(999)));
    }

    #[test]
    fn test_list_queue_filters_and_orders() {
        let (_dir, conn) = test_db();
        let first = match submit(&conn, "default", &sample_outcome(100.0, "UBER", noon(10, 12)), false, &cfg()).unwrap() {
            Submitted::Queued { id, .. } => id,
            other => panic!("expected queued, got {other:?}"),
        };
        submit(&conn, "default", &sample_outcome(200.0, "AMAZON", noon(11, 12)), false, &cfg()).unwrap();
        submit(&conn, "default", &sample_outcome(300.0, "NETFLIX", noon(12, 12)), false, &cfg()).unwrap();
        reject(&conn, first).unwrap();

        let all = list_queue(&conn, "default", None).unwrap();
        assert_eq!(all.len(), 3);
        // Newest first.
        assert_eq!(all[0].merchant, "NETFLIX");

        let pending = list_pending(&conn, "default").unwrap();
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|i| i.status == "pending"));

        let rejected = list_queue(&conn, "default", Some(QueueStatus::Rejected)).unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].merchant, "UBER");
    }
}
