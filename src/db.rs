use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    category_type TEXT NOT NULL,
    description TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    user_id TEXT NOT NULL,
    date TEXT NOT NULL,
    amount REAL NOT NULL,
    direction TEXT NOT NULL,
    merchant TEXT NOT NULL,
    category TEXT NOT NULL,
    source TEXT NOT NULL DEFAULT 'manual',
    notes TEXT,
    raw_sms TEXT,
    parsed_json TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS queue_items (
    id INTEGER PRIMARY KEY,
    user_id TEXT NOT NULL,
    raw_sms TEXT NOT NULL,
    bank_name TEXT NOT NULL,
    amount REAL NOT NULL,
    direction TEXT NOT NULL,
    merchant TEXT NOT NULL,
    date TEXT NOT NULL,
    category TEXT NOT NULL,
    confidence REAL NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    parsed_json TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS ingests (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    checksum TEXT NOT NULL UNIQUE,
    message_count INTEGER NOT NULL,
    parsed_count INTEGER NOT NULL,
    created_at TEXT DEFAULT (datetime('now'))
);
";

// (name, category_type, description)
const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    // Income
    ("Salary", "income", "Payroll credits"),
    ("Freelance", "income", "Project and contract payments"),
    ("Investment", "income", "Interest, dividends, redemptions"),
    ("Other Income", "income", "Refunds, cashback, anything else"),
    // Expenses
    ("Food & Dining", "expense", "Restaurants, cafes, food delivery"),
    ("Transport", "expense", "Cabs, fuel, metro, flights"),
    ("Shopping", "expense", "Online and retail purchases"),
    ("Entertainment", "expense", "Streaming, movies, events"),
    ("Utilities", "expense", "Phone, broadband, electricity, gas"),
    ("Health", "expense", "Pharmacies, hospitals, fitness"),
    ("Other Expense", "expense", "Anything else going out"),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM categories", [], |row| row.get(0))?;
    if count == 0 {
        for cat in DEFAULT_CATEGORIES {
            conn.execute(
                "INSERT INTO categories (name, category_type, description) VALUES (?1, ?2, ?3)",
                rusqlite::params![cat.0, cat.1, cat.2],
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["categories", "transactions", "queue_items", "ingests"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
        let count: i64 = conn.query_row("SELECT count(*) FROM categories", [], |r| r.get(0)).unwrap();
        assert_eq!(count, DEFAULT_CATEGORIES.len() as i64);
    }

    #[test]
    fn test_init_db_seeds_categories() {
        let (_dir, conn) = test_db();
        let income: i64 = conn.query_row(
            "SELECT count(*) FROM categories WHERE category_type = 'income'", [], |r| r.get(0),
        ).unwrap();
        let expense: i64 = conn.query_row(
            "SELECT count(*) FROM categories WHERE category_type = 'expense'", [], |r| r.get(0),
        ).unwrap();
        assert_eq!(income, 4);
        assert_eq!(expense, 7);
    }
}
