use colored::Colorize;
use comfy_table::Table;

use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::models::Transaction;
use crate::settings::{get_data_dir, load_settings};

pub fn run(limit: usize) -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&get_data_dir().join("khata.db"))?;
    let user = crate::cli::resolve_user(&settings);

    let mut stmt = conn.prepare(
        "SELECT id, user_id, date, amount, direction, merchant, category, source, notes, raw_sms, parsed_json, created_at
         FROM transactions
         WHERE user_id = ?1
         ORDER BY date DESC, id DESC
         LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![user, limit as i64], |row| {
            Ok(Transaction {
                id: row.get(0)?,
                user_id: row.get(1)?,
                date: row.get(2)?,
                amount: row.get(3)?,
                direction: row.get(4)?,
                merchant: row.get(5)?,
                category: row.get(6)?,
                source: row.get(7)?,
                notes: row.get(8)?,
                raw_sms: row.get(9)?,
                parsed_json: row.get(10)?,
                created_at: row.get(11)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if rows.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Date", "Merchant", "Amount", "Category", "Source", "Notes",
    ]);
    for txn in &rows {
        let amount = if txn.direction == "income" {
            money(txn.amount).green().to_string()
        } else {
            money(txn.amount).red().to_string()
        };
        table.add_row(vec![
            txn.id.to_string(),
            txn.date.chars().take(10).collect(),
            txn.merchant.clone(),
            amount,
            txn.category.clone(),
            txn.source.clone(),
            txn.notes.clone().unwrap_or_default(),
        ]);
    }
    println!("Transactions\n{table}");
    Ok(())
}
