use colored::Colorize;
use comfy_table::Table;

use crate::db::get_connection;
use crate::error::{KhataError, Result};
use crate::fmt::{money, percent};
use crate::models::QueueStatus;
use crate::queue::{self, ApproveOverrides};
use crate::settings::{get_data_dir, load_settings};

pub fn list(status: Option<String>) -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&get_data_dir().join("khata.db"))?;
    let user = crate::cli::resolve_user(&settings);

    let filter = match status {
        Some(s) => Some(
            QueueStatus::parse(&s)
                .ok_or_else(|| KhataError::Other(format!("unknown status '{s}'")))?,
        ),
        None => None,
    };

    let items = queue::list_queue(&conn, &user, filter)?;
    if items.is_empty() {
        println!("No queue items.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Date",
        "Bank",
        "Merchant",
        "Amount",
        "Category",
        "Confidence",
        "Status",
    ]);
    for item in &items {
        let status = match item.status.as_str() {
            "pending" => item.status.yellow().to_string(),
            "approved" => item.status.green().to_string(),
            "rejected" => item.status.red().to_string(),
            _ => item.status.clone(),
        };
        table.add_row(vec![
            item.id.to_string(),
            item.date.chars().take(10).collect(),
            item.bank_name.clone(),
            item.merchant.clone(),
            money(item.amount),
            item.category.clone(),
            percent(item.confidence),
            status,
        ]);
    }
    println!("Queue\n{table}");
    Ok(())
}

pub fn approve(
    id: i64,
    amount: Option<f64>,
    merchant: Option<String>,
    category: Option<String>,
    date: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("khata.db"))?;
    let overrides = ApproveOverrides {
        amount,
        merchant,
        category,
        date,
        notes,
    };
    let txn_id = queue::approve(&conn, id, &overrides)?;
    println!(
        "{} queue item #{id} as transaction #{txn_id}",
        "Approved".green()
    );
    Ok(())
}

pub fn reject(id: i64) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("khata.db"))?;
    queue::reject(&conn, id)?;
    println!("{} queue item #{id}", "Rejected".red());
    Ok(())
}
