use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("khata.db");

    println!(
        "User:       {}",
        if settings.user_name.trim().is_empty() {
            "(not set)"
        } else {
            &settings.user_name
        }
    );
    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;

        let transactions: i64 =
            conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
        let queued: i64 = conn.query_row("SELECT count(*) FROM queue_items", [], |r| r.get(0))?;
        let pending: i64 = conn.query_row(
            "SELECT count(*) FROM queue_items WHERE status = 'pending'",
            [],
            |r| r.get(0),
        )?;
        let categories: i64 =
            conn.query_row("SELECT count(*) FROM categories", [], |r| r.get(0))?;

        println!();
        println!("Transactions:  {transactions}");
        println!("Queue items:   {queued}");
        println!("Pending:       {pending}");
        println!("Categories:    {categories}");
        println!();
        println!(
            "Auto-approve:  {}",
            if settings.auto_approve { "on" } else { "off" }
        );
    } else {
        println!();
        println!("Database not found. Run `khata init` to set up.");
    }

    Ok(())
}
