use comfy_table::Table;

use crate::banks::ALL_BANKS;
use crate::error::Result;

pub fn run() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Bank", "Sender IDs", "Debit rules", "Credit rules"]);
    for bank in ALL_BANKS {
        table.add_row(vec![
            bank.name().to_string(),
            bank.sender_ids().join(", "),
            bank.debit_patterns().len().to_string(),
            bank.credit_patterns().len().to_string(),
        ]);
    }
    println!("Banks\n{table}");
    Ok(())
}
