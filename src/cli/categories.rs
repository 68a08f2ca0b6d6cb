use comfy_table::Table;

use crate::db::get_connection;
use crate::error::Result;
use crate::models::Category;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("khata.db"))?;

    let mut stmt = conn.prepare(
        "SELECT id, name, category_type, description FROM categories
         ORDER BY CASE category_type WHEN 'income' THEN 0 ELSE 1 END, name ASC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                category_type: row.get(2)?,
                description: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type", "Description"]);
    for cat in &rows {
        table.add_row(vec![
            cat.id.to_string(),
            cat.name.clone(),
            cat.category_type.clone(),
            cat.description.clone().unwrap_or_default(),
        ]);
    }
    println!("Categories\n{table}");
    Ok(())
}
