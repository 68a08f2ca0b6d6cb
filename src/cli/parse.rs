use colored::Colorize;

use crate::error::Result;
use crate::fmt::{money, percent};
use crate::models::ParseOutcome;
use crate::parser;
use crate::settings::load_settings;

pub fn run(text: &str, sender: Option<&str>, json: bool) -> Result<()> {
    let settings = load_settings();
    let outcome = parser::parse(text, sender, settings.salary_threshold)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &ParseOutcome) {
    println!("Bank:        {}", outcome.bank_name);
    println!("Amount:      {}", money(outcome.amount));
    println!("Direction:   {}", outcome.direction.as_str());
    println!("Merchant:    {}", outcome.merchant);
    println!("Category:    {}", outcome.category);
    println!("Date:        {}", outcome.date.format("%Y-%m-%d %H:%M"));
    println!("Confidence:  {}", percent(outcome.confidence));
    if let Some(suffix) = &outcome.metadata.account_suffix {
        println!("Account:     {suffix}");
    }
    if let Some(reference) = &outcome.metadata.reference_number {
        println!("Reference:   {reference}");
    }
    if let Some(balance) = outcome.metadata.balance {
        println!("Balance:     {}", money(balance));
    }
    if !outcome.candidates.is_empty() {
        let rivals: Vec<String> = outcome
            .candidates
            .iter()
            .map(|c| format!("{} {}", c.bank_name, money(c.amount)))
            .collect();
        println!(
            "{}",
            format!("Also matched: {} (needs review)", rivals.join(", ")).yellow()
        );
    }
}
