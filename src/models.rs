use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Income => "income",
            Direction::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueStatus {
    Pending,
    Approved,
    Rejected,
    Duplicate,
}

impl QueueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Pending => "pending",
            QueueStatus::Approved => "approved",
            QueueStatus::Rejected => "rejected",
            QueueStatus::Duplicate => "duplicate",
        }
    }

    pub fn parse(s: &str) -> Option<QueueStatus> {
        match s {
            "pending" => Some(QueueStatus::Pending),
            "approved" => Some(QueueStatus::Approved),
            "rejected" => Some(QueueStatus::Rejected),
            "duplicate" => Some(QueueStatus::Duplicate),
            _ => None,
        }
    }
}

/// Everything the parse pipeline learned from one SMS. Serialized verbatim
/// into the `parsed_json` audit column on queue items and transactions.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    pub amount: f64,
    pub direction: Direction,
    pub merchant: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub confidence: f64,
    pub bank_name: String,
    pub raw_sms: String,
    pub metadata: ParseMetadata,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseMetadata {
    pub account_suffix: Option<String>,
    pub reference_number: Option<String>,
    pub balance: Option<f64>,
}

/// A rival bank rule set that matched the same SMS with a different amount.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub bank_name: String,
    pub amount: f64,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub date: String,
    pub amount: f64,
    pub direction: String,
    pub merchant: String,
    pub category: String,
    pub source: String,
    pub notes: Option<String>,
    pub raw_sms: Option<String>,
    pub parsed_json: Option<String>,
    pub created_at: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct QueueItem {
    pub id: i64,
    pub user_id: String,
    pub raw_sms: String,
    pub bank_name: String,
    pub amount: f64,
    pub direction: String,
    pub merchant: String,
    pub date: String,
    pub category: String,
    pub confidence: f64,
    pub status: String,
    pub parsed_json: String,
    pub created_at: String,
    pub updated_at: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub category_type: String,
    pub description: Option<String>,
}
