use chrono::{DateTime, Utc};

use crate::banks::{self, BankKind, ALL_BANKS};
use crate::classifier::suggest_category;
use crate::error::{KhataError, Result};
use crate::models::{Candidate, Direction, ParseMetadata, ParseOutcome};
use crate::normalize::{clean_sms_text, UNKNOWN_MERCHANT};

const INCOME_MARKERS: &[&str] = &[
    "CREDITED",
    "CREDIT",
    "RECEIVED",
    "DEPOSITED",
    "SALARY",
    "REFUND",
];

/// Income/expense is decided once per message, on the whole normalized text,
/// so every rule set races the same pattern list.
pub fn direction_of(text: &str) -> Direction {
    let upper = text.to_uppercase();
    if INCOME_MARKERS.iter().any(|marker| upper.contains(marker)) {
        Direction::Income
    } else {
        Direction::Expense
    }
}

/// Base 0.5, +0.2 for a positive amount, +0.2 for a known merchant, +0.1 for
/// a bank-specific rule set, capped at 1.0.
pub fn confidence_score(amount: f64, merchant: &str, bank: BankKind) -> f64 {
    let mut score: f64 = 0.5;
    if amount > 0.0 {
        score += 0.2;
    }
    if merchant != UNKNOWN_MERCHANT {
        score += 0.2;
    }
    if bank != BankKind::Generic {
        score += 0.1;
    }
    score.min(1.0)
}

struct Extraction {
    amount: f64,
    merchant: String,
    date: DateTime<Utc>,
}

/// Race one rule set's direction-appropriate patterns. The first pattern that
/// matches and yields a positive amount wins; a zero amount skips to the next
/// pattern rather than failing the whole rule set.
fn attempt(
    bank: BankKind,
    text: &str,
    direction: Direction,
    now: DateTime<Utc>,
) -> Option<Extraction> {
    let patterns = match direction {
        Direction::Income => bank.credit_patterns(),
        Direction::Expense => bank.debit_patterns(),
    };
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            let amount = bank.extract_amount(&caps);
            if amount <= 0.0 {
                continue;
            }
            return Some(Extraction {
                amount,
                merchant: bank.extract_merchant(&caps, text),
                date: bank.extract_date(&caps, text, now),
            });
        }
    }
    None
}

/// Amount-only rerun of the pattern race, used to probe rival rule sets.
fn probe_amount(bank: BankKind, text: &str, direction: Direction) -> Option<f64> {
    let patterns = match direction {
        Direction::Income => bank.credit_patterns(),
        Direction::Expense => bank.debit_patterns(),
    };
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            let amount = bank.extract_amount(&caps);
            if amount > 0.0 {
                return Some(amount);
            }
        }
    }
    None
}

pub fn parse(raw_text: &str, sender_id: Option<&str>, salary_threshold: f64) -> Result<ParseOutcome> {
    parse_at(raw_text, sender_id, salary_threshold, Utc::now())
}

/// Parse with an explicit clock so the date plausibility window is testable.
pub fn parse_at(
    raw_text: &str,
    sender_id: Option<&str>,
    salary_threshold: f64,
    now: DateTime<Utc>,
) -> Result<ParseOutcome> {
    if raw_text.trim().is_empty() {
        return Err(KhataError::EmptyInput);
    }
    let text = clean_sms_text(raw_text);
    let direction = direction_of(&text);
    let detected = banks::detect(&text, sender_id);

    // The detected bank gets first shot; on a miss every other rule set is
    // raced in registry order.
    let mut winner: Option<(BankKind, Extraction)> = None;
    if let Some(bank) = detected {
        if let Some(hit) = attempt(bank, &text, direction, now) {
            winner = Some((bank, hit));
        }
    }
    if winner.is_none() {
        for bank in ALL_BANKS {
            if detected == Some(*bank) {
                continue;
            }
            if let Some(hit) = attempt(*bank, &text, direction, now) {
                winner = Some((*bank, hit));
                break;
            }
        }
    }
    let (bank, hit) = winner.ok_or(KhataError::NoMatch)?;

    // Rival rule sets that read a different amount out of the same message
    // mark the parse as ambiguous.
    let mut candidates = Vec::new();
    for rival in ALL_BANKS {
        if *rival == bank {
            continue;
        }
        if let Some(amount) = probe_amount(*rival, &text, direction) {
            if (amount - hit.amount).abs() > f64::EPSILON {
                candidates.push(Candidate {
                    bank_name: rival.name().to_string(),
                    amount,
                });
            }
        }
    }

    let category = suggest_category(direction, &hit.merchant, hit.amount, salary_threshold);
    let confidence = confidence_score(hit.amount, &hit.merchant, bank);
    let metadata = ParseMetadata {
        account_suffix: bank.extract_account_suffix(&text),
        reference_number: bank.extract_reference(&text),
        balance: bank.extract_balance(&text),
    };

    Ok(ParseOutcome {
        amount: hit.amount,
        direction,
        merchant: hit.merchant,
        date: hit.date,
        category,
        confidence,
        bank_name: bank.name().to_string(),
        raw_sms: text,
        metadata,
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_direction_of() {
        assert_eq!(direction_of("Rs.100 credited to A/c"), Direction::Income);
        assert_eq!(direction_of("salary received"), Direction::Income);
        assert_eq!(direction_of("REFUND processed"), Direction::Income);
        assert_eq!(direction_of("Rs.100 debited from A/c"), Direction::Expense);
    }

    #[test]
    fn test_confidence_score() {
        assert!(approx(confidence_score(100.0, "SWIGGY", BankKind::Hdfc), 1.0));
        assert!(approx(confidence_score(100.0, "SWIGGY", BankKind::Generic), 0.9));
        assert!(approx(confidence_score(100.0, "Unknown", BankKind::Sbi), 0.8));
        assert!(approx(confidence_score(100.0, "Unknown", BankKind::Generic), 0.7));
    }

    #[test]
    fn test_parse_hdfc_upi_debit() {
        let out = parse_at(
            "Rs.500.00 debited from A/c XX1234 on 05-Jan-24 by UPI/SWIGGY BANGALORE",
            None,
            10000.0,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(out.amount, 500.0);
        assert_eq!(out.direction, Direction::Expense);
        assert_eq!(out.merchant, "SWIGGY BANGALORE");
        assert_eq!(out.category, "Food & Dining");
        assert_eq!(out.bank_name, "HDFC");
        assert!(approx(out.confidence, 1.0));
        assert_eq!(out.metadata.account_suffix.as_deref(), Some("****1234"));
        assert!(out.candidates.is_empty());
    }

    #[test]
    fn test_parse_salary_credit() {
        let out = parse_at(
            "Salary of Rs.55,000 credited to A/c 9988 on 05-01-24",
            None,
            10000.0,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(out.direction, Direction::Income);
        assert_eq!(out.amount, 55000.0);
        assert_eq!(out.merchant, "Unknown");
        assert_eq!(out.category, "Salary");
        assert_eq!(out.bank_name, "HDFC");
        assert!(approx(out.confidence, 0.8));
        assert_eq!(
            out.date,
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_icici_metadata() {
        let out = parse_at(
            "INR 450 debited from A/c 887766 on 05-01-24. Ref No: ICIC99. Avl Bal INR 12,000",
            None,
            10000.0,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(out.bank_name, "ICICI");
        assert_eq!(out.amount, 450.0);
        assert_eq!(out.category, "Other Expense");
        assert_eq!(out.metadata.account_suffix.as_deref(), Some("****7766"));
        assert_eq!(out.metadata.reference_number.as_deref(), Some("ICIC99"));
        assert_eq!(out.metadata.balance, Some(12000.0));
    }

    #[test]
    fn test_parse_detected_bank_misses_then_falls_back() {
        // Sender says HDFC but the message is SBI-shaped; the race must still
        // land on the SBI rule set.
        let out = parse_at(
            "A/c 123456 debited by Rs.900 on 08-01-24",
            Some("VM-HDFCBK"),
            10000.0,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(out.bank_name, "SBI");
        assert_eq!(out.amount, 900.0);
    }

    #[test]
    fn test_parse_rival_amounts_become_candidates() {
        let out = parse_at(
            "Service fee paid 15, Spent INR 89 on 05-01-24",
            None,
            10000.0,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(out.bank_name, "ICICI");
        assert_eq!(out.amount, 89.0);
        assert_eq!(out.candidates.len(), 1);
        assert_eq!(out.candidates[0].bank_name, "Generic");
        assert_eq!(out.candidates[0].amount, 15.0);
        assert!(approx(out.confidence, 0.8));
    }

    #[test]
    fn test_parse_empty_input() {
        let err = parse_at("   ", None, 10000.0, fixed_now()).unwrap_err();
        assert!(matches!(err, KhataError::EmptyInput));
    }

    #[test]
    fn test_parse_no_match() {
        let err = parse_at("hello there friend", None, 10000.0, fixed_now()).unwrap_err();
        assert!(matches!(err, KhataError::NoMatch));
    }

    #[test]
    fn test_parse_normalizes_whitespace_into_raw_sms() {
        let out = parse_at(
            "Rs.500\n debited from A/c 1234   on 05-01-24",
            None,
            10000.0,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(out.raw_sms, "Rs.500 debited from A/c 1234 on 05-01-24");
    }
}
