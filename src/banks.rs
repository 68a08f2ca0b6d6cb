use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::normalize::{
    mask_account_suffix, normalize_amount, normalize_merchant, parse_sms_date, UNKNOWN_MERCHANT,
};

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

// ---------------------------------------------------------------------------
// Compiled pattern tables
// ---------------------------------------------------------------------------

static HDFC_DEBIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Rs\.?([\d,]+\.?\d*)\s+debited\s+from\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})\s+by\s+(?:NEFT|UPI|IMPS|RTGS)/([A-Z0-9\s\-\.]+)",
        r"(?i)Rs\.?([\d,]+\.?\d*)\s+debited\s+from\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)(?:Debit|Spent)\s+Rs\.?([\d,]+\.?\d*)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
    ])
});
static HDFC_CREDIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Rs\.?([\d,]+\.?\d*)\s+credited\s+to\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)(?:Credit|Received)\s+Rs\.?([\d,]+\.?\d*)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
    ])
});
static HDFC_RAIL_MERCHANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:by|at)\s+(?:NEFT|UPI|IMPS|RTGS)/([A-Z0-9\s\-\.]+)").unwrap());

static ICICI_DEBIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)INR\s+([\d,]+\.?\d*)\s+debited\s+from\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)INR\s+([\d,]+\.?\d*)\s+paid\s+to\s+([A-Z0-9\s\-\.]+)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)(?:Debit|Spent)\s+INR\s+([\d,]+\.?\d*)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
    ])
});
static ICICI_CREDIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)INR\s+([\d,]+\.?\d*)\s+credited\s+to\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)INR\s+([\d,]+\.?\d*)\s+received\s+from\s+([A-Z0-9\s\-\.]+)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)(?:Credit|Received)\s+INR\s+([\d,]+\.?\d*)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
    ])
});

static SBI_DEBIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)A/c\s+\w+\s+debited\s+by\s+Rs\.?([\d,]+\.?\d*)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)Rs\.?([\d,]+\.?\d*)\s+debited\s+from\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)Debit\s+of\s+Rs\.?([\d,]+\.?\d*)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)UPI/([A-Z0-9\s\-\.]+)\s+Rs\.?([\d,]+\.?\d*)\s+debited",
    ])
});
static SBI_CREDIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)A/c\s+\w+\s+credited\s+by\s+Rs\.?([\d,]+\.?\d*)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)Rs\.?([\d,]+\.?\d*)\s+credited\s+to\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)Credit\s+of\s+Rs\.?([\d,]+\.?\d*)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
    ])
});
// Case-sensitive on purpose: probes whether a capture is an amount, not a name.
static SBI_AMOUNTISH: Lazy<Regex> = Lazy::new(|| Regex::new(r"Rs\.?|INR|[\d,]+").unwrap());
static SBI_RAIL_MERCHANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:NEFT|IMPS|RTGS)/([A-Z0-9\s\-\.]+)").unwrap());

static AXIS_DEBIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Rs\.?([\d,]+\.?\d*)\s+debited\s+from\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)Debit\s+Rs\.?([\d,]+\.?\d*)\s+from\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)Rs\.?([\d,]+\.?\d*)\s+paid\s+to\s+([A-Z0-9\s\-\.]+)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
    ])
});
static AXIS_CREDIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Rs\.?([\d,]+\.?\d*)\s+credited\s+to\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)Credit\s+Rs\.?([\d,]+\.?\d*)\s+to\s+A/c\s+\w+\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
        r"(?i)Rs\.?([\d,]+\.?\d*)\s+received\s+from\s+([A-Z0-9\s\-\.]+)\s+on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})",
    ])
});
static AXIS_RAIL_MERCHANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:UPI|NEFT|IMPS|RTGS)/([A-Z0-9\s\-\.]+)").unwrap());

static GENERIC_DEBIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)(?:Rs\.?|INR)\s*([\d,]+\.?\d*)\s*(?:debited|spent|paid|withdrawn)",
        r"(?i)([\d,]+\.?\d*)\s*(?:Rs\.?|INR)\s*(?:debited|spent|paid|withdrawn)",
        r"(?i)(?:debited|spent|paid)\s*(?:Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"(?i)(?:paid|spent)\s+([\d,]+\.?\d*)\s*(?:Rs\.?|INR)?",
    ])
});
static GENERIC_CREDIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)(?:Rs\.?|INR)\s*([\d,]+\.?\d*)\s*(?:credited|received|deposited)",
        r"(?i)([\d,]+\.?\d*)\s*(?:Rs\.?|INR)\s*(?:credited|received|deposited)",
        r"(?i)(?:credited|received|deposited)\s*(?:Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ])
});
static GENERIC_MERCHANT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)(?:by|at|via|to|from)\s+([A-Z0-9\s\-\.]+?)(?:\s+(?:on|ref|bal|account|date|time)|$)",
        r"(?i)UPI/([A-Z0-9\s\-\.]+)",
        r"(?i)NEFT/([A-Z0-9\s\-\.]+)",
        r"(?i)IMPS/([A-Z0-9\s\-\.]+)",
        r"(?i)RTGS/([A-Z0-9\s\-\.]+)",
        r"(?i)([A-Z]{2,}[A-Z0-9\s\-\.]{2,})(?:\s+(?:on|ref|bal|account))?",
    ])
});
static GENERIC_DATE: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})",
        r"(?i)(\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{2,4})",
        r"(?i)(?:on|date)\s+(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})",
    ])
});

// Shared whole-text fallbacks.
static UPI_MERCHANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)UPI/([A-Z0-9\s\-\.]+)").unwrap());
static PAID_RECEIVED_MERCHANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:paid\s+to|received\s+from)\s+([A-Z0-9\s\-\.]+)").unwrap());
static DATE_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,2}[-/]\w+[-/]\d{2,4}").unwrap());
static DATE_IN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2}[-/]\w+[-/]\d{2,4})").unwrap());
static ON_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on\s+(\d{1,2}[-/]\w+[-/]\d{2,4})").unwrap());
static RS_BALANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Avl\s+Bal|Balance|Bal):?\s*Rs\.?([\d,]+\.?\d*)").unwrap());
static INR_BALANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Avl\s+Bal|Balance|Bal):?\s*INR\s+([\d,]+\.?\d*)").unwrap());
static ICICI_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Ref\s+No|Reference):?\s*(\w+)").unwrap());
static AXIS_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Ref|Reference)\s+No:?\s*(\w+)").unwrap());

// ---------------------------------------------------------------------------
// Bank rule sets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankKind {
    Hdfc,
    Icici,
    Sbi,
    Axis,
    Generic,
}

/// Registry order doubles as match preference; Generic is the fallback and
/// must stay last.
pub const ALL_BANKS: &[BankKind] = &[
    BankKind::Hdfc,
    BankKind::Icici,
    BankKind::Sbi,
    BankKind::Axis,
    BankKind::Generic,
];

impl BankKind {
    pub fn name(&self) -> &'static str {
        match self {
            BankKind::Hdfc => "HDFC",
            BankKind::Icici => "ICICI",
            BankKind::Sbi => "SBI",
            BankKind::Axis => "Axis",
            BankKind::Generic => "Generic",
        }
    }

    pub fn sender_ids(&self) -> &'static [&'static str] {
        match self {
            BankKind::Hdfc => &["HDFCBK", "HDFC", "VK-HDFCBK"],
            BankKind::Icici => &["ICICIB", "ICICBK", "ICICI"],
            BankKind::Sbi => &["SBIIN", "SBI", "STATEBNK"],
            BankKind::Axis => &["AXISBK", "AXIS", "AXISB"],
            BankKind::Generic => &[],
        }
    }

    pub fn debit_patterns(&self) -> &'static [Regex] {
        match self {
            BankKind::Hdfc => &HDFC_DEBIT,
            BankKind::Icici => &ICICI_DEBIT,
            BankKind::Sbi => &SBI_DEBIT,
            BankKind::Axis => &AXIS_DEBIT,
            BankKind::Generic => &GENERIC_DEBIT,
        }
    }

    pub fn credit_patterns(&self) -> &'static [Regex] {
        match self {
            BankKind::Hdfc => &HDFC_CREDIT,
            BankKind::Icici => &ICICI_CREDIT,
            BankKind::Sbi => &SBI_CREDIT,
            BankKind::Axis => &AXIS_CREDIT,
            BankKind::Generic => &GENERIC_CREDIT,
        }
    }

    pub fn extract_amount(&self, caps: &Captures) -> f64 {
        match self {
            // The UPI form carries the amount in group 2; in the date-bearing
            // forms group 2 is the date and never normalizes positive.
            BankKind::Sbi => {
                let second = caps
                    .get(2)
                    .map(|m| normalize_amount(m.as_str()))
                    .unwrap_or(0.0);
                if second > 0.0 {
                    second
                } else {
                    caps.get(1)
                        .map(|m| normalize_amount(m.as_str()))
                        .unwrap_or(0.0)
                }
            }
            _ => caps
                .get(1)
                .map(|m| normalize_amount(m.as_str()))
                .unwrap_or(0.0),
        }
    }

    pub fn extract_merchant(&self, caps: &Captures, text: &str) -> String {
        match self {
            BankKind::Hdfc => {
                if let Some(m) = caps.get(3) {
                    return normalize_merchant(m.as_str());
                }
                if let Some(c) = HDFC_RAIL_MERCHANT.captures(text) {
                    return normalize_merchant(&c[1]);
                }
                UNKNOWN_MERCHANT.to_string()
            }
            BankKind::Icici => {
                if let Some(m) = caps.get(2) {
                    if !DATE_LIKE.is_match(m.as_str()) {
                        return normalize_merchant(m.as_str());
                    }
                }
                if let Some(c) = UPI_MERCHANT.captures(text) {
                    return normalize_merchant(&c[1]);
                }
                if let Some(c) = PAID_RECEIVED_MERCHANT.captures(text) {
                    return normalize_merchant(&c[1]);
                }
                UNKNOWN_MERCHANT.to_string()
            }
            BankKind::Sbi => {
                // Group 1 is the merchant only in the UPI form; elsewhere it
                // is the amount, which the probe below rejects.
                if let Some(m) = caps.get(1) {
                    if !SBI_AMOUNTISH.is_match(m.as_str()) {
                        return normalize_merchant(m.as_str());
                    }
                }
                if let Some(c) = UPI_MERCHANT.captures(text) {
                    return normalize_merchant(&c[1]);
                }
                if let Some(c) = SBI_RAIL_MERCHANT.captures(text) {
                    return normalize_merchant(&c[1]);
                }
                UNKNOWN_MERCHANT.to_string()
            }
            BankKind::Axis => {
                if let Some(m) = caps.get(2) {
                    if !DATE_LIKE.is_match(m.as_str()) {
                        return normalize_merchant(m.as_str());
                    }
                }
                if let Some(c) = AXIS_RAIL_MERCHANT.captures(text) {
                    return normalize_merchant(&c[1]);
                }
                if let Some(c) = PAID_RECEIVED_MERCHANT.captures(text) {
                    return normalize_merchant(&c[1]);
                }
                UNKNOWN_MERCHANT.to_string()
            }
            BankKind::Generic => {
                for re in GENERIC_MERCHANT.iter() {
                    if let Some(c) = re.captures(text) {
                        return normalize_merchant(&c[1]);
                    }
                }
                UNKNOWN_MERCHANT.to_string()
            }
        }
    }

    pub fn extract_date(&self, caps: &Captures, text: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            BankKind::Hdfc => {
                if let Some(m) = caps.get(2) {
                    return parse_sms_date(m.as_str(), now);
                }
                if let Some(c) = DATE_IN_TEXT.captures(text) {
                    return parse_sms_date(&c[1], now);
                }
                now
            }
            BankKind::Icici => {
                let from_caps = [caps.get(2), caps.get(3)]
                    .into_iter()
                    .flatten()
                    .find(|m| DATE_LIKE.is_match(m.as_str()));
                if let Some(m) = from_caps {
                    return parse_sms_date(m.as_str(), now);
                }
                if let Some(c) = DATE_IN_TEXT.captures(text) {
                    return parse_sms_date(&c[1], now);
                }
                now
            }
            BankKind::Sbi => {
                if let Some(c) = ON_DATE.captures(text) {
                    return parse_sms_date(&c[1], now);
                }
                if let Some(c) = DATE_IN_TEXT.captures(text) {
                    return parse_sms_date(&c[1], now);
                }
                now
            }
            BankKind::Axis => {
                let from_caps = [caps.get(2), caps.get(3)]
                    .into_iter()
                    .flatten()
                    .find(|m| DATE_LIKE.is_match(m.as_str()));
                if let Some(m) = from_caps {
                    return parse_sms_date(m.as_str(), now);
                }
                if let Some(c) = ON_DATE.captures(text) {
                    return parse_sms_date(&c[1], now);
                }
                now
            }
            BankKind::Generic => {
                for re in GENERIC_DATE.iter() {
                    if let Some(c) = re.captures(text) {
                        return parse_sms_date(&c[1], now);
                    }
                }
                now
            }
        }
    }

    pub fn extract_account_suffix(&self, text: &str) -> Option<String> {
        mask_account_suffix(text)
    }

    pub fn extract_reference(&self, text: &str) -> Option<String> {
        let re = match self {
            BankKind::Icici => &*ICICI_REFERENCE,
            BankKind::Axis => &*AXIS_REFERENCE,
            _ => return None,
        };
        re.captures(text).map(|c| c[1].to_string())
    }

    pub fn extract_balance(&self, text: &str) -> Option<f64> {
        let re = match self {
            BankKind::Generic => return None,
            BankKind::Icici => &*INR_BALANCE,
            _ => &*RS_BALANCE,
        };
        let caps = re.captures(text)?;
        let balance = normalize_amount(&caps[1]);
        if balance > 0.0 {
            Some(balance)
        } else {
            None
        }
    }
}

/// Pick a rule set from the sender ID (substring match against the registry,
/// in order), else from the bank name appearing in the text. Detection is a
/// routing hint; the orchestrator still races the other rule sets on a miss.
pub fn detect(text: &str, sender_id: Option<&str>) -> Option<BankKind> {
    if let Some(sender) = sender_id {
        let sender = sender.to_uppercase();
        for bank in ALL_BANKS {
            if bank.sender_ids().iter().any(|id| sender.contains(id)) {
                return Some(*bank);
            }
        }
    }
    let upper = text.to_uppercase();
    for bank in ALL_BANKS {
        if *bank != BankKind::Generic && upper.contains(&bank.name().to_uppercase()) {
            return Some(*bank);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_detect_by_sender_id() {
        assert_eq!(detect("some text", Some("VM-HDFCBK")), Some(BankKind::Hdfc));
        assert_eq!(detect("some text", Some("AD-ICICIB")), Some(BankKind::Icici));
        assert_eq!(detect("some text", Some("BZ-SBIIN")), Some(BankKind::Sbi));
        assert_eq!(detect("some text", Some("AXISBK")), Some(BankKind::Axis));
        assert_eq!(detect("some text", Some("JUNKID")), None);
    }

    #[test]
    fn test_detect_by_name_in_text() {
        assert_eq!(detect("Your SBI account was debited", None), Some(BankKind::Sbi));
        assert_eq!(detect("axis bank alert", None), Some(BankKind::Axis));
        assert_eq!(detect("nothing bankish here", None), None);
    }

    #[test]
    fn test_hdfc_upi_debit() {
        let text = "Rs.500.00 debited from A/c XX1234 on 05-Jan-24 by UPI/SWIGGY BANGALORE";
        let bank = BankKind::Hdfc;
        let caps = bank.debit_patterns()[0].captures(text).unwrap();
        assert_eq!(bank.extract_amount(&caps), 500.0);
        assert_eq!(bank.extract_merchant(&caps, text), "SWIGGY BANGALORE");
        assert_eq!(bank.extract_account_suffix(text), Some("****1234".to_string()));
        assert_eq!(bank.extract_reference(text), None);
    }

    #[test]
    fn test_hdfc_balance() {
        let bank = BankKind::Hdfc;
        assert_eq!(bank.extract_balance("Avl Bal Rs.10,000.50"), Some(10000.5));
        assert_eq!(bank.extract_balance("Avl Bal Rs.0"), None);
        assert_eq!(bank.extract_balance("no balance"), None);
    }

    #[test]
    fn test_icici_paid_to() {
        let text = "INR 1,200.50 paid to BIGBASKET on 05-01-24. Ref No: 98765";
        let bank = BankKind::Icici;
        let caps = bank.debit_patterns()[1].captures(text).unwrap();
        assert_eq!(bank.extract_amount(&caps), 1200.5);
        assert_eq!(bank.extract_merchant(&caps, text), "BIGBASKET");
        assert_eq!(
            bank.extract_date(&caps, text, fixed_now()),
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
        );
        assert_eq!(bank.extract_reference(text), Some("98765".to_string()));
    }

    #[test]
    fn test_sbi_upi_amount_in_second_group() {
        let text = "UPI/FLIPKART Rs.300 debited";
        let bank = BankKind::Sbi;
        let caps = bank.debit_patterns()[3].captures(text).unwrap();
        assert_eq!(bank.extract_amount(&caps), 300.0);
        assert_eq!(bank.extract_merchant(&caps, text), "FLIPKART");
    }

    #[test]
    fn test_sbi_debited_by() {
        let text = "A/c XX9876 debited by Rs.2,500 on 08-01-24";
        let bank = BankKind::Sbi;
        let caps = bank.debit_patterns()[0].captures(text).unwrap();
        // Group 2 is the date here; the amount must come from group 1.
        assert_eq!(bank.extract_amount(&caps), 2500.0);
        assert_eq!(bank.extract_merchant(&caps, text), "Unknown");
        assert_eq!(
            bank.extract_date(&caps, text, fixed_now()),
            Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_axis_debit_with_reference() {
        let text = "Debit Rs.250 from A/c 554433 on 09-01-24 Ref No: AX99A";
        let bank = BankKind::Axis;
        let caps = bank.debit_patterns()[1].captures(text).unwrap();
        assert_eq!(bank.extract_amount(&caps), 250.0);
        assert_eq!(bank.extract_reference(text), Some("AX99A".to_string()));
        assert_eq!(
            bank.extract_date(&caps, text, fixed_now()),
            Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_generic_paid_to() {
        let text = "Paid 450 to GROCERY STORE on 12-01-24";
        let bank = BankKind::Generic;
        let caps = bank.debit_patterns()[2].captures(text).unwrap();
        assert_eq!(bank.extract_amount(&caps), 450.0);
        assert_eq!(bank.extract_merchant(&caps, text), "GROCERY STORE");
        assert_eq!(
            bank.extract_date(&caps, text, fixed_now()),
            Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap()
        );
        assert_eq!(bank.extract_balance(text), None);
    }

    #[test]
    fn test_generic_skips_zero_amount_capture() {
        // The first debit pattern is not present; the reversed form is.
        let text = "99.00 INR spent via CARD";
        let bank = BankKind::Generic;
        assert!(bank.debit_patterns()[0].captures(text).is_none());
        let caps = bank.debit_patterns()[1].captures(text).unwrap();
        assert_eq!(bank.extract_amount(&caps), 99.0);
        assert_eq!(bank.extract_merchant(&caps, text), "CARD");
    }
}
