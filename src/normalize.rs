use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub const UNKNOWN_MERCHANT: &str = "Unknown";

static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})[-/](\d{1,2})[-/](\d{2,4})").unwrap());
static MONTH_NAME_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2})\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+(\d{4})")
        .unwrap()
});
static ACCOUNT_MASKED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:A/c|Account|Acc)\s*(?:\*{2,}|XX)?(\d{4,})").unwrap());
static ACCOUNT_SHORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:A/c|Account|Acc)\s*(\d{2,})").unwrap());

/// Collapse every whitespace run (including CR/LF) to a single space and trim.
pub fn clean_sms_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_ci_prefix<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Strip currency markers and comma separators, then parse what remains as a
/// float. The decimal point survives: "1,234.56" is 1234.56. Unparseable or
/// non-finite input is 0.0.
pub fn normalize_amount(raw: &str) -> f64 {
    let cleaned = raw.replace(',', "").replace('₹', "");
    let mut rest = cleaned.trim();
    for marker in ["Rs.", "Rs", "INR", "USD", "EUR"] {
        if let Some(stripped) = strip_ci_prefix(rest, marker) {
            rest = stripped.trim_start();
            break;
        }
    }
    match rest.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Tidy a merchant capture: collapse whitespace, strip a leading payment-rail
/// prefix and leading BY/AT/VIA fillers. Empty results become "Unknown".
pub fn normalize_merchant(raw: &str) -> String {
    let collapsed = clean_sms_text(raw);
    let mut name = collapsed.as_str();
    for rail in ["UPI/", "NEFT/", "IMPS/", "RTGS/"] {
        if let Some(stripped) = strip_ci_prefix(name, rail) {
            name = stripped;
            break;
        }
    }
    for filler in ["BY ", "AT ", "VIA "] {
        if let Some(stripped) = strip_ci_prefix(name, filler) {
            name = stripped.trim_start();
        }
    }
    let name = name.trim();
    if name.is_empty() {
        UNKNOWN_MERCHANT.to_string()
    } else {
        name.to_string()
    }
}

/// Parse `DD-MM-YY[YY]` (dash or slash separators) or `DD Mon YYYY` dates.
/// Two-digit years below 50 are 2000-based, the rest 1900-based. Anything
/// unparseable, or outside the [now - 90 days, now + 7 days] plausibility
/// window, falls back to `now`.
pub fn parse_sms_date(raw: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    match parse_date_fields(raw) {
        Some(date) if date >= now - Duration::days(90) && date <= now + Duration::days(7) => date,
        _ => now,
    }
}

fn parse_date_fields(raw: &str) -> Option<DateTime<Utc>> {
    if let Some(caps) = NUMERIC_DATE.captures(raw) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let mut year: i32 = caps[3].parse().ok()?;
        if year < 100 {
            year += if year < 50 { 2000 } else { 1900 };
        }
        return Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single();
    }
    if let Some(caps) = MONTH_NAME_DATE.captures(raw) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        return Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single();
    }
    None
}

fn month_number(name: &str) -> Option<u32> {
    let n = match name.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}

/// Find an account token in the text and mask it down to `****` plus the last
/// four digits. Prefers runs of four or more digits, then two or more.
pub fn mask_account_suffix(text: &str) -> Option<String> {
    for re in [&*ACCOUNT_MASKED, &*ACCOUNT_SHORT] {
        if let Some(caps) = re.captures(text) {
            let digits = &caps[1];
            let tail = &digits[digits.len().saturating_sub(4)..];
            return Some(format!("****{tail}"));
        }
    }
    None
}
