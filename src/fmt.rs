/// Format a float as a rupee amount with Indian digit grouping: ₹12,34,567.89
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let paise = format!("{:.2}", abs);
    let parts: Vec<&str> = paise.split('.').collect();
    let int_part = parts[0];
    let dec_part = parts[1];

    // Rightmost group of three, groups of two after that.
    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i >= 3 && (i - 3) % 2 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-\u{20b9}{with_commas}.{dec_part}")
    } else {
        format!("\u{20b9}{with_commas}.{dec_part}")
    }
}

/// Confidence ratio as a whole percentage.
pub fn percent(val: f64) -> String {
    format!("{:.0}%", val * 100.0)
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
