//! French-locale number rendering for the KPI cards
//!
//! `12345.67` renders as `12 345,67`; missing values render as an em dash,
//! matching the source report.

pub const MISSING: &str = "—";

/// Round to the nearest integer and group thousands with spaces.
pub fn fr_int(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => group_thousands(v.round() as i64),
        _ => MISSING.to_string(),
    }
}

/// Fixed-decimal rendering with a decimal comma and space-grouped thousands.
pub fn fr_float(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let formatted = format!("{:.*}", decimals, v);
            let (int_part, frac_part) = match formatted.split_once('.') {
                Some((i, f)) => (i.to_string(), Some(f.to_string())),
                None => (formatted, None),
            };
            let grouped = group_thousands(int_part.parse::<i64>().unwrap_or(0));
            match frac_part {
                Some(f) => format!("{grouped},{f}"),
                None => grouped,
            }
        }
        _ => MISSING.to_string(),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
