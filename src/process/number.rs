// src/process/number.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading decimal literal, the part of a cell a lenient float parse reads.
static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading float pattern should compile")
});

/// Strip thousands separators and percent signs, then read the leading
/// decimal literal. `None` when nothing numeric is left or the value overflows.
pub fn try_parse_number(input: &str) -> Option<f64> {
    let cleaned: String = input.chars().filter(|c| *c != ',' && *c != '%').collect();
    let literal = LEADING_FLOAT.find(cleaned.trim_start())?;
    literal
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Total numeric read of a cell: empty or unparseable input is `0`.
pub fn parse_number(input: &str) -> f64 {
    try_parse_number(input).unwrap_or(0.0)
}

/// Round half toward positive infinity (`2.5 → 3`, `-2.5 → -2`).
pub fn round_half_up(n: f64) -> i64 {
    let floor = n.floor();
    if n - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Group an integer's digits by thousands with `,` (zh-TW convention).
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"1234.6"` → `"1,235"`
pub fn format_integer(input: &str) -> String {
    group_thousands(round_half_up(parse_number(input)))
}

/// Rounded integer without grouping, as shown for CPI and CPM.
pub fn round_number(input: &str) -> String {
    round_half_up(parse_number(input)).to_string()
}

/// Render a ratio cell as a percentage with three decimals.
///
/// Values whose magnitude exceeds 1 are taken as already scaled, so both
/// `"0.05"` and `"5"` render as `"5.000%"`.
pub fn format_percentage(input: &str) -> String {
    let Some(val) = try_parse_number(input) else {
        return "0.000%".to_string();
    };
    let fraction = if val.abs() > 1.0 { val / 100.0 } else { val };
    percent_string(fraction * 100.0)
}

/// `5.0` → `"5.000%"`, normalizing negative zero.
pub fn percent_string(pct: f64) -> String {
    let pct = if pct == 0.0 { 0.0 } else { pct };
    let s = format!("{:.3}", pct);
    if s == "-0.000" {
        "0.000%".to_string()
    } else {
        format!("{}%", s)
    }
}
