//! Display Formatting
//!
//! Number and time formatting for the dashboard slots. Output mirrors the
//! en-US browser formatting the dashboard page was designed around:
//!
//! - USD amounts: grouped, at most 2 fractional digits (`$1,234.5`)
//! - Percent change: explicit sign, at most 1 fractional digit (`+5%`)
//! - Price: tiered precision (`$0.5000`, `$0.00012300`, `$1.00e-7`)
//! - Progress bars: widths clamped into `[0, 100]`

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Fixed text for a zero or invalid price
pub const ZERO_PRICE: &str = "$0.00";

/// 2^53, the largest range where every integer is representable
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Format a number with `,` grouping and at most `max_fraction_digits`
/// fractional digits (trailing zeros dropped). Ties round away from zero.
pub fn format_grouped(value: f64, max_fraction_digits: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let factor = 10f64.powi(max_fraction_digits as i32);
    let scaled = value.abs() * factor;
    // Past 2^53 there are no fractional digits left to round
    let rounded = if scaled.is_finite() && scaled < MAX_EXACT_INT {
        scaled.round() / factor
    } else {
        value.abs()
    };

    let fixed = format!("{:.*}", max_fraction_digits, rounded);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && rounded > 0.0 {
        out.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `$` amount with grouping and at most 2 fractional digits
pub fn format_usd(value: f64) -> String {
    let text = format_grouped(value, 2);
    match text.strip_prefix('-') {
        Some(abs) => format!("-${}", abs),
        None => format!("${}", text),
    }
}

/// Signed percentage with at most 1 fractional digit.
///
/// Non-negative values get an explicit `+`, negative ones `-`. The sign
/// follows the input, so `-0.04` prints as `-0%`.
pub fn format_pct(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let sign = if value >= 0.0 { '+' } else { '-' };
    format!("{}{}%", sign, format_grouped(value.abs(), 1))
}

/// Unsigned progress label with at most 2 fractional digits
pub fn format_progress(value: f64) -> String {
    format!("{}%", format_grouped(value, 2))
}

/// Token price with tiered precision.
///
/// - `>= 0.01`: 4 fractional digits
/// - `[0.000001, 0.01)`: 8 fractional digits
/// - `(0, 0.000001)`: scientific notation, 2 fractional digits
/// - zero, negative or non-finite: `$0.00`
pub fn format_price(price: f64) -> String {
    if !price.is_finite() || price <= 0.0 {
        return ZERO_PRICE.to_string();
    }

    if price >= 0.01 {
        format!("${:.4}", price)
    } else if price >= 0.000001 {
        format!("${:.8}", price)
    } else {
        format!("${:.2e}", price)
    }
}

/// Clamp a percentage into `[0, 100]` for use as a bar width.
/// NaN, negative values and `-0` all clamp to `0`.
pub fn clamp_width(pct: f64) -> f64 {
    if pct.is_nan() || pct <= 0.0 {
        return 0.0;
    }
    pct.min(100.0)
}

/// CSS width value for a progress bar (`"45%"`)
pub fn width_style(pct: f64) -> String {
    format!("{}%", clamp_width(pct))
}

/// SOL amount as shown in the transaction meta line.
///
/// Shortest round-trip digits; magnitudes below `1e-6` or from `1e21` up
/// switch to exponent form (`1e-7 SOL`, `1.5e+21 SOL`).
pub fn format_sol(amount: f64) -> String {
    // `+ 0.0` folds -0 into 0
    let amount = if amount.is_finite() { amount + 0.0 } else { 0.0 };
    let abs = amount.abs();

    let text = if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        let sci = format!("{:e}", amount);
        match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => sci,
        }
    } else {
        amount.to_string()
    };

    format!("{} SOL", text)
}

/// Locale-style timestamp in the local time zone.
///
/// Empty for a missing timestamp; unparsable input is returned verbatim.
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// Locale-style timestamp in the given time zone (`1/2/2025, 3:04:05 AM`)
pub fn format_timestamp_in<Tz>(timestamp: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(raw) = timestamp.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(tz))
        .ok()
        .or_else(|| {
            // Offset-less ISO timestamps are taken as already in `tz`
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        });

    match parsed {
        Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => raw.to_string(),
    }
}

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
