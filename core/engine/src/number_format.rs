//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting utilities for displaying report cell values.
//! CONTEXT: Report tables show ratios with fixed decimals, error rates as
//! percentages and Apdex thresholds as human durations. The helpers here are
//! pure and operate on the raw f64 carried by `CellValue::Number`.

/// Format a number with a fixed count of decimals ("1024.61").
pub fn to_fixed(value: f64, decimal_places: u8) -> String {
    format!("{:.prec$}", value, prec = decimal_places as usize)
}

/// Format a number that is already a percentage ("1.47%").
/// Unlike a spreadsheet percentage the value is not multiplied by 100.
pub fn format_percent(value: f64, decimal_places: u8) -> String {
    format!("{}%", to_fixed(value, decimal_places))
}

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Format a millisecond count as a human duration ("1 sec 500 ms", "2 mins").
/// Zero components are omitted; a zero duration renders as "0 ms".
pub fn format_duration(millis: f64) -> String {
    if !millis.is_finite() || millis <= 0.0 {
        return "0 ms".to_string();
    }

    let mut remaining = millis.round() as u64;
    let mut parts: Vec<String> = Vec::new();

    let units = [
        (MS_PER_DAY, "day"),
        (MS_PER_HOUR, "hour"),
        (MS_PER_MINUTE, "min"),
        (MS_PER_SECOND, "sec"),
    ];

    for (unit_ms, name) in units {
        let count = remaining / unit_ms;
        remaining %= unit_ms;
        if count > 0 {
            let suffix = if count > 1 { "s" } else { "" };
            parts.push(format!("{} {}{}", count, name, suffix));
        }
    }

    if remaining > 0 {
        parts.push(format!("{} ms", remaining));
    }

    if parts.is_empty() {
        "0 ms".to_string()
    } else {
        parts.join(" ")
    }
}

/// Decimal-adjusted rounding: `round10(1.4690, -2) == 1.47`.
///
/// The shift is done through the decimal exponent rather than by
/// multiplying, so values such as 1.005 round the way they read.
/// Ties round towards positive infinity.
pub fn round10(value: f64, exp: i32) -> f64 {
    if exp == 0 {
        return round_half_up(value);
    }
    if !value.is_finite() {
        return value;
    }

    let shifted = match shift_exponent(value, -exp) {
        Some(v) => round_half_up(v),
        None => return value,
    };

    shift_exponent(shifted, exp).unwrap_or(value)
}

/// Rebuilds `value` with its decimal exponent moved by `delta`.
fn shift_exponent(value: f64, delta: i32) -> Option<f64> {
    let repr = format!("{:e}", value);
    let (mantissa, exponent) = repr.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;
    format!("{}e{}", mantissa, exponent + delta).parse().ok()
}

fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
