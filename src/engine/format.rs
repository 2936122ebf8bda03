//! # engine::format
//!
//! Text rendering for the two dashboard labels: Brazilian-Real currency and a
//! `dd/MM/yyyy HH:mm:ss` timestamp.

use chrono::{DateTime, TimeZone};

/// Shown in place of the date when the exchange sent no (or an invalid)
/// timestamp.
pub const MISSING_DATE: &str = "—";

const DATE_PATTERN: &str = "%d/%m/%Y %H:%M:%S";

/// Format `value` as BRL: `R$ 1.234.567,89`, `-R$ 10,00`.
///
/// Rounds to cents from the exact decimal expansion of `value`, so any finite
/// magnitude renders in full.  A value that rounds to zero carries no sign.
pub fn format_brl(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let sign = if value < 0.0 && fixed.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
        "-"
    } else {
        ""
    };

    let whole = group_thousands(whole);
    if frac.is_empty() {
        // inf / NaN
        format!("{sign}R$ {whole}")
    } else {
        format!("{sign}R$ {whole},{frac}")
    }
}

/// `"1234567"` → `1.234.567`
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Render epoch seconds in `tz`, or [`MISSING_DATE`].
pub fn format_timestamp<Tz>(seconds: Option<i64>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    seconds
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|utc| utc.with_timezone(tz).format(DATE_PATTERN).to_string())
        .unwrap_or_else(|| MISSING_DATE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_brl_grouping() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(5.5), "R$ 5,50");
        assert_eq!(format_brl(999.99), "R$ 999,99");
        assert_eq!(format_brl(1000.0), "R$ 1.000,00");
        assert_eq!(format_brl(348765.43), "R$ 348.765,43");
        assert_eq!(format_brl(1234567.891), "R$ 1.234.567,89");
    }

    #[test]
    fn test_brl_rounding_and_sign() {
        assert_eq!(format_brl(0.005), "R$ 0,01");
        assert_eq!(format_brl(-10.0), "-R$ 10,00");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
        assert_eq!(format_brl(-0.0), "R$ 0,00");
        assert_eq!(format_brl(-1234.5), "-R$ 1.234,50");
    }

    #[test]
    fn test_brl_huge_magnitudes_render_in_full() {
        // 1e40 is exactly 10000000000000000303786028427003666890752 as an f64.
        assert_eq!(
            format_brl(1e40),
            "R$ 10.000.000.000.000.000.303.786.028.427.003.666.890.752,00"
        );
        assert_eq!(
            format_brl(-1e40),
            "-R$ 10.000.000.000.000.000.303.786.028.427.003.666.890.752,00"
        );

        let max = format_brl(f64::MAX);
        assert!(max.starts_with("R$ 179.769.313.486.231.570."));
        assert!(max.ends_with(",00"));
        assert_eq!(max.matches('.').count(), (309 - 1) / 3);
    }

    #[test]
    fn test_timestamp_in_utc() {
        assert_eq!(format_timestamp(Some(0), &Utc), "01/01/1970 00:00:00");
        assert_eq!(
            format_timestamp(Some(1729080000), &Utc),
            "16/10/2024 12:00:00"
        );
    }

    #[test]
    fn test_timestamp_in_brasilia() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(
            format_timestamp(Some(1729080000), &brt),
            "16/10/2024 09:00:00"
        );
    }

    #[test]
    fn test_missing_timestamp_falls_back() {
        assert_eq!(format_timestamp(None, &Utc), MISSING_DATE);
        assert_eq!(format_timestamp(Some(i64::MAX), &Utc), MISSING_DATE);
    }
}
