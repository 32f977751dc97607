use std::sync::LazyLock;

use regex::Regex;
use lift_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use thiserror::Error;

/// Placeholder shown for undefined payback and ROI.
pub const UNDEFINED: &str = "—";

/// Optional sign, optional `$`, digits with optional comma grouping, optional
/// fraction, optional trailing `%`.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<sign>[-+])?\s*\$?\s*(?P<int>\d{1,3}(?:,\d{3})+|\d*)(?P<frac>\.\d*)?\s*%?$")
        .expect("number pattern is valid")
});

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("invalid number '{input}'")]
    Malformed { input: String },

    #[error("invalid decimal '{input}': {source}")]
    OutOfRange {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Parses user-entered currency or percentage text into a [`Decimal`].
///
/// Accepts `"1,234.56"`, `"$1,234.50"`, `"7.5%"` and `"-300"`. The `%` is
/// cosmetic: `"7.5%"` parses to `7.5`. Empty or whitespace-only input is 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let malformed = || {
        tracing::error!(input = %s, "invalid decimal");
        ParseDecimalError::Malformed {
            input: s.to_string(),
        }
    };
    let caps = NUMBER_RE.captures(trimmed).ok_or_else(malformed)?;
    let int = caps.name("int").map_or("", |m| m.as_str());
    let frac = caps
        .name("frac")
        .map_or("", |m| m.as_str())
        .trim_end_matches('.');
    if int.is_empty() && frac.is_empty() {
        return Err(malformed());
    }

    let sign = caps.name("sign").map_or("", |m| m.as_str());
    let int = if int.is_empty() { "0" } else { int };
    let normalized = format!("{sign}{}{frac}", int.replace(',', ""));
    normalized
        .parse()
        .map_err(|source| ParseDecimalError::OutOfRange {
            input: s.to_string(),
            source,
        })
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Formats money as `$4,264.00` or `-$300.00`, rounding half-up to cents.
pub fn format_money(d: Decimal) -> String {
    let rounded = round_half_up(d);
    let text = format!("{:.2}", rounded.abs());
    let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{frac}", group_thousands(int))
}

/// Payback months rounded half-up to two decimals, or "—".
pub fn format_payback(months: Option<Decimal>) -> String {
    months
        .map(|m| format!("{:.2} months", round_half_up(m)))
        .unwrap_or_else(|| UNDEFINED.to_string())
}

/// ROI percentage with one decimal, or "—".
pub fn format_roi(roi_percent: Option<Decimal>) -> String {
    roi_percent
        .map(|pct| format!("{:.1}%", pct.round_dp(1)))
        .unwrap_or_else(|| UNDEFINED.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_accepts_currency_and_percent() {
        assert_eq!(parse_decimal("$1,234.50").unwrap(), dec!(1234.50));
        assert_eq!(parse_decimal("7.5%").unwrap(), dec!(7.5));
        assert_eq!(parse_decimal("-$300").unwrap(), dec!(-300));
        assert_eq!(parse_decimal(".5").unwrap(), dec!(0.5));
        assert_eq!(parse_decimal("+2").unwrap(), dec!(2));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("$").is_err());
        assert!(parse_decimal("1,23").is_err());
        assert!(parse_decimal("12%%").is_err());
    }

    #[test]
    fn format_money_groups_and_rounds() {
        assert_eq!(format_money(dec!(4264)), "$4,264.00");
        assert_eq!(format_money(dec!(1234567.125)), "$1,234,567.13");
        assert_eq!(format_money(dec!(-300)), "-$300.00");
        assert_eq!(format_money(dec!(0)), "$0.00");
        assert_eq!(format_money(dec!(999.999)), "$1,000.00");
    }

    #[test]
    fn undefined_values_use_placeholder() {
        assert_eq!(format_payback(None), "—");
        assert_eq!(format_roi(None), "—");
    }

    #[test]
    fn defined_values_are_formatted() {
        assert_eq!(format_payback(Some(dec!(1.40712))), "1.41 months");
        assert_eq!(format_payback(Some(dec!(1.405))), "1.41 months");
        assert_eq!(format_roi(Some(dec!(752.8))), "752.8%");
        assert_eq!(format_roi(Some(dec!(-100))), "-100.0%");
    }
}
