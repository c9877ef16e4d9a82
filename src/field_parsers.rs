//! Field parsing utilities for scraped player values
//!
//! Each parser comes in two forms. The `try_` form returns `None` when the
//! text is not in a recognised format so the caller can report it; the
//! plain form substitutes the zero value. None of them fail past their
//! own boundary.

use crate::constants::{
    CM_PER_INCH, CONVERSION_DECIMALS, CURRENCY_SYMBOLS, INCHES_PER_FOOT, KG_PER_LB, MILLION,
    MISSING_NUMBER_LITERALS, NOT_FOR_SALE, THOUSAND,
};
use crate::models::MarketValueRange;
use regex::Regex;
use std::sync::OnceLock;

fn feet_inches_re() -> &'static Regex {
    static FEET_INCHES_RE: OnceLock<Regex> = OnceLock::new();
    FEET_INCHES_RE.get_or_init(|| Regex::new(r"^(\d+)'(\d+)").expect("valid feet/inches regex"))
}

fn compact_height_re() -> &'static Regex {
    static COMPACT_HEIGHT_RE: OnceLock<Regex> = OnceLock::new();
    COMPACT_HEIGHT_RE
        .get_or_init(|| Regex::new(r"^(\d)(\d{2})$").expect("valid compact height regex"))
}

fn centimetres_re() -> &'static Regex {
    static CENTIMETRES_RE: OnceLock<Regex> = OnceLock::new();
    CENTIMETRES_RE.get_or_init(|| Regex::new(r"^(\d+)\s*cm").expect("valid centimetre regex"))
}

fn pounds_re() -> &'static Regex {
    static POUNDS_RE: OnceLock<Regex> = OnceLock::new();
    POUNDS_RE.get_or_init(|| Regex::new(r"(?i)^(\d+)\s*lbs").expect("valid pounds regex"))
}

fn money_re() -> &'static Regex {
    static MONEY_RE: OnceLock<Regex> = OnceLock::new();
    MONEY_RE.get_or_init(|| Regex::new(r"^([\d.]+)\s*([MK]?)").expect("valid money regex"))
}

fn leading_digits_re() -> &'static Regex {
    static LEADING_DIGITS_RE: OnceLock<Regex> = OnceLock::new();
    LEADING_DIGITS_RE.get_or_init(|| Regex::new(r"^(\d+)").expect("valid digits regex"))
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn feet_inches_to_cm(feet: u32, inches: u32) -> Option<f64> {
    let total_inches = feet.checked_mul(INCHES_PER_FOOT)?.checked_add(inches)?;
    Some(round_to(
        f64::from(total_inches) * CM_PER_INCH,
        CONVERSION_DECIMALS,
    ))
}

/// Parse a height into centimetres
///
/// Accepts `5'10"`, the compact `510` (one feet digit, two inch digits),
/// `180cm` / `180 cm`, or a bare centimetre count like `180`.
pub fn try_parse_height(raw: &str) -> Option<f64> {
    let height = raw.trim().to_lowercase();

    if let Some(caps) = feet_inches_re().captures(&height) {
        let feet = caps[1].parse::<u32>().ok()?;
        let inches = caps[2].parse::<u32>().ok()?;
        return feet_inches_to_cm(feet, inches);
    }

    if let Some(caps) = compact_height_re().captures(&height) {
        let feet = caps[1].parse::<u32>().ok()?;
        let inches = caps[2].parse::<u32>().ok()?;
        // 180 reads as centimetres, not 1'80"
        if inches < INCHES_PER_FOOT {
            return feet_inches_to_cm(feet, inches);
        }
    }

    if let Some(caps) = centimetres_re().captures(&height) {
        return caps[1].parse::<f64>().ok();
    }

    if !height.is_empty() && height.chars().all(|c| c.is_ascii_digit()) {
        return height.parse::<f64>().ok();
    }

    None
}

/// Parse a height into centimetres, `0.0` when unrecognised
pub fn parse_height(raw: &str) -> f64 {
    try_parse_height(raw).unwrap_or(0.0)
}

/// Parse a `152 lbs` style weight into kilograms
pub fn try_parse_weight(raw: &str) -> Option<f64> {
    let caps = pounds_re().captures(raw.trim())?;
    let pounds = caps[1].parse::<u32>().ok()?;
    Some(round_to(f64::from(pounds) * KG_PER_LB, CONVERSION_DECIMALS))
}

/// Parse a weight into kilograms, `0.0` when unrecognised
pub fn parse_weight(raw: &str) -> f64 {
    try_parse_weight(raw).unwrap_or(0.0)
}

/// Parse one bound of a market value such as `$5.8M`, `€500K` or `1200`
fn parse_money_bound(raw: &str) -> Option<i64> {
    let cleaned = raw
        .trim()
        .trim_start_matches(CURRENCY_SYMBOLS)
        .trim()
        .to_uppercase();

    let caps = money_re().captures(&cleaned)?;
    let number = caps[1].parse::<f64>().ok()?;
    let multiplier = match &caps[2] {
        "M" => MILLION,
        "K" => THOUSAND,
        _ => 1.0,
    };

    let value = (number * multiplier).round();
    if value.is_finite() && value >= 0.0 && value <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Parse a market value or value range
///
/// `not for sale` is a valid price of zero. A range is split on the first
/// `-`; if either bound fails the whole value fails.
pub fn try_parse_market_value(raw: &str) -> Option<MarketValueRange> {
    if raw.to_lowercase().contains(NOT_FOR_SALE) {
        return Some(MarketValueRange::default());
    }

    match raw.split_once('-') {
        Some((low, high)) => {
            let min = parse_money_bound(low)?;
            let max = parse_money_bound(high)?;
            Some(MarketValueRange::new(min, max))
        }
        None => parse_money_bound(raw).map(MarketValueRange::single),
    }
}

/// Parse a market value, `(0, 0)` when unrecognised
pub fn parse_market_value(raw: &str) -> MarketValueRange {
    try_parse_market_value(raw).unwrap_or_default()
}

/// Parse the leading run of digits of an appearances value like `25 (3)`
pub fn try_parse_appearances(raw: &str) -> Option<i64> {
    let caps = leading_digits_re().captures(raw.trim())?;
    caps[1].parse::<i64>().ok()
}

/// Parse appearances, `0` when there are no leading digits
pub fn parse_appearances(raw: &str) -> i64 {
    try_parse_appearances(raw).unwrap_or(0)
}

/// Parse a float that may be quoted or spelled as a missing marker
///
/// `unknown`, `null`, `none` and the empty string are a valid `0.0`. Text
/// that is none of those and not a finite number yields `None`.
pub fn try_parse_safe_number(raw: &str) -> Option<f64> {
    let cleaned = raw
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim()
        .to_lowercase();

    if MISSING_NUMBER_LITERALS.contains(&cleaned.as_str()) {
        return Some(0.0);
    }

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse a float leniently, `0.0` on anything unparseable
pub fn parse_safe_number(raw: &str) -> f64 {
    try_parse_safe_number(raw).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_feet_and_inches() {
        assert_eq!(parse_height("5'10\""), 177.8);
        assert_eq!(parse_height("6'0\""), 182.88);
        assert_eq!(parse_height("5'9"), 175.26);
    }

    #[test]
    fn test_height_compact_form() {
        assert_eq!(parse_height("510"), 177.8);
        assert_eq!(parse_height("600"), 182.88);
    }

    #[test]
    fn test_height_centimetres() {
        assert_eq!(parse_height("180cm"), 180.0);
        assert_eq!(parse_height("183 CM"), 183.0);
        assert_eq!(parse_height("180"), 180.0);
        assert_eq!(parse_height("75"), 75.0);
    }

    #[test]
    fn test_height_unrecognised() {
        assert_eq!(parse_height("tall"), 0.0);
        assert_eq!(parse_height(""), 0.0);
        assert_eq!(try_parse_height("1.85m"), None);
        assert_eq!(parse_height("400000000'0\""), 0.0);
        assert_eq!(try_parse_height("4294967295'11\""), None);
    }

    #[test]
    fn test_weight() {
        assert_eq!(parse_weight("152 lbs"), 68.95);
        assert_eq!(parse_weight("152lbs"), 68.95);
        assert_eq!(parse_weight("152 LBS"), 68.95);
        assert_eq!(parse_weight("70kg"), 0.0);
        assert_eq!(try_parse_weight("heavy"), None);
    }

    #[test]
    fn test_market_value_not_for_sale() {
        assert_eq!(
            try_parse_market_value("Not For Sale"),
            Some(MarketValueRange::new(0, 0))
        );
    }

    #[test]
    fn test_market_value_range() {
        assert_eq!(
            parse_market_value("$5.8M - $7.6M"),
            MarketValueRange::new(5_800_000, 7_600_000)
        );
        assert_eq!(
            parse_market_value("€900k-€1.2m"),
            MarketValueRange::new(900_000, 1_200_000)
        );
    }

    #[test]
    fn test_market_value_single() {
        assert_eq!(
            parse_market_value("$500K"),
            MarketValueRange::new(500_000, 500_000)
        );
        assert_eq!(parse_market_value("750"), MarketValueRange::new(750, 750));
    }

    #[test]
    fn test_market_value_failures_are_whole() {
        assert_eq!(parse_market_value("garbage"), MarketValueRange::new(0, 0));
        assert_eq!(try_parse_market_value("garbage"), None);
        // One good bound is not enough
        assert_eq!(try_parse_market_value("$5M - ask"), None);
        assert_eq!(try_parse_market_value("$1.2.3M"), None);
    }

    #[test]
    fn test_appearances() {
        assert_eq!(parse_appearances("25"), 25);
        assert_eq!(parse_appearances("25 (3)"), 25);
        assert_eq!(parse_appearances("(3)"), 0);
        assert_eq!(try_parse_appearances("n/a"), None);
    }

    #[test]
    fn test_safe_number_missing_literals() {
        for raw in ["Unknown", "null", "", "NONE", "'none'", " \"NULL\" "] {
            assert_eq!(try_parse_safe_number(raw), Some(0.0), "input {:?}", raw);
        }
    }

    #[test]
    fn test_safe_number_values() {
        assert_eq!(parse_safe_number("3.14"), 3.14);
        assert_eq!(parse_safe_number("'0.45'"), 0.45);
        assert_eq!(parse_safe_number("abc"), 0.0);
        assert_eq!(try_parse_safe_number("abc"), None);
        assert_eq!(try_parse_safe_number("inf"), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(68.945984, 2), 68.95);
        assert_eq!(round_to(1.0, 2), 1.0);
    }
}
