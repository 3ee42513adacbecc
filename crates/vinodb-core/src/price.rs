//! Price-text cleaning and discount derivation.
//!
//! The catalog renders prices as `$12.345,00`. Cleaning drops the last three
//! characters (the `,00` cents suffix) and then strips every `$`, `.` and `,`,
//! leaving a digit string that is read as a whole-currency amount.
//!
//! ## Compatibility note
//!
//! The discounted price arrives split into an integer node and a decimal
//! node. They are glued back together as `$<integer>,<decimal>` before the
//! same three-character trim, so a two-digit decimal part disappears and any
//! other length bleeds into (or eats from) the integer digits. This mirrors
//! the numbers already published in past reports and is kept as-is; see
//! `short_decimal_part_eats_integer_digits` below.

/// Number of trailing characters dropped from every rendered price.
pub const PRICE_SUFFIX_LEN: usize = 3;

/// Drops the trailing [`PRICE_SUFFIX_LEN`] characters of `raw`.
///
/// Strings shorter than the suffix become empty rather than panicking.
#[must_use]
pub fn trim_price_suffix(raw: &str) -> &str {
    let keep = raw.chars().count().saturating_sub(PRICE_SUFFIX_LEN);
    let end = raw.char_indices().nth(keep).map_or(raw.len(), |(idx, _)| idx);
    &raw[..end]
}

/// Cleans a rendered price into a bare digit string.
///
/// Returns an empty string when nothing is left after trimming.
#[must_use]
pub fn clean_price(raw: &str) -> String {
    trim_price_suffix(raw)
        .chars()
        .filter(|c| !matches!(c, '$' | '.' | ','))
        .collect()
}

/// Rebuilds the discounted price text from its two rendered sub-fields.
#[must_use]
pub fn compose_current_price(fraction: &str, decimal: &str) -> String {
    format!("${},{}", fraction.trim(), decimal.trim())
}

/// Computes `(listed - current) / listed * 100` from two rendered prices.
///
/// Returns `None` when either price is absent, cleans to an empty or
/// non-numeric string, or when the listed amount is zero.
#[must_use]
pub fn discount_percent(listed: Option<&str>, current: Option<&str>) -> Option<f64> {
    let listed = parse_amount(&clean_price(listed?))?;
    let current = parse_amount(&clean_price(current?))?;
    if listed == 0.0 {
        return None;
    }
    Some((listed - current) / listed * 100.0)
}

fn parse_amount(cleaned: &str) -> Option<f64> {
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
