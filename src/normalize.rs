//! Value-level normalization of messy numeric text
//!
//! Turns cells like `"$1,000"`, `"84.3%"`, `"39,538,223[4]"` or
//! `"93.83 people/sq mi"` into plain floats. A cell that holds no
//! recoverable number yields `None`; bad input is never an error. Text only
//! ever yields finite values, so `"inf"` or `"1e999"` count as not a number.
//!
//! Digits are ASCII only: `"١٢"` and other non-ASCII digit runs are not
//! recognized. Single underscores between digits (`"1_000"`) are accepted
//! as grouping.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::error::ConfigError;
use crate::model::CellValue;

/// First signed decimal anywhere in the text
static EMBEDDED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]+\.?[0-9]*").expect("embedded number pattern is valid"));

static DEFAULT_NORMALIZER: LazyLock<ValueNormalizer> = LazyLock::new(|| {
    ValueNormalizer::new(&Config::default()).expect("default config is valid")
});

/// Normalize one cell with the default policy
pub fn normalize_value(value: &CellValue) -> Option<f64> {
    DEFAULT_NORMALIZER.normalize(value)
}

/// Cleans raw cells into floats according to a [`Config`]
#[derive(Debug, Clone)]
pub struct ValueNormalizer {
    footnote: Regex,
    minus_signs: Vec<char>,
    decorations: Vec<char>,
    percent_sign: char,
    currency_symbols: Vec<char>,
    thousands_separator: char,
    strict: bool,
}

impl Default for ValueNormalizer {
    fn default() -> Self {
        DEFAULT_NORMALIZER.clone()
    }
}

impl ValueNormalizer {
    /// Build a normalizer, validating the config first
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let pattern = format!(
            "{}.*?{}",
            regex::escape(&config.footnote.open),
            regex::escape(&config.footnote.close)
        );

        Ok(Self {
            footnote: Regex::new(&pattern)?,
            minus_signs: config.minus_signs.clone(),
            decorations: config.decorations.clone(),
            percent_sign: config.percent_sign,
            currency_symbols: config.currency_symbols.clone(),
            thousands_separator: config.thousands_separator,
            strict: config.strict,
        })
    }

    /// Normalize one cell
    pub fn normalize(&self, value: &CellValue) -> Option<f64> {
        match value {
            CellValue::String(s) => self.normalize_str(s),
            other => other.as_number(),
        }
    }

    /// Normalize raw text
    pub fn normalize_str(&self, raw: &str) -> Option<f64> {
        if raw.is_empty() {
            return None;
        }

        let without_notes = self.footnote.replace_all(raw.trim(), "");

        let mut is_percent = false;
        let mut text = String::with_capacity(without_notes.len());
        for c in without_notes.chars() {
            if self.minus_signs.contains(&c) {
                text.push('-');
            } else if self.decorations.contains(&c) {
                continue;
            } else if c == self.percent_sign {
                is_percent = true;
            } else if self.currency_symbols.contains(&c) || c == self.thousands_separator {
                continue;
            } else {
                text.push(c);
            }
        }

        let value = self.parse_number(text.trim())?;
        Some(if is_percent { value / 100.0 } else { value })
    }

    fn parse_number(&self, text: &str) -> Option<f64> {
        // A clean parse settles the value, even when it is not finite
        if let Ok(value) = strip_digit_grouping(text).parse::<f64>() {
            return value.is_finite().then_some(value);
        }
        if self.strict {
            return None;
        }
        EMBEDDED_NUMBER
            .find(text)
            .and_then(|m| parse_finite(m.as_str()))
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Drop underscores that sit alone between two ASCII digits
fn strip_digit_grouping(text: &str) -> Cow<'_, str> {
    if !text.contains('_') {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        let between_digits = c == '_'
            && i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
        if !between_digits {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(s: &str) -> Option<f64> {
        normalize_value(&CellValue::from(s))
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("expected a number");
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_currency_and_separators() {
        assert_eq!(clean("1,234"), Some(1234.0));
        assert_eq!(clean("$1,000"), Some(1000.0));
        assert_eq!(clean("$12.50"), Some(12.5));
        assert_eq!(clean("£100"), Some(100.0));
        assert_eq!(clean("€50"), Some(50.0));
    }

    #[test]
    fn test_percentages() {
        assert_eq!(clean("50%"), Some(0.5));
        assert_close(clean("84.3%"), 0.843);
        assert_eq!(clean("abc%"), None);
        assert_eq!(clean("%"), None);
    }

    #[test]
    fn test_footnotes() {
        assert_eq!(clean("39,538,223[4]"), Some(39538223.0));
        assert_eq!(clean("12[a][note 1]"), Some(12.0));
        assert_eq!(clean("[1]7[2]"), Some(7.0));
    }

    #[test]
    fn test_minus_and_arrows() {
        assert_close(clean("−0.1%"), -0.001);
        assert_close(clean("+6.1%↑"), 0.061);
        assert_eq!(clean("↓3"), Some(3.0));
    }

    #[test]
    fn test_embedded_number() {
        assert_eq!(clean("93.83 people/sq mi"), Some(93.83));
        assert_eq!(clean("approx. -4 degrees"), Some(-4.0));
        // First of several numbers wins
        assert_eq!(clean("3 to 5"), Some(3.0));
    }

    #[test]
    fn test_clean_parse_skips_extraction() {
        assert_eq!(clean("-12.75"), Some(-12.75));
        assert_eq!(clean("1e3"), Some(1000.0));
        assert_eq!(clean("  42  "), Some(42.0));
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(clean("abc"), None);
        assert_eq!(clean(""), None);
        assert_eq!(clean("   "), None);
        assert_eq!(clean("nan"), None);
        assert_eq!(normalize_value(&CellValue::Null), None);
        assert_eq!(normalize_value(&CellValue::Float(f64::NAN)), None);
    }

    #[test]
    fn test_infinite_text_is_not_a_number() {
        assert_eq!(clean("inf"), None);
        assert_eq!(clean("Infinity"), None);
        assert_eq!(clean("-INF"), None);
        assert_eq!(clean("1e999"), None);
        assert_eq!(clean("1e999%"), None);
        // Overflowing digit run reached through extraction
        let long = format!("{} km", "9".repeat(400));
        assert_eq!(clean(&long), None);
    }

    #[test]
    fn test_digit_grouping_underscores() {
        assert_eq!(clean("1_000"), Some(1000.0));
        assert_eq!(clean("$2_500.5"), Some(2500.5));
        // Doubled or dangling underscores are not grouping
        assert_eq!(clean("1__000"), Some(1.0));
        assert_eq!(clean("_5"), Some(5.0));
        assert_eq!(strip_digit_grouping("a_b"), "a_b");
    }

    #[test]
    fn test_non_ascii_digits_unrecognized() {
        assert_eq!(clean("١٢"), None);
    }

    #[test]
    fn test_numeric_scalars_pass_through() {
        assert_eq!(normalize_value(&CellValue::Int(100)), Some(100.0));
        assert_eq!(normalize_value(&CellValue::Float(12.5)), Some(12.5));
        assert_eq!(normalize_value(&CellValue::Float(-0.25)), Some(-0.25));
    }

    #[test]
    fn test_strict_mode() {
        let normalizer = ValueNormalizer::new(&Config::new().with_strict(true)).unwrap();
        assert_eq!(normalizer.normalize_str("93.83 people/sq mi"), None);
        assert_eq!(normalizer.normalize_str("$1,000"), Some(1000.0));
    }

    #[test]
    fn test_custom_symbols() {
        let config = Config::new()
            .with_currency_symbols(vec!['¥'])
            .with_footnote_delimiters("(", ")");
        let normalizer = ValueNormalizer::new(&config).unwrap();
        assert_eq!(normalizer.normalize_str("¥2,500(est.)"), Some(2500.0));
        // '$' is no longer stripped, so the direct parse fails and extraction recovers it
        assert_eq!(normalizer.normalize_str("$7"), Some(7.0));
        let strict = ValueNormalizer::new(&config.with_strict(true)).unwrap();
        assert_eq!(strict.normalize_str("$7"), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(ValueNormalizer::new(&Config::new().with_threshold(-1.0)).is_err());
    }
}
