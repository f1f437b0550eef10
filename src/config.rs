//! Configuration handling for numclean

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Output format for conversion results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Delimiters of a footnote annotation such as `[4]` or `[note 1]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootnoteDelimiters {
    pub open: String,
    pub close: String,
}

impl Default for FootnoteDelimiters {
    fn default() -> Self {
        Self {
            open: "[".to_string(),
            close: "]".to_string(),
        }
    }
}

/// Policy settings for normalization and column inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// A text column converts when its success rate is strictly above this
    pub threshold: f64,
    /// Currency symbols stripped before parsing
    pub currency_symbols: Vec<char>,
    /// Thousands separator stripped before parsing
    pub thousands_separator: char,
    /// Percent sign; its presence divides the parsed value by 100
    pub percent_sign: char,
    /// Footnote annotation delimiters
    pub footnote: FootnoteDelimiters,
    /// Characters rewritten to an ASCII `-`
    pub minus_signs: Vec<char>,
    /// Decorative characters (trend arrows) removed without numeric effect
    pub decorations: Vec<char>,
    /// Disable extraction of a number embedded in trailing text
    pub strict: bool,
    /// Classify columns on the rayon thread pool
    pub parallel: bool,
    /// Raw cell texts loaders read as missing
    pub missing_markers: Vec<String>,
    /// Match missing markers ignoring ASCII case
    pub ignore_marker_case: bool,
    /// Output format
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            currency_symbols: vec!['£', '$', '€'],
            thousands_separator: ',',
            percent_sign: '%',
            footnote: FootnoteDelimiters::default(),
            minus_signs: vec!['\u{2212}'],
            decorations: vec!['↑', '↓'],
            strict: false,
            parallel: false,
            missing_markers: vec![String::new(), "null".to_string(), "NA".to_string()],
            ignore_marker_case: true,
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Create a Config with default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a Config from a JSON document; absent fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings describe a usable policy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.footnote.open.is_empty() {
            return Err(ConfigError::EmptyDelimiter { side: "open" });
        }
        if self.footnote.close.is_empty() {
            return Err(ConfigError::EmptyDelimiter { side: "close" });
        }

        let stripped = [
            ("currency_symbols", self.currency_symbols.as_slice()),
            ("decorations", self.decorations.as_slice()),
            ("thousands_separator", std::slice::from_ref(&self.thousands_separator)),
            ("percent_sign", std::slice::from_ref(&self.percent_sign)),
        ];
        for (field, symbols) in stripped {
            if let Some(&symbol) = symbols.iter().find(|c| is_numeric_syntax(**c)) {
                return Err(ConfigError::ReservedSymbol { field, symbol });
            }
        }

        Ok(())
    }

    /// Set the conversion threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set currency symbols
    pub fn with_currency_symbols(mut self, symbols: Vec<char>) -> Self {
        self.currency_symbols = symbols;
        self
    }

    /// Set footnote delimiters
    pub fn with_footnote_delimiters(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.footnote = FootnoteDelimiters {
            open: open.into(),
            close: close.into(),
        };
        self
    }

    /// Set decorative characters
    pub fn with_decorations(mut self, decorations: Vec<char>) -> Self {
        self.decorations = decorations;
        self
    }

    /// Enable strict mode (no embedded-number extraction)
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable parallel column classification
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set missing markers used by loaders
    pub fn with_missing_markers(mut self, markers: Vec<String>) -> Self {
        self.missing_markers = markers;
        self
    }

    /// Match missing markers case-sensitively or not
    pub fn with_ignore_marker_case(mut self, ignore: bool) -> Self {
        self.ignore_marker_case = ignore;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Whether a raw loader cell is a missing marker
    pub fn is_missing_marker(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        self.missing_markers.iter().any(|m| {
            if self.ignore_marker_case {
                m.eq_ignore_ascii_case(trimmed)
            } else {
                m == trimmed
            }
        })
    }
}

fn is_numeric_syntax(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '.' || c.is_whitespace()
}
