//! Column-level convert-or-keep decision

use std::borrow::Cow;
use std::sync::LazyLock;

use tracing::debug;

use super::{ColumnOutcome, Decision};
use crate::config::Config;
use crate::error::ConfigError;
use crate::model::{ColumnData, StorageKind};
use crate::normalize::ValueNormalizer;

static DEFAULT_CLASSIFIER: LazyLock<ColumnClassifier> = LazyLock::new(ColumnClassifier::default);

/// Classify one column with the default policy
///
/// Returns the borrowed input when the column is left as it was.
pub fn infer_column(data: &ColumnData) -> Cow<'_, ColumnData> {
    DEFAULT_CLASSIFIER.classify(data).data
}

/// Result of classifying a column
#[derive(Debug, Clone)]
pub struct Classification<'a> {
    /// `Borrowed` when unchanged, `Owned` numeric data when converted
    pub data: Cow<'a, ColumnData>,
    pub outcome: ColumnOutcome,
}

/// Decides whether a text column is numeric with noise
#[derive(Debug, Clone)]
pub struct ColumnClassifier {
    normalizer: ValueNormalizer,
    threshold: f64,
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self {
            normalizer: ValueNormalizer::default(),
            threshold: Config::default().threshold,
        }
    }
}

impl ColumnClassifier {
    /// Create a classifier from configuration
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            normalizer: ValueNormalizer::new(config)?,
            threshold: config.threshold,
        })
    }

    /// Classify a column
    pub fn classify<'a>(&self, data: &'a ColumnData) -> Classification<'a> {
        let cells = match data {
            ColumnData::Numeric(values) => {
                let present = values.iter().filter(|v| v.is_some()).count();
                return Classification {
                    data: Cow::Borrowed(data),
                    outcome: ColumnOutcome {
                        decision: Decision::AlreadyNumeric,
                        storage: StorageKind::Numeric,
                        present,
                        converted: present,
                    },
                };
            }
            ColumnData::Text(cells) => cells,
        };

        let cleaned: Vec<Option<f64>> = cells.iter().map(|c| self.normalizer.normalize(c)).collect();
        let present = cells.iter().filter(|c| !c.is_missing()).count();
        let converted = cleaned.iter().filter(|v| v.is_some()).count();

        let decision = if present == 0 {
            Decision::NoPresentValues
        } else if converted as f64 / present as f64 > self.threshold {
            Decision::Converted
        } else {
            Decision::KeptAsText
        };

        debug!(present, converted, %decision, "classified text column");

        let data = if decision.is_converted() {
            Cow::Owned(ColumnData::Numeric(cleaned))
        } else {
            Cow::Borrowed(data)
        };

        Classification {
            data,
            outcome: ColumnOutcome {
                decision,
                storage: StorageKind::Text,
                present,
                converted,
            },
        }
    }
}
