//! Balance scoring.
//!
//! The balance score rewards high average progress and penalizes uneven
//! distribution across spheres:
//!
//! ```text
//! balance = max(0, mean - variance / 2)
//! ```
//!
//! `variance` is the population variance. The score is floored at 0 but is
//! not capped at 100.

use serde::{Deserialize, Serialize};

/// Scores above this are shown as balanced.
pub const BALANCED_THRESHOLD: f64 = 60.0;

/// Scores above this (and not balanced) are shown as uneven.
pub const UNEVEN_THRESHOLD: f64 = 30.0;

/// Compute the balance score of a set of progress values.
///
/// Returns 0 for an empty set.
pub fn balance_of<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return 0.0;
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / count;

    (mean - variance / 2.0).max(0.0)
}

/// Coarse classification of a balance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceLevel {
    /// Above 60
    Balanced,
    /// Above 30
    Uneven,
    /// 30 or below
    Critical,
}

impl BalanceLevel {
    /// Classify a raw score.
    pub fn classify(value: f64) -> Self {
        if value > BALANCED_THRESHOLD {
            BalanceLevel::Balanced
        } else if value > UNEVEN_THRESHOLD {
            BalanceLevel::Uneven
        } else {
            BalanceLevel::Critical
        }
    }

    /// Indicator color for this level.
    pub fn color(&self) -> &'static str {
        match self {
            BalanceLevel::Balanced => "#4CAF50",
            BalanceLevel::Uneven => "#FF9800",
            BalanceLevel::Critical => "#F44336",
        }
    }
}

/// A balance score with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceScore {
    /// Raw score
    pub value: f64,
    /// Classification of `value`
    pub level: BalanceLevel,
}

impl BalanceScore {
    /// Wrap a raw score.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            level: BalanceLevel::classify(value),
        }
    }

    /// Score rounded to a whole percent for display.
    pub fn percent(&self) -> i64 {
        self.value.round() as i64
    }
}
