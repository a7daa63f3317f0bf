//! Weighted total score and the ranking order.
//!
//! The total is `weight * appearance + (1 - weight) * brand_fit`, absent when
//! either input is. Ranked output is sorted by total descending with absent
//! totals last.

use std::cmp::Ordering;
use std::fmt;

use crate::error::RankingError;
use crate::types::{InfluencerRecord, ScoredRecord};

/// Blend factor between appearance and brand-fit scores.
///
/// Always finite and within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub const DEFAULT: Weight = Weight(0.5);

    /// # Errors
    ///
    /// Returns [`RankingError::InvalidWeight`] for values outside `[0.0, 1.0]`
    /// or non-finite values.
    pub fn new(value: f64) -> Result<Self, RankingError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RankingError::InvalidWeight(value))
        }
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Weight {
    type Error = RankingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Weighted composite of the two component scores.
///
/// `None` unless both components are present.
#[must_use]
pub fn total_score(appearance: Option<f64>, brand_fit: Option<f64>, weight: Weight) -> Option<f64> {
    let (a, b) = (appearance?, brand_fit?);
    let w = weight.get();
    Some(w * a + (1.0 - w) * b)
}

/// Score every record and sort by total descending.
///
/// Records without a total sort after all scored ones. The sort is stable, so
/// ties and the unscored group keep their input order.
#[must_use]
pub fn rank(records: Vec<InfluencerRecord>, weight: Weight) -> Vec<ScoredRecord> {
    let mut scored: Vec<ScoredRecord> = records
        .into_iter()
        .map(|record| {
            let total_score = total_score(record.appearance_score, record.brand_fit_score, weight);
            ScoredRecord {
                record,
                total_score,
            }
        })
        .collect();

    scored.sort_by(|a, b| descending_none_last(a.total_score, b.total_score));
    scored
}

fn descending_none_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
