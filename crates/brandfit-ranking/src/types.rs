//! Typed rows for the three input sources and the fused record.

use serde::Deserialize;

/// One row of `top_100_<brand>_reasons.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppearanceRow {
    #[serde(rename = "influencer")]
    pub influencer_id: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub reason: Option<String>,
}

/// One row of the brand-independent metadata file (`top_100.csv`).
///
/// Columns beyond these four are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetadataRow {
    #[serde(rename = "influencer")]
    pub influencer_id: String,
    #[serde(rename = "instagram", default, deserialize_with = "blank_as_none")]
    pub contact_link: Option<String>,
    #[serde(rename = "last_followers", default, deserialize_with = "blank_as_none")]
    pub follower_count: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,
}

/// One row of `ad_suitability_results.csv`, covering every brand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrandFitRow {
    pub brand: String,
    #[serde(rename = "influencer")]
    pub influencer_id: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub reason: Option<String>,
}

/// An influencer after both joins, before scoring.
///
/// `contact_link` and `follower_count` are always non-blank: rows lacking
/// either never make it into the anchor set.
#[derive(Debug, Clone, PartialEq)]
pub struct InfluencerRecord {
    pub influencer_id: String,
    pub contact_link: String,
    /// Raw follower count text; parsed only for display.
    pub follower_count: String,
    pub category: Option<String>,
    pub appearance_score: Option<f64>,
    pub appearance_reason: Option<String>,
    pub brand_fit_score: Option<f64>,
    pub brand_fit_reason: Option<String>,
}

/// A fused record together with its weighted composite.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: InfluencerRecord,
    /// Present only when both component scores are present.
    pub total_score: Option<f64>,
}

/// Parse a score cell, treating blanks and non-numeric or non-finite text as
/// absent.
#[must_use]
pub fn parse_score(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::debug!(value = trimmed, "unparseable score treated as missing");
            None
        }
    }
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_score))
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
