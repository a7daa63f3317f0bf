//! Display formatting: turns scored records into ready-to-render rows.

use std::path::{Component, Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::score::Weight;
use crate::types::ScoredRecord;

/// Placeholder for any value that is absent or could not be parsed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder shown where an influencer has no photo on disk.
pub const NO_IMAGE: &str = "No Image";

pub const BASE_COLUMNS: [&str; 7] = [
    "Photo",
    "Influencer",
    "Category",
    "Followers",
    "Appearance Score",
    "Brand Fit Score",
    "Total Score",
];

pub const REASON_COLUMNS: [&str; 2] = ["Appearance Reason", "Brand Fit Reason"];

/// Where an influencer's photo lives, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Available(PathBuf),
    NoImage,
}

impl ImageRef {
    /// Look for `<image_dir>/<influencer_id>.jpg`.
    ///
    /// Ids that are not a single plain file-name component never resolve, so
    /// lookups stay inside `image_dir`.
    #[must_use]
    pub fn resolve(image_dir: &Path, influencer_id: &str) -> Self {
        if !is_plain_name(influencer_id) {
            tracing::debug!(influencer = %influencer_id, "id is not a plain file name; no image");
            return Self::NoImage;
        }
        let path = image_dir.join(format!("{influencer_id}.jpg"));
        if path.is_file() {
            Self::Available(path)
        } else {
            Self::NoImage
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Available(path) => Some(path),
            Self::NoImage => None,
        }
    }
}

fn is_plain_name(id: &str) -> bool {
    if id.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Serialized as the image file name relative to the image directory, or
/// `null`.
impl Serialize for ImageRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.path().and_then(Path::file_name) {
            Some(name) => serializer.serialize_some(&name.to_string_lossy()),
            None => serializer.serialize_none(),
        }
    }
}

/// One ranked influencer with every field already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub influencer: String,
    pub contact_link: String,
    pub image: ImageRef,
    pub category: String,
    pub followers: String,
    pub appearance_score: String,
    pub brand_fit_score: String,
    pub total_score: String,
    /// Only populated when reasons are projected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_fit_reason: Option<String>,
}

/// The final ranked projection for one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingTable {
    pub brand: String,
    pub weight: f64,
    pub show_reasons: bool,
    pub rows: Vec<DisplayRow>,
}

impl RankingTable {
    /// Build the table from records that are already in rank order.
    #[must_use]
    pub fn from_scored(
        brand: &str,
        weight: Weight,
        show_reasons: bool,
        image_dir: &Path,
        scored: &[ScoredRecord],
    ) -> Self {
        let rows = scored
            .iter()
            .map(|s| display_row(s, show_reasons, image_dir))
            .collect();
        Self {
            brand: brand.trim().to_lowercase(),
            weight: weight.get(),
            show_reasons,
            rows,
        }
    }

    /// Column labels, in render order.
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = BASE_COLUMNS.to_vec();
        if self.show_reasons {
            headers.extend(REASON_COLUMNS);
        }
        headers
    }
}

fn display_row(scored: &ScoredRecord, show_reasons: bool, image_dir: &Path) -> DisplayRow {
    let record = &scored.record;
    let reason = |text: &Option<String>| {
        show_reasons.then(|| text.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()))
    };

    DisplayRow {
        influencer: record.influencer_id.clone(),
        contact_link: record.contact_link.clone(),
        image: ImageRef::resolve(image_dir, &record.influencer_id),
        category: record
            .category
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        followers: format_followers(&record.follower_count),
        appearance_score: format_score(record.appearance_score),
        brand_fit_score: format_score(record.brand_fit_score),
        total_score: format_score(scored.total_score),
        appearance_reason: reason(&record.appearance_reason),
        brand_fit_reason: reason(&record.brand_fit_reason),
    }
}

/// Three decimals, or `"N/A"` when absent.
#[must_use]
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.3}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Parse a follower count, truncate toward zero, and group thousands with `,`.
///
/// Anything that does not parse as a finite number renders as `"N/A"`.
#[must_use]
pub fn format_followers(raw: &str) -> String {
    let trimmed = raw.trim();
    let value = match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc(),
        _ => {
            tracing::debug!(value = trimmed, "unparseable follower count");
            return NOT_AVAILABLE.to_string();
        }
    };

    let grouped = group_thousands(&format!("{:.0}", value.abs()));
    if value < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
