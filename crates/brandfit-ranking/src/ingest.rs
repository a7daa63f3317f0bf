//! Loading the three CSV sources.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::RankingError;
use crate::types::{AppearanceRow, BrandFitRow, MetadataRow};

/// File name of the brand-independent influencer metadata.
pub const METADATA_FILE: &str = "top_100.csv";
/// File name of the evaluator output covering every brand.
pub const BRAND_FIT_FILE: &str = "ad_suitability_results.csv";

const APPEARANCE_COLUMNS: &[&str] = &["influencer", "score"];
const METADATA_COLUMNS: &[&str] = &["influencer", "instagram", "last_followers"];
const BRAND_FIT_COLUMNS: &[&str] = &["brand", "influencer", "score"];

/// File name of the per-brand appearance scores.
#[must_use]
pub fn appearance_file_name(brand: &str) -> String {
    format!("top_100_{}_reasons.csv", brand.trim().to_lowercase())
}

/// Locations of the three inputs for one ranking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub appearance: PathBuf,
    pub metadata: PathBuf,
    pub brand_fit: PathBuf,
}

impl SourcePaths {
    /// Resolve the conventional file names for `brand` under `data_dir`.
    #[must_use]
    pub fn for_brand(data_dir: &Path, brand: &str) -> Self {
        Self {
            appearance: data_dir.join(appearance_file_name(brand)),
            metadata: data_dir.join(METADATA_FILE),
            brand_fit: data_dir.join(BRAND_FIT_FILE),
        }
    }

    fn all(&self) -> [&Path; 3] {
        [&self.appearance, &self.metadata, &self.brand_fit]
    }
}

/// The three snapshots, parsed into typed rows.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub appearance: Vec<AppearanceRow>,
    pub metadata: Vec<MetadataRow>,
    pub brand_fit: Vec<BrandFitRow>,
}

/// Load all three sources.
///
/// Every path is checked for existence before any file is parsed, so a run
/// never proceeds on a partial set.
///
/// # Errors
///
/// - [`RankingError::MissingSource`] if any file does not exist.
/// - [`RankingError::MissingColumn`] if a header lacks a required column.
/// - [`RankingError::Read`] if a file cannot be opened or read.
///
/// Rows that cannot be decoded (too few fields, invalid UTF-8) are skipped
/// with a warning.
pub fn load_sources(paths: &SourcePaths) -> Result<Sources, RankingError> {
    for path in paths.all() {
        if !path.is_file() {
            return Err(RankingError::MissingSource {
                name: display_name(path),
                path: path.to_path_buf(),
            });
        }
    }

    let appearance = read_rows::<AppearanceRow>(&paths.appearance, APPEARANCE_COLUMNS)?;
    let metadata = read_rows::<MetadataRow>(&paths.metadata, METADATA_COLUMNS)?;
    let brand_fit = read_rows::<BrandFitRow>(&paths.brand_fit, BRAND_FIT_COLUMNS)?;

    tracing::debug!(
        appearance = appearance.len(),
        metadata = metadata.len(),
        brand_fit = brand_fit.len(),
        "loaded ranking sources"
    );

    Ok(Sources {
        appearance,
        metadata,
        brand_fit,
    })
}

fn read_rows<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, RankingError> {
    let name = display_name(path);
    let read_err = |source: csv::Error| RankingError::Read {
        name: name.clone(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let headers = reader.headers().map_err(read_err)?;
    if let Some(column) = required.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(RankingError::MissingColumn {
            name: name.clone(),
            column: (*column).to_string(),
        });
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) if e.is_io_error() => return Err(read_err(e)),
            Err(e) => {
                skipped += 1;
                tracing::warn!(
                    file = %name,
                    line = e.position().map(csv::Position::line),
                    error = %e,
                    "skipping malformed row"
                );
            }
        }
    }
    if skipped > 0 {
        tracing::debug!(file = %name, kept = rows.len(), skipped, "finished reading with skipped rows");
    }
    Ok(rows)
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}
