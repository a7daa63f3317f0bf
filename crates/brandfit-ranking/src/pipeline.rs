//! One ranking run: load the three sources, fuse, score, and present.

use std::path::{Path, PathBuf};

use crate::error::RankingError;
use crate::fuse::fuse;
use crate::ingest::{load_sources, SourcePaths};
use crate::present::RankingTable;
use crate::score::{rank, Weight};

/// Everything one ranking run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRequest {
    pub brand: String,
    pub weight: Weight,
    pub show_reasons: bool,
    pub paths: SourcePaths,
    pub image_dir: PathBuf,
}

impl RankingRequest {
    /// Request for `brand` using the conventional file names under `data_dir`.
    #[must_use]
    pub fn new(brand: &str, weight: Weight, data_dir: &Path, image_dir: &Path) -> Self {
        Self {
            brand: brand.trim().to_lowercase(),
            weight,
            show_reasons: false,
            paths: SourcePaths::for_brand(data_dir, brand),
            image_dir: image_dir.to_path_buf(),
        }
    }

    #[must_use]
    pub fn with_reasons(mut self, show_reasons: bool) -> Self {
        self.show_reasons = show_reasons;
        self
    }
}

/// Load, fuse, score, sort, and format in one pass.
///
/// # Errors
///
/// Propagates any fatal [`RankingError`] from loading the sources. No partial
/// table is ever returned.
pub fn run_pipeline(request: &RankingRequest) -> Result<RankingTable, RankingError> {
    let sources = load_sources(&request.paths)?;

    let fused = fuse(
        &sources.appearance,
        &sources.metadata,
        &sources.brand_fit,
        &request.brand,
    );
    let ranked = rank(fused, request.weight);

    let scored = ranked.iter().filter(|r| r.total_score.is_some()).count();
    tracing::info!(
        brand = %request.brand,
        weight = %request.weight,
        rows = ranked.len(),
        scored,
        "ranking complete"
    );

    Ok(RankingTable::from_scored(
        &request.brand,
        request.weight,
        request.show_reasons,
        &request.image_dir,
        &ranked,
    ))
}
