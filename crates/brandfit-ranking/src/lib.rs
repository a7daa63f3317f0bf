//! Scoring-and-ranking pipeline for brandfit.
//!
//! Loads three CSV snapshots (per-brand appearance scores, influencer
//! metadata, and the brand-fit results written by the evaluator), fuses them
//! by influencer, blends the two component scores with a caller-supplied
//! weight, and produces a sorted, display-ready table. Every invocation is a
//! single pure pass over fresh snapshots.

pub mod error;
pub mod fuse;
pub mod ingest;
pub mod pipeline;
pub mod present;
pub mod render;
pub mod score;
pub mod types;

pub use error::RankingError;
pub use ingest::{load_sources, SourcePaths, Sources};
pub use pipeline::{run_pipeline, RankingRequest};
pub use present::{format_followers, format_score, DisplayRow, ImageRef, RankingTable, NOT_AVAILABLE};
pub use render::{render_csv, render_html_table, render_text_table};
pub use score::{rank, total_score, Weight};
pub use types::{AppearanceRow, BrandFitRow, InfluencerRecord, MetadataRow, ScoredRecord};
