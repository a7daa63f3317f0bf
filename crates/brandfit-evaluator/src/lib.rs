//! Brand-fit evaluation for brandfit.
//!
//! Sends each influencer's crawled corpus, together with a brand's criteria,
//! to an OpenAI-compatible chat-completions endpoint and turns the model's
//! JSON reply into a score in `[0, 1]` plus a short reason. Failures never
//! propagate: they come back as an absent score with a descriptor reason.

pub mod batch;
pub mod client;
pub mod error;
pub mod evaluator;
pub mod parse;
pub mod prompt;
pub mod types;

pub use batch::{read_corpus, score_corpus, write_results};
pub use client::ChatEvaluator;
pub use error::EvaluatorError;
pub use evaluator::BrandFitEvaluator;
pub use parse::parse_evaluation;
pub use types::{BrandFitEvaluation, BrandFitResult, EvaluationRequest};
