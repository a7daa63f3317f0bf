use serde::Serialize;

/// Reason recorded when the model reply is not valid JSON.
pub const JSON_PARSE_ERROR: &str = "JSON parsing error";
/// Reason recorded when the API call itself fails.
pub const EVALUATION_ERROR: &str = "Error during evaluation";

/// Inputs for one influencer × brand evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationRequest<'a> {
    pub influencer: &'a str,
    pub wikipedia_corpus: &'a str,
    pub updates_corpus: &'a str,
    pub brand: &'a str,
    pub criteria: &'a str,
}

/// The evaluator's verdict.
///
/// `score` is absent whenever the evaluation failed; `reason` then carries a
/// short descriptor of the failure.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandFitEvaluation {
    pub score: Option<f64>,
    pub reason: String,
}

impl BrandFitEvaluation {
    #[must_use]
    pub fn failed(reason: &str) -> Self {
        Self {
            score: None,
            reason: reason.to_string(),
        }
    }
}

/// One row of `ad_suitability_results.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandFitResult {
    pub brand: String,
    pub influencer: String,
    /// Written as an empty cell when absent.
    pub score: Option<f64>,
    pub reason: String,
}
