//! Scoring a whole corpus against every brand.

use std::path::Path;
use std::time::Duration;

use brandfit_core::{BrandConfig, CorpusEntry};

use crate::error::EvaluatorError;
use crate::evaluator::BrandFitEvaluator;
use crate::types::{BrandFitResult, EvaluationRequest};

/// Read a corpus CSV with `influencer, wikipedia_corpus, updates_corpus`
/// columns.
///
/// # Errors
///
/// Returns [`EvaluatorError::CorpusRead`] if the file is missing or a row
/// cannot be decoded.
pub fn read_corpus(path: &Path) -> Result<Vec<CorpusEntry>, EvaluatorError> {
    let read_err = |source: csv::Error| EvaluatorError::CorpusRead {
        path: path.display().to_string(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let mut entries = Vec::new();
    for row in reader.deserialize::<CorpusEntry>() {
        let mut entry = row.map_err(read_err)?;
        entry.influencer = entry.influencer.trim().to_string();
        if entry.influencer.is_empty() {
            continue;
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Evaluate every influencer against every brand, in corpus order then brand
/// order, sleeping `delay` between consecutive calls.
///
/// Failed evaluations are kept as rows with an absent score.
pub async fn score_corpus<E: BrandFitEvaluator>(
    evaluator: &E,
    corpus: &[CorpusEntry],
    brands: &[BrandConfig],
    delay: Duration,
) -> Vec<BrandFitResult> {
    let total = corpus.len() * brands.len();
    let mut results = Vec::with_capacity(total);

    for entry in corpus {
        for brand in brands {
            if !results.is_empty() && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            tracing::info!(
                influencer = %entry.influencer,
                brand = %brand.name,
                done = results.len(),
                total,
                "evaluating"
            );
            let evaluation = evaluator
                .evaluate(&EvaluationRequest {
                    influencer: &entry.influencer,
                    wikipedia_corpus: &entry.wikipedia_corpus,
                    updates_corpus: &entry.updates_corpus,
                    brand: &brand.name,
                    criteria: &brand.criteria,
                })
                .await;

            if evaluation.score.is_none() {
                tracing::warn!(
                    influencer = %entry.influencer,
                    brand = %brand.name,
                    reason = %evaluation.reason,
                    "no score"
                );
            }

            results.push(BrandFitResult {
                brand: brand.name.clone(),
                influencer: entry.influencer.clone(),
                score: evaluation.score,
                reason: evaluation.reason,
            });
        }
    }

    results
}

/// Write results as `brand, influencer, score, reason`.
///
/// # Errors
///
/// Returns [`EvaluatorError::Csv`] if the file cannot be created or written.
pub fn write_results(path: &Path, results: &[BrandFitResult]) -> Result<(), EvaluatorError> {
    let mut writer = csv::Writer::from_path(path)?;
    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::BrandFitEvaluation;

    /// Scores by brand and records every call.
    struct FakeEvaluator {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeEvaluator {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl BrandFitEvaluator for FakeEvaluator {
        async fn evaluate(&self, request: &EvaluationRequest<'_>) -> BrandFitEvaluation {
            self.calls
                .lock()
                .unwrap()
                .push((request.influencer.to_string(), request.brand.to_string()));
            if request.brand == "kroger" {
                BrandFitEvaluation::failed("Error during evaluation")
            } else {
                BrandFitEvaluation {
                    score: Some(0.5),
                    reason: format!("{} suits {}", request.influencer, request.brand),
                }
            }
        }
    }

    fn brand(name: &str) -> BrandConfig {
        BrandConfig {
            name: name.to_string(),
            display_name: None,
            criteria: format!("- {name} criteria"),
        }
    }

    fn entry(name: &str) -> CorpusEntry {
        CorpusEntry {
            influencer: name.to_string(),
            wikipedia_corpus: format!("{name} bio"),
            updates_corpus: String::new(),
        }
    }

    #[tokio::test]
    async fn evaluates_every_influencer_brand_pair_in_order() {
        let evaluator = FakeEvaluator::new();
        let results = score_corpus(
            &evaluator,
            &[entry("ann"), entry("bo")],
            &[brand("lyft"), brand("kroger")],
            Duration::ZERO,
        )
        .await;

        let calls = evaluator.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                ("ann".to_string(), "lyft".to_string()),
                ("ann".to_string(), "kroger".to_string()),
                ("bo".to_string(), "lyft".to_string()),
                ("bo".to_string(), "kroger".to_string()),
            ]
        );
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].score, Some(0.5));
        assert_eq!(results[1].score, None);
        assert_eq!(results[1].reason, "Error during evaluation");
    }

    #[tokio::test]
    async fn results_round_trip_through_csv_with_empty_score_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ad_suitability_results.csv");

        let results = score_corpus(
            &FakeEvaluator::new(),
            &[entry("ann")],
            &[brand("lyft"), brand("kroger")],
            Duration::ZERO,
        )
        .await;
        write_results(&path, &results).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "brand,influencer,score,reason");
        assert_eq!(lines[1], "lyft,ann,0.5,ann suits lyft");
        assert_eq!(lines[2], "kroger,ann,,Error during evaluation");
    }

    #[test]
    fn read_corpus_skips_blank_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.csv");
        std::fs::write(
            &path,
            "\"influencer\",\"wikipedia_corpus\",\"updates_corpus\"\n\
             \"Ann Lee\",\"Ann is a climber\",\"\"\n\
             \"  \",\"orphan\",\"\"\n",
        )
        .unwrap();

        let corpus = read_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].influencer, "Ann Lee");
        assert_eq!(corpus[0].wikipedia_corpus, "Ann is a climber");
    }

    #[test]
    fn read_corpus_missing_file_names_path() {
        let err = read_corpus(Path::new("/nonexistent/corpus.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/corpus.csv"));
    }
}
