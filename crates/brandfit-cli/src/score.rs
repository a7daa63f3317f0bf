use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use brandfit_core::{AppConfig, BrandConfig, BrandsFile};
use brandfit_evaluator::{read_corpus, score_corpus, write_results, ChatEvaluator};

/// Brands to evaluate: all configured ones, or the single one named.
pub(crate) fn select_brands(
    brands: &BrandsFile,
    brand_filter: Option<&str>,
) -> anyhow::Result<Vec<BrandConfig>> {
    match brand_filter {
        Some(name) => {
            let brand = brands.find(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown brand '{name}' (configured: {})",
                    brands.names().join(", ")
                )
            })?;
            Ok(vec![brand.clone()])
        }
        None => Ok(brands.brands.clone()),
    }
}

/// Evaluate every corpus entry against the selected brands and write the
/// brand-fit results file.
///
/// # Errors
///
/// Returns an error if no API key is configured, the corpus cannot be read,
/// the brand filter is unknown, or the results cannot be written. Individual
/// evaluation failures are recorded as rows with an empty score.
pub(crate) async fn run_score(
    config: &AppConfig,
    brands: &BrandsFile,
    corpus_path: &Path,
    output: &Path,
    brand_filter: Option<&str>,
) -> anyhow::Result<()> {
    let selected = select_brands(brands, brand_filter)?;
    let corpus = read_corpus(corpus_path)
        .with_context(|| format!("failed to read corpus {}", corpus_path.display()))?;
    let evaluator = ChatEvaluator::from_config(config).context("failed to build evaluator")?;

    tracing::info!(
        influencers = corpus.len(),
        brands = selected.len(),
        model = %config.llm_model,
        "starting evaluation"
    );
    let results = score_corpus(
        &evaluator,
        &corpus,
        &selected,
        Duration::from_millis(config.eval_delay_ms),
    )
    .await;

    write_results(output, &results)
        .with_context(|| format!("failed to write results to {}", output.display()))?;

    let failed = results.iter().filter(|r| r.score.is_none()).count();
    println!(
        "wrote {} evaluations ({failed} without score) -> {}",
        results.len(),
        output.display()
    );
    Ok(())
}
