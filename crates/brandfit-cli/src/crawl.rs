use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use brandfit_core::AppConfig;
use brandfit_crawler::{crawl_corpus, read_influencers, write_corpus, WebCrawler};

/// Crawl text for every influencer listed in `input` and write the corpus.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the crawler cannot be built,
/// or the corpus cannot be written. Individual fetch failures only produce
/// empty text.
pub(crate) async fn run_crawl(config: &AppConfig, input: &Path, output: &Path) -> anyhow::Result<()> {
    let names = read_influencers(input)
        .with_context(|| format!("failed to read influencers from {}", input.display()))?;
    let crawler = WebCrawler::from_config(config).context("failed to build crawler")?;

    tracing::info!(influencers = names.len(), "starting crawl");
    let entries = crawl_corpus(&crawler, &names, Duration::from_millis(config.crawl_delay_ms)).await;

    write_corpus(output, &entries)
        .with_context(|| format!("failed to write corpus to {}", output.display()))?;

    let empty = entries
        .iter()
        .filter(|e| e.wikipedia_corpus.is_empty() && e.updates_corpus.is_empty())
        .count();
    println!(
        "crawled {} influencers ({empty} without text) -> {}",
        entries.len(),
        output.display()
    );
    Ok(())
}
