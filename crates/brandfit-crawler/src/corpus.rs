//! Reading influencer lists and writing the crawled corpus.

use std::path::Path;
use std::time::Duration;

use brandfit_core::CorpusEntry;

use crate::client::TextFetcher;
use crate::error::CrawlerError;

const NAME_COLUMN: &str = "influencer";

/// Influencer names from the `influencer` column of a CSV file, in file
/// order, with blank cells skipped.
///
/// # Errors
///
/// Returns [`CrawlerError::Csv`] if the file cannot be read, or
/// [`CrawlerError::MissingColumn`] if it has no `influencer` column.
pub fn read_influencers(path: &Path) -> Result<Vec<String>, CrawlerError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == NAME_COLUMN)
        .ok_or_else(|| CrawlerError::MissingColumn {
            path: path.display().to_string(),
            column: NAME_COLUMN.to_owned(),
        })?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(column).map(str::trim).filter(|n| !n.is_empty()) {
            names.push(name.to_owned());
        }
    }
    Ok(names)
}

/// Crawl every influencer in order, pausing `delay` between influencers.
pub async fn crawl_corpus<F: TextFetcher>(
    fetcher: &F,
    names: &[String],
    delay: Duration,
) -> Vec<CorpusEntry> {
    let mut entries = Vec::with_capacity(names.len());

    for (index, name) in names.iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        tracing::info!(influencer = %name, index, total = names.len(), "crawling");

        let wikipedia_corpus = fetcher.wikipedia_content(name).await;
        let updates_corpus = fetcher.latest_updates(name).await;
        if wikipedia_corpus.is_empty() && updates_corpus.is_empty() {
            tracing::warn!(influencer = %name, "no text found");
        }

        entries.push(CorpusEntry {
            influencer: name.replace(',', ""),
            wikipedia_corpus,
            updates_corpus,
        });
    }

    entries
}

/// Write the corpus with every field quoted.
///
/// # Errors
///
/// Returns [`CrawlerError::Csv`] if the file cannot be created or written.
pub fn write_corpus(path: &Path, entries: &[CorpusEntry]) -> Result<(), CrawlerError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedFetcher;

    impl TextFetcher for CannedFetcher {
        async fn wikipedia_content(&self, name: &str) -> String {
            if name.starts_with("Nobody") {
                String::new()
            } else {
                format!("{name} biography")
            }
        }

        async fn latest_updates(&self, name: &str) -> String {
            format!("{name} news one\n\n{name} news two")
        }
    }

    #[tokio::test]
    async fn crawl_strips_commas_from_names() {
        let names = vec!["Lee, Ann".to_string(), "Nobody".to_string()];
        let entries = crawl_corpus(&CannedFetcher, &names, Duration::ZERO).await;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].influencer, "Lee Ann");
        assert_eq!(entries[0].wikipedia_corpus, "Lee, Ann biography");
        assert_eq!(entries[1].wikipedia_corpus, "");
    }

    #[tokio::test]
    async fn corpus_file_quotes_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.csv");
        let entries = crawl_corpus(&CannedFetcher, &["Ann".to_string()], Duration::ZERO).await;

        write_corpus(&path, &entries).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(
            "\"influencer\",\"wikipedia_corpus\",\"updates_corpus\"\n\"Ann\",\"Ann biography\",\"Ann news one\n\nAnn news two\"\n"
        ));
    }

    #[test]
    fn read_influencers_uses_influencer_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top_100.csv");
        std::fs::write(
            &path,
            "rank,influencer,instagram\n1,Ann Lee,https://x\n2,  ,https://y\n3,Bo,https://z\n",
        )
        .unwrap();

        assert_eq!(read_influencers(&path).unwrap(), vec!["Ann Lee", "Bo"]);
    }

    #[test]
    fn read_influencers_requires_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.csv");
        std::fs::write(&path, "name\nAnn\n").unwrap();

        assert!(matches!(
            read_influencers(&path),
            Err(CrawlerError::MissingColumn { .. })
        ));
    }

    #[test]
    fn read_influencers_accepts_bom_prefixed_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top_100.csv");
        std::fs::write(&path, "\u{feff}influencer,rank\nAnn,1\n").unwrap();

        assert_eq!(read_influencers(&path).unwrap(), vec!["Ann"]);
    }
}
