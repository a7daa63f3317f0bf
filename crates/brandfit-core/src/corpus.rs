use serde::{Deserialize, Serialize};

/// Crawled text for one influencer: the output of `crawl` and the input of
/// `score`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub influencer: String,
    #[serde(default)]
    pub wikipedia_corpus: String,
    #[serde(default)]
    pub updates_corpus: String,
}
