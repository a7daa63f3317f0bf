//! Influencer text collection for brandfit.
//!
//! For each influencer, finds an encyclopedia page and a few recent pages via
//! web search, extracts their visible text, and writes the result as a corpus
//! CSV for the evaluator. Every fetch is best-effort: failures yield empty
//! text, never an error.

pub mod client;
pub mod corpus;
pub mod error;
pub mod search;
pub mod text;

pub use client::{TextFetcher, WebCrawler};
pub use corpus::{crawl_corpus, read_influencers, write_corpus};
pub use error::CrawlerError;
pub use search::parse_search_links;
pub use text::visible_text;
