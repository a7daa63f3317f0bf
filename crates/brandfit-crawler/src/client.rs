//! HTTP side of the crawler: search requests and page downloads.

use std::future::Future;
use std::time::Duration;

use brandfit_core::{AppConfig, Backoff};
use reqwest::{Client, StatusCode};

use crate::error::CrawlerError;
use crate::search::{parse_search_links, search_url};
use crate::text::visible_text;

const WIKIPEDIA_DOMAIN: &str = "wikipedia.org";
const WIKIPEDIA_RESULTS: usize = 5;
const UPDATE_RESULTS: usize = 10;
const MAX_UPDATES: usize = 3;

/// Best-effort text lookup for one influencer.
///
/// Both methods return an empty string when nothing usable was found.
pub trait TextFetcher {
    fn wikipedia_content(&self, name: &str) -> impl Future<Output = String> + Send;
    fn latest_updates(&self, name: &str) -> impl Future<Output = String> + Send;
}

/// Crawler that searches Bing RSS and downloads result pages.
pub struct WebCrawler {
    client: Client,
    search_base_url: String,
    backoff: Backoff,
}

impl WebCrawler {
    /// # Errors
    ///
    /// Returns [`CrawlerError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`CrawlerError::InvalidBaseUrl`] if `search_base_url` is not
    /// an absolute http(s) URL.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        search_base_url: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, CrawlerError> {
        let parsed = reqwest::Url::parse(search_base_url)
            .map_err(|_| CrawlerError::InvalidBaseUrl(search_base_url.to_owned()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CrawlerError::InvalidBaseUrl(search_base_url.to_owned()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            search_base_url: search_base_url.trim_end_matches('/').to_owned(),
            backoff: Backoff::new(max_retries, backoff_base_secs),
        })
    }

    /// # Errors
    ///
    /// See [`WebCrawler::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CrawlerError> {
        Self::new(
            config.crawl_timeout_secs,
            &config.crawl_user_agent,
            &config.search_base_url,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Run a web search and return up to `limit` result URLs.
    ///
    /// # Errors
    ///
    /// - [`CrawlerError::RateLimited`] on HTTP 429 after all retries.
    /// - [`CrawlerError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`CrawlerError::Http`] on network failure.
    /// - [`CrawlerError::Xml`] if the feed is malformed.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, CrawlerError> {
        let url = search_url(&self.search_base_url, query);
        let url = &url;

        let body = self.backoff.run("search", || async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(CrawlerError::RateLimited { url: url.clone() });
            }
            if !status.is_success() {
                return Err(CrawlerError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.clone(),
                });
            }
            Ok(response.text().await?)
        })
        .await?;

        parse_search_links(&body, limit)
    }

    /// Download `url` and return its visible text, or an empty string on any
    /// failure or non-200 status.
    pub async fn fetch_page_text(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url, error = %e, "page fetch failed");
                return String::new();
            }
        };
        if response.status() != StatusCode::OK {
            tracing::debug!(url, status = response.status().as_u16(), "page skipped");
            return String::new();
        }
        match response.text().await {
            Ok(body) => visible_text(&body),
            Err(e) => {
                tracing::warn!(url, error = %e, "page body unreadable");
                String::new()
            }
        }
    }

    async fn search_or_empty(&self, query: &str, limit: usize) -> Vec<String> {
        self.search(query, limit).await.unwrap_or_else(|e| {
            tracing::warn!(query, error = %e, "search failed");
            Vec::new()
        })
    }
}

impl TextFetcher for WebCrawler {
    /// Text of the first `wikipedia.org` page among the top search results
    /// for `"<name> wikipedia"`.
    async fn wikipedia_content(&self, name: &str) -> String {
        let query = format!("{name} wikipedia");
        let links = self.search_or_empty(&query, WIKIPEDIA_RESULTS).await;
        match links.iter().find(|url| url.contains(WIKIPEDIA_DOMAIN)) {
            Some(url) => {
                tracing::debug!(influencer = name, url = %url, "wikipedia page found");
                self.fetch_page_text(url).await
            }
            None => {
                tracing::debug!(influencer = name, "no wikipedia page in results");
                String::new()
            }
        }
    }

    /// Up to three non-empty page texts from non-wikipedia results for
    /// `"<name>"`, separated by a blank line.
    async fn latest_updates(&self, name: &str) -> String {
        let links = self.search_or_empty(name, UPDATE_RESULTS).await;

        let mut updates = Vec::new();
        for url in links.iter().filter(|url| !url.contains(WIKIPEDIA_DOMAIN)) {
            tracing::debug!(influencer = name, url = %url, "update page found");
            let text = self.fetch_page_text(url).await;
            if !text.is_empty() {
                updates.push(text);
            }
            if updates.len() >= MAX_UPDATES {
                break;
            }
        }
        updates.join("\n\n")
    }
}
