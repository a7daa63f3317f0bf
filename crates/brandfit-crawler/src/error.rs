use brandfit_core::Transient;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid search base URL \"{0}\"")]
    InvalidBaseUrl(String),

    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// HTTP 429, 5xx, and network-level failures are transient; everything else
/// is returned immediately.
impl Transient for CrawlerError {
    fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Xml(_) | Self::InvalidBaseUrl(_) | Self::MissingColumn { .. } | Self::Csv(_) => {
                false
            }
        }
    }
}
