use brandfit_core::Transient;
use thiserror::Error;

/// Errors from the chat client and the corpus/result files.
///
/// [`crate::BrandFitEvaluator::evaluate`] never returns these; they are
/// folded into a [`crate::BrandFitEvaluation`] with an absent score.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    /// Network or TLS failure, or a non-2xx status from the API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from the chat endpoint.
    #[error("rate limited by chat API")]
    RateLimited,

    /// The API answered 2xx but without any message content.
    #[error("chat API response had no message content")]
    EmptyResponse,

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("corpus file {path}: {source}")]
    CorpusRead {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write results: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Timeouts, connection failures, 5xx, and rate limiting are transient.
impl Transient for EvaluatorError {
    fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited => true,
            Self::Http(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            _ => false,
        }
    }
}
