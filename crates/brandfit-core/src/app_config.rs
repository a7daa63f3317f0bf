use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub brands_path: PathBuf,
    /// Directory holding the appearance, metadata, and brand-fit CSV files.
    pub data_dir: PathBuf,
    /// Directory holding `<influencer>.jpg` portraits.
    pub image_dir: PathBuf,
    pub openai_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    /// Pause between consecutive evaluator calls.
    pub eval_delay_ms: u64,
    pub crawl_timeout_secs: u64,
    /// Pause between consecutive influencers during a crawl.
    pub crawl_delay_ms: u64,
    pub crawl_user_agent: String,
    pub search_base_url: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("brands_path", &self.brands_path)
            .field("data_dir", &self.data_dir)
            .field("image_dir", &self.image_dir)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("eval_delay_ms", &self.eval_delay_ms)
            .field("crawl_timeout_secs", &self.crawl_timeout_secs)
            .field("crawl_delay_ms", &self.crawl_delay_ms)
            .field("crawl_user_agent", &self.crawl_user_agent)
            .field("search_base_url", &self.search_base_url)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .finish()
    }
}
