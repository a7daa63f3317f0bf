use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_CRAWL_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("BRANDFIT_ENV", "development"))?;

    let bind_addr = parse("BRANDFIT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BRANDFIT_LOG_LEVEL", "info");
    let brands_path = PathBuf::from(or_default("BRANDFIT_BRANDS_PATH", "./config/brands.yaml"));
    let data_dir = PathBuf::from(or_default("BRANDFIT_DATA_DIR", "./data"));
    let image_dir = PathBuf::from(or_default("BRANDFIT_IMAGE_DIR", "./data/top_100_images"));

    let openai_api_key = lookup("OPENAI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let llm_base_url = or_default("BRANDFIT_LLM_BASE_URL", "https://api.openai.com/v1");
    let llm_model = or_default("BRANDFIT_LLM_MODEL", "gpt-4o-mini");
    let llm_timeout_secs = parse_u64("BRANDFIT_LLM_TIMEOUT_SECS", "60")?;
    let eval_delay_ms = parse_u64("BRANDFIT_EVAL_DELAY_MS", "1000")?;

    let crawl_timeout_secs = parse_u64("BRANDFIT_CRAWL_TIMEOUT_SECS", "10")?;
    let crawl_delay_ms = parse_u64("BRANDFIT_CRAWL_DELAY_MS", "5000")?;
    let crawl_user_agent = or_default("BRANDFIT_CRAWL_USER_AGENT", DEFAULT_CRAWL_USER_AGENT);
    let search_base_url = or_default("BRANDFIT_SEARCH_BASE_URL", "https://www.bing.com");

    let max_retries = parse_u32("BRANDFIT_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("BRANDFIT_RETRY_BACKOFF_BASE_SECS", "2")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        brands_path,
        data_dir,
        image_dir,
        openai_api_key,
        llm_base_url,
        llm_model,
        llm_timeout_secs,
        eval_delay_ms,
        crawl_timeout_secs,
        crawl_delay_ms,
        crawl_user_agent,
        search_base_url,
        max_retries,
        retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRANDFIT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
