use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_GRAPHQL_URL: &str = "https://www.jhceshop.com/graphql";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/123.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
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
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so parsing can be tested
/// with a plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let log_level = or_default("STOCKCHECK_LOG_LEVEL", "info");
    let input_path = PathBuf::from(or_default("STOCKCHECK_INPUT_PATH", "urls.txt"));
    let output_dir = PathBuf::from(or_default("STOCKCHECK_OUTPUT_DIR", "stock_status"));
    let graphql_url = or_default("STOCKCHECK_GRAPHQL_URL", DEFAULT_GRAPHQL_URL);
    if graphql_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKCHECK_GRAPHQL_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("STOCKCHECK_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKCHECK_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let user_agent = or_default("STOCKCHECK_USER_AGENT", DEFAULT_USER_AGENT);
    let inter_product_delay_ms = parse_u64("STOCKCHECK_INTER_PRODUCT_DELAY_MS", "2000")?;
    let max_retries = parse_u32("STOCKCHECK_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("STOCKCHECK_RETRY_BACKOFF_BASE_SECS", "1")?;
    let accept_invalid_certs = parse_bool(
        "STOCKCHECK_ACCEPT_INVALID_CERTS",
        &or_default("STOCKCHECK_ACCEPT_INVALID_CERTS", "false"),
    )?;

    Ok(AppConfig {
        log_level,
        input_path,
        output_dir,
        graphql_url,
        request_timeout_secs,
        user_agent,
        inter_product_delay_ms,
        max_retries,
        retry_backoff_base_secs,
        accept_invalid_certs,
    })
}

/// Parse a boolean flag value. Accepts `true/false`, `1/0`, `yes/no`
/// (case-insensitive).
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
