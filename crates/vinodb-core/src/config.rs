use crate::app_config::{AppConfig, FailurePolicy};
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.espaciovino.com.ar/vinos";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; only malformed values are rejected.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<u32>() {
            Ok(0) => Err(invalid(var, "must be at least 1".to_string())),
            Ok(v) => Ok(v),
            Err(e) => Err(invalid(var, e.to_string())),
        }
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<usize>() {
            Ok(0) => Err(invalid(var, "must be at least 1".to_string())),
            Ok(v) => Ok(v),
            Err(e) => Err(invalid(var, e.to_string())),
        }
    };

    let parse_policy = |var: &str| -> Result<FailurePolicy, ConfigError> {
        or_default(var, "abort")
            .parse::<FailurePolicy>()
            .map_err(|reason| invalid(var, reason))
    };

    let base_url = or_default("VINODB_BASE_URL", DEFAULT_BASE_URL);
    if base_url.trim().is_empty() {
        return Err(invalid("VINODB_BASE_URL", "must not be empty".to_string()));
    }

    let pages = parse_positive_u32("VINODB_PAGES", "2")?;
    let max_concurrent_requests =
        parse_positive_usize("VINODB_MAX_CONCURRENT_REQUESTS", "1000")?;
    let request_timeout_secs = parse_u64("VINODB_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VINODB_USER_AGENT", "vinodb/0.1 (price-report)");
    let output_dir = PathBuf::from(or_default("VINODB_OUTPUT_DIR", "."));
    let log_level = or_default("VINODB_LOG_LEVEL", "info");
    let on_malformed_item = parse_policy("VINODB_ON_MALFORMED_ITEM")?;
    let on_detail_failure = parse_policy("VINODB_ON_DETAIL_FAILURE")?;

    Ok(AppConfig {
        base_url,
        pages,
        max_concurrent_requests,
        request_timeout_secs,
        user_agent,
        output_dir,
        log_level,
        on_malformed_item,
        on_detail_failure,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
