use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.pages, 2);
    assert_eq!(cfg.max_concurrent_requests, 1000);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "vinodb/0.1 (price-report)");
    assert_eq!(cfg.output_dir.to_str(), Some("."));
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.on_malformed_item, FailurePolicy::Abort);
    assert_eq!(cfg.on_detail_failure, FailurePolicy::Abort);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("VINODB_BASE_URL", "http://127.0.0.1:8080/vinos");
    map.insert("VINODB_PAGES", "92");
    map.insert("VINODB_MAX_CONCURRENT_REQUESTS", "16");
    map.insert("VINODB_REQUEST_TIMEOUT_SECS", "5");
    map.insert("VINODB_OUTPUT_DIR", "/tmp/reports");
    map.insert("VINODB_ON_MALFORMED_ITEM", "skip");
    map.insert("VINODB_ON_DETAIL_FAILURE", "skip");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:8080/vinos");
    assert_eq!(cfg.pages, 92);
    assert_eq!(cfg.max_concurrent_requests, 16);
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.output_dir.to_str(), Some("/tmp/reports"));
    assert_eq!(cfg.on_malformed_item, FailurePolicy::SkipAndLog);
    assert_eq!(cfg.on_detail_failure, FailurePolicy::SkipAndLog);
}

#[test]
fn build_app_config_rejects_zero_pages() {
    let mut map = HashMap::new();
    map.insert("VINODB_PAGES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VINODB_PAGES"),
        "expected InvalidEnvVar(VINODB_PAGES), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_concurrency() {
    let mut map = HashMap::new();
    map.insert("VINODB_MAX_CONCURRENT_REQUESTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VINODB_MAX_CONCURRENT_REQUESTS"),
        "expected InvalidEnvVar(VINODB_MAX_CONCURRENT_REQUESTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("VINODB_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VINODB_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(VINODB_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unknown_policy() {
    let mut map = HashMap::new();
    map.insert("VINODB_ON_DETAIL_FAILURE", "retry");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VINODB_ON_DETAIL_FAILURE"),
        "expected InvalidEnvVar(VINODB_ON_DETAIL_FAILURE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_base_url() {
    let mut map = HashMap::new();
    map.insert("VINODB_BASE_URL", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VINODB_BASE_URL"),
        "expected InvalidEnvVar(VINODB_BASE_URL), got: {result:?}"
    );
}

#[test]
fn failure_policy_round_trips_through_display() {
    for policy in [FailurePolicy::Abort, FailurePolicy::SkipAndLog] {
        assert_eq!(policy.to_string().parse::<FailurePolicy>(), Ok(policy));
    }
}
