use std::path::PathBuf;

/// What a run does when one item cannot be processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failure fails the whole run; nothing is exported.
    #[default]
    Abort,
    /// The failing item is dropped with a warning and the run continues.
    SkipAndLog,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Abort => write!(f, "abort"),
            FailurePolicy::SkipAndLog => write!(f, "skip"),
        }
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(FailurePolicy::Abort),
            "skip" => Ok(FailurePolicy::SkipAndLog),
            other => Err(format!("expected \"abort\" or \"skip\", got \"{other}\"")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub pages: u32,
    pub max_concurrent_requests: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub on_malformed_item: FailurePolicy,
    pub on_detail_failure: FailurePolicy,
}
