pub mod app_config;
pub mod config;
pub mod price;
pub mod wine;

use thiserror::Error;

pub use app_config::{AppConfig, FailurePolicy};
pub use config::{load_app_config, load_app_config_from_env};
pub use price::{clean_price, compose_current_price, discount_percent};
pub use wine::{DetailAttributes, ItemStub, WineRecord, NOT_AVAILABLE, REPORT_COLUMNS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
