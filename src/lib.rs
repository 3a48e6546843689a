pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{toml_config::ServerConfig, CliConfig};
pub use crate::core::PricingEngine;
pub use crate::domain::model::{MarketCondition, PriceConfig, PriceResult};
pub use crate::utils::error::{PricingError, Result};
