pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pricing-server")]
#[command(about = "Dynamic energy pricing service for P2P energy trading")]
pub struct CliConfig {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, default_value = "8000")]
    pub port: u16,

    #[arg(long, help = "Path to a TOML server config file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_range("port", self.port, 1, u16::MAX)?;

        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_empty_host_is_rejected() {
        let mut config = base_config();
        config.host = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_port_is_rejected() {
        let mut config = base_config();
        config.port = 0;
        assert!(config.validate().is_err());
    }
}
