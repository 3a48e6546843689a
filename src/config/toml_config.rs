use crate::config::CliConfig;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Server settings loadable from a TOML file. Every field is optional; CLI
/// values fill the gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ServerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Bind address with file values taking precedence over CLI defaults.
    pub fn resolve_bind(&self, cli: &CliConfig) -> (String, u16) {
        let host = self
            .server
            .host
            .clone()
            .unwrap_or_else(|| cli.host.clone());
        let port = self.server.port.unwrap_or(cli.port);
        (host, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli() -> CliConfig {
        CliConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn test_parse_full_server_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 9100
"#;

        let config = ServerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.resolve_bind(&cli()), ("127.0.0.1".to_string(), 9100));
    }

    #[test]
    fn test_partial_config_falls_back_to_cli() {
        let toml_content = r#"
[server]
port = 9100
"#;

        let config = ServerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.resolve_bind(&cli()), ("0.0.0.0".to_string(), 9100));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(ServerConfig::from_toml_str("server = ").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[server]
host = "localhost"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ServerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.host.as_deref(), Some("localhost"));
        assert_eq!(config.server.port, None);
    }
}
