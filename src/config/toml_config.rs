use crate::config::{ServerConfigProvider, DEFAULT_HOST, DEFAULT_PORT};
use crate::domain::model::ValidationPolicy;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GatewayError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_host, validate_one_of, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_FORMATS: [&str; 2] = ["compact", "json"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub validation: ValidationPolicy,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GatewayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GatewayError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GATEWAY_PORT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| GatewayError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn logging_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.format.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn policy(&self) -> ValidationPolicy {
        self.validation
    }
}

impl ServerConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn log_format(&self) -> LogFormat {
        self.logging_format()
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }

    fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_host("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;

        if let Some(format) = self.logging_format() {
            validate_one_of("logging.format", format, &LOG_FORMATS)?;
        }
        if let Some(level) = self.log_level() {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
host = "0.0.0.0"
port = 9090

[validation]
strict_card_digits = true
joint_expiry_check = false

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.port(), 9090);
        assert!(config.policy().strict_card_digits);
        assert!(!config.policy().joint_expiry_check);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.host(), DEFAULT_HOST);
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.policy(), ValidationPolicy::default());
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_GATEWAY_HOST", "10.1.2.3");

        let toml_content = r#"
[server]
host = "${TEST_GATEWAY_HOST}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.host, "10.1.2.3");

        std::env::remove_var("TEST_GATEWAY_HOST");
    }

    #[test]
    fn test_config_validation() {
        let bad_format = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let bad_port = TomlConfig::from_toml_str("[server]\nport = 0\n").unwrap();
        assert!(bad_port.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, GatewayError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[validation]\njoint_expiry_check = true\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert!(config.policy().joint_expiry_check);
    }
}
