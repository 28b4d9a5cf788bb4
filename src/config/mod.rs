pub mod lambda;
pub mod toml_config;

use crate::domain::model::ValidationPolicy;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GatewayError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_host, validate_non_empty_string, validate_range, Validate};
use std::net::SocketAddr;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Settings needed to run the HTTP transport.
pub trait ServerConfigProvider: ConfigProvider {
    fn host(&self) -> &str;
    fn port(&self) -> u16;

    fn log_format(&self) -> LogFormat {
        LogFormat::Compact
    }

    /// `None` leaves the logger on its default level.
    fn log_level(&self) -> Option<&str> {
        None
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, clap::Parser)]
#[command(name = "payment-gateway")]
#[command(about = "Card number, payment amount and expiry validation over HTTP")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, help = "TOML config file; replaces the other server options")]
    pub config: Option<String>,

    #[arg(long, help = "Reject card numbers containing non-digit characters")]
    pub strict_card_digits: bool,

    #[arg(long, help = "Compare expiry month and year as a single date")]
    pub joint_expiry_check: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            strict_card_digits: self.strict_card_digits,
            joint_expiry_check: self.joint_expiry_check,
        }
    }
}

#[cfg(feature = "cli")]
impl ServerConfigProvider for CliConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn log_format(&self) -> LogFormat {
        if self.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_host("host", &self.host)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        if let Some(path) = &self.config {
            validate_non_empty_string("config", path)?;
        }
        Ok(())
    }
}

/// 解析監聽位址 (host 可以是 IP 或主機名稱)
pub async fn resolve_listen_addr<C: ServerConfigProvider + ?Sized>(config: &C) -> Result<SocketAddr> {
    let mut addrs = tokio::net::lookup_host((config.host(), config.port())).await?;
    addrs.next().ok_or_else(|| GatewayError::ConfigError {
        message: format!("{} did not resolve to any address", config.host()),
    })
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["payment-gateway"]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.policy(), ValidationPolicy::default());
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_policy_flags() {
        let config = CliConfig::parse_from([
            "payment-gateway",
            "--strict-card-digits",
            "--joint-expiry-check",
            "--json-logs",
            "--port",
            "9000",
        ]);
        assert!(config.policy().strict_card_digits);
        assert!(config.policy().joint_expiry_check);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.port(), 9000);
    }

    #[test]
    fn test_cli_rejects_port_zero() {
        let config = CliConfig::parse_from(["payment-gateway", "--port", "0"]);
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_resolve_listen_addr() {
        let config = CliConfig::parse_from(["payment-gateway", "--port", "18080"]);
        let addr = resolve_listen_addr(&config).await.unwrap();
        assert_eq!(addr, "127.0.0.1:18080".parse::<SocketAddr>().unwrap());
    }
}
