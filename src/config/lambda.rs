use crate::domain::model::ValidationPolicy;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GatewayError, Result};
use std::env;

#[derive(Debug, Clone, Default)]
pub struct LambdaConfig {
    pub strict_card_digits: bool,
    pub joint_expiry_check: bool,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            strict_card_digits: env_flag("STRICT_CARD_DIGITS")?,
            joint_expiry_check: env_flag("JOINT_EXPIRY_CHECK")?,
        })
    }
}

/// 讀取布林環境變數；未設定視為 false
fn env_flag(name: &str) -> Result<bool> {
    match env::var(name) {
        Err(_) => Ok(false),
        Ok(value) => parse_flag(name, &value),
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(GatewayError::InvalidConfigValueError {
            field: name.to_string(),
            value: value.to_string(),
            reason: "Expected true/false or 1/0".to_string(),
        }),
    }
}

impl ConfigProvider for LambdaConfig {
    fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            strict_card_digits: self.strict_card_digits,
            joint_expiry_check: self.joint_expiry_check,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("X", "true").unwrap());
        assert!(parse_flag("X", " 1 ").unwrap());
        assert!(parse_flag("X", "ON").unwrap());
        assert!(!parse_flag("X", "false").unwrap());
        assert!(!parse_flag("X", "").unwrap());
        assert!(parse_flag("X", "maybe").is_err());
    }

    #[test]
    fn test_policy_mapping() {
        let config = LambdaConfig {
            strict_card_digits: true,
            joint_expiry_check: false,
        };
        assert_eq!(
            config.policy(),
            ValidationPolicy {
                strict_card_digits: true,
                joint_expiry_check: false,
            }
        );
    }
}
