use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Clock unavailable: {message}")]
    ClockError { message: String },

    #[error("Malformed request: {message}")]
    MalformedRequest { message: String },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP transport error: {0}")]
    HttpError(#[from] hyper::Error),

    #[error("Request to gateway failed: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("Gateway returned a fault ({status}): {message}")]
    RemoteFault { status: u16, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GatewayError {
    /// 錯誤嚴重程度，CLI 依此決定退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GatewayError::MalformedRequest { .. } | GatewayError::UnknownOperation { .. } => {
                ErrorSeverity::Low
            }
            GatewayError::ClientError(_) | GatewayError::RemoteFault { .. } => {
                ErrorSeverity::Medium
            }
            GatewayError::ConfigError { .. }
            | GatewayError::InvalidConfigValueError { .. }
            | GatewayError::SerializationError(_) => ErrorSeverity::High,
            GatewayError::ClockError { .. }
            | GatewayError::IoError(_)
            | GatewayError::HttpError(_) => ErrorSeverity::Critical,
        }
    }

    /// Whether the caller sent something unusable, as opposed to the server failing.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            GatewayError::MalformedRequest { .. }
                | GatewayError::UnknownOperation { .. }
                | GatewayError::SerializationError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GatewayError::ConfigError { message } => format!("設定錯誤: {}", message),
            GatewayError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值無效 ({}): {}", field, reason)
            }
            GatewayError::IoError(e) => format!("無法啟動服務: {}", e),
            GatewayError::ClientError(e) => format!("無法連線到 gateway: {}", e),
            GatewayError::RemoteFault { status, message } => {
                format!("Gateway 回傳錯誤 ({}): {}", status, message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GatewayError::ConfigError { .. }
            | GatewayError::InvalidConfigValueError { .. } => "檢查命令列參數或 TOML 設定檔",
            GatewayError::IoError(_) => "確認監聽位址未被佔用且有權限綁定",
            GatewayError::ClientError(_) => "確認 --endpoint 指向正在執行的 gateway",
            GatewayError::RemoteFault { .. } => "檢查送出的參數是否符合操作定義",
            _ => "查看日誌以取得詳細資訊",
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
