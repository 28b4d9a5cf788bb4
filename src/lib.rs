pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::client::GatewayClient;
pub use adapters::http::{GatewayHandler, HttpServer};
pub use config::{lambda::LambdaConfig, toml_config::TomlConfig};
pub use core::service::ValidationService;
pub use domain::model::{GatewayRequest, GatewayResponse, OperationResult, ValidationPolicy};
pub use domain::ports::PaymentService;
pub use utils::error::{GatewayError, Result};
