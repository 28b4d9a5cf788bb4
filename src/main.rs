use clap::Parser;
use payment_gateway::config::{resolve_listen_addr, ServerConfigProvider};
use payment_gateway::domain::ports::ConfigProvider;
use payment_gateway::utils::error::ErrorSeverity;
use payment_gateway::utils::{logger, validation::Validate};
use payment_gateway::{
    CliConfig, GatewayError, GatewayHandler, HttpServer, TomlConfig, ValidationService,
};
use std::sync::Arc;

async fn run(settings: &dyn ServerConfigProvider) -> Result<(), GatewayError> {
    let addr = resolve_listen_addr(settings).await?;
    let service = ValidationService::new(settings.policy());
    tracing::info!(
        strict_card_digits = service.policy().strict_card_digits,
        joint_expiry_check = service.policy().joint_expiry_check,
        "Validation policy"
    );

    let server = HttpServer::new(GatewayHandler::new(Arc::new(service)));
    server.listen(addr).await
}

fn load_settings(cli: &CliConfig) -> Result<Box<dyn ServerConfigProvider>, GatewayError> {
    cli.validate()?;

    match &cli.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            Ok(Box::new(file_config))
        }
        None => Ok(Box::new(cli.clone())),
    }
}

fn exit_with(e: &GatewayError) -> ! {
    tracing::error!(
        "❌ Payment gateway failed: {} (Severity: {:?})",
        e,
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定檔載入失敗時，先用命令列參數初始化日誌以便輸出錯誤
    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, None, cli.log_format());
            exit_with(&e);
        }
    };

    logger::init_cli_logger(cli.verbose, settings.log_level(), settings.log_format());

    tracing::info!("Starting payment-gateway {}", env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(settings.as_ref()).await {
        exit_with(&e);
    }

    tracing::info!("✅ Payment gateway stopped");
    Ok(())
}
