use clap::{Parser, Subcommand};
use payment_gateway::utils::logger::{self, LogFormat};
use payment_gateway::{GatewayClient, GatewayError, GatewayRequest};

#[derive(Debug, Parser)]
#[command(name = "gateway-client")]
#[command(about = "Call a running payment gateway")]
struct ClientArgs {
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    endpoint: String,

    #[arg(long, help = "Print the raw JSON response")]
    json: bool,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// WhatsYourId
    Id,
    /// IsCardNumberValid
    Card { card_number: String },
    /// IsValidPaymentAmount (amount in cents)
    Amount {
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
    /// CanMakePaymentWithCard
    Payment {
        card_number: String,
        expiry_month: i32,
        expiry_year: i32,
    },
}

impl Command {
    fn into_request(self) -> GatewayRequest {
        match self {
            Command::Id => GatewayRequest::WhatsYourId,
            Command::Card { card_number } => GatewayRequest::IsCardNumberValid {
                card_number: Some(card_number),
            },
            Command::Amount { amount } => GatewayRequest::IsValidPaymentAmount { amount },
            Command::Payment {
                card_number,
                expiry_month,
                expiry_year,
            } => GatewayRequest::CanMakePaymentWithCard {
                card_number: Some(card_number),
                expiry_month,
                expiry_year,
            },
        }
    }
}

async fn run(args: ClientArgs) -> Result<(), GatewayError> {
    let client = GatewayClient::new(&args.endpoint);
    let response = client.call(&args.command.into_request()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        let rendered = match &response.result {
            payment_gateway::OperationResult::Id(id) => id.clone(),
            payment_gateway::OperationResult::Valid(true) => "✅ valid".to_string(),
            payment_gateway::OperationResult::Valid(false) => "❌ invalid".to_string(),
        };
        println!("{}: {}", response.operation.name(), rendered);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();
    logger::init_cli_logger(args.verbose, Some("warn"), LogFormat::Compact);

    if let Err(e) = run(args).await {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}
