use crate::domain::model::{GatewayRequest, GatewayResponse, OperationResult};
use crate::utils::error::{GatewayError, Result};
use reqwest::Client;

/// Calls a running gateway over its `/rpc` endpoint.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    endpoint: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/rpc", base_url.trim_end_matches('/')),
        }
    }

    pub async fn call(&self, request: &GatewayRequest) -> Result<GatewayResponse> {
        tracing::debug!("POST {} ({})", self.endpoint, request.operation().name());
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body["fault"]["message"]
                .as_str()
                .unwrap_or("no fault detail")
                .to_string();
            return Err(GatewayError::RemoteFault {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    pub async fn whats_your_id(&self) -> Result<String> {
        match self.call(&GatewayRequest::WhatsYourId).await?.result {
            OperationResult::Id(id) => Ok(id),
            OperationResult::Valid(_) => Err(unexpected_result("WhatsYourId")),
        }
    }

    pub async fn is_card_number_valid(&self, card_number: Option<&str>) -> Result<bool> {
        let request = GatewayRequest::IsCardNumberValid {
            card_number: card_number.map(str::to_string),
        };
        self.call_flag(&request).await
    }

    pub async fn is_valid_payment_amount(&self, amount: i64) -> Result<bool> {
        self.call_flag(&GatewayRequest::IsValidPaymentAmount { amount })
            .await
    }

    pub async fn can_make_payment_with_card(
        &self,
        card_number: Option<&str>,
        expiry_month: i32,
        expiry_year: i32,
    ) -> Result<bool> {
        let request = GatewayRequest::CanMakePaymentWithCard {
            card_number: card_number.map(str::to_string),
            expiry_month,
            expiry_year,
        };
        self.call_flag(&request).await
    }

    async fn call_flag(&self, request: &GatewayRequest) -> Result<bool> {
        match self.call(request).await?.result {
            OperationResult::Valid(valid) => Ok(valid),
            OperationResult::Id(_) => Err(unexpected_result(request.operation().name())),
        }
    }
}

fn unexpected_result(operation: &str) -> GatewayError {
    GatewayError::RemoteFault {
        status: 200,
        message: format!("unexpected result type for {}", operation),
    }
}
