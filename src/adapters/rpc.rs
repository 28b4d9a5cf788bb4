use crate::domain::model::{GatewayRequest, GatewayResponse, Operation, OperationResult};
use crate::domain::ports::PaymentService;
use crate::utils::error::{GatewayError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

pub const SERVICE_NAME: &str = "PaymentGateway";
pub const SERVICE_DESCRIPTION: &str = "Payment Gateway";
pub const SERVICE_NAMESPACE: &str = "http://tempuri.org/";

/// Runs one request against `service`.
pub fn dispatch(service: &dyn PaymentService, request: GatewayRequest) -> Result<GatewayResponse> {
    let operation = request.operation();
    tracing::debug!(operation = operation.name(), "Dispatching request");

    let result = match request {
        GatewayRequest::WhatsYourId => OperationResult::Id(service.whats_your_id()?),
        GatewayRequest::IsCardNumberValid { card_number } => {
            OperationResult::Valid(service.is_card_number_valid(card_number.as_deref())?)
        }
        GatewayRequest::IsValidPaymentAmount { amount } => {
            OperationResult::Valid(service.is_valid_payment_amount(amount)?)
        }
        GatewayRequest::CanMakePaymentWithCard {
            card_number,
            expiry_month,
            expiry_year,
        } => OperationResult::Valid(service.can_make_payment_with_card(
            card_number.as_deref(),
            expiry_month,
            expiry_year,
        )?),
    };

    Ok(GatewayResponse { operation, result })
}

/// Decodes a full envelope: `{"operation": "...", ...parameters}`.
pub fn parse_envelope(body: &[u8]) -> Result<GatewayRequest> {
    let mut params = parse_object(body)?;

    let name = match params.remove("operation") {
        Some(Value::String(name)) => name,
        Some(other) => {
            return Err(GatewayError::MalformedRequest {
                message: format!("`operation` must be a string, got {}", other),
            })
        }
        None => {
            return Err(GatewayError::MalformedRequest {
                message: "missing `operation` field".to_string(),
            })
        }
    };

    parse_operation_call(&name, params)
}

/// Decodes the parameters of a call whose operation is named out of band,
/// e.g. in the request path. An empty body means "no parameters".
pub fn parse_operation_body(operation_name: &str, body: &[u8]) -> Result<GatewayRequest> {
    let params = parse_object(body)?;
    parse_operation_call(operation_name, params)
}

fn parse_operation_call(operation_name: &str, mut params: Map<String, Value>) -> Result<GatewayRequest> {
    let operation =
        Operation::from_name(operation_name).ok_or_else(|| GatewayError::UnknownOperation {
            name: operation_name.to_string(),
        })?;

    params.insert(
        "operation".to_string(),
        Value::String(operation.name().to_string()),
    );

    serde_json::from_value(Value::Object(params)).map_err(|e| GatewayError::MalformedRequest {
        message: format!("invalid parameters for {}: {}", operation.name(), e),
    })
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(GatewayError::MalformedRequest {
            message: "request body must be a JSON object".to_string(),
        }),
        Err(e) => Err(GatewayError::MalformedRequest {
            message: format!("invalid JSON: {}", e),
        }),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescription {
    pub name: &'static str,
    pub description: &'static str,
    pub namespace: &'static str,
    pub operations: Vec<OperationDescription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationDescription {
    pub name: &'static str,
    pub description: &'static str,
    pub inputs: Vec<ParameterDescription>,
    pub output: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterDescription {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

pub fn service_description() -> ServiceDescription {
    ServiceDescription {
        name: SERVICE_NAME,
        description: SERVICE_DESCRIPTION,
        namespace: SERVICE_NAMESPACE,
        operations: Operation::ALL
            .iter()
            .map(|op| OperationDescription {
                name: op.name(),
                description: op.description(),
                inputs: op
                    .inputs()
                    .iter()
                    .map(|&(name, kind)| ParameterDescription { name, kind })
                    .collect(),
                output: op.output(),
            })
            .collect(),
    }
}
