use serde::{Deserialize, Serialize};

/// Card numbers must be exactly this many characters long.
pub const CARD_NUMBER_LENGTH: usize = 16;

/// Smallest accepted payment, in cents.
pub const MIN_PAYMENT_CENTS: i64 = 99;

/// Largest accepted payment, in cents.
pub const MAX_PAYMENT_CENTS: i64 = 99_999_999;

/// Month/year a card stops being usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryDate {
    pub month: i32,
    pub year: i32,
}

impl ExpiryDate {
    pub fn new(month: i32, year: i32) -> Self {
        Self { month, year }
    }

    pub fn has_valid_month(&self) -> bool {
        (1..=12).contains(&self.month)
    }
}

/// Opt-in tightening of the default validation rules.
///
/// Both switches default to `false`, which keeps the long-standing behaviour:
/// non-digit characters inside a 16-character card number are ignored by the
/// checksum, and expiry month and year are compared against today separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Reject card numbers containing anything other than ASCII digits.
    pub strict_card_digits: bool,
    /// Compare `(year, month)` as one date instead of two independent gates.
    pub joint_expiry_check: bool,
}

/// An RPC call, tagged by operation name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation")]
pub enum GatewayRequest {
    WhatsYourId,
    #[serde(rename_all = "camelCase")]
    IsCardNumberValid {
        #[serde(default)]
        card_number: Option<String>,
    },
    IsValidPaymentAmount { amount: i64 },
    #[serde(rename_all = "camelCase")]
    CanMakePaymentWithCard {
        #[serde(default)]
        card_number: Option<String>,
        expiry_month: i32,
        expiry_year: i32,
    },
}

impl GatewayRequest {
    pub fn operation(&self) -> Operation {
        match self {
            GatewayRequest::WhatsYourId => Operation::WhatsYourId,
            GatewayRequest::IsCardNumberValid { .. } => Operation::IsCardNumberValid,
            GatewayRequest::IsValidPaymentAmount { .. } => Operation::IsValidPaymentAmount,
            GatewayRequest::CanMakePaymentWithCard { .. } => Operation::CanMakePaymentWithCard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    WhatsYourId,
    IsCardNumberValid,
    IsValidPaymentAmount,
    CanMakePaymentWithCard,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::WhatsYourId,
        Operation::IsCardNumberValid,
        Operation::IsValidPaymentAmount,
        Operation::CanMakePaymentWithCard,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::WhatsYourId => "WhatsYourId",
            Operation::IsCardNumberValid => "IsCardNumberValid",
            Operation::IsValidPaymentAmount => "IsValidPaymentAmount",
            Operation::CanMakePaymentWithCard => "CanMakePaymentWithCard",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operation::WhatsYourId => "Returns a freshly generated unique identifier",
            Operation::IsCardNumberValid => {
                "Performs a Mod-10/Luhn check on a 16 character card number"
            }
            Operation::IsValidPaymentAmount => {
                "Checks the amount, in cents, lies between 99 and 99999999"
            }
            Operation::CanMakePaymentWithCard => {
                "Validates the card number and that the expiry month and year are not in the past"
            }
        }
    }

    /// Parameter names and their wire types.
    pub fn inputs(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Operation::WhatsYourId => &[],
            Operation::IsCardNumberValid => &[("cardNumber", "string")],
            Operation::IsValidPaymentAmount => &[("amount", "integer")],
            Operation::CanMakePaymentWithCard => &[
                ("cardNumber", "string"),
                ("expiryMonth", "integer"),
                ("expiryYear", "integer"),
            ],
        }
    }

    pub fn output(&self) -> &'static str {
        match self {
            Operation::WhatsYourId => "string",
            _ => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationResult {
    Id(String),
    Valid(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub operation: Operation,
    pub result: OperationResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_camel_case_fields() {
        let request: GatewayRequest = serde_json::from_value(json!({
            "operation": "CanMakePaymentWithCard",
            "cardNumber": "4532015112830366",
            "expiryMonth": 4,
            "expiryYear": 2031
        }))
        .unwrap();

        assert_eq!(
            request,
            GatewayRequest::CanMakePaymentWithCard {
                card_number: Some("4532015112830366".to_string()),
                expiry_month: 4,
                expiry_year: 2031,
            }
        );
    }

    #[test]
    fn test_card_number_may_be_null_or_missing() {
        let missing: GatewayRequest =
            serde_json::from_value(json!({"operation": "IsCardNumberValid"})).unwrap();
        let null: GatewayRequest =
            serde_json::from_value(json!({"operation": "IsCardNumberValid", "cardNumber": null}))
                .unwrap();

        assert_eq!(missing, GatewayRequest::IsCardNumberValid { card_number: None });
        assert_eq!(null, missing);
    }

    #[test]
    fn test_amount_is_required() {
        let result: Result<GatewayRequest, _> =
            serde_json::from_value(json!({"operation": "IsValidPaymentAmount"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_response_shape() {
        let response = GatewayResponse {
            operation: Operation::IsValidPaymentAmount,
            result: OperationResult::Valid(false),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"operation": "IsValidPaymentAmount", "result": false})
        );
    }

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
        assert_eq!(Operation::from_name("isCardNumberValid"), None);
    }

    #[test]
    fn test_expiry_month_range() {
        assert!(ExpiryDate::new(1, 2030).has_valid_month());
        assert!(ExpiryDate::new(12, 2030).has_valid_month());
        assert!(!ExpiryDate::new(0, 2030).has_valid_month());
        assert!(!ExpiryDate::new(13, 2030).has_valid_month());
    }
}
