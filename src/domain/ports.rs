use crate::domain::model::ValidationPolicy;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// The four operations exposed by the payment gateway.
///
/// Invalid input is reported as `Ok(false)`. `Err` is reserved for internal
/// failures such as an unreadable clock.
pub trait PaymentService: Send + Sync {
    fn whats_your_id(&self) -> Result<String>;
    fn is_card_number_valid(&self, card_number: Option<&str>) -> Result<bool>;
    fn is_valid_payment_amount(&self, amount: i64) -> Result<bool>;
    fn can_make_payment_with_card(
        &self,
        card_number: Option<&str>,
        expiry_month: i32,
        expiry_year: i32,
    ) -> Result<bool>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> Result<DateTime<Utc>>;
}

pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn policy(&self) -> ValidationPolicy;
}
