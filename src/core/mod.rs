pub mod amount;
pub mod card;
pub mod expiry;
pub mod service;

pub use crate::domain::model::{ExpiryDate, ValidationPolicy};
pub use crate::domain::ports::{Clock, ConfigProvider, IdGenerator, PaymentService};
pub use crate::utils::error::Result;
