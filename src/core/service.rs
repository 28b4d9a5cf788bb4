use crate::adapters::clock::SystemClock;
use crate::adapters::ids::UuidGenerator;
use crate::core::amount::validate_payment_amount;
use crate::core::card::validate_card_number;
use crate::core::expiry::expiry_is_current;
use crate::domain::model::{ExpiryDate, ValidationPolicy};
use crate::domain::ports::{Clock, IdGenerator, PaymentService};
use crate::utils::error::Result;
use crate::utils::logger::mask_card_number;

/// Stateless implementation of [`PaymentService`].
///
/// Holds only its time source, id generator and policy, so a single instance
/// can be shared across any number of concurrent callers.
pub struct ValidationService<C: Clock, G: IdGenerator> {
    clock: C,
    ids: G,
    policy: ValidationPolicy,
}

impl ValidationService<SystemClock, UuidGenerator> {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self::with_parts(SystemClock, UuidGenerator, policy)
    }
}

impl<C: Clock, G: IdGenerator> ValidationService<C, G> {
    pub fn with_parts(clock: C, ids: G, policy: ValidationPolicy) -> Self {
        Self { clock, ids, policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }
}

impl<C: Clock, G: IdGenerator> PaymentService for ValidationService<C, G> {
    fn whats_your_id(&self) -> Result<String> {
        Ok(self.ids.generate())
    }

    fn is_card_number_valid(&self, card_number: Option<&str>) -> Result<bool> {
        Ok(validate_card_number(card_number, &self.policy))
    }

    fn is_valid_payment_amount(&self, amount: i64) -> Result<bool> {
        Ok(validate_payment_amount(amount))
    }

    fn can_make_payment_with_card(
        &self,
        card_number: Option<&str>,
        expiry_month: i32,
        expiry_year: i32,
    ) -> Result<bool> {
        let now = self.clock.now()?;

        let card_valid = validate_card_number(card_number, &self.policy);
        let expiry_valid =
            expiry_is_current(ExpiryDate::new(expiry_month, expiry_year), now, &self.policy);

        tracing::debug!(
            card = %mask_card_number(card_number),
            expiry_month,
            expiry_year,
            card_valid,
            expiry_valid,
            "Evaluated card for payment"
        );

        Ok(card_valid && expiry_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::utils::error::GatewayError;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashSet;

    const VALID: &str = "4532015112830366";

    struct BrokenClock;

    impl Clock for BrokenClock {
        fn now(&self) -> Result<DateTime<Utc>> {
            Err(GatewayError::ClockError {
                message: "no time source".to_string(),
            })
        }
    }

    fn service_at(year: i32, month: u32) -> ValidationService<FixedClock, UuidGenerator> {
        let now = Utc.with_ymd_and_hms(year, month, 10, 8, 30, 0).unwrap();
        ValidationService::with_parts(FixedClock::new(now), UuidGenerator, ValidationPolicy::default())
    }

    #[test]
    fn test_ids_are_unique() {
        let service = ValidationService::new(ValidationPolicy::default());
        let ids: HashSet<String> = (0..100).map(|_| service.whats_your_id().unwrap()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_current_month_and_year_can_pay() {
        let service = service_at(2026, 10);
        assert!(service.can_make_payment_with_card(Some(VALID), 10, 2026).unwrap());
    }

    #[test]
    fn test_system_clock_current_month_can_pay() {
        use chrono::Datelike;
        let service = ValidationService::new(ValidationPolicy::default());
        let now = Utc::now();
        assert!(service
            .can_make_payment_with_card(Some(VALID), now.month() as i32, now.year())
            .unwrap());
    }

    #[test]
    fn test_bad_month_never_pays() {
        let service = service_at(2026, 1);
        assert!(!service.can_make_payment_with_card(Some(VALID), 0, 2030).unwrap());
        assert!(!service.can_make_payment_with_card(Some(VALID), 13, 2030).unwrap());
    }

    #[test]
    fn test_invalid_card_never_pays() {
        let service = service_at(2026, 1);
        assert!(!service
            .can_make_payment_with_card(Some("4532015112830367"), 6, 2030)
            .unwrap());
        assert!(!service.can_make_payment_with_card(None, 6, 2030).unwrap());
    }

    #[test]
    fn test_expired_year_never_pays() {
        let service = service_at(2026, 1);
        assert!(!service.can_make_payment_with_card(Some(VALID), 6, 2025).unwrap());
    }

    #[test]
    fn test_joint_policy_flows_through() {
        let now = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        let policy = ValidationPolicy {
            joint_expiry_check: true,
            strict_card_digits: false,
        };
        let service = ValidationService::with_parts(FixedClock::new(now), UuidGenerator, policy);
        assert_eq!(service.policy(), &policy);

        assert!(service.can_make_payment_with_card(Some(VALID), 2, 2027).unwrap());
        assert!(!service_at(2026, 10)
            .can_make_payment_with_card(Some(VALID), 2, 2027)
            .unwrap());
    }

    #[test]
    fn test_clock_failure_is_an_error_not_false() {
        let service =
            ValidationService::with_parts(BrokenClock, UuidGenerator, ValidationPolicy::default());
        let result = service.can_make_payment_with_card(Some(VALID), 12, 2030);
        assert!(matches!(result, Err(GatewayError::ClockError { .. })));
        // operations that do not read the clock are unaffected
        assert!(service.is_card_number_valid(Some(VALID)).unwrap());
    }

    #[test]
    fn test_validators_are_idempotent() {
        let service = service_at(2026, 5);
        for _ in 0..5 {
            assert!(service.is_card_number_valid(Some(VALID)).unwrap());
            assert!(!service.is_valid_payment_amount(98).unwrap());
            assert!(service.can_make_payment_with_card(Some(VALID), 5, 2026).unwrap());
        }
    }
}
