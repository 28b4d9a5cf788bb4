use crate::domain::model::{MAX_PAYMENT_CENTS, MIN_PAYMENT_CENTS};

/// `amount` is in cents; both bounds are inclusive.
pub fn validate_payment_amount(amount: i64) -> bool {
    (MIN_PAYMENT_CENTS..=MAX_PAYMENT_CENTS).contains(&amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_boundaries() {
        assert!(!validate_payment_amount(98));
        assert!(validate_payment_amount(99));
        assert!(validate_payment_amount(10_000));
        assert!(validate_payment_amount(99_999_999));
        assert!(!validate_payment_amount(100_000_000));
    }

    #[test]
    fn test_negative_and_extreme_amounts() {
        assert!(!validate_payment_amount(0));
        assert!(!validate_payment_amount(-500));
        assert!(!validate_payment_amount(i64::MIN));
        assert!(!validate_payment_amount(i64::MAX));
    }
}
