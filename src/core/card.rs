use crate::domain::model::{ValidationPolicy, CARD_NUMBER_LENGTH};

/// Mod-10 (Luhn) checksum over the ASCII digits of `input`.
///
/// Non-digit characters are skipped, so `"4532 0151"` is checksummed as
/// `"45320151"`. An input with no digits sums to zero and therefore passes.
pub fn luhn_checksum_passes(input: &str) -> bool {
    let sum: u32 = input
        .chars()
        .filter_map(|c| c.to_digit(10))
        .rev()
        .enumerate()
        .map(|(index, digit)| {
            if index % 2 == 0 {
                digit
            } else {
                let doubled = digit * 2;
                doubled / 10 + doubled % 10
            }
        })
        .sum();

    sum % 10 == 0
}

/// Length-gated Luhn check.
///
/// The length gate counts UTF-16 code units of the raw string, so a
/// character outside the Basic Multilingual Plane counts twice. Only the
/// checksum ignores non-digits, unless `policy.strict_card_digits` is set.
pub fn validate_card_number(card_number: Option<&str>, policy: &ValidationPolicy) -> bool {
    let Some(number) = card_number else {
        return false;
    };

    if number.is_empty() || number.encode_utf16().count() != CARD_NUMBER_LENGTH {
        return false;
    }

    if policy.strict_card_digits && !number.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    luhn_checksum_passes(number)
}
