use crate::domain::ports::IdGenerator;
use uuid::Uuid;

/// Random (v4) UUIDs in lowercase hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_parse_as_v4() {
        let id = UuidGenerator.generate();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id.len(), 36);
    }

    #[test]
    fn test_two_calls_differ() {
        assert_ne!(UuidGenerator.generate(), UuidGenerator.generate());
    }
}
