//! Entity identifiers

use uuid::Uuid;

/// Join an entity prefix and a raw id, e.g. `usr_abc`
pub fn entity_id(prefix: &str, id: &str) -> String {
    format!("{prefix}_{id}")
}

/// Generate a fresh random id under `prefix`
pub fn generate_entity_id(prefix: &str) -> String {
    entity_id(prefix, &Uuid::new_v4().simple().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_format() {
        assert_eq!(entity_id("usr", "42"), "usr_42");
    }

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let a = generate_entity_id("uss");
        let b = generate_entity_id("uss");
        assert!(a.starts_with("uss_"));
        assert_eq!(a.len(), "uss_".len() + 32);
        assert_ne!(a, b);
    }
}
