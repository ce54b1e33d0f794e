use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a stored dish or order.
///
/// Ids are plain strings on the wire; the newtype keeps them from being
/// confused with the other text fields of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Source of fresh ids for newly created records.
pub trait IdGenerator: Send + Sync {
    /// Returns an id that has not been handed out before.
    fn next_id(&self) -> EntityId;
}

/// Generates 32-character lowercase hex ids from random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> EntityId {
        EntityId(Uuid::new_v4().simple().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_unique() {
        let generator = RandomIdGenerator;
        let id1 = generator.next_id();
        let id2 = generator.next_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn random_ids_are_hex() {
        let id = RandomIdGenerator.next_id();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn entity_id_serializes_as_plain_string() {
        let id = EntityId::from("3c637d011d844ebab1205fef8a7e36ea");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3c637d011d844ebab1205fef8a7e36ea\"");
    }

    #[test]
    fn entity_id_compares_with_str() {
        let id = EntityId::new("abc");
        assert!(id == *"abc");
        assert_eq!(id.to_string(), "abc");
    }
}
