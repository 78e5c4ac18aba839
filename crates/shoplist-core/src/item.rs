//! Shopping-list item entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shopping-list entry owned by exactly one user.
///
/// `id` and `user_email` are fixed at creation; `name` and `category` change
/// via update, `purchased` via the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub purchased: bool,
    /// Owning user, wire-compatible camelCase field name
    #[serde(rename = "userEmail")]
    pub user_email: String,
}

impl Item {
    /// Create a new unpurchased item with a fresh id for the given owner
    pub fn new(name: impl Into<String>, category: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            purchased: false,
            user_email: owner.into(),
        }
    }

    /// Whether the given caller owns this item
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.user_email == email
    }
}

/// One row of the count-by-category aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_defaults() {
        let item = Item::new("Milk", "Dairy", "alice@example.com");
        assert!(!item.purchased);
        assert_eq!(item.name, "Milk");
        assert_eq!(item.category, "Dairy");
        assert!(item.is_owned_by("alice@example.com"));
        assert!(!item.is_owned_by("bob@example.com"));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Item::new("Milk", "Dairy", "alice@example.com");
        let b = Item::new("Milk", "Dairy", "alice@example.com");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_owner_field_serializes_camel_case() {
        let item = Item::new("Milk", "Dairy", "alice@example.com");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["userEmail"], "alice@example.com");
        assert!(json.get("user_email").is_none());
    }
}
