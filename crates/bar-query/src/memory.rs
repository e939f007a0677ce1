//! Drink memory records stored by the memory layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A remembered drink: what a patron had, how it tasted, how they rated it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkMemory {
    /// Unique memory ID (UUIDv7 for time-sortability).
    pub id: Uuid,
    /// Patron this memory belongs to.
    pub patron_id: String,
    /// Drink name (e.g., "Oaxaca Old Fashioned").
    pub drink: String,
    /// Base spirit. None for zero-proof drinks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spirit: Option<String>,
    /// Flavor tags ("smoky", "sweet", ...).
    #[serde(default)]
    pub flavors: Vec<String>,
    /// Alcohol by volume, percent.
    #[serde(default)]
    pub abv: f64,
    /// Patron rating, 1-5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Free-form notes ("too sweet, ask for less syrup next time").
    #[serde(default)]
    pub notes: String,
    /// When the drink was recorded.
    pub created_at: DateTime<Utc>,
}

impl DrinkMemory {
    pub fn new(patron_id: impl Into<String>, drink: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            patron_id: patron_id.into(),
            drink: drink.into(),
            spirit: None,
            flavors: Vec::new(),
            abv: 0.0,
            rating: None,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drink_memory_roundtrip() {
        let mut memory = DrinkMemory::new("patron-1", "Margarita");
        memory.spirit = Some("tequila".into());
        memory.flavors = vec!["citrusy".into(), "sour".into()];
        memory.abv = 18.0;
        memory.rating = Some(4);

        let json = serde_json::to_string(&memory).unwrap();
        let deserialized: DrinkMemory = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.drink, "Margarita");
        assert_eq!(deserialized.spirit.as_deref(), Some("tequila"));
        assert_eq!(deserialized.rating, Some(4));
    }

    #[test]
    fn unrated_memory_omits_optional_fields() {
        let memory = DrinkMemory::new("patron-1", "Virgin Mojito");
        let json = serde_json::to_string(&memory).unwrap();
        assert!(!json.contains("spirit"));
        assert!(!json.contains("rating"));
    }
}
