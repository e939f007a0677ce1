//! Shared application state for the Axum server.
//!
//! The query constructor is injected at construction time: exactly one
//! constructor per application instance, installed before the listener
//! starts and never swapped afterwards.

use std::sync::Arc;

use bar_query::{DrinkMemory, QueryConstructor};
use tokio::sync::RwLock;

use crate::store::MemoryStore;

/// Shared application state, wrapped in `Arc` for Axum handler sharing.
#[derive(Clone)]
pub struct AppState {
    /// The active query-construction capability.
    pub constructor: Arc<dyn QueryConstructor>,
    /// In-memory drink-memory store.
    pub store: Arc<RwLock<MemoryStore>>,
}

impl AppState {
    /// Create state with an empty store.
    pub fn new(constructor: Arc<dyn QueryConstructor>) -> Self {
        Self {
            constructor,
            store: Arc::new(RwLock::new(MemoryStore::new())),
        }
    }

    /// Create state with sample memories for development / tests.
    pub fn with_sample_data(constructor: Arc<dyn QueryConstructor>) -> Self {
        let mut store = MemoryStore::new();

        for (drink, spirit, flavors, abv, rating) in [
            ("Negroni", Some("gin"), vec!["bitter", "herbal"], 24.0, 5),
            (
                "Oaxaca Old Fashioned",
                Some("mezcal"),
                vec!["smoky", "sweet"],
                32.0,
                4,
            ),
            (
                "Margarita",
                Some("tequila"),
                vec!["citrusy", "sour"],
                18.0,
                4,
            ),
            (
                "Espresso Martini",
                Some("vodka"),
                vec!["creamy", "sweet"],
                15.0,
                3,
            ),
            ("Virgin Mojito", None, vec!["sweet", "citrusy"], 0.0, 4),
        ] {
            let mut memory = DrinkMemory::new("patron-demo", drink);
            memory.spirit = spirit.map(String::from);
            memory.flavors = flavors.into_iter().map(String::from).collect();
            memory.abv = abv;
            memory.rating = Some(rating);
            store.add(memory);
        }

        Self {
            constructor,
            store: Arc::new(RwLock::new(store)),
        }
    }
}
