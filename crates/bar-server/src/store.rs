//! In-memory drink-memory store.
//!
//! Holds the patron's drink history and executes structured queries against
//! it. Newest memories win ties; results come back newest-first.

use bar_query::{DrinkMemory, MemoryQuery};
use uuid::Uuid;

/// Result cap when a query carries no limit of its own.
const DEFAULT_LIMIT: usize = 20;

/// Cap for `recent` listings.
const RECENT_LIMIT: usize = 50;

#[derive(Debug, Default)]
pub struct MemoryStore {
    memories: Vec<DrinkMemory>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, memory: DrinkMemory) {
        self.memories.push(memory);
    }

    pub fn get(&self, id: Uuid) -> Option<&DrinkMemory> {
        self.memories.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    /// Most recently recorded memories, newest first.
    pub fn recent(&self) -> Vec<DrinkMemory> {
        self.memories.iter().rev().take(RECENT_LIMIT).cloned().collect()
    }

    /// Execute a structured query: term match, then filters, newest first,
    /// capped by the query limit.
    pub fn search(&self, query: &MemoryQuery) -> Vec<DrinkMemory> {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

        self.memories
            .iter()
            .rev()
            .filter(|m| matches_terms(m, &query.terms))
            .filter(|m| query.filters.iter().all(|f| f.matches(m)))
            .take(limit)
            .cloned()
            .collect()
    }
}

/// Every term must appear in the drink name, notes, or a flavor tag.
fn matches_terms(memory: &DrinkMemory, terms: &[String]) -> bool {
    terms.iter().all(|term| {
        let term = term.to_lowercase();
        memory.drink.to_lowercase().contains(&term)
            || memory.notes.to_lowercase().contains(&term)
            || memory.flavors.iter().any(|f| f.to_lowercase() == term)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bar_query::{Comparison, FilterField, QueryFilter};

    fn sample_store() -> MemoryStore {
        let mut store = MemoryStore::new();

        let mut negroni = DrinkMemory::new("patron-1", "Negroni");
        negroni.spirit = Some("gin".into());
        negroni.flavors = vec!["bitter".into(), "herbal".into()];
        negroni.abv = 24.0;
        negroni.rating = Some(5);
        store.add(negroni);

        let mut margarita = DrinkMemory::new("patron-1", "Margarita");
        margarita.spirit = Some("tequila".into());
        margarita.flavors = vec!["citrusy".into(), "sour".into()];
        margarita.abv = 18.0;
        margarita.rating = Some(4);
        store.add(margarita);

        let mut mojito = DrinkMemory::new("patron-1", "Virgin Mojito");
        mojito.flavors = vec!["sweet".into(), "citrusy".into()];
        mojito.abv = 0.0;
        mojito.rating = Some(3);
        mojito.notes = "great on a hot day".into();
        store.add(mojito);

        store
    }

    #[test]
    fn add_and_get() {
        let mut store = MemoryStore::new();
        let memory = DrinkMemory::new("patron-1", "Daiquiri");
        let id = memory.id;
        store.add(memory);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().drink, "Daiquiri");
        assert!(store.get(Uuid::now_v7()).is_none());
    }

    #[test]
    fn empty_query_lists_newest_first() {
        let store = sample_store();
        let results = store.search(&MemoryQuery::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].drink, "Virgin Mojito");
        assert_eq!(results[2].drink, "Negroni");
    }

    #[test]
    fn term_matches_drink_name() {
        let store = sample_store();
        let query = MemoryQuery {
            terms: vec!["negroni".into()],
            ..MemoryQuery::default()
        };
        let results = store.search(&query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].drink, "Negroni");
    }

    #[test]
    fn term_matches_notes() {
        let store = sample_store();
        let query = MemoryQuery {
            terms: vec!["hot".into()],
            ..MemoryQuery::default()
        };
        let results = store.search(&query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].drink, "Virgin Mojito");
    }

    #[test]
    fn spirit_filter_narrows_results() {
        let store = sample_store();
        let query = MemoryQuery {
            filters: vec![QueryFilter::new(
                FilterField::Spirit,
                Comparison::Eq,
                "tequila",
            )],
            ..MemoryQuery::default()
        };
        let results = store.search(&query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].drink, "Margarita");
    }

    #[test]
    fn abv_filter_finds_zero_proof() {
        let store = sample_store();
        let query = MemoryQuery {
            filters: vec![QueryFilter::new(FilterField::Abv, Comparison::Eq, 0.0)],
            ..MemoryQuery::default()
        };
        let results = store.search(&query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].drink, "Virgin Mojito");
    }

    #[test]
    fn rating_filter_with_limit() {
        let store = sample_store();
        let query = MemoryQuery {
            filters: vec![QueryFilter::new(FilterField::Rating, Comparison::Gt, 3.0)],
            limit: Some(1),
            ..MemoryQuery::default()
        };
        let results = store.search(&query);
        assert_eq!(results.len(), 1);
        // Newest matching memory wins the single slot.
        assert_eq!(results[0].drink, "Margarita");
    }

    #[test]
    fn conjunctive_filters() {
        let store = sample_store();
        let query = MemoryQuery {
            filters: vec![
                QueryFilter::new(FilterField::Flavor, Comparison::Eq, "citrusy"),
                QueryFilter::new(FilterField::Abv, Comparison::Gt, 10.0),
            ],
            ..MemoryQuery::default()
        };
        let results = store.search(&query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].drink, "Margarita");
    }
}
