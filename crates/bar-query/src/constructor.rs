//! The query-construction capability trait.
//!
//! The server depends only on this trait; concrete constructors are injected
//! into the application state at startup and never swapped afterwards.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::query::MemoryQuery;

/// A constructed query plus provenance for logging/audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructedQuery {
    /// The structured query to execute.
    pub query: MemoryQuery,
    /// Which tier produced this query.
    pub tier: String,
    /// Constructor confidence (0.0 - 1.0).
    pub confidence: f64,
}

/// Trait for query constructors that turn natural language into structured
/// memory queries.
#[async_trait]
pub trait QueryConstructor: Send + Sync {
    /// Construct a structured query from free text.
    /// Returns None if the constructor cannot interpret the input.
    async fn construct(&self, text: &str) -> Option<ConstructedQuery>;

    /// Name of this constructor tier (for logging/audit).
    fn tier_name(&self) -> &str;
}
