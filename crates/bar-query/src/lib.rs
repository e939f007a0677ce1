//! Query construction for the Alchemix bar assistant memory layer.
//!
//! Turns a patron's natural-language question ("smoky mezcal drinks I rated
//! highly") into a structured [`MemoryQuery`] the memory store can execute.
//!
//! Two tiers:
//! - **Rule-based** (local): lexicon + pattern matching for common bar
//!   vocabulary, zero cost.
//! - **LLM** (remote): OpenAI-compatible chat endpoint for free-form phrasing
//!   the lexicon can't interpret.

pub mod constructor;
pub mod error;
pub mod llm;
pub mod memory;
pub mod query;
pub mod rules;
pub mod tiered;

pub use constructor::{ConstructedQuery, QueryConstructor};
pub use error::ConstructorError;
pub use llm::{LlmConfig, LlmQueryConstructor};
pub use memory::DrinkMemory;
pub use query::{Comparison, FilterField, MemoryQuery, QueryFilter};
pub use rules::BarQueryConstructor;
pub use tiered::TieredConstructor;
