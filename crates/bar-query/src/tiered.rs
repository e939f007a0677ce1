//! Tiered query construction — rules first, LLM fallback.
//!
//! Tries the local (rule-based) constructor first. If it returns `None`,
//! falls back to the LLM constructor. The tier that produced the query is
//! recorded in `ConstructedQuery.tier`.

use async_trait::async_trait;

use crate::constructor::{ConstructedQuery, QueryConstructor};

/// Composite constructor that tries local rules first, then the LLM.
pub struct TieredConstructor {
    local: Box<dyn QueryConstructor>,
    fallback: Box<dyn QueryConstructor>,
}

impl TieredConstructor {
    pub fn new(local: Box<dyn QueryConstructor>, fallback: Box<dyn QueryConstructor>) -> Self {
        Self { local, fallback }
    }
}

#[async_trait]
impl QueryConstructor for TieredConstructor {
    async fn construct(&self, text: &str) -> Option<ConstructedQuery> {
        if let Some(constructed) = self.local.construct(text).await {
            return Some(constructed);
        }

        tracing::debug!("rule-based construction missed, falling back to llm");
        self.fallback.construct(text).await
    }

    fn tier_name(&self) -> &str {
        "tiered"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::MemoryQuery;

    /// Mock constructor that always returns a fixed result (or None).
    struct MockConstructor {
        result: Option<ConstructedQuery>,
        name: &'static str,
    }

    impl MockConstructor {
        fn hit(name: &'static str, term: &str) -> Self {
            Self {
                result: Some(ConstructedQuery {
                    query: MemoryQuery {
                        terms: vec![term.into()],
                        ..MemoryQuery::default()
                    },
                    tier: name.into(),
                    confidence: 0.95,
                }),
                name,
            }
        }

        fn miss(name: &'static str) -> Self {
            Self { result: None, name }
        }
    }

    #[async_trait]
    impl QueryConstructor for MockConstructor {
        async fn construct(&self, _text: &str) -> Option<ConstructedQuery> {
            self.result.clone()
        }

        fn tier_name(&self) -> &str {
            self.name
        }
    }

    #[tokio::test]
    async fn local_hit_skips_fallback() {
        let constructor = TieredConstructor::new(
            Box::new(MockConstructor::hit("rules", "negroni")),
            Box::new(MockConstructor::hit("llm", "wrong")),
        );

        let constructed = constructor.construct("negroni").await.unwrap();
        assert_eq!(constructed.tier, "rules");
        assert_eq!(constructed.query.terms, vec!["negroni"]);
    }

    #[tokio::test]
    async fn fallback_on_local_miss() {
        let constructor = TieredConstructor::new(
            Box::new(MockConstructor::miss("rules")),
            Box::new(MockConstructor::hit("llm", "paper plane")),
        );

        let constructed = constructor
            .construct("that citrusy amaro one from last summer")
            .await
            .unwrap();
        assert_eq!(constructed.tier, "llm");
    }

    #[tokio::test]
    async fn both_miss_returns_none() {
        let constructor = TieredConstructor::new(
            Box::new(MockConstructor::miss("rules")),
            Box::new(MockConstructor::miss("llm")),
        );

        assert!(constructor.construct("hello world").await.is_none());
    }
}
