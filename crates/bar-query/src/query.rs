use serde::{Deserialize, Serialize};

use crate::memory::DrinkMemory;

/// Memory field a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    /// Base spirit ("gin", "mezcal", ...). String equality.
    Spirit,
    /// Flavor tag ("smoky", "sweet", ...). String equality against any tag.
    Flavor,
    /// Alcohol by volume, percent. Numeric comparison.
    Abv,
    /// Patron rating, 1-5. Numeric comparison.
    Rating,
}

/// Comparison operator for a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    #[default]
    Eq,
    Lt,
    Gt,
}

/// One predicate over a memory field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryFilter {
    pub field: FilterField,
    #[serde(default)]
    pub op: Comparison,
    /// String for `Spirit`/`Flavor`, number for `Abv`/`Rating`.
    pub value: serde_json::Value,
}

/// Structured query executed against the memory store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryQuery {
    /// Free-text terms matched against drink name, notes, and flavor tags.
    #[serde(default)]
    pub terms: Vec<String>,
    /// Field predicates. All must hold.
    #[serde(default)]
    pub filters: Vec<QueryFilter>,
    /// Maximum number of results. None uses the store default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl QueryFilter {
    pub fn new(field: FilterField, op: Comparison, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }

    /// Whether a memory satisfies this predicate.
    ///
    /// String fields (`Spirit`, `Flavor`) compare case-insensitive equality
    /// regardless of `op`; a non-string value never matches them.
    pub fn matches(&self, memory: &DrinkMemory) -> bool {
        match self.field {
            FilterField::Spirit => {
                let Some(want) = self.value.as_str() else {
                    return false;
                };
                memory
                    .spirit
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(want))
            }
            FilterField::Flavor => {
                let Some(want) = self.value.as_str() else {
                    return false;
                };
                memory.flavors.iter().any(|f| f.eq_ignore_ascii_case(want))
            }
            FilterField::Abv => {
                let Some(want) = self.value.as_f64() else {
                    return false;
                };
                compare(memory.abv, self.op, want)
            }
            FilterField::Rating => {
                let (Some(rating), Some(want)) = (memory.rating, self.value.as_f64()) else {
                    return false;
                };
                compare(f64::from(rating), self.op, want)
            }
        }
    }
}

fn compare(actual: f64, op: Comparison, want: f64) -> bool {
    match op {
        Comparison::Eq => (actual - want).abs() < f64::EPSILON,
        Comparison::Lt => actual < want,
        Comparison::Gt => actual > want,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negroni() -> DrinkMemory {
        let mut memory = DrinkMemory::new("patron-1", "Negroni");
        memory.spirit = Some("gin".into());
        memory.flavors = vec!["bitter".into(), "herbal".into()];
        memory.abv = 24.0;
        memory.rating = Some(5);
        memory
    }

    #[test]
    fn memory_query_roundtrip() {
        let query = MemoryQuery {
            terms: vec!["negroni".into()],
            filters: vec![QueryFilter::new(FilterField::Spirit, Comparison::Eq, "gin")],
            limit: Some(5),
        };
        let json = serde_json::to_string(&query).unwrap();
        let deserialized: MemoryQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.terms, vec!["negroni"]);
        assert_eq!(deserialized.filters.len(), 1);
        assert_eq!(deserialized.limit, Some(5));
    }

    #[test]
    fn filter_field_serialization() {
        assert_eq!(
            serde_json::to_string(&FilterField::Abv).unwrap(),
            r#""abv""#
        );
        assert_eq!(
            serde_json::to_string(&FilterField::Spirit).unwrap(),
            r#""spirit""#
        );
    }

    #[test]
    fn comparison_defaults_to_eq() {
        let json = r#"{"field": "spirit", "value": "gin"}"#;
        let filter: QueryFilter = serde_json::from_str(json).unwrap();
        assert_eq!(filter.op, Comparison::Eq);
    }

    #[test]
    fn unknown_field_rejected() {
        let json = r#"{"field": "garnish", "value": "olive"}"#;
        assert!(serde_json::from_str::<QueryFilter>(json).is_err());
    }

    #[test]
    fn spirit_filter_case_insensitive() {
        let filter = QueryFilter::new(FilterField::Spirit, Comparison::Eq, "Gin");
        assert!(filter.matches(&negroni()));
    }

    #[test]
    fn spirit_filter_rejects_other_spirit() {
        let filter = QueryFilter::new(FilterField::Spirit, Comparison::Eq, "mezcal");
        assert!(!filter.matches(&negroni()));
    }

    #[test]
    fn spirit_filter_rejects_non_string_value() {
        let filter = QueryFilter::new(FilterField::Spirit, Comparison::Eq, 42);
        assert!(!filter.matches(&negroni()));
    }

    #[test]
    fn flavor_filter_matches_any_tag() {
        let filter = QueryFilter::new(FilterField::Flavor, Comparison::Eq, "herbal");
        assert!(filter.matches(&negroni()));
    }

    #[test]
    fn abv_lt_filter() {
        let filter = QueryFilter::new(FilterField::Abv, Comparison::Lt, 30.0);
        assert!(filter.matches(&negroni()));

        let filter = QueryFilter::new(FilterField::Abv, Comparison::Lt, 20.0);
        assert!(!filter.matches(&negroni()));
    }

    #[test]
    fn rating_gt_filter() {
        let filter = QueryFilter::new(FilterField::Rating, Comparison::Gt, 3);
        assert!(filter.matches(&negroni()));
    }

    #[test]
    fn rating_filter_skips_unrated() {
        let mut memory = negroni();
        memory.rating = None;
        let filter = QueryFilter::new(FilterField::Rating, Comparison::Gt, 3);
        assert!(!filter.matches(&memory));
    }
}
