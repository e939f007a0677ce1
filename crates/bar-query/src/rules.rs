//! Rule-based query construction — lexicon and pattern matching.
//!
//! Handles common bar vocabulary at zero cost and sub-millisecond latency.
//! Phrasing the lexicon can't interpret falls through to the LLM tier.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::constructor::{ConstructedQuery, QueryConstructor};
use crate::query::{Comparison, FilterField, MemoryQuery, QueryFilter};

/// Canonical spirit names with the aliases patrons use for them.
const SPIRITS: &[(&str, &[&str])] = &[
    ("gin", &["gin"]),
    ("vodka", &["vodka"]),
    ("rum", &["rum", "rhum"]),
    ("whiskey", &["whiskey", "whisky", "bourbon", "rye", "scotch"]),
    ("tequila", &["tequila"]),
    ("mezcal", &["mezcal", "mescal"]),
    ("brandy", &["brandy", "cognac"]),
    ("amaro", &["amaro", "fernet"]),
];

/// Flavor descriptors recognized as tags.
const FLAVORS: &[&str] = &[
    "smoky", "sweet", "sour", "bitter", "herbal", "fruity", "spicy", "dry", "creamy", "citrusy",
    "floral",
];

/// Phrases that mark high/low rating intent.
const RATING_HIGH: &[&str] = &[
    "rated highly",
    "highly rated",
    "favorite",
    "favourite",
    "loved",
    "liked",
];
const RATING_LOW: &[&str] = &["didn't like", "did not like", "disliked", "hated"];

/// Phrases that mark a zero-proof request.
const ZERO_PROOF: &[&str] = &[
    "non-alcoholic",
    "nonalcoholic",
    "alcohol-free",
    "zero proof",
    "zero-proof",
    "mocktail",
];

/// Substrings/tokens that mark the text as a memory question at all.
const INTENT_SUBSTRINGS: &[&str] = &["drink", "drank", "cocktail", "remember", "order", "sip"];
const INTENT_TOKENS: &[&str] = &["had", "have", "tried"];

/// Words dropped from search terms (question scaffolding, time references).
const STOPWORDS: &[&str] = &[
    "the", "did", "was", "were", "what", "when", "which", "where", "that", "this", "with", "for",
    "and", "any", "all", "show", "list", "find", "give", "get", "like", "from", "about", "them",
    "some", "how", "many", "much", "who", "you", "your", "can", "could", "would", "please", "last",
    "week", "month", "year", "night", "yesterday", "today", "evening", "recently", "again", "ever",
    "something", "anything", "top", "first", "under", "below", "over", "above", "than", "stronger",
    "weaker", "less", "more", "things", "thing", "stuff",
];

/// Tokens consumed by filter extraction, never useful as search terms.
const FILTER_TOKENS: &[&str] = &[
    "favorite",
    "favourite",
    "loved",
    "liked",
    "rated",
    "highly",
    "disliked",
    "hated",
    "percent",
    "abv",
    "proof",
    "alcohol",
    "zero",
    "mocktail",
    "mocktails",
    "non-alcoholic",
    "nonalcoholic",
    "alcohol-free",
];

static RE_ABV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(less than|more than|stronger than|weaker than|under|below|over|above)\s+(\d+(?:\.\d+)?)\s*(?:%|percent|abv)",
    )
    .unwrap()
});

static RE_LIMIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:top|first|last)\s+(\d+)").unwrap());

/// Lexicon-driven query constructor.
pub struct BarQueryConstructor;

impl BarQueryConstructor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BarQueryConstructor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryConstructor for BarQueryConstructor {
    async fn construct(&self, text: &str) -> Option<ConstructedQuery> {
        construct_query(text).map(|(query, confidence)| ConstructedQuery {
            query,
            tier: "rules".into(),
            confidence,
        })
    }

    fn tier_name(&self) -> &str {
        "rules"
    }
}

/// Core lexicon matching logic.
fn construct_query(text: &str) -> Option<(MemoryQuery, f64)> {
    let lower = text.to_lowercase();
    let tokens = tokenize(&lower);

    let mut filters = Vec::new();

    if let Some(spirit) = find_spirit(&tokens) {
        filters.push(QueryFilter::new(FilterField::Spirit, Comparison::Eq, spirit));
    }

    for flavor in find_flavors(&tokens) {
        filters.push(QueryFilter::new(FilterField::Flavor, Comparison::Eq, flavor));
    }

    if let Some((op, pct)) = extract_abv(&lower) {
        filters.push(QueryFilter::new(FilterField::Abv, op, pct));
    } else if matches_any(&lower, ZERO_PROOF) {
        filters.push(QueryFilter::new(FilterField::Abv, Comparison::Eq, 0.0));
    }

    if matches_any(&lower, RATING_HIGH) {
        filters.push(QueryFilter::new(FilterField::Rating, Comparison::Gt, 3.0));
    } else if matches_any(&lower, RATING_LOW) {
        filters.push(QueryFilter::new(FilterField::Rating, Comparison::Lt, 3.0));
    }

    let limit = extract_limit(&lower);

    // Without a lexicon hit, only accept text that reads as a memory
    // question ("what did I drink..."); everything else is a miss.
    if filters.is_empty() && limit.is_none() && !has_memory_intent(&lower, &tokens) {
        return None;
    }

    let terms = extract_terms(&tokens);
    let confidence = if filters.is_empty() { 0.7 } else { 0.9 };

    Some((MemoryQuery { terms, filters, limit }, confidence))
}

/// Split into lowercase word tokens, stripping surrounding punctuation.
fn tokenize(lower: &str) -> Vec<&str> {
    lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Check if the text contains any of the given patterns.
fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

/// First spirit mentioned, mapped to its canonical name.
fn find_spirit(tokens: &[&str]) -> Option<&'static str> {
    for token in tokens {
        for &(canonical, aliases) in SPIRITS {
            if aliases.contains(token) {
                return Some(canonical);
            }
        }
    }
    None
}

/// All flavor descriptors mentioned, in input order.
fn find_flavors(tokens: &[&str]) -> Vec<&'static str> {
    FLAVORS
        .iter()
        .filter(|f| tokens.contains(*f))
        .copied()
        .collect()
}

/// Extract an ABV comparison like "under 20%" or "stronger than 30 percent".
fn extract_abv(text: &str) -> Option<(Comparison, f64)> {
    let caps = RE_ABV.captures(text)?;
    let op = match &caps[1] {
        "under" | "below" | "less than" | "weaker than" => Comparison::Lt,
        _ => Comparison::Gt,
    };
    let pct: f64 = caps[2].parse().ok()?;
    Some((op, pct))
}

/// Extract a result cap from "top 5", "first 3", "last 10".
fn extract_limit(text: &str) -> Option<usize> {
    let caps = RE_LIMIT.captures(text)?;
    caps[1].parse().ok()
}

/// Whether the text reads as a question about remembered drinks.
fn has_memory_intent(lower: &str, tokens: &[&str]) -> bool {
    matches_any(lower, INTENT_SUBSTRINGS) || tokens.iter().any(|t| INTENT_TOKENS.contains(t))
}

/// Remaining meaningful words, matched against drink names and notes.
fn extract_terms(tokens: &[&str]) -> Vec<String> {
    tokens
        .iter()
        .copied()
        .filter(|t| t.len() >= 3)
        .filter(|t| !STOPWORDS.contains(t))
        .filter(|t| !FILTER_TOKENS.contains(t))
        .filter(|t| !is_lexicon_word(t))
        .filter(|t| !is_intent_word(t))
        .filter(|t| t.parse::<f64>().is_err())
        .map(|t| t.to_string())
        .collect()
}

fn is_lexicon_word(token: &str) -> bool {
    FLAVORS.contains(&token) || SPIRITS.iter().any(|(_, aliases)| aliases.contains(&token))
}

fn is_intent_word(token: &str) -> bool {
    INTENT_TOKENS.contains(&token)
        || INTENT_SUBSTRINGS.iter().any(|m| token.starts_with(m))
        || token.starts_with("sipped")
        || token.starts_with("ordered")
}
