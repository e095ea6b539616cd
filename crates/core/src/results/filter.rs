//! Client-side re-filtering of index result pages.

use crate::query::normalize;

use super::{Category, SearchHit};

/// Keep hits whose normalized title contains at least one query token.
///
/// The backend query is wildcard-broadened, so its pages are looser than
/// the literal user intent; this narrows them back down. Matching is OR
/// over tokens: one hit is enough. Single-character tokens are too noisy
/// to match on and are dropped; if no tokens survive, the page passes
/// through untouched.
pub fn filter_by_terms(hits: Vec<SearchHit>, raw_query: &str) -> Vec<SearchHit> {
    let normalized = normalize(raw_query);
    let tokens: Vec<&str> = normalized
        .split_whitespace()
        .filter(|t| t.chars().count() > 1)
        .collect();

    if tokens.is_empty() {
        return hits;
    }

    hits.into_iter()
        .filter(|hit| {
            let title = normalize(&hit.title);
            tokens.iter().any(|t| title.contains(t))
        })
        .collect()
}

/// Keep hits matching the selected category.
///
/// `Category::All` is the identity. Under a specific category, hits whose
/// content type is unrecognized or missing are excluded.
pub fn filter_by_category(hits: Vec<SearchHit>, category: Category) -> Vec<SearchHit> {
    if category == Category::All {
        return hits;
    }

    hits.into_iter()
        .filter(|hit| category.matches(hit.content_type))
        .collect()
}
