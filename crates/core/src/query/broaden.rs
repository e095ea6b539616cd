//! Wildcard broadening of user queries.

/// Append a trailing wildcard to every term of the query.
///
/// The index matches broadened terms as prefixes, which surfaces results
/// the literal query would miss; the term-match filter narrows the page
/// back down afterwards. Callers must not pass an empty query, a blank
/// input short-circuits before any search is issued.
pub fn broaden(user_query: &str) -> String {
    user_query
        .split_whitespace()
        .map(|term| format!("{}*", term))
        .collect::<Vec<_>>()
        .join(" ")
}
