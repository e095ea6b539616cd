//! Free-text canonicalization for title matching.

/// Canonicalize free text for comparison.
///
/// Lower-cases, turns the common release-name separators (`.`, `_`, `-`)
/// and bracket punctuation into spaces, then collapses whitespace runs and
/// trims. Brackets become spaces rather than disappearing so that
/// `"Title(2024)"` keeps `title` and `2024` as separate tokens. Non-ASCII
/// letters pass through untouched apart from case folding.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '.' | '_' | '-' => ' ',
            '(' | ')' | '[' | ']' | '{' | '}' => ' ',
            other => other,
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
