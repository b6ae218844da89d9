//! URL slug derivation for movie titles.
//!
//! Uniqueness is not enforced here; the store checks collisions.

use regex::Regex;
use std::sync::OnceLock;

/// Derives a slug: lowercase, strip everything but `[a-z0-9]`, whitespace and
/// hyphens, turn whitespace runs into a hyphen, collapse hyphen runs and trim
/// hyphens from both ends.
///
/// A title made only of stripped characters yields an empty slug.
///
/// ```rust
/// use cinereview::services::slug::slugify;
///
/// assert_eq!(slugify("The Dark Knight"), "the-dark-knight");
/// assert_eq!(slugify("  Inception! "), "inception");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static HYPHENS: OnceLock<Regex> = OnceLock::new();

    let disallowed = DISALLOWED.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").expect("Invalid regex"));
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex"));
    let hyphens = HYPHENS.get_or_init(|| Regex::new(r"-+").expect("Invalid regex"));

    let lowered = title.to_lowercase();
    let stripped = disallowed.replace_all(&lowered, "");
    let hyphenated = whitespace.replace_all(&stripped, "-");
    let collapsed = hyphens.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}
