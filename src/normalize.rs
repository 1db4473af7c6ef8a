//! Pattern construction for the two query engines, and the shared identity
//! key.
//!
//! Both backends match case-insensitively, but their operators differ: the
//! document store exposes a substring-capable regex operator with an
//! external case flag, while the graph store's `=~` compares a regex against
//! the whole field value. The builders here keep one user fragment
//! semantically equivalent on both.
//!
//! Regex metacharacters in the fragment are passed through unescaped.
//! Titles containing punctuation keep matching as typed, and the fragment is
//! always bound as a query parameter, never spliced into query text.

/// Document-store pattern matching `fragment` anywhere in the field. Pair
/// with the store's case-insensitive option.
pub fn document_substring(fragment: &str) -> String {
    fragment.to_string()
}

/// Document-store pattern requiring the entire field to equal `fragment`
/// (case-insensitivity again comes from the store option). Used by
/// update-by-title so an update cannot also hit similarly-named records
/// through substring semantics.
pub fn document_exact(fragment: &str) -> String {
    format!("^{fragment}$")
}

/// Graph-store pattern emulating substring search against the whole-field
/// `=~` operator: wildcards anchor both ends, `(?i)` supplies the case
/// insensitivity the operator itself lacks.
pub fn graph_substring(fragment: &str) -> String {
    format!("(?i).*{fragment}.*")
}

/// The comparison key for cross-store title identity: trimmed and
/// lowercased. Every reconciliation comparison, set membership, and
/// intersection goes through this one function.
pub fn identity_key(title: &str) -> String {
    title.trim().to_lowercase()
}
