//! Fingerprint comparison on wire text
//!
//! Weak comparison treats `"x"` and `W/"x"` as equal; strong comparison
//! requires the texts to be identical, prefix included.

use super::WEAK_PREFIX;

/// True iff the text carries the weak-prefix marker
pub fn is_weak(fingerprint: &str) -> bool {
    fingerprint.starts_with(WEAK_PREFIX)
}

/// Strip the weak-prefix marker and surrounding quotes, returning the bare hash
pub fn extract_hash(fingerprint: &str) -> &str {
    fingerprint
        .strip_prefix(WEAK_PREFIX)
        .unwrap_or(fingerprint)
        .trim_matches('"')
}

/// Compare two fingerprints.
///
/// With `weak_comparison` only the hashes are compared, so a weak and a strong
/// fingerprint of the same content match. Otherwise the texts must be equal.
pub fn matches(a: &str, b: &str, weak_comparison: bool) -> bool {
    if weak_comparison {
        extract_hash(a) == extract_hash(b)
    } else {
        a == b
    }
}
