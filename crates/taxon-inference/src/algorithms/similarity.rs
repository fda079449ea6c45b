//! Set similarity over measurement-code sets.

use std::collections::BTreeSet;

/// Jaccard similarity |A ∩ B| / |A ∪ B|.
/// Returns 0.0 when both sets are empty.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Codes present in both sets, sorted.
pub fn shared_codes(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Vec<String> {
    a.intersection(b).cloned().collect()
}
