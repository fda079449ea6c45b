//! Dataset-wide noise terms: tokens too common to tell groups apart.

use std::collections::{BTreeSet, HashMap};

/// True iff a token seen in `frequency` of `total` facilities is noise.
/// The threshold is exclusive.
pub fn is_noise(frequency: usize, total: usize, threshold: f64) -> bool {
    frequency as f64 > total as f64 * threshold
}

/// Noise terms detected for one run. Computed once before per-group keyword
/// extraction and passed in by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoiseTerms {
    terms: BTreeSet<String>,
    threshold: f64,
}

impl NoiseTerms {
    /// Detect noise terms from per-token facility frequencies.
    pub fn detect(facility_frequency: &HashMap<String, usize>, total_facilities: usize, threshold: f64) -> Self {
        let terms = facility_frequency
            .iter()
            .filter(|(_, &freq)| is_noise(freq, total_facilities, threshold))
            .map(|(token, _)| token.clone())
            .collect();
        Self { terms, threshold }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.terms.contains(token)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Sorted noise terms.
    pub fn to_vec(&self) -> Vec<String> {
        self.terms.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_noise(3, 4, 0.75));
        assert!(is_noise(4, 4, 0.75));
        assert!(!is_noise(75, 100, 0.75));
        assert!(is_noise(76, 100, 0.75));
    }

    #[test]
    fn detect_collects_only_common_tokens() {
        let freq: HashMap<String, usize> = [("towscada", 10), ("tank", 4), ("well", 8)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let noise = NoiseTerms::detect(&freq, 10, 0.75);
        assert_eq!(noise.to_vec(), vec!["towscada", "well"]);
        assert!(noise.contains("well"));
        assert!(!noise.contains("tank"));
        assert_eq!(noise.threshold(), 0.75);
    }

    #[test]
    fn no_facilities_means_no_noise() {
        let freq = HashMap::new();
        assert!(NoiseTerms::detect(&freq, 0, 0.75).is_empty());
    }
}
