//! Pairwise comparison of encoded signatures.
//!
//! Signatures are compared in their hex wire form so that callers can store
//! them as opaque strings and never re-parse them into structured types.

use crate::definitions::{DEFAULT_DUPLICATE_THRESHOLD, STRICT_DUPLICATE_THRESHOLD};

/// The number of differing bits between two equal-length hex signatures.
///
/// Returns the sentinel `-1` when the inputs have different lengths, which is
/// distinct from a true distance of 0. Callers must branch on the sentinel
/// before interpreting the result as a count. Non-hex digits count as 0.
#[must_use]
pub fn hamming_distance(h1: &str, h2: &str) -> i32 {
    if h1.len() != h2.len() {
        return -1;
    }

    h1.chars()
        .zip(h2.chars())
        .map(|(a, b)| {
            let v1 = a.to_digit(16).unwrap_or(0);
            let v2 = b.to_digit(16).unwrap_or(0);
            (v1 ^ v2).count_ones() as i32
        })
        .sum()
}

/// The similarity of two signatures in `0.0..=1.0`, where 1.0 means
/// identical.
///
/// Computed as `1 - distance / total_bits` (4 bits per hex digit).
///
/// Incomparable inputs (length mismatch) also return `0.0`. This conflates
/// "incomparable" with "maximally dissimilar"; callers that may hold
/// signatures of differing versions or lengths should check
/// [`hamming_distance`] for the `-1` sentinel first.
#[must_use]
pub fn similarity(h1: &str, h2: &str) -> f64 {
    let distance = hamming_distance(h1, h2);
    if distance < 0 {
        return 0.0;
    }
    if h1.is_empty() {
        // Two empty signatures are trivially identical.
        return 1.0;
    }

    let total_bits = (h1.len() * 4) as f64;
    1.0 - f64::from(distance) / total_bits
}

/// Whether two signatures are similar enough to be the same content.
///
/// A non-positive `threshold` is substituted with
/// [`DEFAULT_DUPLICATE_THRESHOLD`].
#[must_use]
pub fn is_duplicate(h1: &str, h2: &str, threshold: f64) -> bool {
    let threshold = if threshold <= 0.0 {
        DEFAULT_DUPLICATE_THRESHOLD
    } else {
        threshold
    };

    similarity(h1, h2) >= threshold
}

/// The configured duplicate-detection thresholds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, enum_utils::FromStr)]
pub enum MatchMode {
    /// The perceptual-hash default (0.90): tolerant of re-encoding noise.
    Standard,
    /// A stricter mode (0.97) for callers that prefer missed duplicates over
    /// false positives.
    Strict,
}

impl MatchMode {
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::Standard => DEFAULT_DUPLICATE_THRESHOLD,
            Self::Strict => STRICT_DUPLICATE_THRESHOLD,
        }
    }

    /// [`is_duplicate`] with this mode's threshold.
    #[must_use]
    pub fn is_duplicate(self, h1: &str, h2: &str) -> bool {
        is_duplicate(h1, h2, self.threshold())
    }
}

#[cfg(test)]
mod test {
    use rand::prelude::*;

    use super::{hamming_distance, is_duplicate, similarity, MatchMode};
    use crate::definitions::SIGNATURE_HEX_LEN;

    fn random_signature(rng: &mut StdRng) -> String {
        (0..SIGNATURE_HEX_LEN)
            .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap())
            .collect()
    }

    #[test]
    fn distance_to_self_is_zero_and_similarity_is_one() {
        let mut rng = StdRng::seed_from_u64(1);
        for _i in 0..1_000 {
            let h = random_signature(&mut rng);
            assert_eq!(hamming_distance(&h, &h), 0);
            assert_eq!(similarity(&h, &h), 1.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(2);
        for _i in 0..1_000 {
            let h1 = random_signature(&mut rng);
            let h2 = random_signature(&mut rng);
            assert_eq!(hamming_distance(&h1, &h2), hamming_distance(&h2, &h1));
        }
    }

    #[test]
    fn distance_satisfies_the_triangle_inequality() {
        let mut rng = StdRng::seed_from_u64(3);
        for _i in 0..1_000 {
            let h1 = random_signature(&mut rng);
            let h2 = random_signature(&mut rng);
            let h3 = random_signature(&mut rng);

            let d12 = hamming_distance(&h1, &h2);
            let d13 = hamming_distance(&h1, &h3);
            let d23 = hamming_distance(&h2, &h3);

            assert!(d12 <= d13 + d23);
        }
    }

    #[test]
    fn length_mismatch_is_the_sentinel_not_a_distance() {
        let h1 = "0".repeat(SIGNATURE_HEX_LEN);
        let h2 = "0".repeat(SIGNATURE_HEX_LEN - 2);

        assert_eq!(hamming_distance(&h1, &h2), -1);
        assert_eq!(similarity(&h1, &h2), 0.0);
        assert_eq!(hamming_distance("", "0"), -1);
    }

    #[test]
    fn four_differing_bits_is_a_duplicate_at_the_default_threshold() {
        let h1 = "0".repeat(SIGNATURE_HEX_LEN);
        let mut h2 = "f".to_string();
        h2.push_str(&"0".repeat(SIGNATURE_HEX_LEN - 1));

        assert_eq!(hamming_distance(&h1, &h2), 4);

        let sim = similarity(&h1, &h2);
        assert!((sim - (1.0 - 4.0 / 448.0)).abs() < 1e-9);
        assert!(is_duplicate(&h1, &h2, 0.90));
    }

    #[test]
    fn fully_differing_signatures_never_match() {
        let h1 = "0".repeat(SIGNATURE_HEX_LEN);
        let h2 = "f".repeat(SIGNATURE_HEX_LEN);

        assert_eq!(hamming_distance(&h1, &h2), 448);
        assert_eq!(similarity(&h1, &h2), 0.0);
        assert!(!is_duplicate(&h1, &h2, 0.01));
        assert!(!is_duplicate(&h1, &h2, 0.90));
    }

    #[test]
    fn non_positive_threshold_clamps_to_the_default() {
        let mut rng = StdRng::seed_from_u64(4);
        for _i in 0..100 {
            let h1 = random_signature(&mut rng);
            let h2 = random_signature(&mut rng);

            assert_eq!(is_duplicate(&h1, &h2, 0.0), is_duplicate(&h1, &h2, 0.90));
            assert_eq!(is_duplicate(&h1, &h2, -1.0), is_duplicate(&h1, &h2, 0.90));
        }
    }

    #[test]
    fn similarity_of_empty_signatures_is_one() {
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn match_modes_expose_the_configured_thresholds() {
        assert_eq!(MatchMode::Standard.threshold(), 0.90);
        assert_eq!(MatchMode::Strict.threshold(), 0.97);
        assert_eq!("Standard".parse(), Ok(MatchMode::Standard));
        assert_eq!("Strict".parse(), Ok(MatchMode::Strict));

        // distance 8 over 448 bits: similarity ~0.982, above both thresholds.
        let h1 = "0".repeat(SIGNATURE_HEX_LEN);
        let mut h2 = "ff".to_string();
        h2.push_str(&"0".repeat(SIGNATURE_HEX_LEN - 2));
        let sim = similarity(&h1, &h2);
        assert!(sim > 0.97);

        // distance 20 over 448 bits: similarity ~0.955.
        let mut h3 = "f".repeat(5);
        h3.push_str(&"0".repeat(SIGNATURE_HEX_LEN - 5));
        assert!(MatchMode::Standard.is_duplicate(&h1, &h3));
        assert!(!MatchMode::Strict.is_duplicate(&h1, &h3));
    }
}
