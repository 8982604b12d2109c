//! Review interval rule
//!
//! Gap after completing iteration `k` is `2^k` days: 2, 4, 8, 16, 32, ...

/// Days between first study and first review
pub const FIRST_REVIEW_OFFSET_DAYS: u64 = 1;

/// Days to add when a topic at `iteration` is marked revised
///
/// Returns `None` when the gap does not fit in a u64.
pub fn review_gap(iteration: u32) -> Option<u64> {
    2u64.checked_pow(iteration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubling_sequence() {
        let gaps: Vec<u64> = (1..=5).map(|k| review_gap(k).unwrap()).collect();
        assert_eq!(gaps, vec![2, 4, 8, 16, 32]);
    }

    #[test]
    fn test_gap_overflow() {
        assert_eq!(review_gap(63), Some(1 << 63));
        assert_eq!(review_gap(64), None);
    }
}
