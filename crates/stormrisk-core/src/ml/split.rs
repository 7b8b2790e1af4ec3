//! Seeded stratified train/test split.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Row indices assigned to each side of the split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StratifiedSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// A class too small to stratify: every class needs at least 2 examples so
/// both sides of the split see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StratifyFailure {
    /// Encoded class index of the offending label.
    pub class: usize,
    pub count: usize,
}

/// Split `y` (encoded labels) into train/test index sets, stratified by
/// class. Each class contributes `test_fraction` of its rows to the test
/// side, at least 1 and at most all-but-one. Shuffling is driven entirely by
/// `rng`, so a seeded rng reproduces the split exactly.
pub fn stratified_split(
    y: &[usize],
    n_classes: usize,
    test_fraction: f64,
    rng: &mut StdRng,
) -> Result<StratifiedSplit, StratifyFailure> {
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
    for (i, &label) in y.iter().enumerate() {
        buckets[label].push(i);
    }

    for (class, bucket) in buckets.iter().enumerate() {
        if bucket.len() < 2 {
            return Err(StratifyFailure { class, count: bucket.len() });
        }
    }

    let mut train = Vec::with_capacity(y.len());
    let mut test = Vec::with_capacity(y.len() / 4);
    for bucket in &mut buckets {
        bucket.shuffle(rng);
        let n_test = ((bucket.len() as f64 * test_fraction).round() as usize)
            .clamp(1, bucket.len() - 1);
        test.extend_from_slice(&bucket[..n_test]);
        train.extend_from_slice(&bucket[n_test..]);
    }

    Ok(StratifiedSplit { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn split_is_stratified_and_disjoint() {
        // 10 of class 0, 5 of class 1.
        let y: Vec<usize> = std::iter::repeat(0).take(10).chain(std::iter::repeat(1).take(5)).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let split = stratified_split(&y, 2, 0.2, &mut rng).unwrap();

        assert_eq!(split.test.len(), 3); // 2 of class 0, 1 of class 1
        assert_eq!(split.train.len(), 12);
        assert_eq!(split.test.iter().filter(|&&i| y[i] == 0).count(), 2);
        assert_eq!(split.test.iter().filter(|&&i| y[i] == 1).count(), 1);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn split_is_reproducible_for_a_seed() {
        let y: Vec<usize> = (0..40).map(|i| i % 3).collect();
        let a = stratified_split(&y, 3, 0.2, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = stratified_split(&y, 3, 0.2, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn class_below_two_examples_fails() {
        let y = vec![0, 0, 0, 0, 1];
        let err = stratified_split(&y, 2, 0.2, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, StratifyFailure { class: 1, count: 1 });
    }

    #[test]
    fn tiny_classes_keep_one_example_each_side() {
        let y = vec![0, 0, 1, 1];
        let split = stratified_split(&y, 2, 0.2, &mut StdRng::seed_from_u64(1)).unwrap();
        // round(2 * 0.2) = 0, clamped up to 1 per class.
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 2);
    }
}
