// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles samples and splits them into two sets:
//   - Training set: used to fit the forest
//   - Test set:     used to measure accuracy and F1
//
// Why a seeded RNG?
//   The same dataset must always produce the same partition,
//   otherwise training twice would report different metrics.
//   StdRng::seed_from_u64 gives a reproducible stream for a
//   given seed on every platform.
//
// Sizes: the test side gets ceil(n * test_fraction) rows and
// the training side gets the rest. With 100 rows and 0.2 that
// is 80 / 20.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: rand crate documentation (SeedableRng, SliceRandom)

use anyhow::{ensure, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with a seeded RNG and split into (train, test).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `test_fraction` - Proportion held out for evaluation, in (0, 1)
/// * `seed`          - RNG seed; equal seeds give equal partitions
///
/// Fails if either side of the split would be empty.
pub fn split_train_test<T>(
    mut samples:   Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> Result<(Vec<T>, Vec<T>)> {
    ensure!(
        test_fraction > 0.0 && test_fraction < 1.0,
        "test fraction must be between 0 and 1, got {test_fraction}"
    );

    let total  = samples.len();
    let n_test = ((total as f64) * test_fraction).ceil() as usize;
    ensure!(
        n_test < total,
        "need at least 2 rows to split into train and test sets, got {total}"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    // split_off(n) keeps [0..n) in `samples` and returns [n..total)
    let test = samples.split_off(total - n_test);

    tracing::debug!(
        "Dataset split: {} training, {} test (seed {})",
        samples.len(),
        test.len(),
        seed,
    );

    Ok((samples, test))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_test_side_rounds_up() {
        // ceil(7 * 0.2) = 2
        let items: Vec<usize> = (0..7).collect();
        let (train, test)     = split_train_test(items, 0.2, 42).unwrap();
        assert_eq!(train.len(), 5);
        assert_eq!(test.len(),  2);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, test)     = split_train_test(items, 0.3, 7).unwrap();
        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_partition() {
        let a = split_train_test((0..30).collect::<Vec<usize>>(), 0.2, 42).unwrap();
        let b = split_train_test((0..30).collect::<Vec<usize>>(), 0.2, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_few_rows() {
        assert!(split_train_test(Vec::<usize>::new(), 0.2, 42).is_err());
        assert!(split_train_test(vec![1usize], 0.2, 42).is_err());
        assert!(split_train_test(vec![1usize, 2], 0.2, 42).is_ok());
    }

    #[test]
    fn test_fraction_out_of_range() {
        let items: Vec<usize> = (0..10).collect();
        assert!(split_train_test(items.clone(), 0.0, 42).is_err());
        assert!(split_train_test(items, 1.0, 42).is_err());
    }
}
