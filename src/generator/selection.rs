//! Seeded random selection primitives

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
///
/// Every random decision in the pipeline flows through one selector so a
/// fixed seed reproduces a batch exactly. Parallel workers would need
/// per-worker seeds; a single shared stream is the baseline.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generic weighted random selection
    ///
    /// Returns an index into the weights array using the cumulative
    /// distribution; non-positive totals fall back to index 0.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        weights.len() - 1
    }

    /// Uniform index below the given bound (0 when the bound is 0)
    pub fn index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }

    /// Uniform integer within an inclusive range
    ///
    /// Inverted ranges collapse to the minimum endpoint.
    pub fn range_value(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.rng.random::<f64>() < 0.5
    }

    /// In-place Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.random_range(0..=i);
            items.swap(i, j);
        }
    }

    /// Draw up to `count` distinct items from a slice, in random order
    pub fn choose_distinct<T: Copy>(&mut self, items: &[T], count: usize) -> Vec<T> {
        let mut pool: Vec<T> = items.to_vec();
        self.shuffle(&mut pool);
        pool.truncate(count);
        pool
    }

    /// Draw `count` distinct integer values from an inclusive range
    ///
    /// Returns fewer values when the range holds fewer than `count`.
    pub fn distinct_values(&mut self, min: i32, max: i32, count: usize) -> Vec<i32> {
        let pool: Vec<i32> = (min..=max).collect();
        self.choose_distinct(&pool, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_choice_respects_zero_weights() {
        let mut selector = RandomSelector::new(7);
        for _ in 0..50 {
            let choice = selector.weighted_choice(&[0.0, 1.0, 0.0]);
            assert_eq!(choice, 1);
        }
    }

    #[test]
    fn test_weighted_choice_degenerate_inputs() {
        let mut selector = RandomSelector::new(7);
        assert_eq!(selector.weighted_choice(&[]), 0);
        assert_eq!(selector.weighted_choice(&[0.0, 0.0]), 0);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut first = RandomSelector::new(1234);
        let mut second = RandomSelector::new(1234);
        for _ in 0..20 {
            assert_eq!(first.range_value(0, 100), second.range_value(0, 100));
        }
    }

    #[test]
    fn test_distinct_values_are_distinct() {
        let mut selector = RandomSelector::new(99);
        for _ in 0..20 {
            let mut values = selector.distinct_values(1, 6, 3);
            assert_eq!(values.len(), 3);
            values.sort_unstable();
            values.dedup();
            assert_eq!(values.len(), 3);
        }
    }

    #[test]
    fn test_distinct_values_cap_at_range_size() {
        let mut selector = RandomSelector::new(3);
        let values = selector.distinct_values(1, 2, 5);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut selector = RandomSelector::new(11);
        let mut items = vec![1, 2, 3, 4, 5, 6, 7, 8, 9];
        selector.shuffle(&mut items);
        items.sort_unstable();
        assert_eq!(items, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_range_value_stays_inclusive() {
        let mut selector = RandomSelector::new(5);
        for _ in 0..200 {
            let value = selector.range_value(2, 4);
            assert!((2..=4).contains(&value));
        }
        assert_eq!(selector.range_value(3, 3), 3);
        assert_eq!(selector.range_value(5, 1), 5);
    }
}
