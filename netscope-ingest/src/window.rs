//! Fixed-size rolling averages over per-flow samples
//!
//! Each tracked flow owns a [`RollingWindow`]: a FIFO of its most recent raw
//! samples plus a running sum, so the average is O(1) per sample.

use std::collections::VecDeque;

/// Number of samples retained per flow
pub const DEFAULT_WINDOW_CAPACITY: usize = 50;

/// Bounded FIFO with an incrementally maintained sum
#[derive(Debug, Clone)]
pub struct RollingWindow {
    values: VecDeque<f64>,
    sum: f64,
    capacity: usize,
}

impl RollingWindow {
    /// Create a window holding at most `capacity` samples (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity + 1),
            sum: 0.0,
            capacity,
        }
    }

    /// Append a sample and return the updated average
    ///
    /// The new sample enters first; only once the queue reaches
    /// `capacity + 1` is the oldest sample evicted.
    pub fn push(&mut self, value: f64) -> f64 {
        self.values.push_back(value);
        self.sum += value;

        if self.values.len() == self.capacity + 1 {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest;
            }
        }

        self.sum / self.values.len() as f64
    }

    /// Sum of the samples currently held
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Average of the samples currently held
    pub fn average(&self) -> Option<f64> {
        (!self.values.is_empty()).then(|| self.sum / self.values.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples oldest first
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

/// One rolling window per flow series index
#[derive(Debug, Clone)]
pub struct RollingWindowAggregator {
    windows: Vec<RollingWindow>,
}

impl RollingWindowAggregator {
    pub fn new(flows: usize, capacity: usize) -> Self {
        Self {
            windows: vec![RollingWindow::new(capacity); flows],
        }
    }

    /// Push a sample for `flow`, returning its updated average
    pub fn push(&mut self, flow: usize, value: f64) -> Option<f64> {
        self.windows.get_mut(flow).map(|window| window.push(value))
    }

    pub fn window(&self, flow: usize) -> Option<&RollingWindow> {
        self.windows.get(flow)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_average_before_full() {
        let mut window = RollingWindow::new(3);
        assert_eq!(window.average(), None);

        assert_eq!(window.push(3.0), 3.0);
        assert_eq!(window.push(5.0), 4.0);
        assert_eq!(window.len(), 2);
        assert_eq!(window.sum(), 8.0);
    }

    #[test]
    fn test_oldest_value_evicted() {
        let mut window = RollingWindow::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            window.push(v);
        }
        assert_eq!(window.len(), 3);
        assert_eq!(window.values().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
        assert_eq!(window.sum(), 9.0);
        assert_eq!(window.average(), Some(3.0));
    }

    #[test]
    fn test_fifty_one_pushes_evict_first() {
        let mut window = RollingWindow::default();
        let values = (0..=50).map(|v| v as f64).collect::<Vec<_>>();
        for &v in &values {
            window.push(v);
        }
        assert_eq!(window.len(), 50);
        assert_eq!(window.sum(), values[1..].iter().sum::<f64>());
        assert_eq!(window.values().next(), Some(1.0));
    }

    #[test]
    fn test_running_sum_matches_contents() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut window = RollingWindow::default();
        let mut pushed = Vec::new();

        for _ in 0..500 {
            let v = rng.gen_range(-100.0..100.0);
            pushed.push(v);
            window.push(v);

            assert!(window.len() <= DEFAULT_WINDOW_CAPACITY);
            let start = pushed.len().saturating_sub(DEFAULT_WINDOW_CAPACITY);
            let expected: f64 = pushed[start..].iter().sum();
            let held: f64 = window.values().sum();
            assert!((window.sum() - expected).abs() < 1e-6);
            assert!((window.sum() - held).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut window = RollingWindow::new(0);
        window.push(1.0);
        window.push(2.0);
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.values().collect::<Vec<_>>(), vec![2.0]);
    }

    #[test]
    fn test_aggregator_is_per_flow() {
        let mut agg = RollingWindowAggregator::new(2, 2);
        assert_eq!(agg.push(0, 10.0), Some(10.0));
        assert_eq!(agg.push(1, 2.0), Some(2.0));
        assert_eq!(agg.push(0, 20.0), Some(15.0));
        assert_eq!(agg.push(0, 30.0), Some(25.0));
        assert_eq!(agg.push(2, 1.0), None);

        assert_eq!(agg.window(0).unwrap().sum(), 50.0);
        assert_eq!(agg.window(1).unwrap().len(), 1);
    }
}
