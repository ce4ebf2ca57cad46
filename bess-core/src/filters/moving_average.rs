//! Fixed-window moving average
//!
//! The window is a plain array shifted left once full. At N ≤ 20 and a
//! 50 ms tick the O(N) shift is cheaper than tracking a ring index and keeps
//! samples in chronological order for inspection.
//!
//! After [`MovingAverage::reset`] the window is empty, not zero-filled: the
//! next outputs average only the samples pushed since the reset.

/// Streaming mean over the last `N` samples
#[derive(Debug, Clone)]
pub struct MovingAverage<const N: usize> {
    /// Oldest sample first
    history: [f32; N],

    /// Number of valid samples, never above N
    len: usize,
}

impl<const N: usize> MovingAverage<N> {
    /// Create an empty filter
    pub const fn new() -> Self {
        Self {
            history: [0.0; N],
            len: 0,
        }
    }

    /// Add a sample and return the updated mean
    ///
    /// Once the window is full the oldest sample is discarded.
    pub fn push(&mut self, sample: f32) -> f32 {
        if N == 0 {
            return sample;
        }

        if self.len < N {
            self.history[self.len] = sample;
            self.len += 1;
        } else {
            self.history.copy_within(1.., 0);
            self.history[N - 1] = sample;
        }

        self.mean()
    }

    /// Mean of the samples currently held, `None` before the first push
    pub fn value(&self) -> Option<f32> {
        if self.len == 0 {
            None
        } else {
            Some(self.mean())
        }
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.history = [0.0; N];
        self.len = 0;
    }

    /// Samples currently held
    pub fn len(&self) -> usize {
        self.len
    }

    /// True before the first push or right after a reset
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once N samples have been pushed
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Held samples, oldest first
    pub fn samples(&self) -> &[f32] {
        &self.history[..self.len]
    }

    fn mean(&self) -> f32 {
        let sum: f32 = self.samples().iter().sum();
        sum / self.len as f32
    }
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_input_stays_constant() {
        let mut filter: MovingAverage<10> = MovingAverage::new();
        for _ in 0..37 {
            assert_eq!(filter.push(5.0), 5.0);
        }
        assert_eq!(filter.value(), Some(5.0));
    }

    #[test]
    fn averages_two_samples() {
        let mut filter: MovingAverage<2> = MovingAverage::new();
        assert_eq!(filter.push(0.0), 0.0);
        assert_eq!(filter.push(10.0), 5.0);
    }

    #[test]
    fn partial_window_averages_what_it_has() {
        let mut filter: MovingAverage<10> = MovingAverage::new();
        filter.push(2.0);
        assert_eq!(filter.push(4.0), 3.0);
        assert_eq!(filter.len(), 2);
        assert!(!filter.is_full());
    }

    #[test]
    fn oldest_sample_drops_out() {
        let mut filter: MovingAverage<3> = MovingAverage::new();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            filter.push(v);
        }
        assert_eq!(filter.samples(), &[3.0, 4.0, 5.0]);
        assert_eq!(filter.value(), Some(4.0));
    }

    #[test]
    fn reset_empties_the_window() {
        let mut filter: MovingAverage<4> = MovingAverage::new();
        for v in [8.0, 8.0, 8.0, 8.0] {
            filter.push(v);
        }

        filter.reset();
        assert!(filter.is_empty());
        assert_eq!(filter.value(), None);

        // No zeros left behind to drag the mean down
        assert_eq!(filter.push(2.0), 2.0);
    }
}
