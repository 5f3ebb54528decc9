//! Position smoothing.
//!
//! The Pinnacle's absolute positions jitter by a few counts even with a
//! stationary finger.  We keep the last few samples of each axis in a ring and
//! report their mean.

use arrayvec::ArrayVec;

/// Largest window we support.
pub const MAX_DEBOUNCE_SAMPLES: usize = 16;

#[derive(Clone, Debug)]
pub struct Debouncer {
    xs: ArrayVec<f32, MAX_DEBOUNCE_SAMPLES>,
    ys: ArrayVec<f32, MAX_DEBOUNCE_SAMPLES>,
    index: usize,
}

impl Debouncer {
    /// Build a debouncer averaging over `samples` readings.  The count is
    /// held to `1..=MAX_DEBOUNCE_SAMPLES`.
    pub fn new(samples: usize) -> Debouncer {
        let samples = samples.clamp(1, MAX_DEBOUNCE_SAMPLES);
        let mut xs = ArrayVec::new();
        let mut ys = ArrayVec::new();
        for _ in 0..samples {
            xs.push(0.0);
            ys.push(0.0);
        }
        Debouncer { xs, ys, index: 0 }
    }

    pub fn samples(&self) -> usize {
        self.xs.len()
    }

    /// Begin a new touch.  The whole window is filled with this position so
    /// the first filtered sample doesn't get dragged toward the last touch.
    pub fn start(&mut self, x: f32, y: f32) {
        self.xs.iter_mut().for_each(|v| *v = x);
        self.ys.iter_mut().for_each(|v| *v = y);
        self.index = 0;
    }

    /// Add a sample, and return the floor of the mean of the window.
    pub fn filter(&mut self, x: f32, y: f32) -> (f32, f32) {
        self.xs[self.index] = x;
        self.ys[self.index] = y;
        self.index = (self.index + 1) % self.xs.len();

        (Self::mean(&self.xs), Self::mean(&self.ys))
    }

    fn mean(window: &[f32]) -> f32 {
        let sum: f32 = window.iter().sum();
        libm::floorf(sum / window.len() as f32)
    }
}
