use std::iter;

use rand::Rng;

use super::WeightGen;

/// A block of parameters that all start at the same value, typically a layer's biases.
#[derive(Debug, Clone)]
pub struct ConstWeightGen {
    value: f32,
    remaining: usize,
}

impl ConstWeightGen {
    /// Creates a new `ConstWeightGen` for a block of `len` copies of `value`.
    pub fn new(value: f32, len: usize) -> Self {
        Self {
            value,
            remaining: len,
        }
    }

    /// A block of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self::new(0.0, len)
    }
}

impl<R: Rng> WeightGen<R> for ConstWeightGen {
    fn sample(&mut self, _rng: &mut R, n: usize) -> Option<Vec<f32>> {
        let take = n.min(self.remaining);
        if take == 0 && self.remaining == 0 {
            return None;
        }

        self.remaining -= take;
        Some(iter::repeat_n(self.value, take).collect())
    }

    fn remaining(&self) -> usize {
        self.remaining
    }
}
