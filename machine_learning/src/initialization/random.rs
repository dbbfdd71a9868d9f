use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::WeightGen;
use crate::{MlErr, Result};

/// Draws a fixed amount of weights from a probability distribution.
#[derive(Debug, Clone)]
pub struct RandWeightGen<D: Distribution<f32>> {
    distribution: D,
    remaining: usize,
}

impl<D: Distribution<f32>> RandWeightGen<D> {
    /// Creates a new `RandWeightGen` that yields `limit` samples of `distribution`.
    pub fn new(distribution: D, limit: usize) -> Self {
        Self {
            distribution,
            remaining: limit,
        }
    }
}

impl RandWeightGen<Uniform<f32>> {
    /// Xavier (Glorot) uniform initialization for a `fan_in x fan_out` weight block, drawing from
    /// `U(-r, r)` with `r = sqrt(6 / (fan_in + fan_out))`.
    ///
    /// # Returns
    /// An error if the block is empty.
    pub fn xavier_uniform(fan_in: usize, fan_out: usize) -> Result<Self> {
        let range = (6. / (fan_in + fan_out) as f32).sqrt();
        let distribution =
            Uniform::new(-range, range).map_err(|e| MlErr::InvalidDistribution(e.to_string()))?;

        Ok(Self::new(distribution, fan_in * fan_out))
    }
}

impl<R: Rng, D: Distribution<f32>> WeightGen<R> for RandWeightGen<D> {
    fn sample(&mut self, rng: &mut R, n: usize) -> Option<Vec<f32>> {
        if self.remaining == 0 {
            return None;
        }

        let n = n.min(self.remaining);
        self.remaining -= n;
        Some((0..n).map(|_| self.distribution.sample(rng)).collect())
    }

    fn remaining(&self) -> usize {
        self.remaining
    }
}
