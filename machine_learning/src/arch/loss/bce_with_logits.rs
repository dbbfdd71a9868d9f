use ndarray::{Array2, ArrayView2, Zip};

use super::LossFn;
use crate::arch::activations::logistic;

/// Binary cross entropy computed straight from logits.
///
/// Takes raw model outputs (no sigmoid applied) and 0/1 targets. Each element contributes
/// `max(x, 0) - x * y + ln(1 + e^-|x|)`, which stays finite for any logit.
#[derive(Default, Clone, Copy, Debug)]
pub struct BceWithLogits;

impl BceWithLogits {
    /// Returns a new `BceWithLogits`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for BceWithLogits {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        if y_pred.is_empty() {
            return 0.0;
        }

        let total = Zip::from(&y_pred)
            .and(&y)
            .fold(0.0, |acc, &x, &t| {
                acc + x.max(0.0) - x * t + (-x.abs()).exp().ln_1p()
            });

        total / y_pred.len() as f32
    }

    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Array2<f32> {
        let n = y_pred.len().max(1) as f32;
        Zip::from(&y_pred)
            .and(&y)
            .map_collect(|&x, &t| (logistic(x) - t) / n)
    }
}
