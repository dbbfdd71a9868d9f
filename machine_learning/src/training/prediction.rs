use ndarray::{ArrayView1, ArrayView2, Axis};

use crate::arch::activations::logistic;

/// The kind of problem a model solves, which decides how its raw output turns into predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionType {
    /// One logit per sample, the positive class is predicted when `sigmoid(logit) >= 0.5`.
    Binary,
    /// One score per class, the predicted class index is the argmax of the row.
    Classification,
    /// The first output column is the prediction as is.
    Regression,
}

impl PredictionType {
    /// Turns a batch of raw model outputs into one prediction per sample.
    pub fn predictions(&self, output: ArrayView2<f32>) -> Vec<f32> {
        match self {
            PredictionType::Binary => output
                .column(0)
                .iter()
                .map(|&z| if logistic(z) >= 0.5 { 1.0 } else { 0.0 })
                .collect(),
            PredictionType::Classification => output
                .axis_iter(Axis(0))
                .map(|row| argmax(row) as f32)
                .collect(),
            PredictionType::Regression => output.column(0).to_vec(),
        }
    }

    /// Turns a batch of targets into one label per sample, comparable with `predictions`.
    ///
    /// One-hot classification targets become their class index.
    pub fn targets(&self, y: ArrayView2<f32>) -> Vec<f32> {
        match self {
            PredictionType::Classification if y.ncols() > 1 => {
                y.axis_iter(Axis(0)).map(|row| argmax(row) as f32).collect()
            }
            _ => y.column(0).to_vec(),
        }
    }
}

fn argmax(row: ArrayView1<f32>) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, max), (i, &v)| {
            if v > max { (i, v) } else { (best, max) }
        })
        .0
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn binary_thresholds_the_logit_at_zero() {
        let out = array![[-2.0], [0.0], [0.3]];
        assert_eq!(PredictionType::Binary.predictions(out.view()), [0.0, 1.0, 1.0]);
    }

    #[test]
    fn classification_takes_the_argmax() {
        let out = array![[0.1, 0.7, 0.2], [3.0, -1.0, 2.9]];
        let y = array![[0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let kind = PredictionType::Classification;

        assert_eq!(kind.predictions(out.view()), [1.0, 0.0]);
        assert_eq!(kind.targets(y.view()), [1.0, 2.0]);
        assert_eq!(kind.targets(array![[2.0], [0.0]].view()), [2.0, 0.0]);
    }

    #[test]
    fn regression_is_the_raw_output() {
        let out = array![[1.5], [-0.25]];
        assert_eq!(PredictionType::Regression.predictions(out.view()), [1.5, -0.25]);
    }
}
