//! Scores computed over a whole epoch of thresholded predictions.
//!
//! Every function takes the expected labels first and the predicted ones second, both holding
//! `0.0` for the negative class and `1.0` for the positive one. A score whose denominator is zero
//! is reported as `0.0`.

/// A named scoring function.
#[derive(Clone, Copy, Debug)]
pub struct Metric {
    name: &'static str,
    f: fn(&[f32], &[f32]) -> f32,
}

impl Metric {
    pub const SPECIFICITY: Metric = Metric::new("specificity", specificity);
    pub const SENSITIVITY: Metric = Metric::new("sensitivity", sensitivity);
    pub const CLASSIF_ACCURACY: Metric = Metric::new("classif_accuracy", classif_accuracy);
    pub const BALANCED_ACCURACY: Metric = Metric::new("balanced_accuracy", balanced_accuracy);

    /// Creates a new `Metric`.
    ///
    /// # Arguments
    /// * `name` - The key this metric's values are stored under in a report.
    /// * `f` - The scoring function, called as `f(y_true, y_pred)`.
    pub const fn new(name: &'static str, f: fn(&[f32], &[f32]) -> f32) -> Self {
        Self { name, f }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Scores `y_pred` against `y_true`.
    pub fn compute(&self, y_true: &[f32], y_pred: &[f32]) -> f32 {
        (self.f)(y_true, y_pred)
    }
}

#[derive(Default, Debug, PartialEq)]
struct Confusion {
    tp: usize,
    tn: usize,
    fp: usize,
    fn_: usize,
}

impl Confusion {
    fn new(y_true: &[f32], y_pred: &[f32]) -> Self {
        y_true
            .iter()
            .zip(y_pred)
            .fold(Self::default(), |mut c, (&t, &p)| {
                match (t >= 0.5, p >= 0.5) {
                    (true, true) => c.tp += 1,
                    (false, false) => c.tn += 1,
                    (false, true) => c.fp += 1,
                    (true, false) => c.fn_ += 1,
                }
                c
            })
    }
}

fn ratio(num: usize, den: usize) -> f32 {
    if den == 0 {
        return 0.0;
    }

    num as f32 / den as f32
}

/// The true negative rate, `tn / (tn + fp)`.
pub fn specificity(y_true: &[f32], y_pred: &[f32]) -> f32 {
    let c = Confusion::new(y_true, y_pred);
    ratio(c.tn, c.tn + c.fp)
}

/// The true positive rate, `tp / (tp + fn)`.
pub fn sensitivity(y_true: &[f32], y_pred: &[f32]) -> f32 {
    let c = Confusion::new(y_true, y_pred);
    ratio(c.tp, c.tp + c.fn_)
}

/// The fraction of predictions equal to their label.
///
/// Unlike the other scores this one compares values exactly, so it also works for class indices
/// coming out of a multiclass argmax.
pub fn classif_accuracy(y_true: &[f32], y_pred: &[f32]) -> f32 {
    let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    ratio(hits, y_true.len().min(y_pred.len()))
}

/// The mean of `sensitivity` and `specificity`.
pub fn balanced_accuracy(y_true: &[f32], y_pred: &[f32]) -> f32 {
    (sensitivity(y_true, y_pred) + specificity(y_true, y_pred)) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // tp = 2, tn = 3, fp = 1, fn = 2
    const Y_TRUE: [f32; 8] = [1., 1., 1., 1., 0., 0., 0., 0.];
    const Y_PRED: [f32; 8] = [1., 1., 0., 0., 0., 0., 0., 1.];

    #[test]
    fn confusion_counts() {
        assert_eq!(
            Confusion::new(&Y_TRUE, &Y_PRED),
            Confusion {
                tp: 2,
                tn: 3,
                fp: 1,
                fn_: 2
            }
        );
    }

    #[test]
    fn scores_match_the_confusion_matrix() {
        assert_eq!(specificity(&Y_TRUE, &Y_PRED), 0.75);
        assert_eq!(sensitivity(&Y_TRUE, &Y_PRED), 0.5);
        assert_eq!(classif_accuracy(&Y_TRUE, &Y_PRED), 0.625);
        assert_eq!(balanced_accuracy(&Y_TRUE, &Y_PRED), 0.625);
    }

    #[test]
    fn empty_denominators_score_zero() {
        let all_pos = [1.0; 4];
        assert_eq!(specificity(&all_pos, &all_pos), 0.0);
        assert_eq!(sensitivity(&all_pos, &all_pos), 1.0);
        assert_eq!(classif_accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn named_metrics_dispatch_to_their_function() {
        assert_eq!(Metric::SENSITIVITY.name(), "sensitivity");
        assert_eq!(Metric::SPECIFICITY.compute(&Y_TRUE, &Y_PRED), 0.75);
    }
}
