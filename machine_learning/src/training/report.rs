use std::collections::BTreeMap;

use serde::Serialize;

/// The two halves of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Val,
}

/// Every per-epoch value a `Trainer` recorded, keyed by split and then by metric name.
///
/// Both splits hold a `"loss"` series plus one series per metric, all of them as long as the
/// amount of epochs run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainingReport {
    train_metrics: BTreeMap<String, Vec<f32>>,
    val_metrics: BTreeMap<String, Vec<f32>>,
}

impl TrainingReport {
    pub const LOSS: &'static str = "loss";

    pub fn new() -> Self {
        Self::default()
    }

    fn split(&self, split: Split) -> &BTreeMap<String, Vec<f32>> {
        match split {
            Split::Train => &self.train_metrics,
            Split::Val => &self.val_metrics,
        }
    }

    /// Appends one epoch worth of results to `split`.
    ///
    /// # Arguments
    /// * `split` - The split the values belong to.
    /// * `loss` - The epoch's mean loss.
    /// * `scores` - Each metric's name and its value for the epoch.
    pub fn push_epoch<'a, I>(&mut self, split: Split, loss: f32, scores: I)
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        let series = match split {
            Split::Train => &mut self.train_metrics,
            Split::Val => &mut self.val_metrics,
        };

        series.entry(Self::LOSS.to_string()).or_default().push(loss);
        for (name, value) in scores {
            series.entry(name.to_string()).or_default().push(value);
        }
    }

    /// The per-epoch series of `name` in `split`, if it was recorded.
    pub fn get(&self, split: Split, name: &str) -> Option<&[f32]> {
        self.split(split).get(name).map(Vec::as_slice)
    }

    /// The per-epoch loss of `split`.
    pub fn loss(&self, split: Split) -> &[f32] {
        self.get(split, Self::LOSS).unwrap_or_default()
    }

    /// The names recorded for `split`, `"loss"` included.
    pub fn names(&self, split: Split) -> impl Iterator<Item = &str> {
        self.split(split).keys().map(String::as_str)
    }

    /// The amount of epochs recorded for the validation split.
    pub fn epochs(&self) -> usize {
        self.loss(Split::Val).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_grow_one_value_per_epoch() {
        let mut report = TrainingReport::new();
        for epoch in 0..3 {
            let v = epoch as f32;
            report.push_epoch(Split::Train, v, [("sensitivity", v / 10.0)]);
            report.push_epoch(Split::Val, v + 1.0, [("sensitivity", v / 5.0)]);
        }

        assert_eq!(report.epochs(), 3);
        assert_eq!(report.loss(Split::Train), [0.0, 1.0, 2.0]);
        assert_eq!(report.get(Split::Val, "sensitivity").unwrap(), [0.0, 0.2, 0.4]);
        assert!(report.get(Split::Val, "specificity").is_none());
        assert_eq!(
            report.names(Split::Train).collect::<Vec<_>>(),
            ["loss", "sensitivity"]
        );
    }

    #[test]
    fn serializes_under_split_keys() {
        let mut report = TrainingReport::new();
        report.push_epoch(Split::Train, 0.5, []);
        report.push_epoch(Split::Val, 0.25, [("classif_accuracy", 1.0)]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["train_metrics"]["loss"][0], 0.5);
        assert_eq!(json["val_metrics"]["classif_accuracy"][0], 1.0);
    }
}
