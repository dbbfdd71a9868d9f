use ndarray::Array2;
use rayon::prelude::*;

use super::{PredictionType, Split, TrainingConfig, TrainingReport};
use crate::{
    MlErr, Result,
    arch::{Model, loss::LossFn},
    dataset::{DataLoader, Dataset},
    device::Device,
    metrics::Metric,
    optimization::Optimizer,
};

/// The losses and predictions gathered along one pass over a loader.
#[derive(Default)]
struct EpochResult {
    losses: Vec<f32>,
    y_true: Vec<f32>,
    y_pred: Vec<f32>,
}

impl EpochResult {
    fn push(&mut self, loss: f32, y_true: Vec<f32>, y_pred: Vec<f32>) {
        self.losses.push(loss);
        self.y_true.extend(y_true);
        self.y_pred.extend(y_pred);
    }

    fn mean_loss(&self) -> f32 {
        self.losses.iter().sum::<f32>() / self.losses.len().max(1) as f32
    }
}

/// Loss functions work element-wise, so the model's output must have the targets' exact shape.
fn check_output(y_pred: &Array2<f32>, y: &Array2<f32>) -> Result<()> {
    if y_pred.dim() != y.dim() {
        return Err(MlErr::SizeMismatch {
            what: "model output columns",
            got: y_pred.ncols(),
            expected: y.ncols(),
        });
    }

    Ok(())
}

/// Trains a model with a loss function and an optimizer, scoring every epoch on a training and a
/// validation loader.
pub struct Trainer<M, L, O>
where
    M: Model,
    L: LossFn,
    O: Optimizer,
{
    model: M,
    loss_fn: L,
    optimizer: O,
    metrics: Vec<Metric>,
    device: Device,
    prediction_type: PredictionType,
}

impl<M, L, O> Trainer<M, L, O>
where
    M: Model + Sync,
    L: LossFn + Sync,
    O: Optimizer,
{
    /// Creates a new `Trainer`.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained, with its parameters already initialized.
    /// * `loss_fn` - The loss function used to measure the difference between a model's output and the expected one.
    /// * `optimizer` - The optimizer that applies the gradient onto the model's parameters.
    /// * `metrics` - The scores computed on every epoch, besides the loss.
    /// * `device` - Where the evaluation passes run.
    /// * `prediction_type` - How the model's raw output turns into predictions for the metrics.
    pub fn new(
        model: M,
        loss_fn: L,
        optimizer: O,
        metrics: Vec<Metric>,
        device: Device,
        prediction_type: PredictionType,
    ) -> Self {
        Self {
            model,
            loss_fn,
            optimizer,
            metrics,
            device,
            prediction_type,
        }
    }

    /// Trains the model for `config.epochs` epochs.
    ///
    /// # Arguments
    /// * `train_loader` - The batches the model learns from.
    /// * `val_loader` - The batches the model is only evaluated on.
    /// * `config` - The amount of epochs and how often to log progress.
    ///
    /// # Returns
    /// The trained model and the per-epoch report of both splits, or an error if any batch
    /// couldn't be loaded or went through the model.
    pub fn train_model<T, V>(
        mut self,
        train_loader: &mut DataLoader<'_, T>,
        val_loader: &mut DataLoader<'_, V>,
        config: TrainingConfig,
    ) -> Result<(M, TrainingReport)>
    where
        T: Dataset,
        V: Dataset,
    {
        if train_loader.is_empty() {
            return Err(MlErr::EmptyLoader { split: "train" });
        }
        if val_loader.is_empty() {
            return Err(MlErr::EmptyLoader { split: "val" });
        }

        let epochs = config.epochs.get();
        let mut report = TrainingReport::new();

        log::info!(
            "training {} parameters for {epochs} epochs on {}",
            self.model.size(),
            self.device
        );

        for epoch in 1..=epochs {
            let train = self.train_epoch(train_loader, epoch, config)?;
            let val = self.evaluate(val_loader)?;

            self.record(&mut report, Split::Train, &train);
            self.record(&mut report, Split::Val, &val);

            if epoch % config.show_validation_epochs.get() == 0 || epoch == epochs {
                self.log_validation(epoch, epochs, &report);
            }
        }

        if log::log_enabled!(log::Level::Debug) {
            match serde_json::to_string(&report) {
                Ok(json) => log::debug!("training report: {json}"),
                Err(e) => log::warn!("failed to serialize the training report: {e}"),
            }
        }

        Ok((self.model, report))
    }

    fn train_epoch<D: Dataset>(
        &mut self,
        loader: &mut DataLoader<'_, D>,
        epoch: usize,
        config: TrainingConfig,
    ) -> Result<EpochResult> {
        let steps = loader.len();
        let mut result = EpochResult::default();

        for (step, batch) in loader.epoch().enumerate() {
            let (x, y) = batch?;

            self.model.zero_grad();
            let y_pred = self.model.forward(x.view())?;
            check_output(&y_pred, &y)?;
            let loss = self.loss_fn.loss(y_pred.view(), y.view());
            let d = self.loss_fn.loss_prime(y_pred.view(), y.view());
            self.model.backward(d)?;
            self.model.optimize(&mut self.optimizer)?;

            result.push(
                loss,
                self.prediction_type.targets(y.view()),
                self.prediction_type.predictions(y_pred.view()),
            );

            let step = step + 1;
            if step % config.show_train_steps.get() == 0 {
                log::info!(
                    "epoch {epoch} step {step}/{steps}: running loss {:.4}",
                    result.mean_loss()
                );
            }
        }

        Ok(result)
    }

    fn evaluate<D: Dataset>(&self, loader: &mut DataLoader<'_, D>) -> Result<EpochResult> {
        let batches: Vec<(Array2<f32>, Array2<f32>)> = loader.epoch().collect::<Result<_>>()?;

        let (model, loss_fn, kind) = (&self.model, &self.loss_fn, self.prediction_type);
        let score = |(x, y): &(Array2<f32>, Array2<f32>)| -> Result<(f32, Vec<f32>, Vec<f32>)> {
            let y_pred = model.predict(x.view())?;
            check_output(&y_pred, y)?;
            let loss = loss_fn.loss(y_pred.view(), y.view());
            Ok((loss, kind.targets(y.view()), kind.predictions(y_pred.view())))
        };

        let scored: Vec<(f32, Vec<f32>, Vec<f32>)> = if self.device.is_accelerated() {
            batches.par_iter().map(score).collect::<Result<_>>()?
        } else {
            batches.iter().map(score).collect::<Result<_>>()?
        };

        let mut result = EpochResult::default();
        for (loss, y_true, y_pred) in scored {
            result.push(loss, y_true, y_pred);
        }

        Ok(result)
    }

    fn record(&self, report: &mut TrainingReport, split: Split, result: &EpochResult) {
        let scores = self
            .metrics
            .iter()
            .map(|metric| (metric.name(), metric.compute(&result.y_true, &result.y_pred)));

        report.push_epoch(split, result.mean_loss(), scores);
    }

    fn log_validation(&self, epoch: usize, epochs: usize, report: &TrainingReport) {
        let last = |name: &str| {
            report
                .get(Split::Val, name)
                .and_then(|series| series.last().copied())
                .unwrap_or(f32::NAN)
        };

        let scores: Vec<String> = self
            .metrics
            .iter()
            .map(|metric| format!("{} {:.4}", metric.name(), last(metric.name())))
            .collect();

        log::info!(
            "epoch {epoch}/{epochs}: train loss {:.4}, val loss {:.4}, {}",
            report.loss(Split::Train).last().copied().unwrap_or(f32::NAN),
            last(TrainingReport::LOSS),
            scores.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        arch::{Sequential, activations::ActFn, layers::Layer, loss::BceWithLogits},
        dataset::{InMemoryDataset, random_split},
        initialization::weights_init,
        optimization::Adam,
    };

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    // Label is 1 when x0 + x1 > 0, on a grid with no points near the boundary.
    fn separable() -> InMemoryDataset {
        let mut rows = Vec::new();
        for i in -10..=10 {
            for j in -10..=10 {
                if i + j == 0 {
                    continue;
                }
                let (a, b) = (i as f32 / 5.0, j as f32 / 5.0);
                rows.extend([a, b, if i + j > 0 { 1.0 } else { 0.0 }]);
            }
        }
        InMemoryDataset::from_rows(&rows, 2, 1).unwrap()
    }

    fn trainer(device: Device) -> Trainer<Sequential, BceWithLogits, Adam> {
        let mut model = Sequential::new([
            Layer::dense((2, 8), Some(ActFn::relu())),
            Layer::dense((8, 1), None),
        ]);
        weights_init(&mut model, &mut StdRng::seed_from_u64(11)).unwrap();
        let optimizer = Adam::with_defaults(model.size(), 0.01);

        Trainer::new(
            model,
            BceWithLogits,
            optimizer,
            vec![Metric::CLASSIF_ACCURACY, Metric::SENSITIVITY],
            device,
            PredictionType::Binary,
        )
    }

    #[test]
    fn learns_a_separable_problem() {
        let ds = separable();
        let n = ds.len();
        let mut rng = StdRng::seed_from_u64(5);
        let parts = random_split(&ds, &[n - n / 4, n / 4], &mut rng).unwrap();

        let mut train = DataLoader::new(&parts[0], nz(16)).with_shuffle(StdRng::seed_from_u64(1));
        let mut val = DataLoader::new(&parts[1], nz(16));

        let (_, report) = trainer(Device::parallel())
            .train_model(&mut train, &mut val, TrainingConfig::new(nz(30)))
            .unwrap();

        let loss = report.loss(Split::Val);
        assert!(loss[loss.len() - 1] < loss[0], "val loss {loss:?}");

        let acc = report.get(Split::Val, "classif_accuracy").unwrap();
        assert!(acc[acc.len() - 1] > 0.9, "val accuracy {acc:?}");
    }

    #[test]
    fn every_series_has_one_value_per_epoch() {
        let ds = separable();
        let mut train = DataLoader::new(&ds, nz(64));
        let mut val = DataLoader::new(&ds, nz(100));

        let (_, report) = trainer(Device::Cpu)
            .train_model(&mut train, &mut val, TrainingConfig::new(nz(3)))
            .unwrap();

        for split in [Split::Train, Split::Val] {
            let names: Vec<&str> = report.names(split).collect();
            assert_eq!(names, ["classif_accuracy", "loss", "sensitivity"]);
            for name in names {
                assert_eq!(report.get(split, name).unwrap().len(), 3);
            }
        }
    }

    #[test]
    fn cpu_and_parallel_evaluation_agree() {
        let ds = separable();
        let on_cpu = trainer(Device::Cpu);
        let mut loader = DataLoader::new(&ds, nz(32));

        let cpu = on_cpu.evaluate(&mut loader).unwrap();
        let parallel = Trainer {
            device: Device::Parallel { threads: 2 },
            ..on_cpu
        }
        .evaluate(&mut loader)
        .unwrap();

        assert_eq!(cpu.losses, parallel.losses);
        assert_eq!(cpu.y_pred, parallel.y_pred);
    }

    #[test]
    fn output_wider_than_targets_is_an_error() {
        let ds = separable();
        let mut model = Sequential::new([Layer::dense((2, 2), None)]);
        weights_init(&mut model, &mut StdRng::seed_from_u64(0)).unwrap();
        let optimizer = Adam::with_defaults(model.size(), 0.01);
        let wide = Trainer::new(
            model,
            BceWithLogits,
            optimizer,
            vec![Metric::CLASSIF_ACCURACY],
            Device::Cpu,
            PredictionType::Binary,
        );

        let mut val = DataLoader::new(&ds, nz(8));
        assert!(matches!(
            wide.evaluate(&mut val),
            Err(MlErr::SizeMismatch { got: 2, expected: 1, .. })
        ));

        let mut train = DataLoader::new(&ds, nz(8));
        let result = wide.train_model(&mut train, &mut val, TrainingConfig::new(nz(1)));
        assert!(matches!(
            result,
            Err(MlErr::SizeMismatch { got: 2, expected: 1, .. })
        ));
    }

    #[test]
    fn empty_loaders_are_rejected() {
        let empty = InMemoryDataset::new(Array2::zeros((0, 2)), Array2::zeros((0, 1))).unwrap();
        let ds = separable();
        let mut train = DataLoader::new(&empty, nz(8));
        let mut val = DataLoader::new(&ds, nz(8));

        let result = trainer(Device::Cpu).train_model(&mut train, &mut val, TrainingConfig::new(nz(1)));
        assert!(matches!(result, Err(MlErr::EmptyLoader { split: "train" })));
    }
}
