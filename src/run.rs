use machine_learning::{
    MlErr, Result,
    arch::{Model, Sequential, loss::BceWithLogits},
    dataset::{DataLoader, Dataset, random_split},
    metrics::Metric,
    optimization::Adam,
    training::{PredictionType, Trainer, TrainingConfig, TrainingReport},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    classifier::{self, INPUT_SIZE},
    config::SmokeConfig,
    synthetic::SyntheticDataset,
};

pub const LEARNING_RATE: f32 = 1e-3;
pub const WEIGHT_DECAY: f32 = 1e-5;

/// The metrics every smoke run records besides the loss.
pub const METRICS: [Metric; 4] = [
    Metric::SPECIFICITY,
    Metric::SENSITIVITY,
    Metric::CLASSIF_ACCURACY,
    Metric::BALANCED_ACCURACY,
];

fn fork(rng: &mut StdRng) -> StdRng {
    StdRng::seed_from_u64(rng.random())
}

/// Generates the synthetic dataset, splits it and trains a fresh classifier on it.
///
/// Every source of randomness is derived from `config.seed` when set, so two runs with the same
/// seed produce the same report.
///
/// # Returns
/// The trained model and its training report.
pub fn train(config: &SmokeConfig) -> Result<(Sequential, TrainingReport)> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let dataset = SyntheticDataset::generate(&mut fork(&mut rng))?;
    let [neg, pos] = dataset.class_counts();
    log::info!("generated {} samples ({neg} negative, {pos} positive)", dataset.len());

    let lengths = SmokeConfig::split_lengths(dataset.len());
    let [train_set, val_set]: [_; 2] = random_split(&dataset, &lengths, &mut fork(&mut rng))?
        .try_into()
        .map_err(|parts: Vec<_>| MlErr::SizeMismatch {
            what: "dataset splits",
            got: parts.len(),
            expected: 2,
        })?;

    let mut train_loader =
        DataLoader::new(&train_set, config.batch_size).with_shuffle(fork(&mut rng));
    let mut val_loader = DataLoader::new(&val_set, config.batch_size).with_shuffle(fork(&mut rng));

    let model = classifier::initialized(INPUT_SIZE, config.hidden_size.get(), &mut fork(&mut rng))?;
    let optimizer = Adam::with_defaults(model.size(), LEARNING_RATE).weight_decay(WEIGHT_DECAY);

    let device = config.device.resolve();
    log::info!("Running on {device} ...");

    let trainer = Trainer::new(
        model,
        BceWithLogits,
        optimizer,
        METRICS.to_vec(),
        device,
        PredictionType::Binary,
    );

    trainer.train_model(
        &mut train_loader,
        &mut val_loader,
        TrainingConfig::new(config.epochs),
    )
}
