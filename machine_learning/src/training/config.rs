use std::num::NonZeroUsize;

/// How long a `Trainer` trains for and how often it reports progress.
#[derive(Debug, Clone, Copy)]
pub struct TrainingConfig {
    pub epochs: NonZeroUsize,
    /// Log the running training loss every this many batches.
    pub show_train_steps: NonZeroUsize,
    /// Log the validation results every this many epochs, the last epoch is always logged.
    pub show_validation_epochs: NonZeroUsize,
}

impl TrainingConfig {
    const DEFAULT_SHOW_EVERY: NonZeroUsize = NonZeroUsize::new(5).unwrap();

    /// Creates a new `TrainingConfig` that reports every 5 steps and every 5 epochs.
    pub fn new(epochs: NonZeroUsize) -> Self {
        Self {
            epochs,
            show_train_steps: Self::DEFAULT_SHOW_EVERY,
            show_validation_epochs: Self::DEFAULT_SHOW_EVERY,
        }
    }
}
