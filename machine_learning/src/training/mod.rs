mod config;
mod prediction;
mod report;
mod trainer;

pub use config::TrainingConfig;
pub use prediction::PredictionType;
pub use report::{Split, TrainingReport};
pub use trainer::Trainer;
