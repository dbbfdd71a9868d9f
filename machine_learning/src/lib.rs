//! Building blocks for training small feed-forward models on `ndarray`: layers with hand-written
//! backward passes, losses, optimizers, initializers, datasets and loaders, metrics, and a
//! `Trainer` tying them together.

pub mod arch;
pub mod dataset;
pub mod device;
pub mod error;
pub mod initialization;
pub mod metrics;
pub mod optimization;
pub mod training;

pub use error::{MlErr, Result};
