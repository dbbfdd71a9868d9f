//! Smoke check for the `machine_learning` training loop: trains a small classifier on two
//! gaussian clouds and checks the validation results trend the right way.

pub mod checks;
pub mod classifier;
pub mod config;
pub mod run;
pub mod synthetic;

pub use config::SmokeConfig;
pub use run::train;
