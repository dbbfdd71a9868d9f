use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    OutOfBounds {
        index: usize,
        len: usize,
    },
    InvalidSplit {
        total: usize,
        requested: usize,
    },
    EmptyLoader {
        split: &'static str,
    },
    InvalidDistribution(String),
    ForwardNotCalled,
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => {
                format!("There's a size mismatch in {what}, got {got} and expected {expected}")
            }
            MlErr::OutOfBounds { index, len } => {
                format!("Sample index {index} is out of bounds for a dataset of {len} samples")
            }
            MlErr::InvalidSplit { total, requested } => format!(
                "The split lengths add up to {requested} but the dataset has {total} samples"
            ),
            MlErr::EmptyLoader { split } => {
                format!("The {split} loader yielded no batches")
            }
            MlErr::InvalidDistribution(msg) => {
                format!("Failed to build a weight distribution: {msg}")
            }
            MlErr::ForwardNotCalled => {
                "Tried to run a backward pass before any forward pass".to_string()
            }
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {}
