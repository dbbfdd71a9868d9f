use std::{
    env,
    error::Error,
    fmt::{self, Display},
    num::NonZeroUsize,
    str::FromStr,
};

use machine_learning::device::Device;

/// Smoke configuration failures.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigErr {
    InvalidNumber { var: &'static str, value: String },
    InvalidDevice(String),
}

impl Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::InvalidNumber { var, value } => {
                write!(f, "{var} must be a positive integer, got {value:?}")
            }
            ConfigErr::InvalidDevice(value) => {
                write!(f, "DEVICE must be one of auto, cpu or parallel, got {value:?}")
            }
        }
    }
}

impl Error for ConfigErr {}

/// Which device the smoke run asks the trainer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceChoice {
    #[default]
    Auto,
    Cpu,
    Parallel,
}

impl DeviceChoice {
    pub fn resolve(self) -> Device {
        match self {
            DeviceChoice::Auto => Device::select(),
            DeviceChoice::Cpu => Device::Cpu,
            DeviceChoice::Parallel => Device::parallel(),
        }
    }
}

impl FromStr for DeviceChoice {
    type Err = ConfigErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "cpu" => Ok(Self::Cpu),
            "parallel" => Ok(Self::Parallel),
            _ => Err(ConfigErr::InvalidDevice(s.to_string())),
        }
    }
}

/// Everything a smoke run can be tuned with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    pub epochs: NonZeroUsize,
    pub batch_size: NonZeroUsize,
    pub hidden_size: NonZeroUsize,
    pub seed: Option<u64>,
    pub device: DeviceChoice,
}

const DEFAULT_EPOCHS: NonZeroUsize = NonZeroUsize::new(20).unwrap();
const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(64).unwrap();
const DEFAULT_HIDDEN_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            batch_size: DEFAULT_BATCH_SIZE,
            hidden_size: DEFAULT_HIDDEN_SIZE,
            seed: None,
            device: DeviceChoice::Auto,
        }
    }
}

impl SmokeConfig {
    /// The fraction of the samples used for training, the rest are used for validation.
    pub const TRAIN_FRACTION: f64 = 0.75;

    /// Reads the configuration from the `EPOCHS`, `BATCH_SIZE`, `HIDDEN_SIZE`, `SEED` and
    /// `DEVICE` environment variables, falling back to the defaults for the unset ones.
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as `from_env` but reading every variable through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let nonzero = |var: &'static str, default: NonZeroUsize| match lookup(var) {
            Some(value) => value
                .trim()
                .parse::<NonZeroUsize>()
                .map_err(|_| ConfigErr::InvalidNumber { var, value }),
            None => Ok(default),
        };

        let seed = match lookup("SEED") {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| ConfigErr::InvalidNumber {
                var: "SEED",
                value,
            })?),
            None => None,
        };

        let device = match lookup("DEVICE") {
            Some(value) => value.trim().parse()?,
            None => defaults.device,
        };

        Ok(Self {
            epochs: nonzero("EPOCHS", defaults.epochs)?,
            batch_size: nonzero("BATCH_SIZE", defaults.batch_size)?,
            hidden_size: nonzero("HIDDEN_SIZE", defaults.hidden_size)?,
            seed,
            device,
        })
    }

    /// The amount of training and validation samples out of `total`.
    pub fn split_lengths(total: usize) -> [usize; 2] {
        let train = (total as f64 * Self::TRAIN_FRACTION).floor() as usize;
        [train, total - train]
    }
}
