use std::fmt::{self, Display};

/// Where a `Trainer` runs its evaluation passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Device {
    /// Everything runs on the calling thread.
    Cpu,
    /// Evaluation batches are spread over the global rayon pool.
    Parallel { threads: usize },
}

impl Device {
    /// Picks `Parallel` when the rayon pool has more than one thread, `Cpu` otherwise.
    pub fn select() -> Self {
        match rayon::current_num_threads() {
            threads if threads > 1 => Self::Parallel { threads },
            _ => Self::Cpu,
        }
    }

    /// A `Parallel` device sized to the current rayon pool.
    pub fn parallel() -> Self {
        Self::Parallel {
            threads: rayon::current_num_threads(),
        }
    }

    pub fn is_accelerated(&self) -> bool {
        matches!(self, Self::Parallel { .. })
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Parallel { threads } => write!(f, "parallel ({threads} threads)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_follows_the_rayon_pool() {
        let device = Device::select();
        assert_eq!(device.is_accelerated(), rayon::current_num_threads() > 1);
    }

    #[test]
    fn display() {
        assert_eq!(Device::Cpu.to_string(), "cpu");
        assert_eq!(
            Device::Parallel { threads: 4 }.to_string(),
            "parallel (4 threads)"
        );
    }
}
