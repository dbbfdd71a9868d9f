use machine_learning::{
    MlErr, Result,
    dataset::{Dataset, InMemoryDataset},
};
use ndarray::{Array2, ArrayView1};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// A gaussian point cloud of a single class, with a diagonal covariance.
#[derive(Debug, Clone, Copy)]
pub struct GaussianClass {
    pub label: f32,
    pub samples: usize,
    pub mean: [f32; 3],
    pub variance: [f32; 3],
}

/// The two classes the smoke dataset is made of, in the order they're stored.
pub const CLASSES: [GaussianClass; 2] = [
    GaussianClass {
        label: 0.0,
        samples: 1000,
        mean: [0.0, 0.0, 0.0],
        variance: [10.0, 10.0, 5.0],
    },
    GaussianClass {
        label: 1.0,
        samples: 750,
        mean: [-5.0, 5.0, -5.0],
        variance: [10.0, 10.0, 10.0],
    },
];

/// Two labelled gaussian point clouds in 3D, one sample per row.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    inner: InMemoryDataset,
}

impl SyntheticDataset {
    /// Draws every sample of `CLASSES` from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        Self::from_classes(&CLASSES, rng)
    }

    /// Draws every sample of `classes` from `rng`, one class after the other.
    ///
    /// # Returns
    /// An error if a variance is negative or not finite.
    pub fn from_classes<R: Rng + ?Sized>(classes: &[GaussianClass], rng: &mut R) -> Result<Self> {
        let total = classes.iter().map(|class| class.samples).sum();
        let mut x = Array2::zeros((total, 3));
        let mut y = Array2::zeros((total, 1));
        let mut row = 0;

        for class in classes {
            let axes = class
                .mean
                .iter()
                .zip(class.variance)
                .map(|(&mean, variance)| Normal::new(mean, variance.sqrt()))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| MlErr::InvalidDistribution(e.to_string()))?;

            for _ in 0..class.samples {
                for (col, axis) in axes.iter().enumerate() {
                    x[[row, col]] = axis.sample(rng);
                }
                y[[row, 0]] = class.label;
                row += 1;
            }
        }

        log::debug!("generated {total} samples across {} classes", classes.len());
        Ok(Self {
            inner: InMemoryDataset::new(x, y)?,
        })
    }

    /// The amount of samples with a label of `0` and `1` respectively.
    pub fn class_counts(&self) -> [usize; 2] {
        self.inner.y().iter().fold([0, 0], |[neg, pos], &label| {
            if label == 0.0 {
                [neg + 1, pos]
            } else {
                [neg, pos + 1]
            }
        })
    }
}

impl Dataset for SyntheticDataset {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn x_size(&self) -> usize {
        self.inner.x_size()
    }

    fn y_size(&self) -> usize {
        self.inner.y_size()
    }

    fn get(&self, index: usize) -> Result<(ArrayView1<'_, f32>, ArrayView1<'_, f32>)> {
        self.inner.get(index)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn class_means_are_close_to_their_centers() {
        let ds = SyntheticDataset::generate(&mut StdRng::seed_from_u64(0)).unwrap();

        let mut sums = [[0.0f32; 3]; 2];
        for i in 0..ds.len() {
            let (x, y) = ds.get(i).unwrap();
            let class = y[0] as usize;
            for (sum, v) in sums[class].iter_mut().zip(x) {
                *sum += v;
            }
        }

        for (class, sum) in CLASSES.iter().zip(sums) {
            for (mean, total) in class.mean.iter().zip(sum) {
                let got = total / class.samples as f32;
                assert!((got - mean).abs() < 0.5, "expected {mean}, got {got}");
            }
        }
    }

    #[test]
    fn negative_variance_is_an_error() {
        let bad = GaussianClass {
            variance: [1.0, -1.0, 1.0],
            ..CLASSES[0]
        };
        let result = SyntheticDataset::from_classes(&[bad], &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(MlErr::InvalidDistribution(_))));
    }
}
