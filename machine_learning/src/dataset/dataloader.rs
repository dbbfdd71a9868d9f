use std::num::NonZeroUsize;

use ndarray::Array2;
use rand::{rngs::StdRng, seq::SliceRandom};

use super::Dataset;
use crate::Result;

/// Groups the samples of a dataset into batches, optionally reshuffling them on every epoch.
pub struct DataLoader<'a, D: Dataset> {
    dataset: &'a D,
    batch_size: NonZeroUsize,
    rng: Option<StdRng>,
}

impl<'a, D: Dataset> DataLoader<'a, D> {
    /// Creates a new `DataLoader` that walks `dataset` in order.
    ///
    /// # Arguments
    /// * `dataset` - The dataset to load samples from.
    /// * `batch_size` - The maximum amount of samples per batch, the last one may be smaller.
    pub fn new(dataset: &'a D, batch_size: NonZeroUsize) -> Self {
        Self {
            dataset,
            batch_size,
            rng: None,
        }
    }

    /// Makes every epoch visit the samples in a fresh random order drawn from `rng`.
    pub fn with_shuffle(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// The amount of batches a single epoch yields.
    pub fn len(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size.get())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts a new epoch.
    ///
    /// # Returns
    /// An iterator over `(x, y)` batches of shapes `(n, x_size)` and `(n, y_size)`.
    pub fn epoch(&mut self) -> Batches<'_, D> {
        let mut order: Vec<usize> = (0..self.dataset.len()).collect();
        if let Some(rng) = self.rng.as_mut() {
            order.shuffle(rng);
        }

        Batches {
            dataset: self.dataset,
            batch_size: self.batch_size.get(),
            order,
            cursor: 0,
        }
    }
}

/// The batches of a single epoch of a `DataLoader`.
pub struct Batches<'a, D: Dataset> {
    dataset: &'a D,
    batch_size: usize,
    order: Vec<usize>,
    cursor: usize,
}

impl<D: Dataset> Batches<'_, D> {
    fn collect_batch(&self, indices: &[usize]) -> Result<(Array2<f32>, Array2<f32>)> {
        let mut x = Array2::zeros((indices.len(), self.dataset.x_size()));
        let mut y = Array2::zeros((indices.len(), self.dataset.y_size()));

        for (row, &index) in indices.iter().enumerate() {
            let (xi, yi) = self.dataset.get(index)?;
            x.row_mut(row).assign(&xi);
            y.row_mut(row).assign(&yi);
        }

        Ok((x, y))
    }
}

impl<D: Dataset> Iterator for Batches<'_, D> {
    type Item = Result<(Array2<f32>, Array2<f32>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }

        let end = (self.cursor + self.batch_size).min(self.order.len());
        let batch = self.collect_batch(&self.order[self.cursor..end]);
        self.cursor = end;

        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.order.len() - self.cursor).div_ceil(self.batch_size);
        (left, Some(left))
    }
}

impl<D: Dataset> ExactSizeIterator for Batches<'_, D> {}
