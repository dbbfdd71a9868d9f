mod dataloader;
mod in_memory;
mod split;

pub use dataloader::{Batches, DataLoader};
pub use in_memory::InMemoryDataset;
pub use split::{Subset, random_split};

use ndarray::ArrayView1;

use crate::Result;

/// A collection of samples that can be consumed by a `Trainer`.
///
/// A `Dataset` is responsible only for *providing access* to samples; batching and shuffling
/// belong to the `DataLoader`.
pub trait Dataset {
    /// Returns the total number of samples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The amount of features of every sample.
    fn x_size(&self) -> usize;

    /// The amount of target values of every sample.
    fn y_size(&self) -> usize;

    /// Fetches a sample's features and targets by index.
    ///
    /// # Errors
    /// Returns `MlErr::OutOfBounds` if `index` is invalid.
    fn get(&self, index: usize) -> Result<(ArrayView1<'_, f32>, ArrayView1<'_, f32>)>;
}
