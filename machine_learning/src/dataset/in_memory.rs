use ndarray::{Array2, ArrayView1, Axis};

use super::Dataset;
use crate::{MlErr, Result};

/// A dataset held in two row-aligned matrices: one row of features and one row of targets per
/// sample.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    x: Array2<f32>,
    y: Array2<f32>,
}

impl InMemoryDataset {
    /// Creates a new `InMemoryDataset`.
    ///
    /// # Returns
    /// An error if `x` and `y` don't have the same amount of rows.
    pub fn new(x: Array2<f32>, y: Array2<f32>) -> Result<Self> {
        if x.nrows() != y.nrows() {
            return Err(MlErr::SizeMismatch {
                what: "dataset targets",
                got: y.nrows(),
                expected: x.nrows(),
            });
        }

        Ok(Self { x, y })
    }

    /// Creates a new `InMemoryDataset` from interleaved rows of `x_size` features followed by
    /// `y_size` targets.
    pub fn from_rows(data: &[f32], x_size: usize, y_size: usize) -> Result<Self> {
        let row = x_size + y_size;
        if row == 0 || data.len() % row != 0 {
            return Err(MlErr::SizeMismatch {
                what: "dataset rows",
                got: data.len(),
                expected: row,
            });
        }

        let full = Array2::from_shape_vec((data.len() / row, row), data.to_vec()).map_err(|_| {
            MlErr::SizeMismatch {
                what: "dataset rows",
                got: data.len(),
                expected: row,
            }
        })?;

        let (x, y) = full.view().split_at(Axis(1), x_size);
        Self::new(x.to_owned(), y.to_owned())
    }

    pub fn x(&self) -> &Array2<f32> {
        &self.x
    }

    pub fn y(&self) -> &Array2<f32> {
        &self.y
    }
}

impl Dataset for InMemoryDataset {
    fn len(&self) -> usize {
        self.x.nrows()
    }

    fn x_size(&self) -> usize {
        self.x.ncols()
    }

    fn y_size(&self) -> usize {
        self.y.ncols()
    }

    fn get(&self, index: usize) -> Result<(ArrayView1<'_, f32>, ArrayView1<'_, f32>)> {
        if index >= self.len() {
            return Err(MlErr::OutOfBounds {
                index,
                len: self.len(),
            });
        }

        Ok((self.x.row(index), self.y.row(index)))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn dataset_basics() {
        let ds = InMemoryDataset::from_rows(&[1.0, 2.0, 0.0, 3.0, 4.0, 1.0], 2, 1).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.x_size(), 2);
        assert_eq!(ds.y_size(), 1);

        let (x, y) = ds.get(1).unwrap();
        assert_eq!(x, array![3.0, 4.0]);
        assert_eq!(y, array![1.0]);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let ds = InMemoryDataset::new(Array2::zeros((3, 2)), Array2::zeros((3, 1))).unwrap();
        assert!(matches!(
            ds.get(3),
            Err(MlErr::OutOfBounds { index: 3, len: 3 })
        ));
    }

    #[test]
    fn rejects_misaligned_rows() {
        assert!(InMemoryDataset::new(Array2::zeros((3, 2)), Array2::zeros((2, 1))).is_err());
        assert!(InMemoryDataset::from_rows(&[1.0; 5], 2, 1).is_err());
    }
}
