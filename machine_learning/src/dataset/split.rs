use ndarray::ArrayView1;
use rand::{Rng, seq::SliceRandom};

use super::Dataset;
use crate::{MlErr, Result};

/// A view over some of the samples of another dataset.
#[derive(Debug, Clone)]
pub struct Subset<'a, D: Dataset> {
    dataset: &'a D,
    indices: Vec<usize>,
}

impl<'a, D: Dataset> Subset<'a, D> {
    /// Creates a new `Subset` over `indices` of `dataset`.
    ///
    /// # Returns
    /// An error if any index is out of bounds.
    pub fn new(dataset: &'a D, indices: Vec<usize>) -> Result<Self> {
        let len = dataset.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(MlErr::OutOfBounds { index, len });
        }

        Ok(Self { dataset, indices })
    }

    /// The indices of the parent dataset this subset exposes, in order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<D: Dataset> Dataset for Subset<'_, D> {
    fn len(&self) -> usize {
        self.indices.len()
    }

    fn x_size(&self) -> usize {
        self.dataset.x_size()
    }

    fn y_size(&self) -> usize {
        self.dataset.y_size()
    }

    fn get(&self, index: usize) -> Result<(ArrayView1<'_, f32>, ArrayView1<'_, f32>)> {
        let &inner = self.indices.get(index).ok_or(MlErr::OutOfBounds {
            index,
            len: self.indices.len(),
        })?;

        self.dataset.get(inner)
    }
}

/// Randomly splits `dataset` into non-overlapping subsets of the given lengths.
///
/// # Arguments
/// * `dataset` - The dataset to split.
/// * `lengths` - The length of each subset, they must add up to the dataset's length.
/// * `rng` - A random number generator used to permute the indices.
///
/// # Returns
/// An error if the lengths don't add up to the dataset's length.
pub fn random_split<'a, D, R>(
    dataset: &'a D,
    lengths: &[usize],
    rng: &mut R,
) -> Result<Vec<Subset<'a, D>>>
where
    D: Dataset,
    R: Rng + ?Sized,
{
    let total = dataset.len();
    let requested = lengths.iter().sum();
    if requested != total {
        return Err(MlErr::InvalidSplit { total, requested });
    }

    let mut indices: Vec<usize> = (0..total).collect();
    indices.shuffle(rng);

    let mut rest = &indices[..];
    let mut subsets = Vec::with_capacity(lengths.len());
    for &len in lengths {
        let (head, tail) = rest.split_at(len);
        subsets.push(Subset {
            dataset,
            indices: head.to_vec(),
        });
        rest = tail;
    }

    Ok(subsets)
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::dataset::InMemoryDataset;

    fn numbered(n: usize) -> InMemoryDataset {
        let x = Array2::from_shape_fn((n, 1), |(i, _)| i as f32);
        let y = Array2::zeros((n, 1));
        InMemoryDataset::new(x, y).unwrap()
    }

    #[test]
    fn split_partitions_every_index() {
        let ds = numbered(10);
        let mut rng = StdRng::seed_from_u64(3);
        let parts = random_split(&ds, &[7, 3], &mut rng).unwrap();

        assert_eq!(parts[0].len(), 7);
        assert_eq!(parts[1].len(), 3);

        let mut seen: Vec<usize> = parts
            .iter()
            .flat_map(|p| p.indices().iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn subset_reads_through_to_its_parent() {
        let ds = numbered(5);
        let subset = Subset::new(&ds, vec![4, 1]).unwrap();

        assert_eq!(subset.get(0).unwrap().0[0], 4.0);
        assert_eq!(subset.get(1).unwrap().0[0], 1.0);
        assert!(subset.get(2).is_err());
        assert!(Subset::new(&ds, vec![5]).is_err());
    }

    #[test]
    fn lengths_must_add_up() {
        let ds = numbered(4);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            random_split(&ds, &[2, 1], &mut rng),
            Err(MlErr::InvalidSplit { total: 4, requested: 3 })
        ));
    }
}
