use std::collections::VecDeque;

use rand::Rng;

use super::WeightGen;

/// Draws from a queue of weight generators, moving on to the next one once the current one is
/// exhausted.
///
/// Used to lay out the parameters of a model layer by layer: one generator per weight block and
/// one per bias block, in the order they sit in the parameter buffer.
pub struct ChainWeightGen<R: Rng> {
    weight_gens: VecDeque<Box<dyn WeightGen<R>>>,
}

impl<R: Rng> ChainWeightGen<R> {
    /// Creates a new `ChainWeightGen` that drains `weight_gens` front to back.
    pub fn new<I>(weight_gens: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn WeightGen<R>>>,
    {
        Self {
            weight_gens: weight_gens.into_iter().collect(),
        }
    }
}

impl<R: Rng> WeightGen<R> for ChainWeightGen<R> {
    fn sample(&mut self, rng: &mut R, n: usize) -> Option<Vec<f32>> {
        let mut out = Vec::with_capacity(n.min(self.remaining()));

        while out.len() < n {
            let current = self.weight_gens.front_mut()?;
            match current.sample(rng, n - out.len()) {
                Some(sample) if !sample.is_empty() => out.extend(sample),
                _ => {
                    self.weight_gens.pop_front();
                    if self.weight_gens.is_empty() {
                        break;
                    }
                }
            }
        }

        (!out.is_empty()).then_some(out)
    }

    fn remaining(&self) -> usize {
        self.weight_gens.iter().map(|weight_gen| weight_gen.remaining()).sum()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::initialization::ConstWeightGen;

    fn chain(blocks: &[(f32, usize)]) -> ChainWeightGen<StdRng> {
        ChainWeightGen::new(blocks.iter().map(|&(value, len)| {
            Box::new(ConstWeightGen::new(value, len)) as Box<dyn WeightGen<StdRng>>
        }))
    }

    #[test]
    fn crosses_generator_boundaries() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut weight_gen = chain(&[(1.0, 2), (2.0, 3)]);

        assert_eq!(weight_gen.remaining(), 5);
        assert_eq!(weight_gen.sample(&mut rng, 4), Some(vec![1.0, 1.0, 2.0, 2.0]));
        assert_eq!(weight_gen.remaining(), 1);
        assert_eq!(weight_gen.sample(&mut rng, 4), Some(vec![2.0]));
        assert_eq!(weight_gen.sample(&mut rng, 1), None);
    }

    #[test]
    fn skips_empty_generators() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut weight_gen = chain(&[(1.0, 0), (3.0, 1), (0.0, 0), (4.0, 1)]);
        assert_eq!(weight_gen.sample(&mut rng, 10), Some(vec![3.0, 4.0]));
    }
}
