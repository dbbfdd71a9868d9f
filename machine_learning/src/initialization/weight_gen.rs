use rand::Rng;

/// A finite source of initial parameter values.
///
/// Each generator covers one block of a model's parameter buffer, e.g. a dense layer's weights,
/// and yields exactly as many values as that block holds.
pub trait WeightGen<R: Rng> {
    /// Draws up to `n` values, fewer if the block runs out first.
    ///
    /// # Returns
    /// `None` once every value of the block was drawn.
    fn sample(&mut self, rng: &mut R, n: usize) -> Option<Vec<f32>>;

    /// How many values are left in the block.
    fn remaining(&self) -> usize;

    /// Writes values into `out` front to back until either runs out.
    ///
    /// # Returns
    /// The amount of values written.
    fn fill(&mut self, rng: &mut R, out: &mut [f32]) -> usize {
        let mut written = 0;
        while written < out.len() {
            let Some(values) = self.sample(rng, out.len() - written) else {
                break;
            };
            if values.is_empty() {
                break;
            }

            out[written..written + values.len()].copy_from_slice(&values);
            written += values.len();
        }

        written
    }
}
