use ndarray::{Array2, ArrayView2};

use crate::{Result, arch::layers::Layer, optimization::Optimizer};

/// A trainable model that owns its parameters and their gradient.
pub trait Model {
    /// Returns the amount of parameters in the model.
    fn size(&self) -> usize;

    /// The model's layers, front to back.
    fn layers(&self) -> &[Layer];

    fn params(&self) -> &[f32];

    fn params_mut(&mut self) -> &mut [f32];

    fn grad(&self) -> &[f32];

    /// Makes a forward pass keeping whatever metadata `backward` needs.
    fn forward(&mut self, x: ArrayView2<f32>) -> Result<Array2<f32>>;

    /// Makes a forward pass without keeping any metadata, usable from several threads at once.
    fn predict(&self, x: ArrayView2<f32>) -> Result<Array2<f32>>;

    /// Backpropagates `d`, the derivative of the loss with respect to the last forward output,
    /// **adding** the result to the model's gradient.
    fn backward(&mut self, d: Array2<f32>) -> Result<()>;

    /// Zeros out the gradient.
    fn zero_grad(&mut self);

    /// Applies the current gradient onto the parameters using `optimizer`.
    fn optimize<O: Optimizer>(&mut self, optimizer: &mut O) -> Result<()>;
}
