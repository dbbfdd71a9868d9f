use ndarray::{Array2, ArrayView2};

use super::{Model, layers::Layer};
use crate::{Result, optimization::Optimizer};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the *deltas* of its layers.
///
/// The parameters of every layer live one after the other in a single buffer, in layer order.
#[derive(Clone, Debug)]
pub struct Sequential {
    layers: Vec<Layer>,
    params: Vec<f32>,
    grad: Vec<f32>,
}

impl Sequential {
    /// Creates a new `Sequential` with every parameter set to zero.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// A new `Sequential` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        let layers: Vec<Layer> = layers.into_iter().collect();
        let size = layers.iter().map(|layer| layer.size()).sum();

        Self {
            layers,
            params: vec![0.0; size],
            grad: vec![0.0; size],
        }
    }
}

impl Model for Sequential {
    fn size(&self) -> usize {
        self.params.len()
    }

    fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn params(&self) -> &[f32] {
        &self.params
    }

    fn params_mut(&mut self) -> &mut [f32] {
        &mut self.params
    }

    fn grad(&self) -> &[f32] {
        &self.grad
    }

    fn forward(&mut self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let mut rest = &self.params[..];
        let mut out = x.to_owned();

        for layer in self.layers.iter_mut() {
            let (params, tail) = rest.split_at(layer.size());
            out = layer.forward(params, out.view())?;
            rest = tail;
        }

        Ok(out)
    }

    fn predict(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let mut rest = &self.params[..];
        let mut out = x.to_owned();

        for layer in &self.layers {
            let (params, tail) = rest.split_at(layer.size());
            out = layer.predict(params, out.view())?;
            rest = tail;
        }

        Ok(out)
    }

    fn backward(&mut self, mut d: Array2<f32>) -> Result<()> {
        let mut end = self.params.len();

        for layer in self.layers.iter_mut().rev() {
            let start = end - layer.size();
            let params = &self.params[start..end];
            let grad = &mut self.grad[start..end];

            d = layer.backward(params, grad, d)?;
            end = start;
        }

        Ok(())
    }

    fn zero_grad(&mut self) {
        self.grad.fill(0.0);
    }

    fn optimize<O: Optimizer>(&mut self, optimizer: &mut O) -> Result<()> {
        optimizer.update_params(&self.grad, &mut self.params)
    }
}
