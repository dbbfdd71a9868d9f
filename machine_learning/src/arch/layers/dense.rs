use ndarray::{linalg, prelude::*};

use crate::{MlErr, Result, arch::activations::ActFn};

/// A fully connected layer, `a = act_fn(x · W + b)`.
///
/// The layer does not own its weights: they live in the model's flat parameter buffer and are
/// viewed as `W` (fan in x fan out, row major) followed by `b` (fan out).
#[derive(Clone, Debug)]
pub struct Dense {
    dim: (usize, usize),
    act_fn: Option<ActFn>,
    size: usize,

    // Forward metadata
    x: Option<Array2<f32>>,
    z: Array2<f32>,
}

impl Dense {
    /// Creates a new `Dense` layer.
    ///
    /// # Arguments
    /// * `dim` - The (fan in, fan out) of the layer.
    /// * `act_fn` - The activation applied after the affine map, if any.
    pub fn new(dim: (usize, usize), act_fn: Option<ActFn>) -> Self {
        Self {
            dim,
            size: (dim.0 + 1) * dim.1,
            act_fn,
            x: None,
            z: Array2::zeros((0, dim.1)),
        }
    }

    /// Returns the size of this layer.
    ///
    /// # Returns
    /// The amount of parameters this layer has.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    /// Makes a forward pass keeping the metadata needed by `backward`.
    pub fn forward(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let z = self.affine(params, x)?;
        let a = match self.act_fn {
            Some(ref act_fn) => z.mapv(|z| act_fn.f(z)),
            None => z.clone(),
        };

        self.x = Some(x.to_owned());
        self.z = z;
        Ok(a)
    }

    /// Makes a forward pass without touching the layer's metadata.
    pub fn predict(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let z = self.affine(params, x)?;
        let Some(ref act_fn) = self.act_fn else {
            return Ok(z);
        };

        Ok(z.mapv_into(|z| act_fn.f(z)))
    }

    /// Backpropagates `d`, the derivative of the loss with respect to this layer's output.
    ///
    /// The weight and bias gradients are **added** to `grad`, so several batches can be
    /// accumulated before zeroing it.
    ///
    /// # Returns
    /// The derivative of the loss with respect to this layer's input.
    pub fn backward(
        &mut self,
        params: &[f32],
        grad: &mut [f32],
        mut d: Array2<f32>,
    ) -> Result<Array2<f32>> {
        let x = self.x.as_ref().ok_or(MlErr::ForwardNotCalled)?;
        if d.dim() != self.z.dim() {
            return Err(MlErr::SizeMismatch {
                what: "dense layer deltas",
                got: d.len(),
                expected: self.z.len(),
            });
        }

        if let Some(act_fn) = &self.act_fn {
            d.zip_mut_with(&self.z, |d, &z| *d *= act_fn.df(z));
        }

        let (mut dw, mut db) = self.view_grad(grad)?;
        linalg::general_mat_mul(1.0, &x.t(), &d, 1.0, &mut dw);
        db += &d.sum_axis(Axis(0));

        let (w, _) = self.view_params(params)?;
        Ok(d.dot(&w.t()))
    }

    fn affine(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        if x.ncols() != self.dim.0 {
            return Err(MlErr::SizeMismatch {
                what: "dense layer input",
                got: x.ncols(),
                expected: self.dim.0,
            });
        }

        let (w, b) = self.view_params(params)?;
        let mut z = Array2::zeros((x.nrows(), self.dim.1));
        linalg::general_mat_mul(1.0, &x, &w, 0.0, &mut z);
        z += &b;
        Ok(z)
    }

    /// Gives a view of the raw gradient slice as the delta weights and delta biases of this layer.
    fn view_grad<'a>(
        &self,
        grad: &'a mut [f32],
    ) -> Result<(ArrayViewMut2<'a, f32>, ArrayViewMut1<'a, f32>)> {
        self.check_len("dense layer gradient", grad.len())?;

        let w_size = self.size - self.dim.1;
        let (dw_raw, db_raw) = grad.split_at_mut(w_size);
        let dw = ArrayViewMut2::from_shape(self.dim, dw_raw).map_err(|_| self.shape_err())?;
        let db = ArrayViewMut1::from_shape(self.dim.1, db_raw).map_err(|_| self.shape_err())?;
        Ok((dw, db))
    }

    /// Gives a view of the raw parameter slice as the weights and biases of this layer.
    fn view_params<'a>(&self, params: &'a [f32]) -> Result<(ArrayView2<'a, f32>, ArrayView1<'a, f32>)> {
        self.check_len("dense layer parameters", params.len())?;

        let w_size = self.size - self.dim.1;
        let weights =
            ArrayView2::from_shape(self.dim, &params[..w_size]).map_err(|_| self.shape_err())?;
        let biases =
            ArrayView1::from_shape(self.dim.1, &params[w_size..]).map_err(|_| self.shape_err())?;
        Ok((weights, biases))
    }

    fn check_len(&self, what: &'static str, got: usize) -> Result<()> {
        if got != self.size {
            return Err(MlErr::SizeMismatch {
                what,
                got,
                expected: self.size,
            });
        }

        Ok(())
    }

    fn shape_err(&self) -> MlErr {
        MlErr::SizeMismatch {
            what: "dense layer shape",
            got: 0,
            expected: self.size,
        }
    }
}
