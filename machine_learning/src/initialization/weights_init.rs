use rand::Rng;

use super::{ChainWeightGen, ConstWeightGen, RandWeightGen, WeightGen};
use crate::{
    MlErr, Result,
    arch::{Model, layers::Layer},
};

/// Initializes every parameter of `model` in place.
///
/// Dense weights are drawn with Xavier uniform initialization using the layer's fan in and fan
/// out; biases start at zero.
pub fn weights_init<M, R>(model: &mut M, rng: &mut R) -> Result<()>
where
    M: Model,
    R: Rng + 'static,
{
    let mut weight_gens: Vec<Box<dyn WeightGen<R>>> = Vec::new();

    for layer in model.layers() {
        match layer {
            Layer::Dense(dense) => {
                let (fan_in, fan_out) = dense.dim();
                weight_gens.push(Box::new(RandWeightGen::xavier_uniform(fan_in, fan_out)?));
                weight_gens.push(Box::new(ConstWeightGen::zeros(fan_out)));
            }
        }
    }

    let size = model.size();
    let written = ChainWeightGen::new(weight_gens).fill(rng, model.params_mut());

    if written != size {
        return Err(MlErr::SizeMismatch {
            what: "initial parameters",
            got: written,
            expected: size,
        });
    }

    log::debug!("initialized {size} parameters");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::arch::{Sequential, activations::ActFn};

    #[test]
    fn fills_weights_and_zeros_biases() {
        let mut model = Sequential::new([
            Layer::dense((3, 10), Some(ActFn::relu())),
            Layer::dense((10, 1), None),
        ]);
        let mut rng = StdRng::seed_from_u64(42);
        weights_init(&mut model, &mut rng).unwrap();

        let params = model.params();
        let (w1, rest) = params.split_at(30);
        let (b1, rest) = rest.split_at(10);
        let (w2, b2) = rest.split_at(10);

        let r1 = (6. / 13f32).sqrt();
        let r2 = (6. / 11f32).sqrt();
        assert!(w1.iter().all(|w| w.abs() <= r1));
        assert!(w1.iter().any(|&w| w != 0.0));
        assert!(w2.iter().all(|w| w.abs() <= r2));
        assert!(b1.iter().chain(b2).all(|&b| b == 0.0));
    }

    #[test]
    fn same_seed_same_params() {
        let build = || Sequential::new([Layer::dense((4, 2), None)]);
        let (mut a, mut b) = (build(), build());

        weights_init(&mut a, &mut StdRng::seed_from_u64(1)).unwrap();
        weights_init(&mut b, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(a.params(), b.params());
    }
}
