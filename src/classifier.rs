use machine_learning::{
    Result,
    arch::{Sequential, activations::ActFn, layers::Layer},
    initialization::weights_init,
};
use rand::Rng;

/// The amount of features every smoke sample has.
pub const INPUT_SIZE: usize = 3;

/// A single hidden layer classifier: `input -> hidden` with ReLU, then `hidden -> 1` logit.
///
/// Every parameter starts at zero, see `initialized`.
pub fn neural_net(input: usize, hidden: usize) -> Sequential {
    Sequential::new([
        Layer::dense((input, hidden), Some(ActFn::relu())),
        Layer::dense((hidden, 1), None),
    ])
}

/// Same as `neural_net`, with its parameters drawn by `weights_init`.
pub fn initialized<R: Rng + 'static>(input: usize, hidden: usize, rng: &mut R) -> Result<Sequential> {
    let mut model = neural_net(input, hidden);
    weights_init(&mut model, rng)?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use machine_learning::arch::Model;
    use ndarray::Array2;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn has_two_dense_layers() {
        let model = neural_net(INPUT_SIZE, 10);
        assert_eq!(model.layers().len(), 2);
        assert_eq!(model.size(), 4 * 10 + 11);
    }

    #[test]
    fn wrong_input_width_is_an_error() {
        let model = initialized(INPUT_SIZE, 10, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(model.predict(Array2::zeros((2, 4)).view()).is_err());
    }
}
