mod chain;
mod constant;
mod random;
mod weight_gen;
mod weights_init;

pub use chain::ChainWeightGen;
pub use constant::ConstWeightGen;
pub use random::RandWeightGen;
pub use weight_gen::WeightGen;
pub use weights_init::weights_init;
