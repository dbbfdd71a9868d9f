use super::{ReLU, Sigmoid};

/// The activation applied element-wise after a layer's affine map.
#[derive(Clone, Debug)]
pub enum ActFn {
    Sigmoid(Sigmoid),
    ReLU(ReLU),
}

impl ActFn {
    pub fn sigmoid(amp: f32) -> Self {
        Self::Sigmoid(Sigmoid::new(amp))
    }

    pub fn relu() -> Self {
        Self::ReLU(ReLU::new())
    }

    pub fn f(&self, x: f32) -> f32 {
        match self {
            Self::Sigmoid(a) => a.f(x),
            Self::ReLU(a) => a.f(x),
        }
    }

    pub fn df(&self, x: f32) -> f32 {
        match self {
            Self::Sigmoid(a) => a.df(x),
            Self::ReLU(a) => a.df(x),
        }
    }
}
