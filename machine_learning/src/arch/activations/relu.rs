/// Rectified linear unit, `max(0, z)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReLU;

impl ReLU {
    pub fn new() -> Self {
        Self
    }

    pub fn f(&self, z: f32) -> f32 {
        z.max(0.)
    }

    // The subgradient at zero is taken as 0.
    pub fn df(&self, z: f32) -> f32 {
        if z > 0. { 1. } else { 0. }
    }
}
