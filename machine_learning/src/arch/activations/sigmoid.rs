#[derive(Clone, Debug, Default)]
pub struct Sigmoid {
    amp: f32,
}

impl Sigmoid {
    pub fn new(amp: f32) -> Self {
        Self { amp }
    }

    pub fn f(&self, z: f32) -> f32 {
        self.amp * logistic(z)
    }

    pub fn df(&self, z: f32) -> f32 {
        let s = logistic(z);
        self.amp * s * (1. - s)
    }
}

/// The standard logistic function, evaluated without overflowing for large `|z|`.
pub fn logistic(z: f32) -> f32 {
    if z >= 0. {
        1. / (1. + (-z).exp())
    } else {
        let e = z.exp();
        e / (1. + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_is_stable_at_the_tails() {
        assert_eq!(logistic(-1000.), 0.);
        assert_eq!(logistic(1000.), 1.);
        assert!((logistic(0.) - 0.5).abs() < 1e-7);
    }

    #[test]
    fn derivative_peaks_at_zero() {
        let s = Sigmoid::new(1.);
        assert!((s.df(0.) - 0.25).abs() < 1e-7);
        assert!(s.df(3.) < s.df(0.));
    }
}
