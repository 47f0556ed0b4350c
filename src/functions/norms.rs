//! Weighted norms with closed-form proximal operators.

use ndarray::prelude::*;
use ndarray::NdFloat;
use num_traits::Float;

use super::Func;

/// Shrink `d` towards zero by `threshold`, clamping at zero.
fn soft_threshold<F: Float>(d: F, threshold: F) -> F {
    d.signum() * (d.abs() - threshold).max(F::zero())
}

/// Weighted squared Euclidean distance to a target vector,
/// $`f(x) = \lambda \|x - y\|_2^2`$.
///
/// Smooth with a $`2\lambda`$-Lipschitz gradient, and proximable in closed
/// form, so it can play either role of a forward-backward split.
#[derive(Debug, Clone)]
pub struct NormL2<S> {
    y: Array1<S>,
    lambda: S,
}

impl<S: NdFloat> NormL2<S> {
    pub fn new(y: Array1<S>) -> Self {
        NormL2 {
            y,
            lambda: S::one(),
        }
    }

    /// Same as [`new`](NormL2::new) with a multiplicative weight.
    pub fn with_weight(y: Array1<S>, lambda: S) -> Self {
        NormL2 { y, lambda }
    }
}

impl<S: NdFloat> Func<S> for NormL2<S> {
    fn eval(&self, x: ArrayView1<S>) -> S {
        let d = &x - &self.y;
        self.lambda * d.dot(&d)
    }

    fn has_grad(&self) -> bool {
        true
    }

    fn has_prox(&self) -> bool {
        true
    }

    fn grad(&self, x: ArrayView1<S>) -> Array1<S> {
        let two = S::from(2.).unwrap();
        (&x - &self.y) * (two * self.lambda)
    }

    fn prox(&self, x: ArrayView1<S>, step: S) -> Array1<S> {
        let two = S::from(2.).unwrap();
        let c = two * self.lambda * step;
        (&x + &(&self.y * c)) / (S::one() + c)
    }
}

/// Weighted Manhattan distance to a target vector,
/// $`f(x) = \lambda \|x - y\|_1`$.
///
/// Non-smooth, so it carries no gradient; its proximal operator is
/// elementwise soft-thresholding towards `y` with threshold
/// $`\lambda \cdot \mathrm{step}`$.
#[derive(Debug, Clone)]
pub struct NormL1<S> {
    y: Array1<S>,
    lambda: S,
}

impl<S: NdFloat> NormL1<S> {
    pub fn new(y: Array1<S>) -> Self {
        NormL1 {
            y,
            lambda: S::one(),
        }
    }

    /// Same as [`new`](NormL1::new) with a multiplicative weight.
    pub fn with_weight(y: Array1<S>, lambda: S) -> Self {
        NormL1 { y, lambda }
    }
}

impl<S: NdFloat> Func<S> for NormL1<S> {
    fn eval(&self, x: ArrayView1<S>) -> S {
        (&x - &self.y).mapv(S::abs).sum() * self.lambda
    }

    fn has_prox(&self) -> bool {
        true
    }

    fn prox(&self, x: ArrayView1<S>, step: S) -> Array1<S> {
        let threshold = self.lambda * step;
        let shrunk = (&x - &self.y).mapv(|d| soft_threshold(d, threshold));
        &self.y + &shrunk
    }
}
