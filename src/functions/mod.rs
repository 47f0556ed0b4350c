//! Convex function oracles consumed by the solvers.
//!
//! Every function can evaluate itself at a point. A function may also carry
//! a gradient, a proximal operator, both, or neither; [`Func::has_grad`] and
//! [`Func::has_prox`] advertise which, and the solver never calls an
//! operation that is not advertised. A function folds its own multiplicative
//! weight into everything it returns.

mod norms;
pub use norms::*;

use ndarray::prelude::*;
use ndarray::NdFloat;

/// A convex term of a composite objective.
pub trait Func<S: NdFloat> {
    /// Objective value at `x`, weight included.
    fn eval(&self, x: ArrayView1<S>) -> S;

    /// Whether [`grad`](Func::grad) may be called.
    fn has_grad(&self) -> bool {
        false
    }

    /// Whether [`prox`](Func::prox) may be called.
    fn has_prox(&self) -> bool {
        false
    }

    /// Gradient at `x`.
    ///
    /// Default implementation panics. Only called on functions that
    /// advertise it through [`has_grad`](Func::has_grad).
    fn grad(&self, x: ArrayView1<S>) -> Array1<S> {
        let _ = x;
        unimplemented!("function advertises no gradient")
    }

    /// Proximal operator at `x` with step size `step`, i.e. the minimizer of
    /// $`f(u) + \frac{1}{2\,\mathrm{step}}\|u - x\|_2^2`$.
    ///
    /// Default implementation panics. Only called on functions that
    /// advertise it through [`has_prox`](Func::has_prox).
    fn prox(&self, x: ArrayView1<S>, step: S) -> Array1<S> {
        let _ = (x, step);
        unimplemented!("function advertises no proximal operator")
    }
}

/// The zero function: evaluates to zero everywhere, with a zero gradient and
/// an identity proximal operator.
///
/// Pairing a term with `Dummy` lets a single function be minimized on its
/// own through the composite interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dummy;

impl<S: NdFloat> Func<S> for Dummy {
    fn eval(&self, _x: ArrayView1<S>) -> S {
        S::zero()
    }

    fn has_grad(&self) -> bool {
        true
    }

    fn has_prox(&self) -> bool {
        true
    }

    fn grad(&self, x: ArrayView1<S>) -> Array1<S> {
        Array1::zeros(x.len())
    }

    fn prox(&self, x: ArrayView1<S>, _step: S) -> Array1<S> {
        x.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dummy_is_the_zero_function() {
        let x = array![1., -2., 3.];
        let f = Dummy;
        assert_abs_diff_eq!(f.eval(x.view()), 0.);
        assert!(Func::<f64>::has_grad(&f) && Func::<f64>::has_prox(&f));
        assert_abs_diff_eq!(f.grad(x.view()), array![0., 0., 0.]);
        assert_abs_diff_eq!(f.prox(x.view(), 0.5), x);
    }
}
