//! Forward-backward splitting: the role assignment between gradient and
//! proximal oracles, and the ISTA/FISTA update rules.

use ndarray::prelude::*;
use ndarray::NdFloat;

use crate::error::ConfigError;
use crate::functions::Func;

/// Update rule variant of the forward-backward solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Iterative Shrinkage-Thresholding Algorithm, the plain proximal
    /// gradient iteration.
    Ista,
    /// Fast ISTA, adds Nesterov-style momentum through an extrapolation
    /// point and a scalar sequence.
    Fista,
}

/// Forward-backward splitting solver
///
/// Minimizes $`f(x) + g(x)`$ where $`f`$ supplies a gradient and $`g`$ a
/// proximal operator, by alternating an explicit gradient step on $`f`$ with
/// an implicit proximal step on $`g`$.
///
/// Algorithm (ISTA)
/// ----------------
/// ```math
/// x_{k+1} = x_k + \lambda \left( \mathrm{prox}_{\gamma g}\left(x_k - \gamma \nabla f(x_k)\right) - x_k \right)
/// ```
///
/// Algorithm (FISTA)
/// -----------------
/// ```math
/// \begin{aligned}
/// x_{k+1} &= \mathrm{prox}_{\gamma g}\left(z_k - \gamma \nabla f(z_k)\right) \\
/// t_{k+1} &= \frac{1 + \sqrt{1 + 4 t_k^2}}{2} \\
/// z_{k+1} &= x_{k+1} + \frac{t_k - 1}{t_{k+1}} \left(x_{k+1} - x_k\right)
/// \end{aligned}
/// ```
/// with $`t_0 = 1`$ and $`z_0 = x_0`$.
///
/// References
/// ----------
/// \[BT09\]: [ Beck A, Teboulle M,
///      "A Fast Iterative Shrinkage-Thresholding Algorithm for Linear
///         Inverse Problems", SIAM J Imaging Sciences, 2(1), 2009 ](https://doi.org/10.1137/080716542)
#[derive(Debug, Clone, Copy)]
pub struct ForwardBackward<S> {
    /// Update rule variant.
    pub method: Method,
    /// Step size, must be positive. With an `L`-Lipschitz gradient the
    /// iteration is guaranteed to converge for `gamma <= 1/L`.
    pub gamma: S,
    /// Update rate in (0, 2] damping or over-relaxing the ISTA step.
    /// Ignored by FISTA, whose acceleration assumes full steps.
    pub lambda: S,
}

impl<S: NdFloat> Default for ForwardBackward<S> {
    fn default() -> Self {
        ForwardBackward {
            method: Method::Fista,
            gamma: S::one(),
            lambda: S::one(),
        }
    }
}

impl<S: NdFloat> ForwardBackward<S> {
    /// A solver with the given update rule, unit step size and unit update
    /// rate.
    pub fn new(method: Method) -> Self {
        ForwardBackward {
            method,
            ..ForwardBackward::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gamma > S::zero()) {
            return Err(ConfigError::NonPositiveStep);
        }
        let two = S::from(2.).unwrap();
        if !(self.lambda > S::zero() && self.lambda <= two) {
            return Err(ConfigError::BadUpdateRate);
        }
        Ok(())
    }

    pub(crate) fn init(&self, x0: ArrayView1<S>) -> FbState<S> {
        FbState {
            x: x0.to_owned(),
            z: x0.to_owned(),
            t: S::one(),
        }
    }

    /// One forward-backward update of `state`.
    pub(crate) fn step(
        &self,
        functions: &[&dyn Func<S>],
        split: &Split,
        state: &mut FbState<S>,
    ) {
        match self.method {
            Method::Ista => {
                let grad = split.gradient(functions, state.x.view());
                let forward = &state.x - &(grad * self.gamma);
                let backward = split.prox(functions, forward, self.gamma);
                state.x = &state.x + &((backward - &state.x) * self.lambda);
            }
            Method::Fista => {
                let two = S::from(2.).unwrap();
                let four = S::from(4.).unwrap();
                let grad = split.gradient(functions, state.z.view());
                let forward = &state.z - &(grad * self.gamma);
                let x_next = split.prox(functions, forward, self.gamma);
                let t_next = (S::one() + (S::one() + four * state.t * state.t).sqrt()) / two;
                let beta = (state.t - S::one()) / t_next;
                state.z = &x_next + &((&x_next - &state.x) * beta);
                state.x = x_next;
                state.t = t_next;
            }
        }
    }
}

/// Iterate state owned by one in-flight solve.
///
/// `z` and `t` are the FISTA extrapolation point and momentum scalar; ISTA
/// leaves them at their initial values.
pub(crate) struct FbState<S> {
    pub(crate) x: Array1<S>,
    pub(crate) z: Array1<S>,
    pub(crate) t: S,
}

/// Role assignment between the supplied functions, frozen for a whole solve.
///
/// One function takes the implicit proximal step; every gradient-capable
/// function among the others contributes to the explicit forward step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    prox: Option<usize>,
    grads: Vec<usize>,
}

impl Split {
    /// Classify the functions into a (gradient, prox) role assignment.
    ///
    /// The prox role goes to the first listed function that supports a
    /// proximal operator but no gradient, then to the first that supports
    /// one at all; with none, the proximal step is the identity. Every other
    /// function contributes its gradient if it has one, the gradients being
    /// summed; functions with neither capability only count towards the
    /// objective. The assignment commutes: listing a prox-only and a
    /// gradient-capable function in either order yields the same roles.
    ///
    /// # Errors
    /// A non-prox-role function that supports only a proximal operator
    /// cannot take the forward step, and an identity prox with no gradient
    /// source leaves nothing to iterate on; both are reported as
    /// [`ConfigError::NoGradient`].
    pub fn resolve<S: NdFloat>(functions: &[&dyn Func<S>]) -> Result<Self, ConfigError> {
        let prox = functions
            .iter()
            .position(|f| f.has_prox() && !f.has_grad())
            .or_else(|| functions.iter().position(|f| f.has_prox()));

        let mut grads = Vec::with_capacity(functions.len());
        for (i, f) in functions.iter().enumerate() {
            if Some(i) == prox {
                continue;
            }
            if f.has_grad() {
                grads.push(i);
            } else if f.has_prox() {
                return Err(ConfigError::NoGradient);
            }
        }
        if prox.is_none() && grads.is_empty() {
            return Err(ConfigError::NoGradient);
        }
        Ok(Split { prox, grads })
    }

    /// Summed gradient of the forward terms, zero when there are none.
    pub(crate) fn gradient<S: NdFloat>(
        &self,
        functions: &[&dyn Func<S>],
        x: ArrayView1<S>,
    ) -> Array1<S> {
        let mut grad = Array1::zeros(x.len());
        for &i in &self.grads {
            grad = grad + functions[i].grad(x);
        }
        grad
    }

    /// Proximal step of the backward term, identity when there is none.
    pub(crate) fn prox<S: NdFloat>(
        &self,
        functions: &[&dyn Func<S>],
        x: Array1<S>,
        step: S,
    ) -> Array1<S> {
        match self.prox {
            Some(i) => functions[i].prox(x.view(), step),
            None => x,
        }
    }
}
