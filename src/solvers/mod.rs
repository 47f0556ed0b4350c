//! Solve loop for composite convex minimization
//!
//! [`solve`] owns the iterate state, drives a configured update rule, checks
//! the stopping criteria after every iteration and packages the result. The
//! loop itself is deterministic: for a fixed function set, initial point and
//! configuration the iterate sequence is fully reproducible, the wall clock
//! only entering through the optional time cap and the log output.

mod forward_backward;
pub use forward_backward::*;

use std::fmt;
use std::time::{Duration, Instant};

use log::info;
use ndarray::prelude::*;
use ndarray::NdFloat;

use crate::error::{ConfigError, Error, Result};
use crate::functions::Func;

/// How much the solve loop reports through the `log` facade.
///
/// Purely observational: the level never affects the iterates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No output at all.
    None,
    /// A summary when the loop terminates.
    Low,
    /// The objective value at every iteration.
    High,
}

/// Stopping criterion that ended a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crit {
    /// The iteration cap was reached.
    MaxIt,
    /// The objective value fell below the absolute tolerance.
    AbsTol,
    /// The relative change of the objective fell below the relative
    /// tolerance.
    RelTol,
    /// The wall-clock cap was exceeded.
    MaxTime,
}

impl Crit {
    /// Tag name of the criterion.
    pub fn as_str(self) -> &'static str {
        match self {
            Crit::MaxIt => "MAX_IT",
            Crit::AbsTol => "ABS_TOL",
            Crit::RelTol => "REL_TOL",
            Crit::MaxTime => "MAX_TIME",
        }
    }
}

impl fmt::Display for Crit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stopping criteria and reporting options of the solve loop.
///
/// The criteria are checked after each iteration in a fixed priority order:
/// iteration cap, absolute tolerance, relative tolerance, time cap. The
/// first one satisfied ends the loop, which always runs at least one
/// iteration.
#[derive(Debug, Clone)]
pub struct SolveParams<S> {
    /// Stop once the magnitude of the objective falls below this.
    pub abs_tol: S,
    /// Stop once the relative change of the objective between two
    /// consecutive iterations falls below this. Skipped when the previous
    /// objective is zero.
    pub rel_tol: Option<S>,
    /// Iteration cap.
    pub maxit: usize,
    /// Wall-clock cap.
    pub max_time: Option<Duration>,
    /// Log verbosity.
    pub verbosity: Verbosity,
}

impl Default for SolveParams<f64> {
    fn default() -> Self {
        SolveParams {
            abs_tol: 1e-5,
            rel_tol: None,
            maxit: 200,
            max_time: None,
            verbosity: Verbosity::Low,
        }
    }
}

impl Default for SolveParams<f32> {
    fn default() -> Self {
        SolveParams {
            abs_tol: 1e-3,
            rel_tol: None,
            maxit: 200,
            max_time: None,
            verbosity: Verbosity::Low,
        }
    }
}

/// Outcome of a successful solve.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// Final iterate.
    pub sol: Array1<S>,
    /// Criterion that stopped the loop.
    pub crit: Crit,
    /// Number of iterations performed.
    pub niter: usize,
    /// Objective value at `x0` followed by one value per iteration.
    pub objective: Vec<S>,
    /// Wall-clock duration of the solve.
    pub time: Duration,
}

/// Minimize a sum of convex functions by forward-backward splitting
///
/// The functions' roles are resolved once, before the loop; see
/// [`Split::resolve`] for the assignment policy. All supplied functions are
/// evaluated for the objective trace, whether or not they take part in the
/// update.
///
/// Parameters
/// ----------
/// - __functions:__ at least two convex function oracles
/// - __x0:__        initial guess, fixes the problem dimension
/// - __solver:__    the configured update rule
/// - __params:__    stopping criteria and verbosity
///
/// # Errors
/// Invalid setup is rejected with [`Error::Configuration`] before any
/// iteration runs and before any log output. A non-finite objective value
/// aborts the loop immediately with [`Error::NumericAnomaly`] instead of
/// spinning to the iteration cap.
pub fn solve<S: NdFloat>(
    functions: &[&dyn Func<S>],
    x0: ArrayView1<S>,
    solver: &ForwardBackward<S>,
    params: &SolveParams<S>,
) -> Result<Solution<S>> {
    if functions.len() < 2 {
        return Err(ConfigError::NotEnoughFunctions(functions.len()).into());
    }
    if x0.is_empty() || x0.iter().any(|v| !v.is_finite()) {
        return Err(ConfigError::BadInitialPoint.into());
    }
    solver.validate()?;
    let split = Split::resolve(functions)?;

    if params.verbosity >= Verbosity::Low {
        info!(
            "forward-backward ({:?}): gamma = {}, {} functions, dimension {}",
            solver.method,
            solver.gamma,
            functions.len(),
            x0.len()
        );
    }

    let start = Instant::now();
    let mut state = solver.init(x0);
    let mut last = eval_all(functions, x0);
    let mut objective = vec![last];
    let mut niter = 0;

    let crit = loop {
        niter += 1;
        solver.step(functions, &split, &mut state);
        let current = eval_all(functions, state.x.view());
        if !current.is_finite() {
            return Err(Error::NumericAnomaly { niter });
        }
        objective.push(current);
        if params.verbosity >= Verbosity::High {
            info!("iter {:4}: objective = {}", niter, current);
        }

        if niter >= params.maxit {
            break Crit::MaxIt;
        }
        if current.abs() < params.abs_tol {
            break Crit::AbsTol;
        }
        if let Some(rel_tol) = params.rel_tol {
            if last != S::zero() && ((current - last) / last).abs() < rel_tol {
                break Crit::RelTol;
            }
        }
        if let Some(max_time) = params.max_time {
            if start.elapsed() >= max_time {
                break Crit::MaxTime;
            }
        }
        last = current;
    };
    let time = start.elapsed();

    if params.verbosity >= Verbosity::Low {
        info!("solution found after {niter} iterations ({crit})");
    }

    Ok(Solution {
        sol: state.x,
        crit,
        niter,
        objective,
        time,
    })
}

fn eval_all<S: NdFloat>(functions: &[&dyn Func<S>], x: ArrayView1<S>) -> S {
    functions
        .iter()
        .fold(S::zero(), |acc, f| acc + f.eval(x))
}
