//! The `ndarray-proxsplit` crate minimizes sums of convex functions of an
//! `ndarray` by forward-backward (proximal gradient) splitting.
//!
//! Each term of the objective is an oracle that can evaluate itself and
//! optionally supply a gradient or a proximal operator. The solver decides
//! once, up front, which term takes the explicit ("forward") gradient step
//! and which takes the implicit ("backward") proximal step, then iterates
//! with either the plain (ISTA) or the accelerated (FISTA) update rule until
//! a stopping criterion fires.
//!
//! A goal of this crate is to provide functionality on par with the proximal
//! splitting toolboxes available for other languages, starting from the
//! forward-backward family. The provided methods have been tested, but have
//! not been tuned for maximum performance or minimum memory usage.
//!
//! ```
//! use ndarray::array;
//! use ndarray_proxsplit::functions::{Dummy, Func, NormL1};
//! use ndarray_proxsplit::solvers::{solve, ForwardBackward, SolveParams};
//!
//! let y = array![4., 5., 6., 7.];
//! let f1 = NormL1::new(y.clone());
//! let f2 = Dummy;
//! let functions: [&dyn Func<f64>; 2] = [&f1, &f2];
//!
//! let ret = solve(
//!     &functions,
//!     array![0., 0., 0., 0.].view(),
//!     &ForwardBackward::default(),
//!     &SolveParams::default(),
//! )?;
//! assert_eq!(ret.crit.as_str(), "ABS_TOL");
//! assert_eq!(ret.sol, y);
//! # Ok::<(), ndarray_proxsplit::Error>(())
//! ```

pub mod error;
pub mod functions;
pub mod solvers;

pub use error::{ConfigError, Error, Result};
