//! Discrete probability distributions and the monadic combinators to build,
//! condition and query them for the `probably` framework.
//!
//! A [`Distribution`] maps outcomes to probability mass. Leaf distributions are
//! built with the constructors (`point_mass`, `choose`, `uniform`, ...), joint and
//! conditional distributions are chained with [`Distribution::bind`] and
//! [`condition`], and answers are read back with [`Distribution::query`] and the
//! statistics methods.
//!
//! ```
//! use probably_core::{condition, Distribution};
//!
//! let disease = Distribution::choose(0.001, "ill", "healthy").unwrap();
//! let posterior = disease
//!     .try_bind(|d| {
//!         let p_pos = if *d == "ill" { 0.99 } else { 0.01 };
//!         let test = Distribution::choose(p_pos, "pos", "neg")?;
//!         let d = *d;
//!         Ok(Some(test.bind(|t| condition(*t == "pos", || Distribution::point_mass(d)))))
//!     })
//!     .unwrap()
//!     .normalize()
//!     .unwrap();
//! assert!((posterior.probability(&"ill") - 0.0902).abs() < 1e-4);
//! ```

// clippy lints config:
#![allow(unknown_lints)]

pub mod config;
mod dist;
mod err;
pub mod event;
mod sampling;

pub use self::dist::{
    condition, histogram, normal_shape, shape_fn, try_condition, AsReal, Distribution,
};
pub use self::err::DistError;
pub use self::sampling::Sampler;

/// Probability mass attached to an outcome.
pub type Mass = f64;

/// Maximum deviation from 1 tolerated by [`Distribution::is_normalized`].
pub const TOLERANCE: f64 = 1e-9;

const FLOAT_EQ_ULPS: i64 = 2;
