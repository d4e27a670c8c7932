//! Probabilistic models built on top of `probably_core`:
//!
//! -   Screening tests (medical diagnosis, drug testing): Bayes' rule on a
//!     two variable joint distribution.
//! -   The Monty Hall game.
//! -   The burglary/earthquake alarm Bayesian network, queried with several
//!     equivalent conditioning strategies.
//! -   A word based spam classifier with naive Bayes and Fisher strategies.

pub mod alarm;
pub mod monty_hall;
pub mod screening;
pub mod spam;

pub use probably_core::{DistError, Distribution};
