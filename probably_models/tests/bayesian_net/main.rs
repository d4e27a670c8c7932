//! Scenario level checks for the models built on `probably_core`.

mod alarm;
mod diagnosis;
mod monty_hall;
mod spam;

use probably_core::config::tracing::Logger;

pub(crate) const EPSILON: f64 = 1e-9;

pub(crate) fn init() {
    Logger::get_logger();
}
