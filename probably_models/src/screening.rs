//! Screening tests: what a test result says about the condition it screens for.
//!
//! With `I` the condition and `T` the test result, `P(I | T) ∝ P(T | I) · P(I)`.

use std::fmt;

use probably_core::{condition, try_condition, DistError, Distribution, Mass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Condition {
    Ill,
    Healthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestResult {
    Positive,
    Negative,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Condition::Ill => write!(f, "ill"),
            Condition::Healthy => write!(f, "healthy"),
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TestResult::Positive => write!(f, "positive"),
            TestResult::Negative => write!(f, "negative"),
        }
    }
}

/// A binary test for a condition with known prevalence and error rates.
#[derive(Debug, Clone, Copy)]
pub struct Screening {
    prevalence: Mass,
    sensitivity: Mass,
    false_positive: Mass,
}

impl Screening {
    /// - `prevalence`: `P(Ill)`
    /// - `sensitivity`: `P(Positive | Ill)`
    /// - `false_positive`: `P(Positive | Healthy)`
    pub fn new(
        prevalence: Mass,
        sensitivity: Mass,
        false_positive: Mass,
    ) -> Result<Screening, DistError> {
        for (name, p) in &[
            ("prevalence", prevalence),
            ("sensitivity", sensitivity),
            ("false positive rate", false_positive),
        ] {
            if !(0.0..=1.0).contains(p) {
                return Err(DistError::InvalidParameter(format!(
                    "{} must be in [0,1], got `{}`",
                    name, p
                )));
            }
        }
        Ok(Screening {
            prevalence,
            sensitivity,
            false_positive,
        })
    }

    /// The disease test: one ill person in a thousand, 1% error either way.
    pub fn diagnosis() -> Screening {
        Screening {
            prevalence: 0.001,
            sensitivity: 0.99,
            false_positive: 0.01,
        }
    }

    pub fn prior(&self) -> Result<Distribution<Condition>, DistError> {
        Distribution::choose(self.prevalence, Condition::Ill, Condition::Healthy)
    }

    /// `P(T | I)`
    pub fn result_given(&self, cond: Condition) -> Result<Distribution<TestResult>, DistError> {
        let p_positive = match cond {
            Condition::Ill => self.sensitivity,
            Condition::Healthy => self.false_positive,
        };
        Distribution::choose(p_positive, TestResult::Positive, TestResult::Negative)
    }

    /// `P(I, T)`
    pub fn joint(&self) -> Result<Distribution<(Condition, TestResult)>, DistError> {
        self.prior()?.try_bind(|&cond| {
            let results = self.result_given(cond)?;
            Ok(Some(results.map(|&res| (cond, res))))
        })
    }

    /// Restricts the joint distribution to `observed` and reads the condition.
    pub fn posterior_by_filter(
        &self,
        observed: TestResult,
    ) -> Result<Distribution<Condition>, DistError> {
        Ok(self
            .joint()?
            .filter(|(_, res)| *res == observed)?
            .map(|(cond, _)| *cond))
    }

    /// Excludes the branches inconsistent with `observed` while building the
    /// joint distribution, then normalizes.
    pub fn posterior_by_condition(
        &self,
        observed: TestResult,
    ) -> Result<Distribution<Condition>, DistError> {
        self.prior()?
            .try_bind(|&cond| {
                let results = self.result_given(cond)?;
                Ok(Some(results.bind(|res| {
                    condition(*res == observed, || Distribution::point_mass(cond))
                })))
            })?
            .normalize()
    }

    /// Binds over the joint distribution returning the exclusion marker for
    /// every other result.
    pub fn posterior_by_exclusion(
        &self,
        observed: TestResult,
    ) -> Result<Distribution<Condition>, DistError> {
        self.joint()?
            .try_bind(|&(cond, res)| {
                try_condition(res == observed, || Ok(Distribution::point_mass(cond)))
            })?
            .normalize()
    }
}

impl Default for Screening {
    fn default() -> Screening {
        Screening::diagnosis()
    }
}
