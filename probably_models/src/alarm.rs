//! The burglary alarm Bayesian network.
//!
//! ```text
//!  Burglary   Earthquake
//!         \   /
//!         Alarm
//!         /   \
//!  JohnCalls  MaryCalls
//! ```
//!
//! The same posterior can be computed in several ways, all of which must agree:
//!
//! -   build the full joint distribution, then `filter` on the evidence;
//! -   build the joint distribution excluding inconsistent branches with `condition`
//!     at every step and `normalize` at the end;
//! -   the same with `event_bind` and `if_just` predicates;
//! -   pairing independent variables with the product before conditioning.

use std::fmt;

use probably_core::event::if_just;
use probably_core::{condition, try_condition, DistError, Distribution, Mass};

const P_BURGLARY: Mass = 0.001;
const P_EARTHQUAKE: Mass = 0.002;

/// One realization of the five network variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct World {
    pub burglary: bool,
    pub earthquake: bool,
    pub alarm: bool,
    pub john_calls: bool,
    pub mary_calls: bool,
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let flag = |set: bool, name: &'static str| if set { name } else { "-" };
        write!(
            f,
            "[{} {} {} {} {}]",
            flag(self.burglary, "B"),
            flag(self.earthquake, "E"),
            flag(self.alarm, "A"),
            flag(self.john_calls, "J"),
            flag(self.mary_calls, "M"),
        )
    }
}

/// Observed values, `None` for the unobserved variables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evidence {
    pub burglary: Option<bool>,
    pub earthquake: Option<bool>,
    pub alarm: Option<bool>,
    pub john_calls: Option<bool>,
    pub mary_calls: Option<bool>,
}

#[inline]
fn consistent(observed: Option<bool>, value: bool) -> bool {
    observed.map_or(true, |o| o == value)
}

impl Evidence {
    /// Both John and Mary called.
    pub fn calls() -> Evidence {
        Evidence {
            john_calls: Some(true),
            mary_calls: Some(true),
            ..Evidence::default()
        }
    }

    pub fn matches(&self, world: &World) -> bool {
        consistent(self.burglary, world.burglary)
            && consistent(self.earthquake, world.earthquake)
            && consistent(self.alarm, world.alarm)
            && consistent(self.john_calls, world.john_calls)
            && consistent(self.mary_calls, world.mary_calls)
    }
}

pub fn p_burglary() -> Result<Distribution<bool>, DistError> {
    Distribution::choose(P_BURGLARY, true, false)
}

pub fn p_earthquake() -> Result<Distribution<bool>, DistError> {
    Distribution::choose(P_EARTHQUAKE, true, false)
}

/// `P(Alarm | Burglary, Earthquake)`
pub fn p_alarm(burglary: bool, earthquake: bool) -> Result<Distribution<bool>, DistError> {
    let p = match (burglary, earthquake) {
        (true, true) => 0.95,
        (true, false) => 0.94,
        (false, true) => 0.29,
        (false, false) => 0.001,
    };
    Distribution::choose(p, true, false)
}

/// `P(JohnCalls | Alarm)`
pub fn p_john(alarm: bool) -> Result<Distribution<bool>, DistError> {
    Distribution::choose(if alarm { 0.9 } else { 0.05 }, true, false)
}

/// `P(MaryCalls | Alarm)`
pub fn p_mary(alarm: bool) -> Result<Distribution<bool>, DistError> {
    Distribution::choose(if alarm { 0.7 } else { 0.01 }, true, false)
}

/// Full joint distribution, every world projected through `f`.
pub fn joint<U, F>(f: F) -> Result<Distribution<U>, DistError>
where
    U: Ord + Clone,
    F: Fn(&World) -> U,
{
    p_burglary()?.try_bind(|&burglary| {
        p_earthquake()?
            .try_bind(|&earthquake| {
                p_alarm(burglary, earthquake)?
                    .try_bind(|&alarm| {
                        p_john(alarm)?
                            .try_bind(|&john_calls| {
                                let mary = p_mary(alarm)?;
                                Ok(Some(mary.map(|&mary_calls| {
                                    f(&World {
                                        burglary,
                                        earthquake,
                                        alarm,
                                        john_calls,
                                        mary_calls,
                                    })
                                })))
                            })
                            .map(Some)
                    })
                    .map(Some)
            })
            .map(Some)
    })
}

/// Full joint distribution restricted to the worlds matching `evidence`.
pub fn joint_filtered<U, F>(evidence: &Evidence, f: F) -> Result<Distribution<U>, DistError>
where
    U: Ord + Clone,
    F: Fn(&World) -> U,
{
    Ok(joint(|w| *w)?.filter(|w| evidence.matches(w))?.map(f))
}

/// Excludes the inconsistent branches as soon as each variable is drawn.
pub fn conditioned<U, F>(evidence: &Evidence, f: F) -> Result<Distribution<U>, DistError>
where
    U: Ord + Clone,
    F: Fn(&World) -> U,
{
    p_burglary()?
        .try_bind(|&burglary| {
            try_condition(consistent(evidence.burglary, burglary), || {
                p_earthquake()?.try_bind(|&earthquake| {
                    try_condition(consistent(evidence.earthquake, earthquake), || {
                        p_alarm(burglary, earthquake)?.try_bind(|&alarm| {
                            try_condition(consistent(evidence.alarm, alarm), || {
                                p_john(alarm)?.try_bind(|&john_calls| {
                                    let called = consistent(evidence.john_calls, john_calls);
                                    try_condition(called, || {
                                        p_mary(alarm)?.try_bind(|&mary_calls| {
                                            try_condition(
                                                consistent(evidence.mary_calls, mary_calls),
                                                || {
                                                    Ok(Distribution::point_mass(f(&World {
                                                        burglary,
                                                        earthquake,
                                                        alarm,
                                                        john_calls,
                                                        mary_calls,
                                                    })))
                                                },
                                            )
                                        })
                                    })
                                })
                            })
                        })
                    })
                })
            })
        })?
        .normalize()
}

/// Same as [`conditioned`] with the evidence expressed as event predicates.
pub fn event_conditioned<U, F>(evidence: &Evidence, f: F) -> Result<Distribution<U>, DistError>
where
    U: Ord + Clone,
    F: Fn(&World) -> U,
{
    let test_b = if_just(evidence.burglary);
    let test_e = if_just(evidence.earthquake);
    let test_a = if_just(evidence.alarm);
    let test_j = if_just(evidence.john_calls);
    let test_m = if_just(evidence.mary_calls);

    p_burglary()?
        .try_event_bind(&test_b, |&burglary| {
            p_earthquake()?
                .try_event_bind(&test_e, |&earthquake| {
                    p_alarm(burglary, earthquake)?
                        .try_event_bind(&test_a, |&alarm| {
                            p_john(alarm)?
                                .try_event_bind(&test_j, |&john_calls| {
                                    let mary = p_mary(alarm)?;
                                    Ok(Some(mary.event_bind(&test_m, |&mary_calls| {
                                        Some(Distribution::point_mass(f(&World {
                                            burglary,
                                            earthquake,
                                            alarm,
                                            john_calls,
                                            mary_calls,
                                        })))
                                    })))
                                })
                                .map(Some)
                        })
                        .map(Some)
                })
                .map(Some)
        })?
        .normalize()
}

/// Draws the independent variables as products, conditioning once at the leaves.
pub fn paired<U, F>(evidence: &Evidence, f: F) -> Result<Distribution<U>, DistError>
where
    U: Ord + Clone,
    F: Fn(&World) -> U,
{
    let causes = &p_burglary()? * &p_earthquake()?;
    causes
        .try_bind(|&(burglary, earthquake)| {
            p_alarm(burglary, earthquake)?
                .try_bind(|&alarm| {
                    let calls = &p_john(alarm)? * &p_mary(alarm)?;
                    Ok(Some(calls.bind(|&(john_calls, mary_calls)| {
                        let world = World {
                            burglary,
                            earthquake,
                            alarm,
                            john_calls,
                            mary_calls,
                        };
                        condition(evidence.matches(&world), || Distribution::point_mass(f(&world)))
                    })))
                })
                .map(Some)
        })?
        .normalize()
}
