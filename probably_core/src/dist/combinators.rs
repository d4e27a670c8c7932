//! Monadic combinators: chaining, conditioning and restricting distributions.
//!
//! `bind` keeps the mass of excluded branches in the excluded bucket instead of
//! dropping it right away. Several conditioned binds can then be chained and a
//! single `normalize` at the end yields the posterior.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::ops::Mul;

use rayon::prelude::*;

use super::Distribution;
use crate::{DistError, Mass};

/// Inside a transition: `Some(producer())` when `flag` holds, the exclusion
/// marker (`None`) otherwise.
#[inline]
pub fn condition<U, F>(flag: bool, producer: F) -> Option<Distribution<U>>
where
    F: FnOnce() -> Distribution<U>,
{
    if flag {
        Some(producer())
    } else {
        None
    }
}

/// Fallible form of [`condition`] for use with [`Distribution::try_bind`].
#[inline]
pub fn try_condition<U, F>(flag: bool, producer: F) -> Result<Option<Distribution<U>>, DistError>
where
    F: FnOnce() -> Result<Distribution<U>, DistError>,
{
    if flag {
        producer().map(Some)
    } else {
        Ok(None)
    }
}

fn merge<U: Ord>(into: &mut BTreeMap<U, Mass>, scale: Mass, next: Distribution<U>) -> Mass {
    for (outcome, mass) in next.map {
        *into.entry(outcome).or_insert(0.0) += scale * mass;
    }
    scale * next.excluded
}

impl<T: Ord + Clone> Distribution<T> {
    fn bind_with<U, E, F>(&self, mut transition: F) -> Result<Distribution<U>, E>
    where
        U: Ord + Clone,
        F: FnMut(&T) -> Result<Option<Distribution<U>>, E>,
    {
        let mut map = BTreeMap::new();
        let mut excluded = self.excluded;
        for (outcome, &mass) in &self.map {
            match transition(outcome)? {
                Some(next) => excluded += merge(&mut map, mass, next),
                None => excluded += mass,
            }
        }
        Ok(Distribution::renormalized(map, excluded))
    }

    /// Extends every outcome with the continuation returned by `transition`,
    /// weighting it by the outcome's mass.
    ///
    /// Returning `None` marks the branch as excluded; its mass is kept in the
    /// excluded bucket until [`normalize`](Distribution::normalize) is called.
    pub fn bind<U, F>(&self, mut transition: F) -> Distribution<U>
    where
        U: Ord + Clone,
        F: FnMut(&T) -> Option<Distribution<U>>,
    {
        match self.bind_with::<_, Infallible, _>(|outcome| Ok(transition(outcome))) {
            Ok(dist) => dist,
            Err(never) => match never {},
        }
    }

    /// Like [`bind`](Distribution::bind), stopping at the first error returned
    /// by `transition`.
    pub fn try_bind<U, F>(&self, transition: F) -> Result<Distribution<U>, DistError>
    where
        U: Ord + Clone,
        F: FnMut(&T) -> Result<Option<Distribution<U>>, DistError>,
    {
        self.bind_with(transition)
    }

    /// Bind dropping excluded branches right away, `normalize(bind(..))`.
    pub fn bind_normalized<U, F>(&self, transition: F) -> Result<Distribution<U>, DistError>
    where
        U: Ord + Clone,
        F: FnMut(&T) -> Option<Distribution<U>>,
    {
        self.bind(transition).normalize()
    }

    /// Bind restricted to the outcomes satisfying `event`, the rest is excluded.
    pub fn event_bind<U, P, F>(&self, mut event: P, mut transition: F) -> Distribution<U>
    where
        U: Ord + Clone,
        P: FnMut(&T) -> bool,
        F: FnMut(&T) -> Option<Distribution<U>>,
    {
        self.bind(|outcome| {
            if event(outcome) {
                transition(outcome)
            } else {
                None
            }
        })
    }

    pub fn try_event_bind<U, P, F>(
        &self,
        mut event: P,
        mut transition: F,
    ) -> Result<Distribution<U>, DistError>
    where
        U: Ord + Clone,
        P: FnMut(&T) -> bool,
        F: FnMut(&T) -> Result<Option<Distribution<U>>, DistError>,
    {
        self.try_bind(|outcome| {
            if event(outcome) {
                transition(outcome)
            } else {
                Ok(None)
            }
        })
    }

    /// Pushes every outcome through `f`, outcomes landing on the same value
    /// merge their masses.
    pub fn map<U, F>(&self, mut f: F) -> Distribution<U>
    where
        U: Ord + Clone,
        F: FnMut(&T) -> U,
    {
        let mut map = BTreeMap::new();
        for (outcome, &mass) in &self.map {
            *map.entry(f(outcome)).or_insert(0.0) += mass;
        }
        Distribution::renormalized(map, self.excluded)
    }

    /// Keeps the outcomes satisfying `event`, renormalized over the retained mass.
    ///
    /// Fails with `DegenerateDistribution` when the retained mass is zero.
    pub fn filter<P>(&self, mut event: P) -> Result<Distribution<T>, DistError>
    where
        P: FnMut(&T) -> bool,
    {
        let map = self
            .map
            .iter()
            .filter(|(outcome, _)| event(*outcome))
            .map(|(outcome, mass)| (outcome.clone(), *mass))
            .collect();
        Distribution::normalized(map, 0.0)
    }

    /// Complement of [`filter`](Distribution::filter).
    pub fn reject<P>(&self, mut event: P) -> Result<Distribution<T>, DistError>
    where
        P: FnMut(&T) -> bool,
    {
        self.filter(|outcome| !event(outcome))
    }

    /// Independent joint distribution, every pair transformed by `combiner`.
    pub fn product_with<U, V, F>(&self, other: &Distribution<U>, mut combiner: F) -> Distribution<V>
    where
        U: Ord + Clone,
        V: Ord + Clone,
        F: FnMut(&T, &U) -> V,
    {
        self.bind(|a| Some(other.map(|b| combiner(a, b))))
    }

    /// Independent joint distribution over all the `(a, b)` pairs.
    pub fn product<U>(&self, other: &Distribution<U>) -> Distribution<(T, U)>
    where
        U: Ord + Clone,
    {
        self.product_with(other, |a, b| (a.clone(), b.clone()))
    }
}

impl<T> Distribution<T>
where
    T: Ord + Clone + Sync,
{
    /// [`bind`](Distribution::bind) evaluating the transitions on the rayon
    /// thread pool. Partial mass maps are merged by addition, so the result
    /// only differs from the sequential one in the last bits.
    pub fn par_bind<U, F>(&self, transition: F) -> Distribution<U>
    where
        U: Ord + Clone + Send,
        F: Fn(&T) -> Option<Distribution<U>> + Sync + Send,
    {
        let (map, excluded) = self
            .map
            .par_iter()
            .fold(
                || (BTreeMap::new(), 0.0),
                |(mut acc, mut excluded), (outcome, &mass)| {
                    match transition(outcome) {
                        Some(next) => excluded += merge(&mut acc, mass, next),
                        None => excluded += mass,
                    }
                    (acc, excluded)
                },
            )
            .reduce(
                || (BTreeMap::new(), 0.0),
                |(mut acc, excluded_a), (other, excluded_b)| {
                    for (outcome, mass) in other {
                        *acc.entry(outcome).or_insert(0.0) += mass;
                    }
                    (acc, excluded_a + excluded_b)
                },
            );
        Distribution::renormalized(map, excluded + self.excluded)
    }
}

impl<T: Ord + Clone> Distribution<Distribution<T>> {
    /// Flattens a distribution over distributions, `bind = join ∘ map`.
    pub fn join(&self) -> Distribution<T> {
        self.bind(|inner| Some(inner.clone()))
    }
}

impl<'a, 'b, T, U> Mul<&'b Distribution<U>> for &'a Distribution<T>
where
    T: Ord + Clone,
    U: Ord + Clone,
{
    type Output = Distribution<(T, U)>;

    fn mul(self, other: &'b Distribution<U>) -> Distribution<(T, U)> {
        self.product(other)
    }
}
