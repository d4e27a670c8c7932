//! The discrete distribution type.
//!
//! Masses are kept in a `BTreeMap` so every walk over the outcomes (rendering,
//! tie-breaks in `most_probable`, the cumulative walk in `pick`) happens in
//! sorted key order and is reproducible.
//!
//! Mass that the combinators rule out while conditioning is accumulated in a
//! separate *excluded* bucket instead of under a sentinel key, so it can never
//! collide with a real outcome. `normalize` drops that bucket and rescales the
//! remaining entries.

mod combinators;
mod construct;
mod stats;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use float_cmp::ApproxEqUlps;
use itertools::{EitherOrBoth, Itertools};

use crate::{DistError, Mass, FLOAT_EQ_ULPS, TOLERANCE};

pub use self::combinators::{condition, try_condition};
pub use self::construct::{histogram, normal_shape, shape_fn};
pub use self::stats::AsReal;

/// An immutable discrete probability distribution over outcomes of type `T`.
///
/// Every constructor and combinator renormalizes before returning, so the
/// masses plus the excluded mass always add up to one.
#[derive(Clone, Debug)]
pub struct Distribution<T> {
    map: BTreeMap<T, Mass>,
    excluded: Mass,
}

impl<T: Ord + Clone> Distribution<T> {
    /// Rescales so that entries plus excluded mass sum to one.
    fn normalized(map: BTreeMap<T, Mass>, excluded: Mass) -> Result<Distribution<T>, DistError> {
        let total = map.values().sum::<Mass>() + excluded;
        if !total.is_finite() || total <= 0.0 {
            log::debug!("cannot normalize a total mass of {}", total);
            return Err(DistError::DegenerateDistribution);
        }
        Ok(Distribution::rescaled(map, excluded, total))
    }

    fn rescaled(mut map: BTreeMap<T, Mass>, mut excluded: Mass, total: Mass) -> Distribution<T> {
        if !total.approx_eq_ulps(&1.0, FLOAT_EQ_ULPS) {
            log::trace!("rescaling {} outcomes by a total mass of {}", map.len(), total);
            for mass in map.values_mut() {
                *mass /= total;
            }
            excluded /= total;
        }
        Distribution { map, excluded }
    }

    /// Used by the combinators whose inputs already satisfy the invariant,
    /// there the total can only be off by rounding.
    fn renormalized(map: BTreeMap<T, Mass>, excluded: Mass) -> Distribution<T> {
        let total = map.values().sum::<Mass>() + excluded;
        if !total.is_finite() || total <= 0.0 {
            log::warn!("total mass of {} underflowed, skipping rescale", total);
            return Distribution { map, excluded };
        }
        Distribution::rescaled(map, excluded, total)
    }

    /// Strips the excluded mass and rescales the remaining outcomes to sum to one.
    ///
    /// This is the Bayes' rule step after a conditioned `bind`: the discarded
    /// rescaling factor is the marginal probability of the evidence. Also
    /// restores the invariant on the output of [`adjust_min`](Distribution::adjust_min).
    pub fn normalize(&self) -> Result<Distribution<T>, DistError> {
        if self.excluded > 0.0 || !self.is_normalized() {
            log::debug!("dropping excluded mass of {}", self.excluded);
            Distribution::normalized(self.map.clone(), 0.0)
        } else {
            Ok(self.clone())
        }
    }

    /// Mass of exactly `outcome`, zero if it is not part of the distribution.
    #[inline]
    pub fn probability(&self, outcome: &T) -> Mass {
        self.map.get(outcome).copied().unwrap_or(0.0)
    }

    /// Observational equality: every outcome in either distribution, and the
    /// excluded mass, differ by at most `epsilon`.
    pub fn approx_eq(&self, other: &Distribution<T>, epsilon: f64) -> bool {
        (self.excluded - other.excluded).abs() <= epsilon
            && self
                .map
                .iter()
                .merge_join_by(other.map.iter(), |(a, _), (b, _)| a.cmp(b))
                .all(|pair| {
                    let diff = match pair {
                        EitherOrBoth::Both((_, m1), (_, m2)) => m1 - m2,
                        EitherOrBoth::Left((_, m)) | EitherOrBoth::Right((_, m)) => *m,
                    };
                    diff.abs() <= epsilon
                })
    }
}

impl<T> Distribution<T> {
    /// Number of outcomes, zero-mass outcomes included.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Outcomes and masses in sorted outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, Mass)> {
        self.map.iter().map(|(outcome, mass)| (outcome, *mass))
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &T> {
        self.map.keys()
    }

    /// Mass ruled out by conditioning and not yet removed by `normalize`.
    #[inline]
    pub fn excluded_mass(&self) -> Mass {
        self.excluded
    }

    pub fn total_mass(&self) -> Mass {
        self.map.values().sum::<Mass>() + self.excluded
    }

    pub fn is_normalized(&self) -> bool {
        (self.total_mass() - 1.0).abs() <= TOLERANCE
    }
}

impl<'a, T> IntoIterator for &'a Distribution<T> {
    type Item = (&'a T, &'a Mass);
    type IntoIter = std::collections::btree_map::Iter<'a, T, Mass>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

// Exact comparison of outcomes and mass bit patterns, so distributions can be
// outcomes of other distributions (see `join`).
impl<T: Ord> PartialEq for Distribution<T> {
    fn eq(&self, other: &Distribution<T>) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for Distribution<T> {}

impl<T: Ord> PartialOrd for Distribution<T> {
    fn partial_cmp(&self, other: &Distribution<T>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for Distribution<T> {
    fn cmp(&self, other: &Distribution<T>) -> Ordering {
        self.map
            .iter()
            .map(|(outcome, mass)| (outcome, mass.to_bits()))
            .cmp(other.map.iter().map(|(outcome, mass)| (outcome, mass.to_bits())))
            .then_with(|| self.excluded.to_bits().cmp(&other.excluded.to_bits()))
    }
}

impl<T: Hash> Hash for Distribution<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (outcome, mass) in &self.map {
            outcome.hash(state);
            mass.to_bits().hash(state);
        }
        self.excluded.to_bits().hash(state);
    }
}

impl<T: fmt::Display> fmt::Display for Distribution<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (outcome, mass) in &self.map {
            writeln!(f, "{}: {}%", outcome, mass * 100.0)?;
        }
        if self.excluded > 0.0 {
            writeln!(f, "<excluded>: {}%", self.excluded * 100.0)?;
        }
        Ok(())
    }
}
