use std::fmt::Debug;

use itertools::{EitherOrBoth, Itertools};

use super::Distribution;
use crate::{DistError, Mass, Sampler};

/// Outcomes that can be read as a real number by the statistics methods.
pub trait AsReal {
    /// `None` when the value has no numeric reading.
    fn as_real(&self) -> Option<f64>;
}

macro_rules! as_real_cast {
    ($($ty:ty),*) => {
        $(
            impl AsReal for $ty {
                #[inline]
                fn as_real(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

// Floats are not `Ord`, real valued outcomes need an ordered wrapper type
// implementing `AsReal` themselves.
as_real_cast!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl AsReal for bool {
    fn as_real(&self) -> Option<f64> {
        Some(if *self { 1.0 } else { 0.0 })
    }
}

impl AsReal for str {
    fn as_real(&self) -> Option<f64> {
        self.trim().parse().ok()
    }
}

impl AsReal for String {
    fn as_real(&self) -> Option<f64> {
        self.as_str().as_real()
    }
}

impl<T: AsReal + ?Sized> AsReal for &T {
    fn as_real(&self) -> Option<f64> {
        (**self).as_real()
    }
}

fn real<T: AsReal + Debug>(outcome: &T) -> Result<f64, DistError> {
    outcome
        .as_real()
        .ok_or_else(|| DistError::NonNumericOutcome(format!("{:?}", outcome)))
}

impl<T: Ord + Clone> Distribution<T> {
    /// Marginal probability of `event`, the sum of the masses of the outcomes
    /// satisfying it.
    pub fn query<P>(&self, mut event: P) -> Mass
    where
        P: FnMut(&T) -> bool,
    {
        self.map
            .iter()
            .filter(|(outcome, _)| event(*outcome))
            .map(|(_, mass)| mass)
            .sum()
    }

    /// Outcome with the highest mass, ties resolved in favour of the smallest outcome.
    pub fn most_probable(&self) -> Result<(&T, Mass), DistError> {
        let mut best: Option<(&T, Mass)> = None;
        for (outcome, &mass) in &self.map {
            match best {
                Some((_, best_mass)) if best_mass >= mass => {}
                _ => best = Some((outcome, mass)),
            }
        }
        best.ok_or(DistError::EmptyDistribution)
    }

    /// Draws one outcome walking the cumulative mass in outcome order.
    ///
    /// The draw is scaled to the mass of the outcomes, so excluded mass is
    /// never drawn and the result follows `normalize(self)`.
    pub fn pick(&self, rng: &mut Sampler) -> Result<(&T, Mass), DistError> {
        if self.map.is_empty() {
            return Err(DistError::EmptyDistribution);
        }
        let observable: Mass = self.map.values().sum();
        if !observable.is_finite() || observable <= 0.0 {
            return Err(DistError::DegenerateDistribution);
        }

        let draw = rng.uniform() * observable;
        let mut cumulative = 0.0;
        let mut last = None;
        for (outcome, &mass) in &self.map {
            cumulative += mass;
            if mass > 0.0 {
                last = Some((outcome, mass));
            }
            if draw < cumulative {
                return Ok((outcome, mass));
            }
        }
        // rounding left the draw past the last cumulative sum
        last.ok_or(DistError::DegenerateDistribution)
    }

    /// Sum over the union of outcomes of the squared mass difference.
    pub fn distance(&self, other: &Distribution<T>) -> f64 {
        self.map
            .iter()
            .merge_join_by(other.map.iter(), |(a, _), (b, _)| a.cmp(b))
            .map(|pair| match pair {
                EitherOrBoth::Both((_, m1), (_, m2)) => (m1 - m2).powi(2),
                EitherOrBoth::Left((_, m)) | EitherOrBoth::Right((_, m)) => m.powi(2),
            })
            .sum()
    }

    /// Raises every mass below `floor` up to `floor`.
    ///
    /// Smoothing for classifiers that must not assign zero probability. The
    /// result is *not* renormalized.
    pub fn adjust_min(&self, floor: Mass) -> Result<Distribution<T>, DistError> {
        if !(0.0..=1.0).contains(&floor) {
            return Err(DistError::not_a_probability("adjust_min", floor));
        }
        let map = self
            .map
            .iter()
            .map(|(outcome, &mass)| (outcome.clone(), if mass > floor { mass } else { floor }))
            .collect();
        Ok(Distribution {
            map,
            excluded: self.excluded,
        })
    }
}

impl<T: Ord + Clone + AsReal + Debug> Distribution<T> {
    pub fn expectation(&self) -> Result<f64, DistError> {
        let mut sum = 0.0;
        for (outcome, &mass) in &self.map {
            sum += real(outcome)? * mass;
        }
        Ok(sum)
    }

    /// Mass weighted second central moment.
    pub fn variance(&self) -> Result<f64, DistError> {
        let expected = self.expectation()?;
        let mut sum = 0.0;
        for (outcome, &mass) in &self.map {
            let dev = real(outcome)? - expected;
            sum += dev * dev * mass;
        }
        Ok(sum)
    }

    pub fn std_dev(&self) -> Result<f64, DistError> {
        self.variance().map(f64::sqrt)
    }
}
