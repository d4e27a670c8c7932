use std::collections::BTreeMap;
use std::f64::consts::PI;

use super::Distribution;
use crate::{DistError, Mass};

/// Wraps `f` so that it yields zero outside of `[0, 1]`.
pub fn shape_fn<F>(f: F) -> impl Fn(f64) -> Mass
where
    F: Fn(f64) -> Mass,
{
    move |x| {
        if !(0.0..=1.0).contains(&x) {
            0.0
        } else {
            f(x)
        }
    }
}

/// Gaussian density with the given `mean` and deviation `dev`, evaluated on `[0, 1]`.
pub fn normal_shape(mean: f64, dev: f64) -> Result<impl Fn(f64) -> Mass, DistError> {
    if !dev.is_finite() || dev <= 0.0 || !mean.is_finite() {
        return Err(DistError::InvalidParameter(format!(
            "normal shape requires a finite mean and a positive deviation, got mean `{}` \
             and deviation `{}`",
            mean, dev
        )));
    }
    Ok(shape_fn(move |x| {
        let u = (x - mean) / dev;
        (-0.5 * u * u).exp() / (2.0 * PI).sqrt()
    }))
}

/// Counts the occurrences of each value.
pub fn histogram<T, I>(values: I) -> BTreeMap<T, usize>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

impl<T: Ord + Clone> Distribution<T> {
    /// The distribution certain of `value`, identity element of `bind`.
    pub fn point_mass(value: T) -> Distribution<T> {
        let mut map = BTreeMap::new();
        map.insert(value, 1.0);
        Distribution { map, excluded: 0.0 }
    }

    /// `a` with probability `p` and `b` with probability `1 - p`.
    pub fn choose(p: Mass, a: T, b: T) -> Result<Distribution<T>, DistError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(DistError::not_a_probability("choose", p));
        }
        let mut map = BTreeMap::new();
        map.insert(a, p);
        *map.entry(b).or_insert(0.0) += 1.0 - p;
        Distribution::normalized(map, 0.0)
    }

    /// Copies the outcome/mass pairs and divides every mass by the total.
    /// Repeated outcomes accumulate their masses.
    pub fn from_map<I>(masses: I) -> Result<Distribution<T>, DistError>
    where
        I: IntoIterator<Item = (T, Mass)>,
    {
        let mut map = BTreeMap::new();
        for (outcome, mass) in masses {
            if mass.is_nan() || mass < 0.0 {
                return Err(DistError::InvalidParameter(format!(
                    "probability mass must be non-negative, got `{}`",
                    mass
                )));
            }
            *map.entry(outcome).or_insert(0.0) += mass;
        }
        Distribution::normalized(map, 0.0)
    }

    /// Weights the value at 1-based rank `i` out of `n` with `shape(i / n)`.
    ///
    /// Repeated values accumulate their contributions before the result is
    /// renormalized.
    pub fn from_ranked<I, F>(values: I, shape: F) -> Result<Distribution<T>, DistError>
    where
        I: IntoIterator<Item = T>,
        F: Fn(f64) -> Mass,
    {
        let values: Vec<T> = values.into_iter().collect();
        if values.is_empty() {
            return Err(DistError::InvalidParameter(
                "cannot build a distribution from an empty list of values".to_owned(),
            ));
        }
        let count = values.len() as f64;
        let mut map = BTreeMap::new();
        for (index, value) in values.into_iter().enumerate() {
            let contribution = shape((index + 1) as f64 / count);
            if !contribution.is_finite() || contribution < 0.0 {
                return Err(DistError::InvalidParameter(format!(
                    "shape function returned `{}` for rank {}",
                    contribution,
                    index + 1
                )));
            }
            *map.entry(value).or_insert(0.0) += contribution;
        }
        Distribution::normalized(map, 0.0)
    }

    /// Same as [`from_ranked`](Distribution::from_ranked), with `shape` clamped to `[0, 1]`.
    pub fn with_shape<I, F>(values: I, shape: F) -> Result<Distribution<T>, DistError>
    where
        I: IntoIterator<Item = T>,
        F: Fn(f64) -> Mass,
    {
        Distribution::from_ranked(values, shape_fn(shape))
    }

    pub fn uniform<I>(values: I) -> Result<Distribution<T>, DistError>
    where
        I: IntoIterator<Item = T>,
    {
        Distribution::with_shape(values, |_| 1.0)
    }

    /// Weight grows linearly with the rank.
    pub fn linear<I>(values: I) -> Result<Distribution<T>, DistError>
    where
        I: IntoIterator<Item = T>,
    {
        Distribution::with_shape(values, |x| x)
    }

    /// Weight decays as `exp(-x)` with the relative rank `x`.
    pub fn nexp<I>(values: I) -> Result<Distribution<T>, DistError>
    where
        I: IntoIterator<Item = T>,
    {
        Distribution::with_shape(values, |x| (-x).exp())
    }

    pub fn normal<I>(values: I, mean: f64, dev: f64) -> Result<Distribution<T>, DistError>
    where
        I: IntoIterator<Item = T>,
    {
        Distribution::from_ranked(values, normal_shape(mean, dev)?)
    }

    /// Gaussian centered on the middle of the list with deviation `0.5`.
    pub fn normal_default<I>(values: I) -> Result<Distribution<T>, DistError>
    where
        I: IntoIterator<Item = T>,
    {
        Distribution::normal(values, 0.5, 0.5)
    }

    /// Pairs every value with the weight at the same position in `weights`.
    pub fn enumerated<I>(values: I, weights: &[Mass]) -> Result<Distribution<T>, DistError>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        if values.len() != weights.len() {
            return Err(DistError::InvalidParameter(format!(
                "got {} values but {} weights",
                values.len(),
                weights.len()
            )));
        }
        let count = weights.len() as f64;
        Distribution::with_shape(values, |x| {
            let rank = (x * count).round() as usize;
            weights.get(rank.saturating_sub(1)).copied().unwrap_or(0.0)
        })
    }

    /// Empirical distribution of the observed values.
    pub fn from_counts<I>(values: I) -> Result<Distribution<T>, DistError>
    where
        I: IntoIterator<Item = T>,
    {
        let counts = histogram(values);
        if counts.is_empty() {
            return Err(DistError::InvalidParameter(
                "cannot build a distribution from zero observations".to_owned(),
            ));
        }
        Distribution::from_map(counts.into_iter().map(|(v, n)| (v, n as Mass)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn point_mass_is_certain() {
        let dist = Distribution::point_mass('x');
        assert_eq!(dist.len(), 1);
        assert_eq!(dist.probability(&'x'), 1.0);
        assert!(dist.is_normalized());
    }

    #[test]
    fn choose_validates_probability() {
        let dist = Distribution::choose(0.3, "a", "b").unwrap();
        assert!(approx_eq!(f64, dist.probability(&"a"), 0.3, ulps = 2));
        assert!(approx_eq!(f64, dist.probability(&"b"), 0.7, ulps = 2));
        assert!(matches!(
            Distribution::choose(1.2, "a", "b"),
            Err(DistError::InvalidParameter(_))
        ));
        assert!(matches!(
            Distribution::choose(f64::NAN, "a", "b"),
            Err(DistError::InvalidParameter(_))
        ));
        assert!(matches!(
            Distribution::choose(-0.1, "a", "b"),
            Err(DistError::InvalidParameter(_))
        ));

        let same = Distribution::choose(0.3, "a", "a").unwrap();
        assert_eq!(same.len(), 1);
        assert!(approx_eq!(f64, same.probability(&"a"), 1.0, ulps = 2));
    }

    #[test]
    fn from_map_renormalizes() {
        let dist = Distribution::from_map(vec![(1, 2.0), (2, 6.0), (1, 2.0)]).unwrap();
        assert!(approx_eq!(f64, dist.probability(&1), 0.4, epsilon = 1e-12));
        assert!(approx_eq!(f64, dist.probability(&2), 0.6, epsilon = 1e-12));

        assert_eq!(
            Distribution::from_map(vec![(1, 0.0), (2, 0.0)]),
            Err(DistError::DegenerateDistribution)
        );
        assert_eq!(
            Distribution::<i32>::from_map(vec![]),
            Err(DistError::DegenerateDistribution)
        );
        assert_eq!(
            Distribution::from_map(vec![(1, f64::INFINITY)]),
            Err(DistError::DegenerateDistribution)
        );
        assert!(matches!(
            Distribution::from_map(vec![(1, -1.0), (2, 2.0)]),
            Err(DistError::InvalidParameter(_))
        ));
    }

    #[test]
    fn ranked_shapes() {
        let uniform = Distribution::uniform(vec!['a', 'b', 'c', 'd']).unwrap();
        for c in &['a', 'b', 'c', 'd'] {
            assert!(approx_eq!(f64, uniform.probability(c), 0.25, epsilon = 1e-12));
        }

        // ranks 1..=4 weigh 0.25, 0.5, 0.75, 1.0
        let linear = Distribution::linear(vec![1, 2, 3, 4]).unwrap();
        assert!(approx_eq!(f64, linear.probability(&1), 0.1, epsilon = 1e-12));
        assert!(approx_eq!(f64, linear.probability(&4), 0.4, epsilon = 1e-12));

        let nexp = Distribution::nexp(vec![1, 2]).unwrap();
        let (w1, w2) = ((-0.5_f64).exp(), (-1.0_f64).exp());
        assert!(approx_eq!(f64, nexp.probability(&1), w1 / (w1 + w2), epsilon = 1e-12));

        let normal = Distribution::normal_default(vec![1, 2, 3]).unwrap();
        assert!(normal.is_normalized());
        assert!(normal.probability(&2) > normal.probability(&3));
        assert!(normal.probability(&1) > normal.probability(&3));
        assert!(matches!(
            Distribution::normal(vec![1, 2], 0.5, 0.0),
            Err(DistError::InvalidParameter(_))
        ));
    }

    #[test]
    fn ranked_duplicates_accumulate() {
        let dist = Distribution::uniform(vec!["x", "y", "x", "x"]).unwrap();
        assert!(approx_eq!(f64, dist.probability(&"x"), 0.75, epsilon = 1e-12));
        assert!(approx_eq!(f64, dist.probability(&"y"), 0.25, epsilon = 1e-12));
    }

    #[test]
    fn ranked_failures() {
        assert!(matches!(
            Distribution::<u8>::uniform(vec![]),
            Err(DistError::InvalidParameter(_))
        ));
        assert!(matches!(
            Distribution::from_ranked(vec![1, 2], |x| x - 0.75),
            Err(DistError::InvalidParameter(_))
        ));
        assert_eq!(
            Distribution::with_shape(vec![1, 2], |_| 0.0),
            Err(DistError::DegenerateDistribution)
        );
    }

    #[test]
    fn shape_fn_domain() {
        let f = shape_fn(|_| 3.0);
        assert_eq!(f(-0.1), 0.0);
        assert_eq!(f(1.5), 0.0);
        assert_eq!(f(0.0), 3.0);
        assert_eq!(f(1.0), 3.0);
    }

    #[test]
    fn enumerated_weights() {
        let dist = Distribution::enumerated(vec!["spam", "ham"], &[102.0, 57.0]).unwrap();
        assert!(approx_eq!(f64, dist.probability(&"spam"), 102.0 / 159.0, epsilon = 1e-12));

        let seven: Vec<u32> = (0..7).collect();
        let weights = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let dist = Distribution::enumerated(seven, &weights).unwrap();
        assert!(approx_eq!(f64, dist.probability(&6), 7.0 / 28.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, dist.probability(&2), 3.0 / 28.0, epsilon = 1e-12));

        assert!(matches!(
            Distribution::enumerated(vec![1, 2, 3], &[0.5, 0.5]),
            Err(DistError::InvalidParameter(_))
        ));
    }

    #[test]
    fn counts() {
        let counts = histogram(vec!['a', 'b', 'a']);
        assert_eq!(counts[&'a'], 2);
        assert_eq!(counts[&'b'], 1);

        let dist = Distribution::from_counts(vec!['a', 'b', 'a', 'a']).unwrap();
        assert!(approx_eq!(f64, dist.probability(&'a'), 0.75, epsilon = 1e-12));
        assert!(matches!(
            Distribution::<char>::from_counts(vec![]),
            Err(DistError::InvalidParameter(_))
        ));
    }
}
