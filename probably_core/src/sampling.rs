use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::{DistError, Distribution, Mass};

/// Explicit random source consumed by [`Distribution::pick`].
///
/// Every draw goes through an owned generator, there is no hidden global
/// state; two samplers built with the same seed produce the same picks.
#[derive(Clone)]
pub struct Sampler {
    inner: StdRng,
    seed: Option<u64>,
}

impl Sampler {
    pub fn seeded(seed: u64) -> Sampler {
        Sampler {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Sampler {
        Sampler {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded from `PROBABLY_SEED` when it is set, from OS entropy otherwise.
    pub fn from_config() -> Sampler {
        match Config::global().seed {
            Some(seed) => {
                log::debug!("sampler seeded from configuration: {}", seed);
                Sampler::seeded(seed)
            }
            None => Sampler::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Draws `n` outcomes from `dist`, each one independently.
    pub fn draw_many<T>(&mut self, dist: &Distribution<T>, n: usize) -> Result<Vec<T>, DistError>
    where
        T: Ord + Clone,
    {
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            let (outcome, _): (&T, Mass) = dist.pick(self)?;
            drawn.push(outcome.clone());
        }
        Ok(drawn)
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.seed {
            Some(seed) => write!(f, "Sampler(seed = {})", seed),
            None => write!(f, "Sampler"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let mut a = Sampler::seeded(42);
        let mut b = Sampler::seeded(42);
        for _ in 0..100 {
            let (x, y) = (a.uniform(), b.uniform());
            assert_eq!(x.to_bits(), y.to_bits());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn draw_many_follows_masses() {
        let dist = Distribution::from_map(vec![("a", 0.2), ("b", 0.8)]).unwrap();
        let mut rng = Sampler::seeded(7);
        let drawn = rng.draw_many(&dist, 10_000).unwrap();
        let freq = Distribution::from_counts(drawn).unwrap();
        assert!((freq.probability(&"b") - 0.8).abs() < 0.02);
        assert_eq!(format!("{:?}", rng), "Sampler(seed = 7)");
    }
}
