//! Probably
//!
//! Runs the bundled probabilistic models and prints their distributions.

use std::convert::TryFrom;
use std::fmt::Display;

use log::{debug, info};
use probably_core::config::tracing::Logger;
use probably_core::{DistError, Distribution, Sampler};
use probably_models::alarm::{self, Evidence};
use probably_models::monty_hall;
use probably_models::screening::{Screening, TestResult};
use probably_models::spam::{SpamClassifier, SpamKnowledge, Strategy};
use thiserror::Error;

const SCENARIOS: &[&str] = &["screening", "monty-hall", "alarm", "spam", "all"];

const SPAM_CORPUS: &[&[&str]] = &[
    &["free"],
    &["monad"],
    &["free", "asdf", "bayes", "quick", "jump", "test"],
    &["free", "monad", "asdf", "bayes", "quick", "jump", "test"],
];

#[derive(Debug, Error)]
enum ScenarioError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("`{key}` out of range: {value}")]
    OutOfRange { key: &'static str, value: i64 },
    #[error(transparent)]
    Dist(#[from] DistError),
}

struct Settings {
    screening: Screening,
    spam_classifiers: usize,
    samples: usize,
    seed: Option<u64>,
}

/// `seed` is optional, the sampler falls back to OS entropy without it.
fn seed_from(settings: &config::Config) -> Result<Option<u64>, ScenarioError> {
    match settings.get_int("seed") {
        Ok(value) => u64::try_from(value)
            .map(Some)
            .map_err(|_| ScenarioError::OutOfRange { key: "seed", value }),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl Settings {
    fn load_conf() -> Result<Settings, ScenarioError> {
        let mut settings = config::Config::new();
        settings
            .set_default("screening_prevalence", 0.001)?
            .set_default("screening_sensitivity", 0.99)?
            .set_default("screening_false_positive", 0.01)?
            .set_default("spam_classifiers", 15_i64)?
            .set_default("samples", 10_i64)?;
        settings.merge(config::Environment::with_prefix("PROBABLY"))?;

        let screening = Screening::new(
            settings.get_float("screening_prevalence")?,
            settings.get_float("screening_sensitivity")?,
            settings.get_float("screening_false_positive")?,
        )?;
        let count = |key: &'static str| -> Result<usize, ScenarioError> {
            let value = settings.get_int(key)?;
            usize::try_from(value).map_err(|_| ScenarioError::OutOfRange { key, value })
        };

        Ok(Settings {
            screening,
            spam_classifiers: count("spam_classifiers")?,
            samples: count("samples")?,
            seed: seed_from(&settings)?,
        })
    }

    fn sampler(&self) -> Sampler {
        match self.seed {
            Some(seed) => Sampler::seeded(seed),
            None => Sampler::from_entropy(),
        }
    }
}

fn print_dist<T: Ord + Clone + Display>(title: &str, dist: &Distribution<T>) {
    println!("{}:\n{}", title, dist);
}

fn screening(settings: &Settings) -> Result<(), ScenarioError> {
    let test = &settings.screening;
    print_dist("P(condition, result)", &test.joint()?.map(|(c, r)| format!("{} {}", c, r)));
    for observed in &[TestResult::Positive, TestResult::Negative] {
        let posterior = test.posterior_by_condition(*observed)?;
        print_dist(&format!("P(condition | {})", observed), &posterior);
    }
    Ok(())
}

fn game_show() -> Result<(), ScenarioError> {
    let game = monty_hall::opened()?;
    print_dist("stay", &monty_hall::winner(&monty_hall::stay(&game)?));
    print_dist("switch", &monty_hall::winner(&monty_hall::switch(&game)?));
    Ok(())
}

fn alarm_network() -> Result<(), ScenarioError> {
    let calls = Evidence::calls();
    let burglary = |w: &alarm::World| if w.burglary { "burglary" } else { "no burglary" };
    print_dist("P(B | J, M), joint then filter", &alarm::joint_filtered(&calls, burglary)?);
    print_dist("P(B | J, M), conditioned", &alarm::conditioned(&calls, burglary)?);
    print_dist("P(B | J, M), event conditioned", &alarm::event_conditioned(&calls, burglary)?);
    print_dist("P(B | J, M), paired", &alarm::paired(&calls, burglary)?);

    let quiet = Evidence {
        earthquake: Some(false),
        alarm: Some(true),
        ..calls
    };
    print_dist("P(B | J, M, !E, A)", &alarm::conditioned(&quiet, burglary)?);
    Ok(())
}

fn spam(settings: &Settings) -> Result<(), ScenarioError> {
    for strategy in &[Strategy::NaiveBayes, Strategy::Fisher] {
        let classifier = SpamClassifier::new(SpamKnowledge::base(), *strategy)?;
        for words in SPAM_CORPUS {
            let posterior = classifier.p_msg_type_by_words(words, settings.spam_classifiers)?;
            print_dist(&format!("{:?} {:?}", strategy, words), &posterior);
        }
    }
    Ok(())
}

fn sampling(settings: &Settings) -> Result<(), ScenarioError> {
    let mut rng = settings.sampler();
    let dice = Distribution::uniform(1..=6)?;
    let draws = rng.draw_many(&dice, settings.samples)?;
    println!("{:?} draws of a die: {:?}", rng, draws);
    Ok(())
}

fn run(scenario: &str, settings: &Settings) -> Result<(), ScenarioError> {
    info!("running scenario `{}`", scenario);
    match scenario {
        "screening" => screening(settings),
        "monty-hall" => game_show(),
        "alarm" => alarm_network(),
        "spam" => spam(settings),
        _ => {
            screening(settings)?;
            game_show()?;
            alarm_network()?;
            spam(settings)?;
            sampling(settings)
        }
    }
}

fn main() {
    Logger::get_logger();
    let scenario = std::env::args().nth(1).unwrap_or_else(|| "all".to_owned());
    if !SCENARIOS.contains(&scenario.as_str()) {
        eprintln!("usage: probably [{}]", SCENARIOS.join("|"));
        std::process::exit(2);
    }

    let settings = match Settings::load_conf() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    debug!("showing {} samples", settings.samples);
    if let Err(err) = run(&scenario, &settings) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seed_setting() {
        let mut settings = config::Config::new();
        assert_eq!(seed_from(&settings).unwrap(), None);

        settings.set("seed", 42_i64).unwrap();
        assert_eq!(seed_from(&settings).unwrap(), Some(42));

        settings.set("seed", -1_i64).unwrap();
        assert!(matches!(
            seed_from(&settings),
            Err(ScenarioError::OutOfRange { key: "seed", .. })
        ));
    }

    #[test]
    fn seeded_settings_replay_draws() {
        let settings = Settings {
            screening: Screening::diagnosis(),
            spam_classifiers: 15,
            samples: 20,
            seed: Some(3),
        };
        let dice = Distribution::uniform(1..=6).unwrap();
        let first = settings.sampler().draw_many(&dice, settings.samples).unwrap();
        let second = settings.sampler().draw_many(&dice, settings.samples).unwrap();
        assert_eq!(first, second);
        assert_eq!(settings.sampler().seed(), Some(3));
    }
}
