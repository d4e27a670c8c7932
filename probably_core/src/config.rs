//! Process wide settings read from the environment.
//!
//! - `PROBABLY_LOG_LEVEL`: log filter for the `env_logger` backend (default `info`).
//! - `PROBABLY_SEED`: seed used by [`Sampler::from_config`](crate::Sampler::from_config).

use log::LevelFilter;
use once_cell::sync::Lazy;
use std::str::FromStr;

static CONF: Lazy<Config> = Lazy::new(|| {
    let log_level = std::env::var("PROBABLY_LOG_LEVEL")
        .or_else::<std::env::VarError, _>(|_| Ok("info".to_owned()))
        .ok()
        .map(|l| LevelFilter::from_str(&l).unwrap_or(LevelFilter::Debug))
        .unwrap_or(LevelFilter::Debug);

    let seed = std::env::var("PROBABLY_SEED")
        .ok()
        .and_then(|s| u64::from_str(s.trim()).ok());

    Config { log_level, seed }
});

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub log_level: LevelFilter,
    pub seed: Option<u64>,
}

impl Config {
    pub fn global() -> &'static Config {
        Lazy::force(&CONF)
    }
}

pub mod tracing {
    use super::*;

    #[derive(Clone, Copy)]
    pub struct Logger;

    impl Logger {
        /// Installs the `env_logger` backend on first call; later calls are no-ops.
        pub fn get_logger() -> &'static Logger {
            Lazy::force(&LOGGER)
        }
    }

    #[allow(unused_must_use)]
    static LOGGER: Lazy<Logger> = Lazy::new(|| {
        env_logger::builder()
            .format_module_path(true)
            .format_timestamp_nanos()
            .target(env_logger::Target::Stdout)
            .filter(None, CONF.log_level)
            .try_init();

        Logger
    });
}
