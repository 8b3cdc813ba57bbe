// src/config/qs_config.rs

use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Immutable run configuration, constructed once at process start and
/// threaded by reference through the driver.
///
/// Defaults match the distilled constants this crate was built against
/// (`MAX_DIGITS`, `MAX_ITERATIONS`, `MIN_SMOOTHNESS_BOUND`, `SIEVE_INTERVAL`,
/// `MAX_SIEVE_INTERVAL`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QsConfig {
    /// Reject input with more decimal digits than this.
    pub max_digits: usize,

    /// Number of Miller-Rabin witnesses to try above the deterministic
    /// small-width threshold.
    pub miller_rabin_k: u32,

    /// Optional fixed seed for the Miller-Rabin witness RNG. `None` seeds
    /// from entropy.
    pub miller_rabin_seed: Option<u64>,

    /// Emit `info`/`debug` stage traces.
    pub verbose: bool,

    /// Treat "N is probably prime with no prior factors" as fatal instead of
    /// letting the driver proceed into a pointless sieve.
    pub exit_on_probable_prime: bool,

    /// Floor under the computed smoothness bound `B`.
    pub b_min: u64,

    /// Length of the first sieve window.
    pub initial_interval: u64,

    /// Sieve windows never grow past this length.
    pub max_interval: u64,

    /// Override Rayon's default thread pool size. `None` uses Rayon's
    /// default (one worker per logical core).
    pub threads: Option<usize>,
}

impl Default for QsConfig {
    fn default() -> Self {
        QsConfig {
            max_digits: 100,
            miller_rabin_k: 20,
            miller_rabin_seed: None,
            verbose: true,
            exit_on_probable_prime: true,
            b_min: 1_000,
            initial_interval: 10_000,
            max_interval: 10_000_000,
            threads: None,
        }
    }
}

impl QsConfig {
    /// Load configuration with precedence: defaults -> `qsieve.toml` (if
    /// present) -> `QS_`-prefixed environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults_builder()?;

        if Path::new("qsieve.toml").exists() {
            builder = builder.add_source(File::with_name("qsieve.toml"));
        } else if Path::new("qsieve.yaml").exists() {
            builder = builder.add_source(File::with_name("qsieve.yaml"));
        }

        builder = builder.add_source(
            Environment::with_prefix("QS")
                .separator("_")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Load configuration from an explicit file path, still layered under
    /// defaults and over environment variables.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults_builder()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(
            Environment::with_prefix("QS")
                .separator("_")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    fn defaults_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = QsConfig::default();
        Config::builder()
            .set_default("max_digits", defaults.max_digits as i64)?
            .set_default("miller_rabin_k", defaults.miller_rabin_k as i64)?
            .set_default("verbose", defaults.verbose)?
            .set_default("exit_on_probable_prime", defaults.exit_on_probable_prime)?
            .set_default("b_min", defaults.b_min as i64)?
            .set_default("initial_interval", defaults.initial_interval as i64)?
            .set_default("max_interval", defaults.max_interval as i64)
    }
}
