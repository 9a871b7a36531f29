use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Default per-head cap on materialised occurrences for a single query.
pub const DEFAULT_MAX_INSTANCES: usize = 100_000;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub expansion: ExpansionLimits,
    pub logging: LoggingConfig,
}

/// Safety limits applied while rule heads enumerate occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExpansionLimits {
    pub max_instances: usize,
}

impl ExpansionLimits {
    /// ## Summary
    /// Creates limits with the given per-head instance cap.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if `max_instances` is zero.
    pub fn new(max_instances: usize) -> CoreResult<Self> {
        if max_instances == 0 {
            return Err(CoreError::InvalidConfiguration(
                "expansion.max_instances must be greater than zero".to_string(),
            ));
        }
        Ok(Self { max_instances })
    }
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            max_instances: DEFAULT_MAX_INSTANCES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `cadence.toml`. Environment variables use the `CADENCE_` prefix and `__`
    /// between nested keys, e.g. `CADENCE_EXPANSION__MAX_INSTANCES`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails,
    /// or if the resulting limits are invalid.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("expansion.max_instances", DEFAULT_MAX_INSTANCES as u64)?
            .set_default("logging.level", "info")?
            .add_source(
                config::Environment::with_prefix("CADENCE")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("cadence.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks invariants serde cannot express.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` when the expansion cap is zero.
    pub fn validate(&self) -> CoreResult<()> {
        ExpansionLimits::new(self.expansion.max_instances).map(|_| ())
    }

    /// ## Summary
    /// Returns the expansion limits schedules should be built with.
    #[must_use]
    pub const fn expansion_limits(&self) -> ExpansionLimits {
        self.expansion
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
