use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::clock::{DayZone, SystemClock};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown timezone `{0}`")]
    InvalidTimezone(String),
}

#[derive(Deserialize, Debug, Default)]
pub struct RegistrySettings {
    /// IANA zone name used to evaluate "today". The process local zone when unset.
    pub timezone: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub registry: RegistrySettings,
}

impl AppSettings {
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn day_zone(&self) -> Result<DayZone, SettingsError> {
        match &self.registry.timezone {
            None => Ok(DayZone::Local),
            Some(name) => name
                .parse()
                .map(DayZone::Named)
                .map_err(|_| SettingsError::InvalidTimezone(name.clone())),
        }
    }

    pub fn clock(&self) -> Result<SystemClock, SettingsError> {
        Ok(SystemClock::new(self.day_zone()?))
    }
}
