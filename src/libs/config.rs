//! Application configuration.
//!
//! Settings are stored as pretty-printed JSON in `config.json` inside the
//! platform data directory. A missing file means defaults, and every section
//! falls back to its defaults when absent, so older files keep loading after
//! new settings are added.
//!
//! Two environment variables (also read from a `.env` file in `main`)
//! override the file: `VIDEOSTORE_DB_PATH` and `VIDEOSTORE_REPORTS_DIR`.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::money::Money;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "videostore.db";
pub const REPORTS_DIR_NAME: &str = "reports";
pub const ENV_DB_PATH: &str = "VIDEOSTORE_DB_PATH";
pub const ENV_REPORTS_DIR: &str = "VIDEOSTORE_REPORTS_DIR";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; `None` resolves to `videostore.db` in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub busy_timeout_ms: u64,
    pub foreign_keys: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: 5000,
            foreign_keys: true,
        }
    }
}

impl DatabaseConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn resolved_path(&self) -> std::io::Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }
}

/// Business rule parameters for rentals and catalogue validation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RentalPolicy {
    pub late_fee_per_day: Money,
    pub default_rental_days: u32,
    /// Oldest accepted release year.
    pub min_release_year: i32,
    /// How many years past the current one a release year may be.
    pub max_years_ahead: i32,
}

impl Default for RentalPolicy {
    fn default() -> Self {
        Self {
            late_fee_per_day: Money::from_cents(200),
            default_rental_days: 7,
            min_release_year: 1888,
            max_years_ahead: 5,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub top_movies: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            top_movies: 10,
        }
    }
}

impl ReportConfig {
    pub fn resolved_dir(&self) -> std::io::Result<PathBuf> {
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => DataStorage::new().base_path().join(REPORTS_DIR_NAME),
        };
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub rentals: RentalPolicy,
    pub reports: ReportConfig,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        Ok(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    /// Reads the stored configuration, or defaults when there is none.
    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Stored configuration with environment overrides applied.
    pub fn load() -> Result<Config> {
        let mut config = Self::read()?;
        config.apply_env();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|v| !v.trim().is_empty()) {
            self.database.path = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup(ENV_REPORTS_DIR).filter(|v| !v.trim().is_empty()) {
            self.reports.output_dir = Some(PathBuf::from(dir));
        }
    }

    /// Interactive setup wizard. Current values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let theme = ColorfulTheme::default();

        let sections = [Message::ConfigModuleDatabase, Message::ConfigModuleRentals, Message::ConfigModuleReports];
        let selected = MultiSelect::with_theme(&theme)
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&sections.iter().map(|s| s.to_string()).collect::<Vec<_>>())
            .interact()?;

        for index in selected {
            match index {
                0 => {
                    msg_print!(Message::ConfigModuleDatabase);
                    let current = config.database.path.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
                    let path: String = Input::with_theme(&theme)
                        .with_prompt(Message::PromptDatabasePath.to_string())
                        .default(current)
                        .allow_empty(true)
                        .interact_text()?;
                    config.database.path = Some(path.trim()).filter(|p| !p.is_empty()).map(PathBuf::from);
                    config.database.busy_timeout_ms = Input::with_theme(&theme)
                        .with_prompt(Message::PromptBusyTimeout.to_string())
                        .default(config.database.busy_timeout_ms)
                        .interact_text()?;
                }
                1 => {
                    msg_print!(Message::ConfigModuleRentals);
                    let fee: String = Input::with_theme(&theme)
                        .with_prompt(Message::PromptLateFeePerDay.to_string())
                        .default(format!("{:.2}", config.rentals.late_fee_per_day.as_f64()))
                        .validate_with(|input: &String| -> std::result::Result<(), String> {
                            match input.parse::<Money>() {
                                Ok(m) if !m.is_negative() => Ok(()),
                                _ => Err(Message::InvalidAmount(input.clone()).to_string()),
                            }
                        })
                        .interact_text()?;
                    config.rentals.late_fee_per_day = fee.parse::<Money>()?;
                    config.rentals.default_rental_days = Input::with_theme(&theme)
                        .with_prompt(Message::PromptDefaultRentalDays.to_string())
                        .default(config.rentals.default_rental_days)
                        .validate_with(|days: &u32| -> std::result::Result<(), String> {
                            if *days == 0 {
                                Err(Message::InvalidNumber(days.to_string()).to_string())
                            } else {
                                Ok(())
                            }
                        })
                        .interact_text()?;
                    config.rentals.min_release_year = Input::with_theme(&theme)
                        .with_prompt(Message::PromptMinReleaseYear.to_string())
                        .default(config.rentals.min_release_year)
                        .interact_text()?;
                    config.rentals.max_years_ahead = Input::with_theme(&theme)
                        .with_prompt(Message::PromptMaxYearsAhead.to_string())
                        .default(config.rentals.max_years_ahead)
                        .interact_text()?;
                }
                2 => {
                    msg_print!(Message::ConfigModuleReports);
                    let current = config.reports.output_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
                    let dir: String = Input::with_theme(&theme)
                        .with_prompt(Message::PromptReportsDir.to_string())
                        .default(current)
                        .allow_empty(true)
                        .interact_text()?;
                    config.reports.output_dir = Some(dir.trim()).filter(|d| !d.is_empty()).map(PathBuf::from);
                    config.reports.top_movies = Input::with_theme(&theme)
                        .with_prompt(Message::PromptTopMovies.to_string())
                        .default(config.reports.top_movies)
                        .interact_text()?;
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
