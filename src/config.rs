use crate::error::{config_error, ScheduleResult};
use crate::models::WorkingHours;
use crate::schedule::{SlotSettings, DEFAULT_SLOT_MINUTES};
use crate::time::parse_time_of_day;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Default location of the configuration file
pub const CONFIG_FILE: &str = "config/medimate.toml";

/// Doctor shown when the dashboard opens
pub const DEFAULT_DOCTOR: &str = "d1";

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IANA time zone of the viewer; system local time when unset
    pub timezone: Option<String>,
    /// Width of a schedule slot in minutes
    pub slot_minutes: i64,
    /// Grid window for doctors that are not in the directory
    pub default_hours: WorkingHours,
    /// Doctor selected at startup
    pub default_doctor: String,
    /// JSON dataset to load instead of generated mock data
    pub data_file: Option<PathBuf>,
    /// Number of days of mock appointments, starting today
    pub mock_days: u32,
    /// Seed for mock data; random when unset
    pub mock_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timezone: None,
            slot_minutes: DEFAULT_SLOT_MINUTES,
            default_hours: WorkingHours::default(),
            default_doctor: DEFAULT_DOCTOR.to_string(),
            data_file: None,
            mock_days: 14,
            mock_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment
    pub fn load() -> ScheduleResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = match fs::read_to_string(CONFIG_FILE) {
            Ok(content) => toml::from_str::<Config>(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(e.into()),
        };

        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> ScheduleResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `MEDIMATE_*` overrides. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> ScheduleResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(timezone) = var("MEDIMATE_TIMEZONE") {
            self.timezone = Some(timezone);
        }

        if let Some(minutes) = var("MEDIMATE_SLOT_MINUTES") {
            self.slot_minutes = minutes
                .trim()
                .parse::<i64>()
                .map_err(|_| config_error("Invalid MEDIMATE_SLOT_MINUTES format"))?;
        }

        let day_start = var("MEDIMATE_DAY_START");
        let day_end = var("MEDIMATE_DAY_END");
        if day_start.is_some() || day_end.is_some() {
            let start = match day_start {
                Some(value) => parse_time_of_day(&value)?,
                None => self.default_hours.start,
            };
            let end = match day_end {
                Some(value) => parse_time_of_day(&value)?,
                None => self.default_hours.end,
            };
            self.default_hours = WorkingHours::new(start, end)?;
        }

        if let Some(doctor) = var("MEDIMATE_DEFAULT_DOCTOR") {
            self.default_doctor = doctor;
        }

        if let Some(path) = var("MEDIMATE_DATA_FILE") {
            self.data_file = Some(PathBuf::from(path));
        }

        if let Some(days) = var("MEDIMATE_MOCK_DAYS") {
            self.mock_days = days
                .trim()
                .parse::<u32>()
                .map_err(|_| config_error("Invalid MEDIMATE_MOCK_DAYS format"))?;
        }

        if let Some(seed) = var("MEDIMATE_MOCK_SEED") {
            self.mock_seed = Some(
                seed.trim()
                    .parse::<u64>()
                    .map_err(|_| config_error("Invalid MEDIMATE_MOCK_SEED format"))?,
            );
        }

        Ok(())
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        if self.slot_minutes <= 0 {
            return Err(config_error("slot_minutes must be positive"));
        }
        self.timezone()?;
        Ok(())
    }

    /// The configured time zone, or `None` for system local time
    pub fn timezone(&self) -> ScheduleResult<Option<chrono_tz::Tz>> {
        match &self.timezone {
            None => Ok(None),
            Some(name) => name
                .trim()
                .parse::<chrono_tz::Tz>()
                .map(Some)
                .map_err(|e| config_error(&format!("Unknown time zone '{}': {}", name, e))),
        }
    }

    pub fn slot_settings(&self) -> SlotSettings {
        SlotSettings {
            step_minutes: self.slot_minutes,
            default_hours: self.default_hours,
        }
    }
}
