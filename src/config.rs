//! Pace configuration.
//!
//! The file is found through a chain:
//!
//! 1. `--config <path>`
//! 2. the `PACE_CONFIG` environment variable
//! 3. `~/.pace/config.toml`
//!
//! An explicitly named file must exist. The home-directory file is optional
//! and defaults apply when it is missing.
//!
//! ```toml
//! hours-per-day = 7.5
//! hours-per-week = 37.5
//! holidays = ["2018-12-25", "2018-12-26"]
//!
//! [[off-days]]
//! first = "2018-08-06"
//! last = "2018-08-17"
//! ```

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarError, HolidayCalendar};
use crate::span::WorkWeek;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PACE_CONFIG";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

pub type Result<T> = core::result::Result<T, ConfigError>;

/// A closed range of days off, such as a vacation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffDays {
    pub first: Date,
    pub last: Date,
}

/// Pace configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub hours_per_day: f64,
    pub hours_per_week: f64,
    /// Single non-working dates on top of weekends.
    pub holidays: Vec<Date>,
    pub off_days: Vec<OffDays>,
}

impl Default for Config {
    fn default() -> Self {
        let week = WorkWeek::default();
        Self {
            hours_per_day: week.hours_per_day,
            hours_per_week: week.hours_per_week,
            holidays: Vec::new(),
            off_days: Vec::new(),
        }
    }
}

impl Config {
    /// Load config through the resolution chain.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = env::var(CONFIG_ENV).ok().filter(|v| !v.is_empty());
        match resolve_path(explicit, from_env, dirs::home_dir()) {
            Some(ConfigPath::Required(path)) => Self::load_from(&path),
            Some(ConfigPath::Optional(path)) if path.exists() => Self::load_from(&path),
            Some(ConfigPath::Optional(path)) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            None => {
                tracing::debug!("could not determine home directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.hours_per_day > 0.0 && self.hours_per_day <= 24.0) {
            return Err(ConfigError::Invalid(format!(
                "hours-per-day must be in (0, 24], got {}",
                self.hours_per_day
            )));
        }
        if !(self.hours_per_week >= self.hours_per_day && self.hours_per_week <= 168.0) {
            return Err(ConfigError::Invalid(format!(
                "hours-per-week must be between hours-per-day and 168, got {}",
                self.hours_per_week
            )));
        }
        if let Some(range) = self.off_days.iter().find(|r| r.first > r.last) {
            return Err(ConfigError::Invalid(format!(
                "off-days range {}..{} ends before it starts",
                range.first, range.last
            )));
        }
        Ok(())
    }

    pub fn work_week(&self) -> WorkWeek {
        WorkWeek {
            hours_per_day: self.hours_per_day,
            hours_per_week: self.hours_per_week,
        }
    }

    /// Weekends plus every configured holiday and off-day range.
    pub fn calendar(&self) -> Result<HolidayCalendar> {
        let mut calendar: HolidayCalendar = self.holidays.iter().copied().collect();
        for range in &self.off_days {
            calendar.insert_range(range.first, range.last)?;
        }
        Ok(calendar)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ConfigPath {
    /// Named by the user; missing is an error.
    Required(PathBuf),
    /// The home-directory default; missing means defaults.
    Optional(PathBuf),
}

fn resolve_path(
    explicit: Option<&Path>,
    from_env: Option<String>,
    home: Option<PathBuf>,
) -> Option<ConfigPath> {
    if let Some(path) = explicit {
        return Some(ConfigPath::Required(path.to_path_buf()));
    }
    if let Some(path) = from_env {
        return Some(ConfigPath::Required(PathBuf::from(path)));
    }
    home.map(|h| ConfigPath::Optional(default_path_in(&h)))
}

fn default_path_in(home: &Path) -> PathBuf {
    home.join(".pace").join("config.toml")
}
