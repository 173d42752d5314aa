//! YAML configuration for the booking form.
//!
//! ```yaml
//! title: Book your trip
//! week_start: sunday
//! departure:
//!   label: Departure
//!   min_date: 01 Jun 2025
//! return:
//!   label: Return
//!   max_date: 31 Dec 2025
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::calendar::{CalendarDate, WeekStart};
use crate::error::{BoundsError, ConfigError, DateParseError};
use crate::picker::{Bounds, PickerProps};

/// Top-level booking form configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub week_start: WeekStart,

    #[serde(default = "default_departure")]
    pub departure: FieldConfig,

    #[serde(default = "default_return", rename = "return")]
    pub return_trip: FieldConfig,

    /// Keep the return date's floor on the chosen departure date.
    #[serde(default = "default_true")]
    pub link_return_to_departure: bool,
}

/// One date field of the form.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub min_date: Option<CalendarDate>,
    #[serde(default)]
    pub max_date: Option<CalendarDate>,
    #[serde(default)]
    pub disabled: bool,
}

fn default_title() -> String {
    "Book your bus trip".to_string()
}

fn default_departure() -> FieldConfig {
    FieldConfig::labeled("Departure")
}

fn default_return() -> FieldConfig {
    FieldConfig::labeled("Return")
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            week_start: WeekStart::default(),
            departure: default_departure(),
            return_trip: default_return(),
            link_return_to_departure: true,
        }
    }
}

impl FieldConfig {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            placeholder: None,
            min_date: None,
            max_date: None,
            disabled: false,
        }
    }

    pub fn props(&self, week_start: WeekStart) -> PickerProps {
        PickerProps {
            value: self.value.clone(),
            min_date: self.min_date,
            max_date: self.max_date,
            disabled: self.disabled,
            week_start,
        }
    }

    /// Initial value must be empty or a canonical date.
    fn check_value(&self) -> Result<(), DateParseError> {
        if self.value.trim().is_empty() {
            return Ok(());
        }
        self.value.parse::<CalendarDate>().map(|_| ())
    }

    fn check_bounds(&self) -> Result<(), BoundsError> {
        match self.min_date {
            Some(min) => Bounds::new(min, self.max_date).map(|_| ()),
            None => Ok(()),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text, path)?;
        tracing::info!(path = %path.display(), "loaded booking config");
        Ok(config)
    }

    pub fn from_yaml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.departure
            .check_bounds()
            .map_err(|source| ConfigError::Bounds {
                field: "departure",
                source,
            })?;
        self.return_trip
            .check_bounds()
            .map_err(|source| ConfigError::Bounds {
                field: "return",
                source,
            })?;
        self.departure.check_value()?;
        self.return_trip.check_value()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_yaml(text, Path::new("test.yaml"))
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = parse("{}").expect("config");
        assert_eq!(config.title, "Book your bus trip");
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.departure.label, "Departure");
        assert_eq!(config.return_trip.label, "Return");
        assert!(config.link_return_to_departure);
    }

    #[test]
    fn parses_fields_and_dates() {
        let config = parse(
            "week_start: sunday\n\
             departure:\n  label: Outbound\n  value: 15 Jun 2025\n  min_date: 01 Jun 2025\n\
             return:\n  label: Inbound\n  max_date: 31 Dec 2025\n  disabled: true\n",
        )
        .expect("config");
        assert_eq!(config.week_start, WeekStart::Sunday);
        let props = config.departure.props(config.week_start);
        assert_eq!(props.value, "15 Jun 2025");
        assert_eq!(props.min_date, CalendarDate::new(2025, 6, 1));
        assert_eq!(props.week_start, WeekStart::Sunday);
        assert_eq!(config.return_trip.max_date, CalendarDate::new(2025, 12, 31));
        assert!(config.return_trip.disabled);
    }

    #[test]
    fn rejects_bad_date_strings() {
        let err = parse("departure:\n  label: D\n  min_date: 2025-06-01\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(parse("colour: blue\n").is_err());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = parse(
            "return:\n  label: R\n  min_date: 01 Jul 2025\n  max_date: 01 Jun 2025\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Bounds { field: "return", .. }));
    }

    #[test]
    fn rejects_non_canonical_initial_value() {
        let err = parse("departure:\n  label: D\n  value: 2025-06-15\n").unwrap_err();
        assert!(matches!(err, ConfigError::Date(_)));
    }

    #[test]
    fn rejects_years_past_four_digits() {
        let err = parse("departure:\n  label: D\n  value: 01 Dec 2147483647\n").unwrap_err();
        assert!(matches!(err, ConfigError::Date(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
