//! Error types for the fallible edges of the picker: bound windows, date
//! strings supplied by configuration, and config loading.

use std::path::PathBuf;

use crate::calendar::CalendarDate;

/// A string that is not a canonical `DD Mon YYYY` date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {input:?}, expected DD Mon YYYY")]
pub struct DateParseError {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    /// Returned when the minimum date lies after the maximum date.
    #[error("minimum date {min} is after maximum date {max}")]
    Inverted { min: CalendarDate, max: CalendarDate },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid bounds for {field}")]
    Bounds {
        field: &'static str,
        #[source]
        source: BoundsError,
    },

    #[error(transparent)]
    Date(#[from] DateParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parse_error_message() {
        let e = DateParseError {
            input: "2025-06-01".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid date \"2025-06-01\", expected DD Mon YYYY"
        );
    }

    #[test]
    fn inverted_bounds_message() {
        let e = BoundsError::Inverted {
            min: CalendarDate::new(2025, 7, 1).expect("date"),
            max: CalendarDate::new(2025, 6, 1).expect("date"),
        };
        assert_eq!(
            e.to_string(),
            "minimum date 01 Jul 2025 is after maximum date 01 Jun 2025"
        );
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<DateParseError>();
        assert_impl::<BoundsError>();
        assert_impl::<ConfigError>();
    }
}
