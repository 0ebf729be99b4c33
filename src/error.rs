use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),

    #[error(transparent)]
    Venue(#[from] VenueError),
}

/// The bundled airport catalog could not be turned into a usable
/// [`AirportCatalog`](crate::AirportCatalog). Callers treat this as fatal.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("airport catalog not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read airport catalog {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode airport catalog")]
    Decode(#[from] serde_json::Error),

    #[error("airport catalog contains no airports")]
    Empty,

    #[error("invalid airport entry #{index} ({code})")]
    InvalidRecord {
        index: usize,
        code: String,
        #[source]
        source: RecordError,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("{field} is not a decimal number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} is not finite: {value:?}")]
    NonFinite { field: &'static str, value: String },

    #[error("{field} {value} outside [{min}, {max}]")]
    OutOfBounds {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} is not an integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("airport has no floors")]
    NoFloors,

    #[error("default ordinal {ordinal} outside {floors} floors")]
    OrdinalOutOfRange { ordinal: usize, floors: usize },

    #[error("maximum ordinal {maximum} does not match {floors} floors")]
    MaximumOrdinalMismatch { maximum: usize, floors: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OutOfRangeError {
    #[error("airport index {index} out of range (catalog has {len})")]
    Index { index: usize, len: usize },

    #[error("floor ordinal {ordinal} out of range (airport has {floors} floors)")]
    Ordinal { ordinal: usize, floors: usize },
}

#[derive(Debug, Error)]
pub enum VenueError {
    #[error("venue assets missing at {}", path.display())]
    MissingAssets { path: PathBuf },

    #[error("venue {code} did not finish loading within {after:?}")]
    TimedOut { code: String, after: Duration },

    #[error("venue load for {code} superseded by a newer request")]
    Superseded { code: String },

    #[error("map adapter failed to load venue {code}: {message}")]
    Adapter { code: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_record_keeps_source() {
        let err = ConfigurationError::InvalidRecord {
            index: 2,
            code: "AMS".to_string(),
            source: RecordError::NoFloors,
        };

        assert_eq!(err.to_string(), "invalid airport entry #2 (AMS)");
        let source = err.source().expect("record error attached");
        assert_eq!(source.to_string(), "airport has no floors");
    }

    #[test]
    fn test_umbrella_error_is_transparent() {
        let err: Error = OutOfRangeError::Index { index: 5, len: 3 }.into();
        assert_eq!(
            err.to_string(),
            "airport index 5 out of range (catalog has 3)"
        );
    }
}
