use std::hash::{Hash, Hasher};

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{OutOfRangeError, RecordError};

/// One airport as it appears in the bundled catalog file.
///
/// Numeric values are stored as strings in the source format and are only
/// interpreted by [`AirportRecord::from_entry`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportEntry {
    #[serde(alias = "name")]
    pub airport_name: String,
    #[serde(alias = "code")]
    pub airport_code: String,
    #[serde(alias = "city", default)]
    pub airport_city: String,
    #[serde(alias = "country", default)]
    pub airport_country: String,
    #[serde(alias = "latitude")]
    pub airport_latitude: String,
    #[serde(alias = "longitude")]
    pub airport_longitude: String,
    #[serde(alias = "radius")]
    pub airport_radius: String,
    #[serde(alias = "ordinal")]
    pub airport_ordinal: String,
    #[serde(alias = "maximumOrdinal")]
    pub airport_maximum_ordinal: String,
    #[serde(alias = "ordinalNames")]
    pub airport_ordinal_names: Vec<String>,
}

/// Map viewport: centre coordinate plus latitude/longitude span in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// A validated airport.
///
/// Equality and hashing ignore [`identifier`](Self::identifier), which only
/// exists to key rows in a list view.
#[derive(Debug, Clone)]
pub struct AirportRecord {
    identifier: Uuid,
    name: String,
    code: String,
    city: String,
    country: String,
    latitude: f64,
    longitude: f64,
    radius: f64,
    ordinal: usize,
    maximum_ordinal: usize,
    ordinal_names: Vec<String>,
}

impl AirportRecord {
    /// Validates a raw catalog entry. Every numeric string must parse and the
    /// floor fields must agree with `ordinal_names`.
    pub fn from_entry(entry: AirportEntry) -> Result<Self, RecordError> {
        let latitude = parse_degrees("latitude", &entry.airport_latitude)?;
        check_bounds("latitude", latitude, -90.0, 90.0)?;
        let longitude = parse_degrees("longitude", &entry.airport_longitude)?;
        check_bounds("longitude", longitude, -180.0, 180.0)?;
        let radius = parse_degrees("radius", &entry.airport_radius)?;
        if radius <= 0.0 {
            return Err(RecordError::OutOfBounds {
                field: "radius",
                value: radius,
                min: 0.0,
                max: f64::MAX,
            });
        }

        let ordinal = parse_ordinal("ordinal", &entry.airport_ordinal)?;
        let maximum_ordinal = parse_ordinal("maximumOrdinal", &entry.airport_maximum_ordinal)?;
        let floors = entry.airport_ordinal_names.len();

        if floors == 0 {
            return Err(RecordError::NoFloors);
        }
        if ordinal >= floors {
            return Err(RecordError::OrdinalOutOfRange { ordinal, floors });
        }
        // floors > 0 here, so this cannot underflow.
        if maximum_ordinal != floors - 1 {
            return Err(RecordError::MaximumOrdinalMismatch {
                maximum: maximum_ordinal,
                floors,
            });
        }

        Ok(Self {
            identifier: Uuid::new_v4(),
            name: entry.airport_name,
            code: entry.airport_code,
            city: entry.airport_city,
            country: entry.airport_country,
            latitude,
            longitude,
            radius,
            ordinal,
            maximum_ordinal,
            ordinal_names: entry.airport_ordinal_names,
        })
    }

    pub fn identifier(&self) -> Uuid {
        self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Airport code; also names the venue asset folder.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Span in degrees used for both axes of the display region.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Floor shown when a session opens.
    pub fn default_ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn maximum_ordinal(&self) -> usize {
        self.maximum_ordinal
    }

    pub fn ordinal_names(&self) -> &[String] {
        &self.ordinal_names
    }

    pub fn floor_count(&self) -> usize {
        self.ordinal_names.len()
    }

    pub fn display_region(&self) -> Region {
        Region {
            center_latitude: self.latitude,
            center_longitude: self.longitude,
            latitude_delta: self.radius,
            longitude_delta: self.radius,
        }
    }

    pub fn floor_name(&self, ordinal: usize) -> Result<&str, OutOfRangeError> {
        self.ordinal_names
            .get(ordinal)
            .map(String::as_str)
            .ok_or(OutOfRangeError::Ordinal {
                ordinal,
                floors: self.ordinal_names.len(),
            })
    }

    pub fn check_ordinal(&self, ordinal: usize) -> Result<usize, OutOfRangeError> {
        self.floor_name(ordinal).map(|_| ordinal)
    }
}

impl PartialEq for AirportRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.code == other.code
            && self.city == other.city
            && self.country == other.country
            && self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
            && self.radius.to_bits() == other.radius.to_bits()
            && self.ordinal == other.ordinal
            && self.maximum_ordinal == other.maximum_ordinal
            && self.ordinal_names == other.ordinal_names
    }
}

// Floats are finite after validation and compared bitwise above.
impl Eq for AirportRecord {}

impl Hash for AirportRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.code.hash(state);
        self.city.hash(state);
        self.country.hash(state);
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
        self.radius.to_bits().hash(state);
        self.ordinal.hash(state);
        self.maximum_ordinal.hash(state);
        self.ordinal_names.hash(state);
    }
}

fn parse_degrees(field: &'static str, value: &str) -> Result<f64, RecordError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| RecordError::InvalidNumber {
            field,
            value: value.to_string(),
        })?;

    if !parsed.is_finite() {
        return Err(RecordError::NonFinite {
            field,
            value: value.to_string(),
        });
    }

    Ok(parsed)
}

fn check_bounds(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), RecordError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(RecordError::OutOfBounds {
            field,
            value,
            min,
            max,
        })
    }
}

fn parse_ordinal(field: &'static str, value: &str) -> Result<usize, RecordError> {
    value
        .trim()
        .parse()
        .map_err(|_| RecordError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}
