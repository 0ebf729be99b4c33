//! Loading and read access for the bundled airport catalog.
//!
//! The catalog is decoded once at startup and never mutated. Any decode or
//! validation failure rejects the whole catalog; there is no partial mode.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ConfigurationError, OutOfRangeError};
use crate::model::{AirportEntry, AirportRecord, Region};

#[derive(Debug, Clone)]
pub struct AirportCatalog {
    records: Vec<AirportRecord>,
}

impl AirportCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let catalog = Self::from_entries(read_entries(path)?)?;
        info!(
            "Loaded airport catalog: {} airports from {:?}",
            catalog.len(),
            path
        );

        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        let entries: Vec<AirportEntry> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let entries: Vec<AirportEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Validates entries in source order, stopping at the first invalid one.
    pub fn from_entries(entries: Vec<AirportEntry>) -> Result<Self, ConfigurationError> {
        if entries.is_empty() {
            return Err(ConfigurationError::Empty);
        }

        let records = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| -> Result<AirportRecord, ConfigurationError> {
                let code = entry.airport_code.clone();
                let record = AirportRecord::from_entry(entry).map_err(|source| {
                    ConfigurationError::InvalidRecord {
                        index,
                        code,
                        source,
                    }
                })?;
                debug!(
                    "Airport {} ({}): {} floors",
                    record.code(),
                    record.name(),
                    record.floor_count()
                );
                Ok(record)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    pub fn records(&self) -> &[AirportRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AirportRecord> {
        self.records.iter()
    }

    pub fn record_at(&self, index: usize) -> Result<&AirportRecord, OutOfRangeError> {
        self.records.get(index).ok_or(OutOfRangeError::Index {
            index,
            len: self.records.len(),
        })
    }

    pub fn region_for(&self, index: usize) -> Result<Region, OutOfRangeError> {
        self.record_at(index).map(AirportRecord::display_region)
    }

    pub fn by_identifier(&self, identifier: Uuid) -> Option<&AirportRecord> {
        self.records.iter().find(|r| r.identifier() == identifier)
    }

    /// Case-insensitive lookup by airport code, returning the list index too.
    pub fn find_by_code(&self, code: &str) -> Option<(usize, &AirportRecord)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| r.code().eq_ignore_ascii_case(code))
    }
}

impl<'a> IntoIterator for &'a AirportCatalog {
    type Item = &'a AirportRecord;
    type IntoIter = std::slice::Iter<'a, AirportRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Decodes the catalog resource at `path` without validating the entries.
pub fn read_entries(path: impl AsRef<Path>) -> Result<Vec<AirportEntry>, ConfigurationError> {
    let path = path.as_ref();
    let unreadable = |source| ConfigurationError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigurationError::Missing {
            path: path.to_path_buf(),
        },
        _ => unreadable(source),
    })?;
    // Opening a directory succeeds on Unix; reading it does not.
    if file.metadata().map_err(unreadable)?.is_dir() {
        return Err(unreadable(io::Error::other("is a directory")));
    }

    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Validates every entry and reports all failures instead of only the first.
pub fn diagnose(entries: &[AirportEntry]) -> Vec<ConfigurationError> {
    if entries.is_empty() {
        return vec![ConfigurationError::Empty];
    }

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            AirportRecord::from_entry(entry.clone())
                .err()
                .map(|source| ConfigurationError::InvalidRecord {
                    index,
                    code: entry.airport_code.clone(),
                    source,
                })
        })
        .collect()
}
