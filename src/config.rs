use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CATALOG_FILE: &str = "Maps/AirportMapsConfiguration.json";
pub const DEFAULT_VENUE_DIR: &str = "Maps/AVF";
pub const DEFAULT_VENUE_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the bundled resources live and how long a venue load may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapsConfig {
    pub resource_root: PathBuf,
    /// Catalog location relative to `resource_root`, unless absolute.
    pub catalog_file: PathBuf,
    /// Parent of the per-airport venue folders, relative to `resource_root`.
    pub venue_dir: PathBuf,
    pub venue_timeout: Duration,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self::from_root(".")
    }
}

impl MapsConfig {
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        Self {
            resource_root: root.as_ref().to_path_buf(),
            catalog_file: PathBuf::from(DEFAULT_CATALOG_FILE),
            venue_dir: PathBuf::from(DEFAULT_VENUE_DIR),
            venue_timeout: DEFAULT_VENUE_TIMEOUT,
        }
    }

    pub fn with_catalog_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_file = path.into();
        self
    }

    pub fn with_venue_timeout(mut self, timeout: Duration) -> Self {
        self.venue_timeout = timeout;
        self
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.resource_root.join(&self.catalog_file)
    }

    /// Venue folder for an airport code, e.g. `<root>/Maps/AVF/AMS`.
    pub fn venue_path(&self, code: &str) -> PathBuf {
        self.resource_root.join(&self.venue_dir).join(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = MapsConfig::from_root("/bundle");

        assert_eq!(
            config.catalog_path(),
            PathBuf::from("/bundle/Maps/AirportMapsConfiguration.json")
        );
        assert_eq!(config.venue_path("AMS"), PathBuf::from("/bundle/Maps/AVF/AMS"));
        assert_eq!(config.venue_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_absolute_catalog_override() {
        let config = MapsConfig::from_root("/bundle").with_catalog_file("/tmp/airports.json");
        assert_eq!(config.catalog_path(), PathBuf::from("/tmp/airports.json"));
    }
}
