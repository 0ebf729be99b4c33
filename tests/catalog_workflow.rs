use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use airport_maps::{
    AirportCatalog, AirportSession, ConfigurationError, HeadlessMap, MapsConfig, VenueLoader,
};
use tempfile::TempDir;

fn bundled_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/AirportMapsConfiguration.json")
}

#[test]
fn test_bundled_catalog_is_consistent() {
    let catalog = AirportCatalog::load(bundled_catalog()).unwrap();
    assert!(!catalog.is_empty());

    for (index, record) in catalog.iter().enumerate() {
        assert_eq!(record.floor_count(), record.maximum_ordinal() + 1);
        assert!(record.default_ordinal() < record.floor_count());

        let region = catalog.region_for(index).unwrap();
        assert_eq!(region.latitude_delta, record.radius());
        assert_eq!(region.longitude_delta, record.radius());
    }
    assert!(catalog.record_at(catalog.len()).is_err());
}

#[tokio::test]
async fn test_browse_and_switch_floors() {
    let resources = TempDir::new().unwrap();
    let config = MapsConfig::from_root(resources.path())
        .with_catalog_file(bundled_catalog())
        .with_venue_timeout(Duration::from_secs(2));
    fs::create_dir_all(config.venue_path("AMS")).unwrap();

    let catalog = AirportCatalog::load(config.catalog_path()).unwrap();
    let (index, record) = catalog.find_by_code("AMS").unwrap();
    assert_eq!(index, 0);

    let map = Arc::new(HeadlessMap::new(resources.path().join(&config.venue_dir)));
    let loader = VenueLoader::new(map.clone(), config.venue_timeout);
    let mut session = AirportSession::open(record.clone(), map.clone());

    session.show(&loader).await.unwrap();
    assert_eq!(map.viewport().floor, Some(0));
    assert_eq!(map.viewport().region, Some(catalog.region_for(index).unwrap()));

    session.select_floor(1).unwrap();
    assert_eq!(session.current_floor_name().unwrap(), "Departures");
    assert_eq!(map.viewport().floor, Some(1));
    assert!(session.select_floor(record.floor_count()).is_err());
}

#[test]
fn test_missing_catalog_is_fatal() {
    let resources = TempDir::new().unwrap();
    let config = MapsConfig::from_root(resources.path());

    assert!(matches!(
        AirportCatalog::load(config.catalog_path()),
        Err(ConfigurationError::Missing { .. })
    ));
}
