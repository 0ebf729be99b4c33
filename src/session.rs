use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{OutOfRangeError, VenueError};
use crate::floor::{FloorObserver, FloorSelection};
use crate::model::{AirportRecord, Region};
use crate::venue::{MapPresentationAdapter, VenueLoader};

/// Recentres the map and switches its floor whenever the selection changes,
/// once the venue has been shown.
struct MapRefresh {
    adapter: Arc<dyn MapPresentationAdapter>,
    region: Region,
    venue_ready: Arc<AtomicBool>,
}

impl FloorObserver for MapRefresh {
    fn floor_changed(&self, ordinal: usize) {
        if !self.venue_ready.load(Ordering::Acquire) {
            debug!("Venue not shown yet, floor {} applied on show", ordinal);
            return;
        }
        self.adapter.center(&self.region);
        self.adapter.set_floor(ordinal);
    }
}

/// One "viewing an airport" session: the chosen airport and its floor.
///
/// Dropping the session ends it; the floor choice is not carried over to
/// other airports.
#[derive(Debug)]
pub struct AirportSession {
    record: AirportRecord,
    floor: FloorSelection,
    venue_ready: Arc<AtomicBool>,
}

impl AirportSession {
    /// Starts on the airport's default floor. The map is not touched until
    /// the venue is shown.
    pub fn open(record: AirportRecord, adapter: Arc<dyn MapPresentationAdapter>) -> Self {
        let ordinal = record.default_ordinal();
        Self::start(record, ordinal, adapter)
    }

    /// Starts on `ordinal` instead of the default floor.
    pub fn open_on_floor(
        record: AirportRecord,
        ordinal: usize,
        adapter: Arc<dyn MapPresentationAdapter>,
    ) -> Result<Self, OutOfRangeError> {
        let ordinal = record.check_ordinal(ordinal)?;
        Ok(Self::start(record, ordinal, adapter))
    }

    fn start(
        record: AirportRecord,
        ordinal: usize,
        adapter: Arc<dyn MapPresentationAdapter>,
    ) -> Self {
        let venue_ready = Arc::new(AtomicBool::new(false));
        let observer = Arc::new(MapRefresh {
            adapter,
            region: record.display_region(),
            venue_ready: venue_ready.clone(),
        });
        let floor = FloorSelection::new(ordinal, observer);
        info!(
            "Opened {} ({}) on floor {}",
            record.code(),
            record.name(),
            floor.current()
        );

        Self {
            record,
            floor,
            venue_ready,
        }
    }

    pub fn record(&self) -> &AirportRecord {
        &self.record
    }

    pub fn current_floor(&self) -> usize {
        self.floor.current()
    }

    pub fn current_floor_name(&self) -> Result<&str, OutOfRangeError> {
        self.record.floor_name(self.floor.current())
    }

    /// Whether a `show` has succeeded, so floor changes reach the map.
    pub fn is_shown(&self) -> bool {
        self.venue_ready.load(Ordering::Acquire)
    }

    /// `(ordinal, name)` pairs in floor order, for a floor picker.
    pub fn floors(&self) -> impl Iterator<Item = (usize, &str)> {
        self.record
            .ordinal_names()
            .iter()
            .enumerate()
            .map(|(ordinal, name)| (ordinal, name.as_str()))
    }

    /// Bounds-checked floor change. Once the venue is shown the map
    /// refreshes, even when `ordinal` is already current; before that the
    /// choice is only remembered for [`show`](Self::show).
    pub fn select_floor(&mut self, ordinal: usize) -> Result<(), OutOfRangeError> {
        let ordinal = self.record.check_ordinal(ordinal)?;
        self.floor.select(ordinal);
        Ok(())
    }

    /// Loads the venue and shows it on the current floor.
    pub async fn show(&self, loader: &VenueLoader) -> Result<(), VenueError> {
        loader.load(&self.record, self.floor.current()).await?;
        self.venue_ready.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AirportEntry;
    use crate::venue::{HeadlessMap, Viewport};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn schiphol(default_ordinal: &str) -> AirportRecord {
        AirportRecord::from_entry(AirportEntry {
            airport_name: "Amsterdam Airport Schiphol".to_string(),
            airport_code: "AMS".to_string(),
            airport_city: "Amsterdam".to_string(),
            airport_country: "Netherlands".to_string(),
            airport_latitude: "52.3".to_string(),
            airport_longitude: "4.76".to_string(),
            airport_radius: "0.05".to_string(),
            airport_ordinal: default_ordinal.to_string(),
            airport_maximum_ordinal: "2".to_string(),
            airport_ordinal_names: vec![
                "Arrivals".to_string(),
                "Departures".to_string(),
                "Lounge".to_string(),
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_opens_on_default_floor() {
        let map = Arc::new(HeadlessMap::new("/nowhere"));
        let session = AirportSession::open(schiphol("1"), map.clone());

        assert_eq!(session.current_floor(), 1);
        assert_eq!(session.current_floor_name().unwrap(), "Departures");
        assert_eq!(map.viewport().floor_changes, 0);
    }

    fn venue_root() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("AMS")).unwrap();
        temp_dir
    }

    #[test]
    fn test_select_floor_before_show_leaves_map_alone() {
        let map = Arc::new(HeadlessMap::new("/nowhere"));
        let mut session = AirportSession::open(schiphol("0"), map.clone());

        session.select_floor(2).unwrap();
        assert_eq!(session.current_floor(), 2);
        assert_eq!(session.current_floor_name().unwrap(), "Lounge");
        assert!(!session.is_shown());
        assert_eq!(map.viewport(), Viewport::default());
    }

    #[tokio::test]
    async fn test_select_floor_refreshes_map_once_shown() {
        let temp_dir = venue_root();
        let map = Arc::new(HeadlessMap::new(temp_dir.path()));
        let loader = VenueLoader::new(map.clone(), Duration::from_secs(1));
        let mut session = AirportSession::open(schiphol("0"), map.clone());

        session.show(&loader).await.unwrap();
        assert!(session.is_shown());
        assert_eq!(map.viewport().floor_changes, 1);

        session.select_floor(2).unwrap();
        session.select_floor(2).unwrap();
        let viewport = map.viewport();
        assert_eq!(viewport.floor, Some(2));
        assert_eq!(viewport.floor_changes, 3);
        assert_eq!(viewport.region, Some(session.record().display_region()));
    }

    #[test]
    fn test_open_on_floor() {
        let map = Arc::new(HeadlessMap::new("/nowhere"));
        let session = AirportSession::open_on_floor(schiphol("0"), 2, map.clone()).unwrap();

        assert_eq!(session.current_floor(), 2);
        assert_eq!(map.viewport().floor_changes, 0);
        assert_eq!(
            AirportSession::open_on_floor(schiphol("0"), 3, map).unwrap_err(),
            OutOfRangeError::Ordinal {
                ordinal: 3,
                floors: 3
            }
        );
    }

    #[test]
    fn test_select_floor_rejects_unknown_ordinal() {
        let map = Arc::new(HeadlessMap::new("/nowhere"));
        let mut session = AirportSession::open(schiphol("0"), map.clone());

        assert_eq!(
            session.select_floor(3),
            Err(OutOfRangeError::Ordinal {
                ordinal: 3,
                floors: 3
            })
        );
        assert_eq!(session.current_floor(), 0);
        assert_eq!(map.viewport().floor_changes, 0);
    }

    #[test]
    fn test_floor_picker_entries() {
        let map = Arc::new(HeadlessMap::new("/nowhere"));
        let session = AirportSession::open(schiphol("0"), map);

        let floors: Vec<(usize, &str)> = session.floors().collect();
        assert_eq!(
            floors,
            vec![(0, "Arrivals"), (1, "Departures"), (2, "Lounge")]
        );
    }

    #[tokio::test]
    async fn test_show_uses_current_floor() {
        let temp_dir = venue_root();
        let map = Arc::new(HeadlessMap::new(temp_dir.path()));
        let loader = VenueLoader::new(map.clone(), Duration::from_secs(1));
        let mut session = AirportSession::open(schiphol("0"), map.clone());

        session.select_floor(1).unwrap();
        assert_eq!(map.viewport().floor_changes, 0);
        session.show(&loader).await.unwrap();

        let viewport = map.viewport();
        assert_eq!(viewport.venue.as_deref(), Some("AMS"));
        assert_eq!(viewport.floor, Some(1));
        assert_eq!(viewport.floor_changes, 1);
        assert_eq!(viewport.region, Some(session.record().display_region()));
    }

    #[tokio::test]
    async fn test_show_reports_missing_venue() {
        let temp_dir = TempDir::new().unwrap();
        let map = Arc::new(HeadlessMap::new(temp_dir.path()));
        let loader = VenueLoader::new(map.clone(), Duration::from_secs(1));
        let session = AirportSession::open(schiphol("0"), map.clone());

        let err = session.show(&loader).await.unwrap_err();
        assert!(matches!(err, VenueError::MissingAssets { .. }));
        assert!(!session.is_shown());
        assert_eq!(map.viewport().region, None);
    }
}
