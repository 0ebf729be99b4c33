use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use super::MapPresentationAdapter;
use crate::error::VenueError;
use crate::model::Region;

/// What a headless map would currently be showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewport {
    pub venue: Option<String>,
    pub region: Option<Region>,
    pub floor: Option<usize>,
    /// Number of `set_floor` calls received.
    pub floor_changes: usize,
}

/// Map adapter without a renderer: checks venue folders on disk and records
/// the viewport it is asked to show.
#[derive(Debug)]
pub struct HeadlessMap {
    venue_root: PathBuf,
    viewport: Mutex<Viewport>,
}

impl HeadlessMap {
    pub fn new(venue_root: impl AsRef<Path>) -> Self {
        Self {
            venue_root: venue_root.as_ref().to_path_buf(),
            viewport: Mutex::new(Viewport::default()),
        }
    }

    pub fn venue_path(&self, code: &str) -> PathBuf {
        self.venue_root.join(code)
    }

    pub fn viewport(&self) -> Viewport {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Viewport> {
        self.viewport.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MapPresentationAdapter for HeadlessMap {
    async fn load_venue(&self, code: &str) -> Result<(), VenueError> {
        let path = self.venue_path(code);
        let is_dir = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta.is_dir(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => false,
            Err(err) => {
                return Err(VenueError::Adapter {
                    code: code.to_string(),
                    message: format!("cannot inspect {:?}: {}", path, err),
                })
            }
        };
        if !is_dir {
            return Err(VenueError::MissingAssets { path });
        }

        debug!("Venue {} ready at {:?}", code, path);
        self.lock().venue = Some(code.to_string());
        Ok(())
    }

    fn center(&self, region: &Region) {
        self.lock().region = Some(*region);
    }

    fn set_floor(&self, ordinal: usize) {
        let mut viewport = self.lock();
        viewport.floor = Some(ordinal);
        viewport.floor_changes += 1;
    }
}
