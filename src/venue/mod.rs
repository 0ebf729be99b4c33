//! The boundary to the indoor map renderer.
//!
//! Rendering lives behind [`MapPresentationAdapter`]. [`VenueLoader`] drives
//! it: one venue load at a time, each bounded by a timeout, and a newer load
//! cancels the pending one.

mod headless;

pub use headless::{HeadlessMap, Viewport};

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::VenueError;
use crate::model::{AirportRecord, Region};
use crate::style::{self, LayerKind, OverlayStyle};

#[async_trait]
pub trait MapPresentationAdapter: Send + Sync {
    /// Prepares the venue assets for an airport code. May never resolve
    /// when the assets are absent; [`VenueLoader`] bounds it with a timeout.
    async fn load_venue(&self, code: &str) -> Result<(), VenueError>;

    fn center(&self, region: &Region);

    /// Switches the rendered floor. The ordinal is valid for the loaded venue.
    fn set_floor(&self, ordinal: usize);

    fn style_feature(&self, layer: &LayerKind, category: Option<&str>) -> Option<OverlayStyle> {
        style::style_feature(layer, category)
    }
}

#[derive(Debug, Default)]
struct PendingLoad {
    generation: u64,
    token: Option<CancellationToken>,
}

pub struct VenueLoader {
    adapter: Arc<dyn MapPresentationAdapter>,
    timeout: Duration,
    pending: Mutex<PendingLoad>,
}

impl VenueLoader {
    pub fn new(adapter: Arc<dyn MapPresentationAdapter>, timeout: Duration) -> Self {
        Self {
            adapter,
            timeout,
            pending: Mutex::new(PendingLoad::default()),
        }
    }

    pub fn adapter(&self) -> &Arc<dyn MapPresentationAdapter> {
        &self.adapter
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_loading(&self) -> bool {
        self.lock_pending().token.is_some()
    }

    /// Cancels the in-flight load, if any. It resolves to
    /// [`VenueError::Superseded`].
    pub fn cancel_pending(&self) {
        if let Some(token) = self.lock_pending().token.take() {
            token.cancel();
        }
    }

    /// Loads the airport's venue, then centres the map on its region and
    /// applies `ordinal`.
    ///
    /// Any load still pending is cancelled first. A cancelled or timed out
    /// load leaves the viewport untouched.
    pub async fn load(&self, record: &AirportRecord, ordinal: usize) -> Result<(), VenueError> {
        let code = record.code().to_string();
        let (generation, token) = self.begin();

        let outcome = tokio::select! {
            _ = token.cancelled() => Err(VenueError::Superseded { code: code.clone() }),
            loaded = tokio::time::timeout(self.timeout, self.adapter.load_venue(&code)) => {
                match loaded {
                    Ok(result) => result,
                    Err(_) => Err(VenueError::TimedOut {
                        code: code.clone(),
                        after: self.timeout,
                    }),
                }
            }
        };

        self.finish(generation);

        // A newer request may have arrived after the adapter finished.
        let outcome = match outcome {
            Ok(()) if token.is_cancelled() => Err(VenueError::Superseded { code: code.clone() }),
            other => other,
        };

        match outcome {
            Ok(()) => {
                self.adapter.center(&record.display_region());
                self.adapter.set_floor(ordinal);
                info!("Venue {} loaded, showing floor {}", code, ordinal);
                Ok(())
            }
            Err(err @ (VenueError::Superseded { .. } | VenueError::TimedOut { .. })) => {
                warn!("Venue {} not shown: {}", code, err);
                Err(err)
            }
            Err(err) => {
                error!("Venue {} failed to load: {}", code, err);
                Err(err)
            }
        }
    }

    fn begin(&self) -> (u64, CancellationToken) {
        let mut pending = self.lock_pending();
        if let Some(previous) = pending.token.take() {
            previous.cancel();
        }
        pending.generation += 1;
        let token = CancellationToken::new();
        pending.token = Some(token.clone());
        (pending.generation, token)
    }

    fn finish(&self, generation: u64) {
        let mut pending = self.lock_pending();
        if pending.generation == generation {
            pending.token = None;
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, PendingLoad> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
