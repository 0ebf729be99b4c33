use std::sync::Arc;

use tracing::debug;

/// Receives every floor change made through a [`FloorSelection`].
pub trait FloorObserver: Send + Sync {
    fn floor_changed(&self, ordinal: usize);
}

/// The floor currently shown for one airport session.
///
/// Bounds are the caller's job: `select` accepts any ordinal, since the
/// selection is not tied to a particular airport. Use
/// [`AirportSession::select_floor`](crate::AirportSession::select_floor) for a
/// checked variant.
pub struct FloorSelection {
    current: usize,
    observer: Arc<dyn FloorObserver>,
}

impl FloorSelection {
    pub fn new(initial: usize, observer: Arc<dyn FloorObserver>) -> Self {
        Self {
            current: initial,
            observer,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Notifies the observer on every call, also when `ordinal` is already
    /// the current floor.
    pub fn select(&mut self, ordinal: usize) {
        debug!("Floor selected: {} (was {})", ordinal, self.current);
        self.current = ordinal;
        self.observer.floor_changed(ordinal);
    }
}

impl std::fmt::Debug for FloorSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloorSelection")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
