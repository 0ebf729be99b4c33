pub mod catalog;
pub mod config;
pub mod error;
pub mod floor;
pub mod model;
pub mod session;
pub mod style;
pub mod venue;

pub use catalog::AirportCatalog;
pub use config::MapsConfig;
pub use error::{ConfigurationError, Error, OutOfRangeError, RecordError, Result, VenueError};
pub use floor::{FloorObserver, FloorSelection};
pub use model::{AirportEntry, AirportRecord, Region};
pub use session::AirportSession;
pub use style::{style_feature, LayerKind, OverlayStyle};
pub use venue::{HeadlessMap, MapPresentationAdapter, VenueLoader, Viewport};
