use crate::marker::MarkerId;
use crate::scene::DrawableHandle;

/// Misuse of the scene graph or of the globe's object tables.
///
/// None of these are fatal to the visualization: the driver logs them and
/// carries on with the remaining markers and flights.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlobeError {
    #[error("unknown drawable {0:?}")]
    UnknownDrawable(DrawableHandle),
    #[error("drawable {0:?} was already disposed")]
    AlreadyDisposed(DrawableHandle),
    #[error("unknown marker {0}")]
    UnknownMarker(MarkerId),
    #[error("no flight at index {0}")]
    UnknownFlight(usize),
}

pub type Result<T> = std::result::Result<T, GlobeError>;
