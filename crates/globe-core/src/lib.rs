pub mod arc;
pub mod constants;
pub mod controls;
pub mod driver;
pub mod easing;
pub mod error;
pub mod flight;
pub mod geo;
pub mod globe;
pub mod marker;
pub mod orient;
pub mod render_data;
pub mod ripple;
pub mod scene;
pub mod state;
pub mod timer;
pub mod tween;

pub use arc::*;
pub use constants::*;
pub use controls::OrbitControls;
pub use driver::*;
pub use easing::Ease;
pub use error::GlobeError;
pub use flight::Flight;
pub use geo::*;
pub use globe::*;
pub use marker::{Marker, MarkerId};
pub use orient::*;
pub use render_data::*;
pub use ripple::{ChainState, Ripple, RippleChain};
pub use scene::*;
pub use state::*;
pub use timer::{Fired, TimerHandle, TimerQueue};
pub use tween::{Repeat, Tween, TweenStep};

/// The three demo locations, the first of which every other one flies to.
pub fn default_locations() -> (Vec<GeoPoint>, GeoPoint) {
    let locations = DEFAULT_LOCATIONS.iter().copied().map(GeoPoint::from).collect();
    (locations, GeoPoint::from(DEFAULT_TARGET))
}
