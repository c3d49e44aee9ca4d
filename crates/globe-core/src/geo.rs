//! Geographic coordinates and their placement on the globe sphere.
//!
//! The globe is centred at the origin with geographic north along `+Y`. The
//! longitude is offset by 180 degrees so the texture seam sits on the far side
//! of the sphere, which is why the mapping below is not the textbook
//! spherical-to-Cartesian formula. Keep the signs and axis order as they are.

use glam::Vec3;

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(lat_lon: [f64; 2]) -> Self {
        Self::new(lat_lon[0], lat_lon[1])
    }
}

/// A point on the sphere together with its outward surface normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePosition {
    pub position: Vec3,
    pub normal: Vec3,
}

impl SurfacePosition {
    pub fn from_geo(geo: GeoPoint, radius: f32) -> Self {
        let position = project(geo.latitude, geo.longitude, radius);
        // The sphere is centred at the origin so the normal is the direction of the position.
        let normal = position.normalize_or_zero();
        Self { position, normal }
    }

    /// Point lifted `height` units above the surface along the normal.
    #[inline]
    pub fn lifted(&self, height: f32) -> Vec3 {
        self.position + self.normal * height
    }
}

/// Map `(lat, lon)` in degrees onto a sphere of `radius` centred at the origin.
///
/// Out-of-range angles are not rejected; they still produce a deterministic point.
pub fn project(lat: f64, lon: f64, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();
    let r = radius as f64;

    let x = -(r * phi.sin() * theta.cos());
    let y = r * phi.cos();
    let z = r * phi.sin() * theta.sin();

    Vec3::new(x as f32, y as f32, z as f32)
}
