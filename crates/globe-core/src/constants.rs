use glam::Vec3;

// Shared geometry/timing/visual tuning constants used by both web and native frontends.

// Globe
pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_SEGMENTS: u32 = 35; // width and height segments of the base sphere
pub const SPHERE_BUMP_SCALE: f32 = 0.005;
pub const SPHERE_COLOR: u32 = 0xFFFFFF; // multiplied with the earth texture

// Flight arcs
pub const ARC_REFERENCE_DISTANCE: f32 = 80.0; // start-end distance at which arc height saturates
pub const ARC_MIN_HEIGHT: f32 = 1.3; // control point height factor for the shortest hops
pub const ARC_MAX_HEIGHT: f32 = 2.3; // control point height factor at the reference distance
pub const ARC_SEGMENTS: usize = 100; // polyline is sampled at ARC_SEGMENTS + 1 points
pub const TANGENT_EPSILON: f32 = 0.01; // finite-difference step along the curve parameter
pub const ARC_LINE_WIDTH_PX: f32 = 2.0;
pub const ARC_LINE_OPACITY: f32 = 0.8;
pub const ARC_LINE_COLOR: u32 = 0xFFC78E;
pub const FLIGHT_CONE_COLOR: u32 = 0xFFA042;
pub const FLIGHT_CONE_RADIUS: f32 = 0.01;
pub const FLIGHT_CONE_HEIGHT: f32 = 0.12;
pub const FLIGHT_CONE_SEGMENTS: u32 = 6;

// Flight timing (seconds)
pub const FLIGHT_DURATION_MIN_SEC: f32 = 2.0;
pub const FLIGHT_DURATION_JITTER_SEC: f32 = 2.0;
pub const FLIGHT_DELAY_JITTER_SEC: f32 = 2.0;

// Markers
pub const MARKER_DISC_RADIUS: f32 = 0.02;
pub const MARKER_DISC_SEGMENTS: u32 = 32;
pub const MARKER_DISC_OPACITY: f32 = 0.5;
pub const MARKER_DISC_COLOR: u32 = 0xFFFFFF;
pub const LIGHT_COLUMN_HEIGHT: f32 = 0.4;
pub const LIGHT_COLUMN_RADIUS: f32 = 0.05;
pub const LIGHT_COLUMN_SEGMENTS: u32 = 32;
pub const LIGHT_COLUMN_OPACITY: f32 = 0.8;
pub const LIGHT_COLUMN_COLOR: u32 = 0xFFFFFF;

// Ripples
pub const RIPPLE_SIZE: f32 = 0.08; // plane edge length before scaling
pub const RIPPLE_COLOR: u32 = 0xFFFFFF;
pub const RIPPLE_SCALE_MIN: f32 = 2.0;
pub const RIPPLE_SCALE_JITTER: f32 = 1.5;
pub const RIPPLE_SCALE_DURATION_MIN_SEC: f32 = 1.5;
pub const RIPPLE_SCALE_DURATION_JITTER_SEC: f32 = 1.0;
pub const RIPPLE_FADE_DURATION_SEC: f32 = 1.5;
pub const RIPPLE_RESPAWN_MIN_SEC: f32 = 2.0; // measured from the spawn of the previous ripple
pub const RIPPLE_RESPAWN_JITTER_SEC: f32 = 1.5;

// Camera
pub const CAMERA_FOV_DEG: f32 = 30.0;
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 1000.0;
pub const AUTO_ROTATE_SPEED: f32 = 2.0; // 30 seconds per orbit at 60fps, as in common orbit controls
pub const CONTROLS_DAMPING: f32 = 0.05;
pub const CONTROLS_ROTATE_SPEED: f32 = 1.0;

// Lights
pub const AMBIENT_INTENSITY: f32 = 1.5;
pub const DIRECTIONAL_INTENSITY: f32 = 2.5;
pub const DIRECTIONAL_POSITION: [f32; 3] = [-15.0, 21.0, 11.0];
pub const LIGHT_POSITION_RANGE: f32 = 100.0; // settings clamp for each light axis
pub const LIGHT_INTENSITY_MAX: f32 = 5.0;
pub const SHADOW_CAMERA_RANGE: f32 = 50.0;

// Demo input: markers to place and the anchor every other marker flies to
pub const DEFAULT_LOCATIONS: [[f64; 2]; 3] = [
    [-23.381195, 135.039595],
    [27.677807, 74.006751],
    [14.3545, 120.5838],
];
pub const DEFAULT_TARGET: [f64; 2] = [-23.381195, 135.039595];

pub const DEFAULT_SEED: u64 = 42;

#[inline]
pub fn directional_position_vec3() -> Vec3 {
    Vec3::from(DIRECTIONAL_POSITION)
}

/// Unpack a `0xRRGGBB` colour into linear-ish `[r, g, b]` in 0..1.
#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}
