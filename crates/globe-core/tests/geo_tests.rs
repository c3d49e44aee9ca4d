// Integration tests for latitude/longitude projection onto the globe.

use globe_core::*;

const EPS: f32 = 1e-5;

#[test]
fn projected_points_lie_on_the_sphere() {
    for radius in [1.0_f32, 2.5] {
        let mut lat = -90.0;
        while lat <= 90.0 {
            let mut lon = -180.0;
            while lon <= 180.0 {
                let p = project(lat, lon, radius);
                assert!(
                    (p.length() - radius).abs() < EPS * radius,
                    "|p| = {} for lat={lat} lon={lon}",
                    p.length()
                );
                lon += 15.0;
            }
            lat += 7.5;
        }
    }
}

#[test]
fn north_pole_maps_to_plus_y() {
    let p = project(90.0, 0.0, 1.0);
    assert!(p.x.abs() < EPS && (p.y - 1.0).abs() < EPS && p.z.abs() < EPS);
    let s = project(-90.0, 42.0, 1.0);
    assert!((s.y + 1.0).abs() < EPS);
}

#[test]
fn equator_seam_points_differ_in_one_axis_sign() {
    // (0, 0) and (0, 180) sit on opposite sides of the equator, mirrored in x only.
    let a = project(0.0, 0.0, 1.0);
    let b = project(0.0, 180.0, 1.0);
    assert!((a.x - 1.0).abs() < EPS, "a = {a:?}");
    assert!((b.x + 1.0).abs() < EPS, "b = {b:?}");
    assert!((a.x + b.x).abs() < EPS);
    assert!((a.y - b.y).abs() < EPS);
    assert!((a.z - b.z).abs() < EPS);
}

#[test]
fn quarter_turn_longitude_matches_convention() {
    // lon = -90 puts theta at 90 degrees: x = 0, z = +r
    let p = project(0.0, -90.0, 1.0);
    assert!(p.x.abs() < EPS);
    assert!((p.z - 1.0).abs() < EPS);
}

#[test]
fn out_of_range_input_is_still_deterministic() {
    let a = project(120.0, 400.0, 1.0);
    let b = project(120.0, 400.0, 1.0);
    assert_eq!(a, b);
    assert!(a.is_finite());
    assert!((a.length() - 1.0).abs() < EPS);
}

#[test]
fn surface_position_carries_unit_normal() {
    let geo = GeoPoint::new(27.677807, 74.006751);
    let surface = SurfacePosition::from_geo(geo, 2.0);
    assert!((surface.normal.length() - 1.0).abs() < EPS);
    assert!((surface.normal * 2.0 - surface.position).length() < 1e-4);
    let lifted = surface.lifted(0.2);
    assert!((lifted.length() - 2.2).abs() < 1e-4);
}
