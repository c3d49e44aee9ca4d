// Tests for flattening the scene into billboards and polylines.

use globe_core::*;
use glam::Vec3;

#[test]
fn ray_hits_sphere_in_front() {
    let t = ray_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::ZERO, 1.0).unwrap();
    assert!((t - 4.0).abs() < 1e-5);
    assert!(ray_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::ZERO, 1.0).is_none());
    assert!(ray_sphere(Vec3::new(0.0, 2.0, 5.0), Vec3::NEG_Z, Vec3::ZERO, 1.0).is_none());
}

#[test]
fn far_side_points_are_occluded() {
    let eye = Vec3::new(0.0, 0.0, 5.0);
    assert!(occluded_by_globe(eye, Vec3::new(0.0, 0.0, -1.0), 1.0));
    assert!(!occluded_by_globe(eye, Vec3::new(0.0, 0.0, 1.0), 1.0));
    assert!(!occluded_by_globe(eye, Vec3::new(1.5, 0.0, 0.0), 1.0));
    // Raised above the limb it is visible again.
    assert!(!occluded_by_globe(eye, Vec3::new(0.0, 2.5, -1.0), 1.0));
}

#[test]
fn collect_flattens_the_populated_globe() {
    let mut globe = Globe::new(GlobeConfig::default(), SceneStore::new()).unwrap();
    let (locations, target) = default_locations();
    globe.populate(&locations, target).unwrap();
    let camera = Camera::default();

    let mut frame = FrameGeometry::default();
    frame.collect(globe.scene(), &camera, SPHERE_RADIUS);

    let sphere = frame.sphere.unwrap();
    assert_eq!(sphere.pos, [0.0; 3]);
    assert!((sphere.size - 2.0 * SPHERE_RADIUS).abs() < 1e-5);

    assert_eq!(frame.lines.len(), 2);
    for line in &frame.lines {
        assert_eq!(line.points.len(), line.visible.len());
        assert!((line.color[3] - ARC_LINE_OPACITY).abs() < 1e-6);
        for (p, &vis) in line.points.iter().zip(&line.visible) {
            assert_eq!(vis, !occluded_by_globe(camera.eye, *p, SPHERE_RADIUS));
        }
    }
    for b in &frame.billboards {
        assert!(!occluded_by_globe(camera.eye, Vec3::from(b.pos), SPHERE_RADIUS));
        assert!(b.size > 0.0);
    }

    frame.clear();
    assert!(frame.sphere.is_none());
    assert!(frame.billboards.is_empty());
    assert!(frame.lines.is_empty());
}

#[test]
fn hidden_sphere_is_not_collected() {
    let mut globe = Globe::new(GlobeConfig::default(), SceneStore::new()).unwrap();
    globe
        .apply_settings(&SceneSettings {
            show_sphere: false,
            ..SceneSettings::default()
        })
        .unwrap();
    let mut frame = FrameGeometry::default();
    frame.collect(globe.scene(), &Camera::default(), SPHERE_RADIUS);
    assert!(frame.sphere.is_none());
}

#[test]
fn facing_marker_becomes_billboards() {
    // A marker straight in front of the default camera.
    let mut globe = Globe::new(GlobeConfig::default(), SceneStore::new()).unwrap();
    let eye_dir = Vec3::Z;
    let (lat, lon) = (0.0, -90.0);
    let p = project(lat, lon, SPHERE_RADIUS);
    assert!((p.normalize() - eye_dir).length() < 1e-5, "p={p:?}");
    globe.add_marker(GeoPoint::new(lat, lon)).unwrap();

    let mut frame = FrameGeometry::default();
    frame.collect(globe.scene(), &Camera::default(), SPHERE_RADIUS);
    // Disc, ripple and a column of dots.
    assert!(frame.billboards.len() >= 4);
    let white = hex_to_rgb(MARKER_DISC_COLOR);
    assert!(frame
        .billboards
        .iter()
        .any(|b| b.color[..3] == white[..] && (b.color[3] - MARKER_DISC_OPACITY).abs() < 1e-6));
}

#[test]
fn lit_side_is_brighter_than_dark_side() {
    let lights = Lights::default();
    let toward = lights.directional_position.normalize();
    let lit = shade([1.0; 4], toward, &lights);
    let dark = shade([1.0; 4], -toward, &lights);
    assert!(lit[0] > dark[0]);
    // Ambient keeps the night side visible.
    assert!(dark[0] > 0.0);
    assert_eq!(lit[3], 1.0);
}
