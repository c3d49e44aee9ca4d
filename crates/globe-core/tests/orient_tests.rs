// Integration tests for the axis-alignment rotation.

use globe_core::*;
use glam::{Quat, Vec3};

const EPS: f32 = 1e-4;

fn assert_maps(a: Vec3, b: Vec3) {
    let q = rotation_aligning(a, b);
    let got = q * a.normalize();
    assert!(
        (got - b.normalize()).length() < EPS,
        "rotation of {a:?} gave {got:?}, wanted {b:?}"
    );
}

#[test]
fn maps_reference_onto_target_for_many_pairs() {
    let dirs = [
        Vec3::X,
        Vec3::Y,
        Vec3::Z,
        Vec3::NEG_X,
        Vec3::NEG_Y,
        Vec3::NEG_Z,
        Vec3::new(1.0, 2.0, 3.0).normalize(),
        Vec3::new(-0.3, 0.1, 0.9).normalize(),
        project(-23.381195, 135.039595, 1.0),
    ];
    for &a in &dirs {
        for &b in &dirs {
            assert_maps(a, b);
        }
    }
}

#[test]
fn identical_vectors_give_identity() {
    let q = rotation_aligning(Vec3::Y, Vec3::Y);
    assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6));
}

#[test]
fn opposite_vectors_turn_half_way_deterministically() {
    let q1 = rotation_aligning(Vec3::Y, Vec3::NEG_Y);
    let q2 = rotation_aligning(Vec3::Y, Vec3::NEG_Y);
    assert_eq!(q1, q2);
    assert!(((q1 * Vec3::Y) - Vec3::NEG_Y).length() < EPS);
    let (axis, angle) = q1.to_axis_angle();
    assert!((angle - std::f32::consts::PI).abs() < EPS);
    assert!(axis.dot(Vec3::Y).abs() < EPS);
}

#[test]
fn degenerate_target_yields_identity() {
    assert_eq!(rotation_aligning(Vec3::Y, Vec3::ZERO), Quat::IDENTITY);
    assert_eq!(rotation_aligning(Vec3::ZERO, Vec3::Y), Quat::IDENTITY);
    assert_eq!(rotation_aligning(Vec3::Y, Vec3::splat(f32::NAN)), Quat::IDENTITY);
}

#[test]
fn unnormalized_inputs_are_accepted() {
    assert_maps(Vec3::new(0.0, 3.0, 0.0), Vec3::new(2.0, 0.0, 2.0));
}

#[test]
fn facing_turns_plus_z_towards_direction() {
    let n = project(14.3545, 120.5838, 1.0);
    let q = facing(-n);
    assert!(((q * Vec3::Z) + n.normalize()).length() < EPS);
}
