use glam::{Quat, Vec3};

// Below this squared length a direction is treated as missing.
const MIN_DIRECTION_LENGTH_SQ: f32 = 1e-12;

/// Minimal rotation taking `reference` onto `target`.
///
/// Both inputs are normalized here, so callers may pass raw directions. A zero
/// or non-finite input yields the identity rotation instead of NaNs. Opposite
/// vectors rotate by 180 degrees about an axis orthogonal to `reference`, chosen
/// deterministically from `reference` alone.
pub fn rotation_aligning(reference: Vec3, target: Vec3) -> Quat {
    let (Some(from), Some(to)) = (unit_or_none(reference), unit_or_none(target)) else {
        return Quat::IDENTITY;
    };

    let dot = from.dot(to);
    if dot >= 1.0 - 1e-6 {
        return Quat::IDENTITY;
    }
    if dot <= -1.0 + 1e-6 {
        let axis = from.any_orthonormal_vector();
        return Quat::from_axis_angle(axis, std::f32::consts::PI);
    }
    Quat::from_rotation_arc(from, to)
}

/// Rotation making a shape's local `+Z` face `target`, like a look-at for flat discs.
#[inline]
pub fn facing(target_direction: Vec3) -> Quat {
    rotation_aligning(Vec3::Z, target_direction)
}

#[inline]
fn unit_or_none(v: Vec3) -> Option<Vec3> {
    if !v.is_finite() || v.length_squared() < MIN_DIRECTION_LENGTH_SQ {
        return None;
    }
    Some(v.normalize())
}
