//! Unit-vector and rotation primitives for motion on a sphere.
//!
//! Every position is a unit `DVec3` from the sphere centre; every direction
//! of travel is a unit `DVec3` tangent to the sphere at that position.
//! Functions here never return NaN for degenerate input: near-zero axes are
//! replaced with a fallback perpendicular axis.

use glam::{DQuat, DVec3};

use crate::constants::DEGENERATE_EPSILON_SQ;

/// Normalize `v`, or return `fallback` if `v` is too short to normalize.
pub fn normalize_or(v: DVec3, fallback: DVec3) -> DVec3 {
    if v.length_squared() < DEGENERATE_EPSILON_SQ || !v.is_finite() {
        fallback
    } else {
        v.normalize()
    }
}

/// Any unit vector perpendicular to `v`.
///
/// Uses world-up, or world-right when `v` is nearly aligned with world-up.
pub fn any_orthogonal(v: DVec3) -> DVec3 {
    let reference = if v.normalize_or_zero().dot(DVec3::Y).abs() > 0.9 {
        DVec3::X
    } else {
        DVec3::Y
    };
    normalize_or(v.cross(reference), DVec3::Z)
}

/// Rotation axis for great-circle motion from `position` along `direction`.
pub fn great_circle_axis(position: DVec3, direction: DVec3) -> DVec3 {
    let axis = position.cross(direction);
    if axis.length_squared() < DEGENERATE_EPSILON_SQ {
        any_orthogonal(position)
    } else {
        axis.normalize()
    }
}

/// Project `v` onto the tangent plane at unit `position` and normalize.
///
/// Falls back to an arbitrary tangent when `v` is (anti)parallel to `position`.
pub fn tangent_at(position: DVec3, v: DVec3) -> DVec3 {
    let projected = v - position * v.dot(position);
    if projected.length_squared() < DEGENERATE_EPSILON_SQ {
        position.cross(any_orthogonal(position)).normalize()
    } else {
        projected.normalize()
    }
}

/// Rotate `v` by `angle` radians about unit `axis`.
pub fn rotate_about(v: DVec3, axis: DVec3, angle: f64) -> DVec3 {
    DQuat::from_axis_angle(axis, angle) * v
}

/// Advance a point along its great circle by `angle` radians.
///
/// Returns the new `(position, direction)`, both unit length with the
/// direction re-projected onto the tangent plane.
pub fn great_circle_step(position: DVec3, direction: DVec3, angle: f64) -> (DVec3, DVec3) {
    let axis = great_circle_axis(position, direction);
    let rotation = DQuat::from_axis_angle(axis, angle);
    let new_position = normalize_or(rotation * position, position);
    let new_direction = tangent_at(new_position, rotation * direction);
    (new_position, new_direction)
}

/// Angular separation between two unit vectors (radians).
pub fn angular_distance(a: DVec3, b: DVec3) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Signed angle from `from` to `to` about unit `axis` (right-handed).
pub fn signed_angle_about(from: DVec3, to: DVec3, axis: DVec3) -> f64 {
    let sin = from.cross(to).dot(axis);
    let cos = from.dot(to);
    sin.atan2(cos)
}

/// Point on the unit sphere from spherical angles (`phi` from +Z, `theta` about Z).
pub fn from_spherical(phi: f64, theta: f64) -> DVec3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    DVec3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi)
}

/// Uniformly distributed point on the unit sphere from `u, v ∈ [0, 1)`.
pub fn uniform_on_sphere(u: f64, v: f64) -> DVec3 {
    let phi = (2.0 * u - 1.0).clamp(-1.0, 1.0).acos();
    let theta = std::f64::consts::TAU * v;
    from_spherical(phi, theta)
}

/// Fold an angle into `[-π, π]`. Angles already in range come back unchanged.
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    if (-PI..=PI).contains(&angle) {
        return angle;
    }
    (angle + PI).rem_euclid(TAU) - PI
}

/// Renormalize a quaternion, resetting to identity if it collapsed.
pub fn renormalize(q: DQuat) -> DQuat {
    let len_sq = q.length_squared();
    if len_sq < DEGENERATE_EPSILON_SQ || !q.is_finite() {
        DQuat::IDENTITY
    } else {
        q.normalize()
    }
}
