//! Geometry helpers for floaters.

use bevy::math::{Quat, Vec3};

use crate::constants::MIN_SMOOTH_TIME;

/// Unweighted mean of `points`. Zero for an empty slice.
pub fn centroid(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    points.iter().copied().sum::<Vec3>() / points.len() as f32
}

/// Upward unit normal of the least-squares plane `y = a·x + b·z + c` through `points`.
///
/// Needs at least three points that are not collinear in the XZ plane; for
/// anything less the plane is undefined and `None` is returned.
pub fn surface_normal(points: &[Vec3]) -> Option<Vec3> {
    if points.len() < 3 {
        return None;
    }

    let mean = centroid(points);
    let (mut sxx, mut sxz, mut szz, mut sxy, mut szy) = (0.0f32, 0.0, 0.0, 0.0, 0.0);
    for p in points {
        let d = *p - mean;
        sxx += d.x * d.x;
        sxz += d.x * d.z;
        szz += d.z * d.z;
        sxy += d.x * d.y;
        szy += d.z * d.y;
    }

    let det = sxx * szz - sxz * sxz;
    let scale = (sxx + szz).max(f32::MIN_POSITIVE);
    if det.abs() <= 1e-6 * scale * scale {
        return None;
    }

    let slope_x = (sxy * szz - szy * sxz) / det;
    let slope_z = (szy * sxx - sxy * sxz) / det;
    Vec3::new(-slope_x, 1.0, -slope_z).try_normalize()
}

/// Critically damped spring toward `target`, advancing `velocity` in place.
///
/// Never overshoots the target, whatever `dt` is.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }

    output
}

/// Shortest-arc rotation taking direction `from` onto direction `to`.
pub fn from_to_rotation(from: Vec3, to: Vec3) -> Quat {
    match (from.try_normalize(), to.try_normalize()) {
        (Some(from), Some(to)) => Quat::from_rotation_arc(from, to),
        _ => Quat::IDENTITY,
    }
}
