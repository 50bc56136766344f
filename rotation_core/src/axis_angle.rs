//! Axis-angle extraction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::{Quat, Vec3};

/// Below this length the vector part of a quaternion carries no usable axis.
pub const AXIS_EPSILON: f32 = 1.0e-6;

/// Axis reported for (near-)identity rotations.
pub const DEFAULT_AXIS: Vec3 = Vec3::UNIT_Y;

/// A unit rotation axis and the angle about it, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    pub axis: Vec3,
    pub angle: f32,
}

impl AxisAngle {
    pub fn to_quaternion(self) -> Quat {
        Quat::from_axis_angle(self.axis, self.angle)
    }
}

/// Splits a unit quaternion into its rotation axis and angle.
///
/// The angle is `2 * atan2(|v|, w)`, equal to `2 * acos(w)` for unit input but
/// accurate near identity, and lies in `[0, 2π]`. When the vector part is
/// shorter than [`AXIS_EPSILON`] the axis is [`DEFAULT_AXIS`] and the angle 0.
pub fn convert_quaternion_to_axis_angle(q: Quat) -> AxisAngle {
    let v = q.imaginary();
    let len = v.len();
    if len <= AXIS_EPSILON {
        debug!(w = q.w, "near-identity rotation, using default axis");
        return AxisAngle {
            axis: DEFAULT_AXIS,
            angle: 0.0,
        };
    }

    AxisAngle {
        axis: v * (1.0 / len),
        angle: 2.0 * len.atan2(q.w),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn identity_has_default_axis_and_no_angle() {
        let aa = convert_quaternion_to_axis_angle(Quat::IDENTITY);
        assert_eq!(aa.axis, DEFAULT_AXIS);
        assert_eq!(aa.angle, 0.0);
        assert!(aa.axis.is_finite() && aa.angle.is_finite());
    }

    #[test]
    fn negated_identity_is_still_degenerate() {
        let aa = convert_quaternion_to_axis_angle(Quat::new(0.0, 0.0, 0.0, -1.0));
        assert_eq!(aa.axis, DEFAULT_AXIS);
        assert_eq!(aa.angle, 0.0);
    }

    #[test]
    fn quarter_turn_about_z() {
        let aa = convert_quaternion_to_axis_angle(Quat::rotation_z(FRAC_PI_2));
        assert!(aa.axis.abs_diff_eq(Vec3::UNIT_Z, 1e-6));
        assert!((aa.angle - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn half_turn() {
        let aa = convert_quaternion_to_axis_angle(Quat::rotation_x(PI));
        assert!(aa.axis.abs_diff_eq(Vec3::UNIT_X, 1e-6));
        assert!((aa.angle - PI).abs() < 1e-5);
    }

    #[test]
    fn overshooting_w_stays_finite() {
        let aa = convert_quaternion_to_axis_angle(Quat::new(0.01, 0.0, 0.0, 1.0001));
        assert!(aa.angle.is_finite());
        assert!((aa.angle - 0.02).abs() < 1e-4, "{aa:?}");
        assert!(aa.axis.abs_diff_eq(Vec3::UNIT_X, 1e-6));
    }

    #[test]
    fn small_angles_keep_full_precision() {
        let axis = Vec3::new(0.6, -0.8, 0.0);
        for angle in [1.0e-3_f32, 2.5e-3, 1.0e-2, 0.1] {
            let q = Quat::from_axis_angle(axis, angle);
            let aa = convert_quaternion_to_axis_angle(q);
            assert!((aa.angle - angle).abs() <= 1e-6 * angle.max(1.0), "{angle}: {aa:?}");
            assert!(aa.to_quaternion().same_rotation(q, 1e-6), "{angle}: {aa:?}");
        }
    }

    #[test]
    fn rebuilds_the_quaternion() {
        let axis = Vec3::new(-2.0, 1.0, 0.5).normalize_or(0.0, Vec3::UNIT_Z);
        let q = Quat::from_axis_angle(axis, 2.2);
        let aa = convert_quaternion_to_axis_angle(q);
        assert!(aa.to_quaternion().same_rotation(q, 1e-5));
    }
}
