//! Euler angles <-> quaternions.
//!
//! An Euler triple `(x, y, z)` always means the composite rotation
//! `R = Rx(x) * Ry(y) * Rz(z)` acting on column vectors: rotate about Z first,
//! then about Y, then about X, all relative to the fixed parent frame.
//! The quaternion equivalent is `qx * qy * qz`.
//!
//! Extraction reads the angles back from the rotation matrix elements:
//!
//! ```text
//! m02 =  sin(y)
//! m12 = -sin(x) cos(y)      m22 = cos(x) cos(y)
//! m01 = -cos(y) sin(z)      m00 = cos(y) cos(z)
//! ```
//!
//! `y` comes from `atan2(m02, hypot(m00, m01))`, and `z` is read after undoing
//! the recovered `x`, so any error in `x` is absorbed by `z` instead of
//! changing the rotation.
//!
//! When `cos(y) = hypot(m00, m01)` falls below [`GIMBAL_LOCK_EPSILON`] the X and
//! Z rotations act about the same axis and only their sum (or difference) is
//! observable. The canonical answer in that case pins `x = 0`, snaps `y` to
//! `±90°` and puts the whole coupled angle into `z = atan2(m10, m11)`.

use std::f32::consts::FRAC_PI_2;

use tracing::debug;

use crate::angle::{deg_to_rad, rad_to_deg};
use crate::math::{Mat3, Quat, Vec3};

/// `cos(y)` below which extraction treats the rotation as gimbal locked.
pub const GIMBAL_LOCK_EPSILON: f32 = 5.0e-6;

/// Squared-norm drift tolerated before a composed quaternion is renormalized.
pub const RENORMALIZE_TOLERANCE: f32 = 1.0e-6;

/// Quaternion for `Rx(x) * Ry(y) * Rz(z)`, angles in radians.
pub fn convert_euler_radians_to_quaternion(euler_radians: Vec3) -> Quat {
    let qx = Quat::rotation_x(euler_radians.x);
    let qy = Quat::rotation_y(euler_radians.y);
    let qz = Quat::rotation_z(euler_radians.z);
    let q = qx * qy * qz;

    if (q.dot(q) - 1.0).abs() > RENORMALIZE_TOLERANCE {
        q.normalize()
    } else {
        q
    }
}

/// Quaternion for `Rx(x) * Ry(y) * Rz(z)`, angles in degrees.
pub fn convert_euler_degrees_to_quaternion(euler_degrees: Vec3) -> Quat {
    convert_euler_radians_to_quaternion(deg_to_rad(euler_degrees))
}

/// Euler angles (radians) of a unit quaternion.
pub fn convert_quaternion_to_euler_radians(q: Quat) -> Vec3 {
    euler_radians_from_matrix(&Mat3::from_quat(q))
}

/// Euler angles (degrees) of a unit quaternion.
pub fn convert_quaternion_to_euler_degrees(q: Quat) -> Vec3 {
    rad_to_deg(convert_quaternion_to_euler_radians(q))
}

/// Euler angles (radians) of an orthonormal rotation matrix.
///
/// `y` lands in `[-π/2, π/2]`, `x` and `z` in `[-π, π]`.
pub fn euler_radians_from_matrix(m: &Mat3) -> Vec3 {
    let sin_y = m.get(0, 2).clamp(-1.0, 1.0);
    let cos_y = m.get(0, 0).hypot(m.get(0, 1));

    if cos_y < GIMBAL_LOCK_EPSILON {
        let y = FRAC_PI_2.copysign(sin_y);
        let z = m.get(1, 0).atan2(m.get(1, 1));
        debug!(cos_y, z, "gimbal lock, pinning x rotation to zero");
        return Vec3::new(0.0, y, z);
    }

    let x = (-m.get(1, 2)).atan2(m.get(2, 2));
    let y = sin_y.atan2(cos_y);
    // Row 1 of Rx(-x) * R is [sin z, cos z, 0].
    let (sx, cx) = x.sin_cos();
    let z = (cx * m.get(1, 0) + sx * m.get(2, 0)).atan2(cx * m.get(1, 1) + sx * m.get(2, 1));
    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_1_SQRT_2;

    #[test]
    fn ninety_about_x() {
        let q = convert_euler_degrees_to_quaternion(Vec3::new(90.0, 0.0, 0.0));
        assert!(q.abs_diff_eq(Quat::new(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2), 1e-4));
    }

    #[test]
    fn zero_angles_give_identity() {
        let q = convert_euler_radians_to_quaternion(Vec3::ZERO);
        assert_eq!(q, Quat::IDENTITY);
        assert_eq!(convert_quaternion_to_euler_radians(Quat::IDENTITY), Vec3::ZERO);
    }

    #[test]
    fn z_is_applied_before_x() {
        // Z(90) takes +X to +Y, then X(90) takes +Y to +Z.
        let q = convert_euler_degrees_to_quaternion(Vec3::new(90.0, 0.0, 90.0));
        assert!(q.rotate(Vec3::UNIT_X).abs_diff_eq(Vec3::UNIT_Z, 1e-5));
    }

    #[test]
    fn composition_matches_closed_form() {
        let e = Vec3::new(0.3, -0.7, 1.9);
        let (sx, cx) = (e.x * 0.5).sin_cos();
        let (sy, cy) = (e.y * 0.5).sin_cos();
        let (sz, cz) = (e.z * 0.5).sin_cos();
        let expected = Quat::new(
            sx * cy * cz + cx * sy * sz,
            cx * sy * cz - sx * cy * sz,
            cx * cy * sz + sx * sy * cz,
            cx * cy * cz - sx * sy * sz,
        );
        assert!(convert_euler_radians_to_quaternion(e).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn degrees_roundtrip() {
        let e = Vec3::new(25.0, -60.0, 135.0);
        let back = convert_quaternion_to_euler_degrees(convert_euler_degrees_to_quaternion(e));
        assert!(back.abs_diff_eq(e, 1e-3), "{back:?}");
    }

    #[test]
    fn single_axis_extraction() {
        let x = convert_quaternion_to_euler_radians(Quat::rotation_x(0.4));
        assert!(x.abs_diff_eq(Vec3::new(0.4, 0.0, 0.0), 1e-6));
        let y = convert_quaternion_to_euler_radians(Quat::rotation_y(-1.2));
        assert!(y.abs_diff_eq(Vec3::new(0.0, -1.2, 0.0), 1e-5));
        let z = convert_quaternion_to_euler_radians(Quat::rotation_z(2.5));
        assert!(z.abs_diff_eq(Vec3::new(0.0, 0.0, 2.5), 1e-6));
    }

    #[test]
    fn gimbal_lock_pins_x_and_keeps_the_rotation() {
        let locked = Vec3::new(30.0, 90.0, 40.0);
        let q = convert_euler_degrees_to_quaternion(locked);
        let e = convert_quaternion_to_euler_degrees(q);
        assert_eq!(e.x, 0.0);
        assert!((e.y - 90.0).abs() < 1e-4);
        assert!((e.z - 70.0).abs() < 1e-2, "{e:?}");
        assert!(convert_euler_degrees_to_quaternion(e).same_rotation(q, 1e-4));

        let locked = Vec3::new(30.0, -90.0, 40.0);
        let q = convert_euler_degrees_to_quaternion(locked);
        let e = convert_quaternion_to_euler_degrees(q);
        assert_eq!(e.x, 0.0);
        assert!((e.y + 90.0).abs() < 1e-4);
        assert!((e.z - 10.0).abs() < 1e-2, "{e:?}");
        assert!(convert_euler_degrees_to_quaternion(e).same_rotation(q, 1e-4));
    }

    #[test]
    fn near_gimbal_lock_keeps_all_three_angles() {
        for y in [89.7_f32, 89.75, 89.8, -89.75] {
            let e = Vec3::new(30.0, y, 40.0);
            let q = convert_euler_degrees_to_quaternion(e);
            let back = convert_quaternion_to_euler_degrees(q);
            assert!(back.abs_diff_eq(e, 0.05), "{e:?} -> {back:?}");
            assert!(convert_euler_degrees_to_quaternion(back).same_rotation(q, 1e-5));
        }
    }

    #[test]
    fn lock_threshold_on_both_sides() {
        // Just outside: x survives and the triple still rebuilds the rotation.
        let q = convert_euler_degrees_to_quaternion(Vec3::new(30.0, 89.99, 40.0));
        let back = convert_quaternion_to_euler_degrees(q);
        assert!(back.x != 0.0 && back.y < 90.0, "{back:?}");
        assert!(convert_euler_degrees_to_quaternion(back).same_rotation(q, 1e-5));

        // Exactly locked (30, 90, 40): x is pinned, the coupled 70 lands in z.
        let (s, c) = 70.0_f32.to_radians().sin_cos();
        let m = Mat3::from_rows(0.0, 0.0, 1.0, s, c, 0.0, -c, s, 0.0);
        let e = rad_to_deg(euler_radians_from_matrix(&m));
        assert_eq!(e.x, 0.0);
        assert!((e.y - 90.0).abs() < 1e-4 && (e.z - 70.0).abs() < 1e-3, "{e:?}");
    }

    #[test]
    fn overshooting_sine_is_clamped() {
        // Slightly non-unit input pushes m02 past 1.
        let q = Quat::new(0.0, 0.7072, 0.0, 0.7072);
        let e = convert_quaternion_to_euler_radians(q);
        assert!(e.is_finite());
        assert!((e.y - FRAC_PI_2).abs() < 1e-3, "{e:?}");
    }
}
