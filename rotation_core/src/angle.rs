//! Degree/radian scaling over vectors.

use std::f32::consts::PI;

use crate::math::Vec3;

/// Degrees per radian.
pub const RAD_TO_DEG: f32 = 180.0 / PI;

/// Radians per degree.
pub const DEG_TO_RAD: f32 = PI / 180.0;

/// Converts each component from radians to degrees.
pub fn rad_to_deg(radians: Vec3) -> Vec3 {
    radians * RAD_TO_DEG
}

/// Converts each component from degrees to radians.
pub fn deg_to_rad(degrees: Vec3) -> Vec3 {
    degrees * DEG_TO_RAD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn() {
        let r = deg_to_rad(Vec3::new(90.0, -180.0, 0.0));
        assert!(r.abs_diff_eq(Vec3::new(PI / 2.0, -PI, 0.0), 1e-6));
        let d = rad_to_deg(Vec3::new(PI, PI / 4.0, 0.0));
        assert!(d.abs_diff_eq(Vec3::new(180.0, 45.0, 0.0), 1e-4));
    }

    #[test]
    fn conversions_invert_each_other() {
        for v in [
            Vec3::ZERO,
            Vec3::new(1.0, -2.5, 3.25),
            Vec3::new(0.001, 6.5, -3.75),
            Vec3::new(123.0, -45.0, 720.0),
        ] {
            let back = deg_to_rad(rad_to_deg(v));
            let tol = v.x.abs().max(v.y.abs()).max(v.z.abs()) * 4.0 * f32::EPSILON;
            assert!(back.abs_diff_eq(v, tol), "{v:?} -> {back:?}");
        }
        assert_eq!(deg_to_rad(rad_to_deg(Vec3::ZERO)), Vec3::ZERO);
    }
}
