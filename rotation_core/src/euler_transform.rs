//! Euler angles <-> transforms.
//!
//! Two interchangeable algorithms sit behind [`EulerConversion`]:
//!
//! - [`FastConversion`] goes through the quaternion path in [`crate::euler`] in
//!   both directions.
//! - [`PreciseConversion`] evaluates sin/cos of each angle once and writes the
//!   expanded `Rx * Ry * Rz` matrix term by term; extraction uses only
//!   two-argument arctangents, which keeps it continuous through gimbal lock.
//!
//! Both honour the same contract: their rotations agree element-wise within
//! `1e-5`. They are not expected to be bit-identical.
//!
//! Euler triples carry no position, so translation is dropped on the way in
//! and zero on the way out.

use crate::angle::{deg_to_rad, rad_to_deg};
use crate::euler::{convert_euler_radians_to_quaternion, euler_radians_from_matrix};
use crate::math::{Mat3, Transform, Vec3};

/// A strategy for converting between Euler triples and transforms.
///
/// Callers pick the implementation statically; there is no runtime switch.
pub trait EulerConversion {
    /// Rotation-only transform for `Rx(x) * Ry(y) * Rz(z)`, angles in radians.
    fn euler_radians_to_transform(&self, euler_radians: Vec3) -> Transform;

    /// Euler angles (radians) of the rotational part of `transform`.
    fn transform_to_euler_radians(&self, transform: &Transform) -> Vec3;

    fn euler_degrees_to_transform(&self, euler_degrees: Vec3) -> Transform {
        self.euler_radians_to_transform(deg_to_rad(euler_degrees))
    }

    fn transform_to_euler_degrees(&self, transform: &Transform) -> Vec3 {
        rad_to_deg(self.transform_to_euler_radians(transform))
    }
}

/// Quaternion-composition path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastConversion;

impl EulerConversion for FastConversion {
    fn euler_radians_to_transform(&self, euler_radians: Vec3) -> Transform {
        Transform::from_quat(convert_euler_radians_to_quaternion(euler_radians))
    }

    fn transform_to_euler_radians(&self, transform: &Transform) -> Vec3 {
        euler_radians_from_matrix(&transform.rotation_matrix())
    }
}

/// Direct trigonometric path.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreciseConversion;

impl EulerConversion for PreciseConversion {
    fn euler_radians_to_transform(&self, euler_radians: Vec3) -> Transform {
        let (sx, cx) = euler_radians.x.sin_cos();
        let (sy, cy) = euler_radians.y.sin_cos();
        let (sz, cz) = euler_radians.z.sin_cos();

        let rotation = Mat3::from_rows(
            cy * cz,
            -cy * sz,
            sy,
            cx * sz + sx * sy * cz,
            cx * cz - sx * sy * sz,
            -sx * cy,
            sx * sz - cx * sy * cz,
            sx * cz + cx * sy * sz,
            cx * cy,
        );
        Transform::from_mat3(rotation)
    }

    fn transform_to_euler_radians(&self, transform: &Transform) -> Vec3 {
        let m = transform.rotation_matrix();

        let x = (-m.get(1, 2)).atan2(m.get(2, 2));
        let cos_y = m.get(0, 0).hypot(m.get(0, 1));
        let y = m.get(0, 2).atan2(cos_y);

        // Undo X; row 1 of Rx(-x) * R is [sin z, cos z, 0].
        let (sx, cx) = x.sin_cos();
        let z = (cx * m.get(1, 0) + sx * m.get(2, 0))
            .atan2(cx * m.get(1, 1) + sx * m.get(2, 1));
        Vec3::new(x, y, z)
    }
}

/// Euler angles (degrees) of the rotational part of `transform`.
pub fn convert_transform_to_euler_degrees(transform: &Transform) -> Vec3 {
    FastConversion.transform_to_euler_degrees(transform)
}

/// Euler angles (radians) of the rotational part of `transform`.
pub fn convert_transform_to_euler_radians(transform: &Transform) -> Vec3 {
    FastConversion.transform_to_euler_radians(transform)
}

/// Like [`convert_transform_to_euler_degrees`], without the gimbal-lock branch.
pub fn convert_transform_to_euler_degrees_precise(transform: &Transform) -> Vec3 {
    PreciseConversion.transform_to_euler_degrees(transform)
}

/// Like [`convert_transform_to_euler_radians`], without the gimbal-lock branch.
pub fn convert_transform_to_euler_radians_precise(transform: &Transform) -> Vec3 {
    PreciseConversion.transform_to_euler_radians(transform)
}

/// Rotation-only transform from Euler angles in degrees.
pub fn convert_euler_degrees_to_transform(euler_degrees: Vec3) -> Transform {
    FastConversion.euler_degrees_to_transform(euler_degrees)
}

/// Rotation-only transform from Euler angles in radians.
pub fn convert_euler_radians_to_transform(euler_radians: Vec3) -> Transform {
    FastConversion.euler_radians_to_transform(euler_radians)
}

/// Rotation-only transform from Euler angles in radians, via direct sin/cos.
pub fn convert_euler_radians_to_transform_precise(euler_radians: Vec3) -> Transform {
    PreciseConversion.euler_radians_to_transform(euler_radians)
}

/// Rotation-only transform from Euler angles in degrees, via direct sin/cos.
pub fn convert_euler_degrees_to_transform_precise(euler_degrees: Vec3) -> Transform {
    PreciseConversion.euler_degrees_to_transform(euler_degrees)
}
