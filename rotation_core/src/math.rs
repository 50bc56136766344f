//! Math types.
//!
//! This module intentionally stays small and deterministic.
//! It avoids SIMD/unsafe and focuses on stable semantics: just enough vector,
//! quaternion and matrix arithmetic for the rotation converters, not a general
//! linear-algebra library.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// 3D vector.
///
/// Used for positions, Euler angle triples and rotation axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Right-handed cross product.
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn len(self) -> f32 {
        self.len_sq().sqrt()
    }

    /// Returns the unit vector, or `fallback` when the length is at or below
    /// `epsilon`.
    pub fn normalize_or(self, epsilon: f32, fallback: Self) -> Self {
        let len = self.len();
        if len <= epsilon {
            fallback
        } else {
            self * (1.0 / len)
        }
    }

    /// Component-wise closeness.
    pub fn abs_diff_eq(self, other: Self, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Unit quaternion (conceptually).
///
/// Nothing here enforces the unit norm; callers normalize before handing a
/// quaternion to the converters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about `axis`. The axis must be unit length.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    pub fn rotation_x(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::UNIT_X, angle)
    }

    pub fn rotation_y(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::UNIT_Y, angle)
    }

    pub fn rotation_z(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::UNIT_Z, angle)
    }

    /// Builds a quaternion from an orthonormal rotation matrix.
    ///
    /// Branches on the largest of the trace and the diagonal so the square
    /// root never sees a small argument.
    pub fn from_mat3(m: &Mat3) -> Self {
        let (m00, m11, m22) = (m.get(0, 0), m.get(1, 1), m.get(2, 2));
        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(
                (m.get(2, 1) - m.get(1, 2)) / s,
                (m.get(0, 2) - m.get(2, 0)) / s,
                (m.get(1, 0) - m.get(0, 1)) / s,
                0.25 * s,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self::new(
                0.25 * s,
                (m.get(0, 1) + m.get(1, 0)) / s,
                (m.get(0, 2) + m.get(2, 0)) / s,
                (m.get(2, 1) - m.get(1, 2)) / s,
            )
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self::new(
                (m.get(0, 1) + m.get(1, 0)) / s,
                0.25 * s,
                (m.get(1, 2) + m.get(2, 1)) / s,
                (m.get(0, 2) - m.get(2, 0)) / s,
            )
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self::new(
                (m.get(0, 2) + m.get(2, 0)) / s,
                (m.get(1, 2) + m.get(2, 1)) / s,
                0.25 * s,
                (m.get(1, 0) - m.get(0, 1)) / s,
            )
        };
        q.normalize()
    }

    /// Vector (imaginary) part.
    pub fn imaginary(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns the unit quaternion, or identity for a zero quaternion.
    pub fn normalize(self) -> Self {
        let len = self.len();
        if len <= f32::EPSILON {
            return Self::IDENTITY;
        }
        let inv = 1.0 / len;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Rotates `v` by this quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        // v' = v + 2w(u x v) + 2u x (u x v)
        let u = self.imaginary();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Component-wise closeness.
    pub fn abs_diff_eq(self, other: Self, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
            && (self.w - other.w).abs() <= tolerance
    }

    /// Closeness as rotations: `q` and `-q` compare equal.
    pub fn same_rotation(self, other: Self, tolerance: f32) -> bool {
        let other = if self.dot(other) < 0.0 {
            Self::new(-other.x, -other.y, -other.z, -other.w)
        } else {
            other
        };
        self.abs_diff_eq(other, tolerance)
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`.
impl Mul for Quat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

/// 3x3 matrix (column-major), acting on column vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub const fn from_cols(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self {
            m: [[x.x, x.y, x.z], [y.x, y.y, y.z], [z.x, z.y, z.z]],
        }
    }

    /// Builds from row-major elements, the way rotation formulas are usually
    /// written down.
    #[allow(clippy::too_many_arguments)]
    pub const fn from_rows(
        m00: f32,
        m01: f32,
        m02: f32,
        m10: f32,
        m11: f32,
        m12: f32,
        m20: f32,
        m21: f32,
        m22: f32,
    ) -> Self {
        Self {
            m: [[m00, m10, m20], [m01, m11, m21], [m02, m12, m22]],
        }
    }

    /// Rotation matrix of a unit quaternion.
    pub fn from_quat(q: Quat) -> Self {
        let (x2, y2, z2) = (q.x + q.x, q.y + q.y, q.z + q.z);
        let (xx, yy, zz) = (q.x * x2, q.y * y2, q.z * z2);
        let (xy, xz, yz) = (q.x * y2, q.x * z2, q.y * z2);
        let (wx, wy, wz) = (q.w * x2, q.w * y2, q.w * z2);
        Self::from_rows(
            1.0 - (yy + zz),
            xy - wz,
            xz + wy,
            xy + wz,
            1.0 - (xx + zz),
            yz - wx,
            xz - wy,
            yz + wx,
            1.0 - (xx + yy),
        )
    }

    /// Element at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[col][row]
    }

    pub fn col(&self, i: usize) -> Vec3 {
        let c = self.m[i];
        Vec3::new(c[0], c[1], c[2])
    }

    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.col(0) * v.x + self.col(1) * v.y + self.col(2) * v.z
    }

    pub fn determinant(&self) -> f32 {
        self.col(0).dot(self.col(1).cross(self.col(2)))
    }

    /// Multiplies every element by `s`.
    pub fn scaled(&self, s: f32) -> Self {
        Self::from_cols(self.col(0) * s, self.col(1) * s, self.col(2) * s)
    }

    /// Element-wise closeness.
    pub fn abs_diff_eq(&self, other: &Self, tolerance: f32) -> bool {
        (0..3).all(|i| self.col(i).abs_diff_eq(other.col(i), tolerance))
    }
}

/// Rigid transform: rotation (optionally uniformly scaled) plus translation.
///
/// The basis columns are the images of the local X, Y and Z axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub basis: Mat3,
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        basis: Mat3::IDENTITY,
        translation: Vec3::ZERO,
    };

    pub const fn from_columns(x: Vec3, y: Vec3, z: Vec3, translation: Vec3) -> Self {
        Self {
            basis: Mat3::from_cols(x, y, z),
            translation,
        }
    }

    pub const fn from_mat3(rotation: Mat3) -> Self {
        Self {
            basis: rotation,
            translation: Vec3::ZERO,
        }
    }

    pub fn from_quat(rotation: Quat) -> Self {
        Self::from_mat3(Mat3::from_quat(rotation))
    }

    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            basis: Mat3::IDENTITY,
            translation,
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.basis = self.rotation_matrix().scaled(scale);
        self
    }

    /// Uniform scale carried by the basis (length of the X column).
    pub fn uniform_scale(&self) -> f32 {
        self.basis.col(0).len()
    }

    /// Basis with the uniform scale divided out.
    pub fn rotation_matrix(&self) -> Mat3 {
        let scale = self.uniform_scale();
        if scale <= f32::EPSILON || (scale - 1.0).abs() <= f32::EPSILON {
            self.basis
        } else {
            self.basis.scaled(1.0 / scale)
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_mat3(&self.rotation_matrix())
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.basis.transform_vector(p) + self.translation
    }
}
