//! "Look-at" transforms.
//!
//! Builds a transform at a source position whose chosen local axis points at a
//! target. The reference up is world +Z; when the look direction is (nearly)
//! vertical, world +Y takes its place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::{Transform, Vec3};

/// Look directions shorter than this produce the identity rotation.
pub const LOOK_AT_EPSILON: f32 = 1.0e-6;

/// `|forward · up|` above which world Z is too close to the look direction to
/// serve as the reference up.
pub const PARALLEL_THRESHOLD: f32 = 0.99;

/// One of the six signed principal local axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Axis {
    XPositive,
    XNegative,
    #[default]
    YPositive,
    YNegative,
    ZPositive,
    ZNegative,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::XPositive,
        Axis::XNegative,
        Axis::YPositive,
        Axis::YNegative,
        Axis::ZPositive,
        Axis::ZNegative,
    ];

    /// The local-space direction this axis names.
    pub fn unit_vector(self) -> Vec3 {
        match self {
            Axis::XPositive => Vec3::UNIT_X,
            Axis::XNegative => -Vec3::UNIT_X,
            Axis::YPositive => Vec3::UNIT_Y,
            Axis::YNegative => -Vec3::UNIT_Y,
            Axis::ZPositive => Vec3::UNIT_Z,
            Axis::ZNegative => -Vec3::UNIT_Z,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Axis::XPositive => "+x",
            Axis::XNegative => "-x",
            Axis::YPositive => "+y",
            Axis::YNegative => "-y",
            Axis::ZPositive => "+z",
            Axis::ZNegative => "-z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Axis {
    type Err = AxisParseError;

    /// Accepts `+x`, `x`, `-X`, `XPositive`, `y_negative` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match norm.as_str() {
            "+x" | "x" | "xpositive" => Ok(Axis::XPositive),
            "-x" | "xnegative" => Ok(Axis::XNegative),
            "+y" | "y" | "ypositive" => Ok(Axis::YPositive),
            "-y" | "ynegative" => Ok(Axis::YNegative),
            "+z" | "z" | "zpositive" => Ok(Axis::ZPositive),
            "-z" | "znegative" => Ok(Axis::ZNegative),
            _ => Err(AxisParseError(s.to_string())),
        }
    }
}

/// Error type for axis parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisParseError(pub String);

impl fmt::Display for AxisParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown axis {:?} (expected one of +x, -x, +y, -y, +z, -z)", self.0)
    }
}

impl std::error::Error for AxisParseError {}

/// Transform at `from` whose local `forward_axis` points toward `to`.
///
/// The remaining two basis vectors are permuted and negated so the basis stays
/// orthonormal and right-handed for every choice of axis. When `from` and `to`
/// coincide there is no direction to look along and the result is the identity
/// rotation positioned at `from`.
pub fn create_look_at(from: Vec3, to: Vec3, forward_axis: Axis) -> Transform {
    let delta = to - from;
    if delta.len() < LOOK_AT_EPSILON {
        debug!(
            from = ?from,
            to = ?to,
            "look-at target coincides with source, using identity rotation"
        );
        return Transform::from_translation(from);
    }
    let forward = delta * (1.0 / delta.len());

    let up = if forward.dot(Vec3::UNIT_Z).abs() > PARALLEL_THRESHOLD {
        Vec3::UNIT_Y
    } else {
        Vec3::UNIT_Z
    };

    let right = forward.cross(up).normalize_or(0.0, Vec3::UNIT_X);
    let up = right.cross(forward).normalize_or(0.0, Vec3::UNIT_Z);

    let (x, y, z) = match forward_axis {
        Axis::XPositive => (forward, -right, up),
        Axis::XNegative => (-forward, right, up),
        Axis::YPositive => (right, forward, up),
        Axis::YNegative => (-right, -forward, up),
        Axis::ZPositive => (right, -up, forward),
        Axis::ZNegative => (right, up, -forward),
    };
    Transform::from_columns(x, y, z, from)
}
