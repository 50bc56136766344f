//! `rotation_core`
//!
//! Conversions between the three common encodings of a 3D orientation:
//! rigid transforms, unit quaternions and Euler angle triples, plus axis-angle
//! extraction and "look-at" construction.
//!
//! Conventions:
//! - Right-handed coordinates, column vectors.
//! - Euler triples `(x, y, z)` compose as `Rx(x) * Ry(y) * Rz(z)`
//!   (Z applied first, then Y, then X).
//! - Angles are degrees unless a function name says radians.
//!
//! Design goals:
//! - Pure functions over `Copy` value types; safe to call from any thread.
//! - Total: degenerate inputs get documented fallbacks, never NaN or panics.
//! - No `unsafe`.

pub mod angle;
pub mod axis_angle;
pub mod config;
pub mod euler;
pub mod euler_transform;
pub mod look_at;
pub mod math;
pub mod report;
pub mod sweep;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::angle::*;
    pub use crate::axis_angle::*;
    pub use crate::euler::*;
    pub use crate::euler_transform::*;
    pub use crate::look_at::*;
    pub use crate::math::*;
}
