//! Configuration system.
//!
//! Loads sweep configuration from JSON strings (file IO left to the app).
//! The conversion functions themselves take no configuration; this only
//! drives the agreement runner and the CLI's `check` command.

use serde::{Deserialize, Serialize};

/// Randomized agreement sweep settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Random inputs drawn per check.
    #[serde(default = "default_samples")]
    pub samples: u32,
    /// RNG seed; the same seed replays the same inputs.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Euler -> quaternion -> Euler tolerance, radians.
    #[serde(default = "default_round_trip_tolerance")]
    pub round_trip_tolerance: f32,
    /// Fast vs precise transform tolerance, per matrix element.
    #[serde(default = "default_agreement_tolerance")]
    pub agreement_tolerance: f32,
    /// Axis-angle -> quaternion tolerance, per component.
    #[serde(default = "default_axis_angle_tolerance")]
    pub axis_angle_tolerance: f32,
    /// Middle angles within this many degrees of ±90 are not sampled for
    /// round-trips.
    #[serde(default = "default_gimbal_margin_degrees")]
    pub gimbal_margin_degrees: f32,
}

fn default_samples() -> u32 {
    2_000
}

fn default_seed() -> u64 {
    0x5EED_0F_2A7E
}

fn default_round_trip_tolerance() -> f32 {
    1.0e-4
}

fn default_agreement_tolerance() -> f32 {
    1.0e-5
}

fn default_axis_angle_tolerance() -> f32 {
    1.0e-5
}

fn default_gimbal_margin_degrees() -> f32 {
    10.0
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            seed: default_seed(),
            round_trip_tolerance: default_round_trip_tolerance(),
            agreement_tolerance: default_agreement_tolerance(),
            axis_angle_tolerance: default_axis_angle_tolerance(),
            gimbal_margin_degrees: default_gimbal_margin_degrees(),
        }
    }
}

impl SweepConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
