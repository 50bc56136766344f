//! Randomized agreement sweeps.
//!
//! Draws inputs from a seeded RNG and holds every conversion to its numerical
//! contract: round-trips, fast/precise agreement, and the degenerate-input
//! fallbacks. Results come back as an [`AgreementReport`].

use std::f32::consts::{PI, TAU};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::angle::{deg_to_rad, rad_to_deg};
use crate::axis_angle::{convert_quaternion_to_axis_angle, AxisAngle, DEFAULT_AXIS};
use crate::config::SweepConfig;
use crate::euler::{
    convert_euler_degrees_to_quaternion, convert_euler_radians_to_quaternion,
    convert_quaternion_to_euler_degrees, convert_quaternion_to_euler_radians,
};
use crate::euler_transform::{
    convert_euler_degrees_to_transform, convert_euler_radians_to_transform_precise,
    convert_transform_to_euler_radians, convert_transform_to_euler_radians_precise,
};
use crate::look_at::{create_look_at, Axis};
use crate::math::{Mat3, Quat, Vec3};
use crate::report::{AgreementReport, CheckResult, ReportBuilder};

/// Wraps an angle difference into `[-π, π]`.
pub fn wrap_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Largest per-component angular distance between two Euler triples.
pub fn euler_distance(a: Vec3, b: Vec3) -> f32 {
    wrap_angle(a.x - b.x)
        .abs()
        .max(wrap_angle(a.y - b.y).abs())
        .max(wrap_angle(a.z - b.z).abs())
}

/// Largest per-component distance between two quaternions, ignoring sign.
pub fn rotation_distance(a: Quat, b: Quat) -> f32 {
    let b = if a.dot(b) < 0.0 {
        Quat::new(-b.x, -b.y, -b.z, -b.w)
    } else {
        b
    };
    (a.x - b.x)
        .abs()
        .max((a.y - b.y).abs())
        .max((a.z - b.z).abs())
        .max((a.w - b.w).abs())
}

/// Largest element-wise distance between two matrices.
pub fn matrix_distance(a: &Mat3, b: &Mat3) -> f32 {
    let mut worst = 0.0_f32;
    for col in 0..3 {
        for row in 0..3 {
            let d = (a.get(row, col) - b.get(row, col)).abs();
            if d.is_nan() || d > worst {
                worst = d;
            }
        }
    }
    worst
}

fn vec_distance(a: Vec3, b: Vec3) -> f32 {
    (a.x - b.x).abs().max((a.y - b.y).abs()).max((a.z - b.z).abs())
}

/// Euler triple in radians with the middle angle kept `margin` away from ±π/2.
pub fn random_euler_radians(rng: &mut StdRng, margin_radians: f32) -> Vec3 {
    let y_limit = (PI * 0.5 - margin_radians).max(0.0);
    Vec3::new(
        rng.gen_range(-PI..PI),
        rng.gen_range(-y_limit..=y_limit),
        rng.gen_range(-PI..PI),
    )
}

/// Uniformly distributed unit vector.
pub fn random_unit_vector(rng: &mut StdRng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len = v.len();
        if len > 0.1 && len <= 1.0 {
            return v * (1.0 / len);
        }
    }
}

fn run_check(
    id: &str,
    name: &str,
    category: &str,
    tolerance: f32,
    samples: u32,
    rng: &mut StdRng,
    mut sample: impl FnMut(&mut StdRng, &mut CheckResult),
) -> CheckResult {
    let start = Instant::now();
    let mut check = CheckResult::new(id, name, category, tolerance);
    for _ in 0..samples {
        sample(rng, &mut check);
    }
    let check = check.finish(start.elapsed());
    debug!(id, max_error = check.max_error, status = ?check.status, "check finished");
    check
}

/// Runs every agreement check under `cfg`.
pub fn run_sweep(cfg: &SweepConfig) -> AgreementReport {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let n = cfg.samples;
    let margin = cfg.gimbal_margin_degrees.to_radians();
    info!(samples = n, seed = cfg.seed, "running agreement sweep");

    let mut builder = ReportBuilder::new("Rotation conversion agreement")
        .seed(cfg.seed)
        .metadata("samples", &n.to_string())
        .metadata("gimbal_margin_degrees", &cfg.gimbal_margin_degrees.to_string());

    const EULER: &str = "Euler / quaternion";
    const TRANSFORM: &str = "Euler / transform";
    const AXIS_ANGLE: &str = "Axis-angle";
    const LOOK_AT: &str = "Look-at";
    const UNITS: &str = "Angle units";

    builder = builder.add_check(run_check(
        "EQ-001",
        "Euler radians round-trip through quaternion",
        EULER,
        cfg.round_trip_tolerance,
        n,
        &mut rng,
        |rng, check| {
            let e = random_euler_radians(rng, margin);
            let back = convert_quaternion_to_euler_radians(convert_euler_radians_to_quaternion(e));
            check.record(euler_distance(e, back), || format!("{e:?} -> {back:?}"));
        },
    ));

    builder = builder.add_check(run_check(
        "EQ-002",
        "Euler degrees round-trip through quaternion",
        EULER,
        cfg.round_trip_tolerance,
        n,
        &mut rng,
        |rng, check| {
            let e = rad_to_deg(random_euler_radians(rng, margin));
            let back = convert_quaternion_to_euler_degrees(convert_euler_degrees_to_quaternion(e));
            check.record(euler_distance(deg_to_rad(e), deg_to_rad(back)), || {
                format!("{e:?} -> {back:?}")
            });
        },
    ));

    builder = builder.add_check(run_check(
        "EQ-003",
        "Quaternion output is unit length",
        EULER,
        cfg.agreement_tolerance,
        n,
        &mut rng,
        |rng, check| {
            let e = random_euler_radians(rng, 0.0);
            let q = convert_euler_radians_to_quaternion(e);
            check.record((q.len() - 1.0).abs(), || format!("{e:?} -> {q:?}"));
        },
    ));

    builder = builder.add_check(run_check(
        "ET-001",
        "Fast and precise Euler to transform agree",
        TRANSFORM,
        cfg.agreement_tolerance,
        n,
        &mut rng,
        |rng, check| {
            let e = random_euler_radians(rng, 0.0);
            let fast = convert_euler_degrees_to_transform(rad_to_deg(e));
            let precise = convert_euler_radians_to_transform_precise(e);
            check.record(matrix_distance(&fast.basis, &precise.basis), || format!("{e:?}"));
        },
    ));

    builder = builder.add_check(run_check(
        "ET-002",
        "Fast and precise transform to Euler agree",
        TRANSFORM,
        cfg.round_trip_tolerance,
        n,
        &mut rng,
        |rng, check| {
            let e = random_euler_radians(rng, margin);
            let t = convert_euler_radians_to_transform_precise(e);
            let fast = convert_transform_to_euler_radians(&t);
            let precise = convert_transform_to_euler_radians_precise(&t);
            check.record(euler_distance(fast, precise), || {
                format!("{e:?}: {fast:?} vs {precise:?}")
            });
        },
    ));

    builder = builder.add_check(run_check(
        "ET-003",
        "Precise extraction rebuilds the rotation, gimbal lock included",
        TRANSFORM,
        cfg.round_trip_tolerance,
        n,
        &mut rng,
        |rng, check| {
            let mut e = random_euler_radians(rng, 0.0);
            if rng.gen_bool(0.25) {
                e.y = (PI * 0.5).copysign(e.y);
            }
            let t = convert_euler_radians_to_transform_precise(e);
            let rebuilt = convert_euler_radians_to_transform_precise(
                convert_transform_to_euler_radians_precise(&t),
            );
            check.record(matrix_distance(&t.basis, &rebuilt.basis), || format!("{e:?}"));
        },
    ));

    builder = builder.add_check(run_check(
        "AA-001",
        "Axis-angle rebuilds the quaternion",
        AXIS_ANGLE,
        cfg.axis_angle_tolerance,
        n,
        &mut rng,
        |rng, check| {
            let axis = random_unit_vector(rng);
            let angle = rng.gen_range(1.0e-3..(TAU - 1.0e-3));
            let q = Quat::from_axis_angle(axis, angle);
            let aa = convert_quaternion_to_axis_angle(q);
            check.record(rotation_distance(q, aa.to_quaternion()), || {
                format!("axis {axis:?}, angle {angle}")
            });
        },
    ));

    builder = builder.add_check(run_check(
        "AA-002",
        "Identity yields the default axis and zero angle",
        AXIS_ANGLE,
        0.0,
        2,
        &mut rng,
        {
            let mut inputs = [Quat::IDENTITY, Quat::new(0.0, 0.0, 0.0, -1.0)].into_iter();
            move |_, check| {
                let q = inputs.next().unwrap_or(Quat::IDENTITY);
                let AxisAngle { axis, angle } = convert_quaternion_to_axis_angle(q);
                let error = angle.abs().max(vec_distance(axis, DEFAULT_AXIS));
                check.record(error, || format!("{q:?} -> {axis:?}, {angle}"));
            }
        },
    ));

    builder = builder.add_check(run_check(
        "LA-001",
        "Look-at aligns the chosen axis with the target",
        LOOK_AT,
        cfg.agreement_tolerance * 10.0,
        n,
        &mut rng,
        |rng, check| {
            let from = random_unit_vector(rng) * rng.gen_range(0.0_f32..100.0);
            let to = from + random_unit_vector(rng) * rng.gen_range(0.01_f32..100.0);
            let dir = (to - from).normalize_or(0.0, Vec3::ZERO);
            let axis = Axis::ALL[rng.gen_range(0..Axis::ALL.len())];
            let t = create_look_at(from, to, axis);
            let pointed = t.basis.transform_vector(axis.unit_vector());
            let error = vec_distance(pointed, dir)
                .max((t.basis.determinant() - 1.0).abs())
                .max(vec_distance(t.translation, from));
            check.record(error, || format!("{from:?} -> {to:?} along {axis}"));
        },
    ));

    builder = builder.add_check(run_check(
        "LA-002",
        "Look-at at the source point is identity",
        LOOK_AT,
        0.0,
        n.min(Axis::ALL.len() as u32 * 16),
        &mut rng,
        |rng, check| {
            let p = random_unit_vector(rng) * rng.gen_range(0.0_f32..1000.0);
            let axis = Axis::ALL[rng.gen_range(0..Axis::ALL.len())];
            let t = create_look_at(p, p, axis);
            let error = matrix_distance(&t.basis, &Mat3::IDENTITY)
                .max(vec_distance(t.translation, p));
            check.record(error, || format!("{p:?} along {axis}"));
        },
    ));

    builder = builder.add_check(run_check(
        "AU-001",
        "Degrees and radians invert each other",
        UNITS,
        4.0 * f32::EPSILON,
        n,
        &mut rng,
        |rng, check| {
            let v = Vec3::new(
                rng.gen_range(-1000.0..1000.0),
                rng.gen_range(-1000.0..1000.0),
                rng.gen_range(-1000.0..1000.0),
            );
            let back = deg_to_rad(rad_to_deg(v));
            let scale = v.x.abs().max(v.y.abs()).max(v.z.abs()).max(f32::MIN_POSITIVE);
            check.record(vec_distance(v, back) / scale, || format!("{v:?} -> {back:?}"));
        },
    ));

    let report = builder.build();
    let stats = report.overall_stats();
    info!(
        passed = stats.passed,
        failed = stats.failed,
        skipped = stats.skipped,
        "agreement sweep finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_stays_in_range() {
        let w = wrap_angle(3.0 * PI);
        assert!((w.abs() - PI).abs() < 1e-5, "{w}");
        assert!((wrap_angle(-0.5) + 0.5).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn euler_distance_sees_through_wraparound() {
        let a = Vec3::new(PI - 0.001, 0.0, 0.0);
        let b = Vec3::new(-PI + 0.001, 0.0, 0.0);
        assert!(euler_distance(a, b) < 0.01);
    }

    #[test]
    fn small_sweep_passes() {
        let cfg = SweepConfig {
            samples: 200,
            ..SweepConfig::default()
        };
        let report = run_sweep(&cfg);
        for r in &report.results {
            assert!(
                r.status != crate::report::CheckStatus::Failed,
                "{} failed: max {} > {} ({:?})",
                r.id,
                r.max_error,
                r.tolerance,
                r.counterexample
            );
        }
        assert!(report.all_passed());
    }

    #[test]
    fn same_seed_same_report() {
        let cfg = SweepConfig {
            samples: 20,
            ..SweepConfig::default()
        };
        let a = run_sweep(&cfg);
        let b = run_sweep(&cfg);
        let errors =
            |r: &AgreementReport| r.results.iter().map(|c| c.max_error).collect::<Vec<_>>();
        assert_eq!(errors(&a), errors(&b));
    }
}
