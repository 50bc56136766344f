//! Command parsing and execution.
//!
//! A command line is split on whitespace; `--flags` may appear anywhere and
//! the remaining tokens are the command name followed by its numbers.

use std::path::PathBuf;

use anyhow::{bail, Context};
use rotation_core::angle::{deg_to_rad, rad_to_deg};
use rotation_core::axis_angle::convert_quaternion_to_axis_angle;
use rotation_core::config::SweepConfig;
use rotation_core::euler::{
    convert_euler_degrees_to_quaternion, convert_euler_radians_to_quaternion,
    convert_quaternion_to_euler_degrees, convert_quaternion_to_euler_radians,
};
use rotation_core::euler_transform::{EulerConversion, FastConversion, PreciseConversion};
use rotation_core::look_at::{create_look_at, Axis};
use rotation_core::math::{Mat3, Quat, Transform, Vec3};
use rotation_core::sweep::run_sweep;
use serde::Serialize;
use tracing::{debug, warn};

/// Quaternions further than this from unit length are reported and normalized.
pub const UNIT_NORM_TOLERANCE: f32 = 1.0e-3;

pub const USAGE: &[&str] = &[
    "Commands:",
    "  euler-to-quat <x> <y> <z>              Euler angles to quaternion",
    "  quat-to-euler <x> <y> <z> <w>          Quaternion to Euler angles",
    "  euler-to-transform <x> <y> <z>         Euler angles to rotation matrix",
    "  transform-to-euler <m00> .. <m22> [tx ty tz]",
    "                                         Row-major rotation (and translation) to Euler angles",
    "  axis-angle <x> <y> <z> <w>             Quaternion to axis and angle (radians)",
    "  look-at <fx> <fy> <fz> <tx> <ty> <tz>  Transform at from looking at to",
    "  check [config.json]                    Run the randomized agreement sweep",
    "  help                                   Show this text",
    "Flags:",
    "  --radians   angles in and out are radians (default degrees)",
    "  --precise   use the direct trigonometric path",
    "  --axis <a>  look-at forward axis: +x -x +y -y +z -z (default +y)",
    "  --json      print JSON instead of text",
];

/// Flags shared by every command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub radians: bool,
    pub precise: bool,
    pub json: bool,
    pub axis: Axis,
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    EulerToQuat(Vec3),
    QuatToEuler(Quat),
    EulerToTransform(Vec3),
    TransformToEuler(Transform),
    AxisAngle(Quat),
    LookAt { from: Vec3, to: Vec3 },
    Check(Option<PathBuf>),
    Help,
}

/// Splits `tokens` into options and a command.
pub fn parse(tokens: &[&str]) -> anyhow::Result<(Options, Command)> {
    let mut opts = Options::default();
    let mut positional = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "--radians" => opts.radians = true,
            "--precise" => opts.precise = true,
            "--json" => opts.json = true,
            "--axis" => {
                let Some(value) = tokens.get(i + 1) else {
                    bail!("--axis needs a value");
                };
                opts.axis = value.parse()?;
                i += 1;
            }
            other => positional.push(other),
        }
        i += 1;
    }

    let Some((&name, args)) = positional.split_first() else {
        return Ok((opts, Command::Help));
    };

    let command = match name {
        "euler-to-quat" => Command::EulerToQuat(vec3(&numbers(name, args, 3)?)),
        "quat-to-euler" => Command::QuatToEuler(unit_quat(&numbers(name, args, 4)?)),
        "euler-to-transform" => Command::EulerToTransform(vec3(&numbers(name, args, 3)?)),
        "transform-to-euler" => {
            let n = if args.len() == 12 { 12 } else { 9 };
            let v = numbers(name, args, n)?;
            let basis = Mat3::from_rows(v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7], v[8]);
            let translation = if n == 12 {
                Vec3::new(v[9], v[10], v[11])
            } else {
                Vec3::ZERO
            };
            Command::TransformToEuler(Transform { basis, translation })
        }
        "axis-angle" => Command::AxisAngle(unit_quat(&numbers(name, args, 4)?)),
        "look-at" => {
            let v = numbers(name, args, 6)?;
            Command::LookAt {
                from: vec3(&v[..3]),
                to: vec3(&v[3..]),
            }
        }
        "check" => match args {
            [] => Command::Check(None),
            [path] => Command::Check(Some(PathBuf::from(*path))),
            _ => bail!("Usage: check [config.json]"),
        },
        "help" => Command::Help,
        other => bail!("unknown command '{}' (try 'help')", other),
    };
    debug!(?command, ?opts, "parsed command");
    Ok((opts, command))
}

fn numbers(name: &str, args: &[&str], count: usize) -> anyhow::Result<Vec<f32>> {
    if args.len() != count {
        bail!("{} expects {} numbers, got {}", name, count, args.len());
    }
    args.iter()
        .map(|a| {
            a.parse::<f32>()
                .with_context(|| format!("{}: '{}' is not a number", name, a))
        })
        .collect()
}

fn vec3(v: &[f32]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

fn unit_quat(v: &[f32]) -> Quat {
    let q = Quat::new(v[0], v[1], v[2], v[3]);
    let len = q.len();
    if (len - 1.0).abs() > UNIT_NORM_TOLERANCE {
        warn!(len, "quaternion is not unit length, normalizing");
    }
    q.normalize()
}

/// Executes `command`, returning the lines to print.
pub fn execute(opts: &Options, command: &Command) -> anyhow::Result<Vec<String>> {
    let unit = if opts.radians { "rad" } else { "deg" };

    match command {
        Command::EulerToQuat(e) => {
            let q = if opts.radians {
                convert_euler_radians_to_quaternion(*e)
            } else {
                convert_euler_degrees_to_quaternion(*e)
            };
            render(opts, &q, || {
                vec![format!("quat x={:.6} y={:.6} z={:.6} w={:.6}", q.x, q.y, q.z, q.w)]
            })
        }
        Command::QuatToEuler(q) => {
            let e = if opts.radians {
                convert_quaternion_to_euler_radians(*q)
            } else {
                convert_quaternion_to_euler_degrees(*q)
            };
            render(opts, &e, || vec![format_euler(e, unit)])
        }
        Command::EulerToTransform(e) => {
            let radians = if opts.radians { *e } else { deg_to_rad(*e) };
            let t = if opts.precise {
                PreciseConversion.euler_radians_to_transform(radians)
            } else {
                FastConversion.euler_radians_to_transform(radians)
            };
            render(opts, &t, || format_transform(&t))
        }
        Command::TransformToEuler(t) => {
            let radians = if opts.precise {
                PreciseConversion.transform_to_euler_radians(t)
            } else {
                FastConversion.transform_to_euler_radians(t)
            };
            let e = if opts.radians { radians } else { rad_to_deg(radians) };
            render(opts, &e, || vec![format_euler(e, unit)])
        }
        Command::AxisAngle(q) => {
            let aa = convert_quaternion_to_axis_angle(*q);
            render(opts, &aa, || {
                vec![format!(
                    "axis ({:.6}, {:.6}, {:.6}) angle {:.6} rad ({:.4} deg)",
                    aa.axis.x,
                    aa.axis.y,
                    aa.axis.z,
                    aa.angle,
                    aa.angle.to_degrees()
                )]
            })
        }
        Command::LookAt { from, to } => {
            let t = create_look_at(*from, *to, opts.axis);
            render(opts, &t, || format_transform(&t))
        }
        Command::Check(path) => {
            let cfg = match path {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("read {}", path.display()))?;
                    SweepConfig::from_json_str(&text)
                        .with_context(|| format!("parse {}", path.display()))?
                }
                None => SweepConfig::default(),
            };
            let report = run_sweep(&cfg);
            let out = if opts.json {
                vec![report.to_json()?]
            } else {
                let mut out: Vec<String> = report
                    .results
                    .iter()
                    .map(|r| {
                        format!(
                            "{} {} {:<60} max {:.3e} (tol {:.1e})",
                            r.status.icon(),
                            r.id,
                            r.name,
                            r.max_error,
                            r.tolerance
                        )
                    })
                    .collect();
                let stats = report.overall_stats();
                out.push(format!(
                    "{} passed, {} failed, {} skipped over {} samples",
                    stats.passed, stats.failed, stats.skipped, stats.samples
                ));
                out
            };
            if !report.all_passed() {
                bail!("{}", out.join("\n"));
            }
            Ok(out)
        }
        Command::Help => Ok(USAGE.iter().map(|s| s.to_string()).collect()),
    }
}

/// Parses and executes one console line.
pub fn exec_line(line: &str) -> anyhow::Result<Vec<String>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    exec_args(&tokens)
}

/// Parses and executes already-split arguments, such as the process argv.
pub fn exec_args<S: AsRef<str>>(args: &[S]) -> anyhow::Result<Vec<String>> {
    let tokens: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    let (opts, command) = parse(&tokens)?;
    execute(&opts, &command)
}

fn render<T: Serialize>(
    opts: &Options,
    value: &T,
    text: impl FnOnce() -> Vec<String>,
) -> anyhow::Result<Vec<String>> {
    if opts.json {
        Ok(vec![serde_json::to_string(value).context("serialize output")?])
    } else {
        Ok(text())
    }
}

fn format_euler(e: Vec3, unit: &str) -> String {
    format!("euler x={:.6} y={:.6} z={:.6} ({})", e.x, e.y, e.z, unit)
}

fn format_transform(t: &Transform) -> Vec<String> {
    let m = &t.basis;
    let mut out: Vec<String> = (0..3)
        .map(|row| {
            format!(
                "[{:>10.6} {:>10.6} {:>10.6}]",
                m.get(row, 0),
                m.get(row, 1),
                m.get(row, 2)
            )
        })
        .collect();
    out.push(format!(
        "translation ({:.6}, {:.6}, {:.6})",
        t.translation.x, t.translation.y, t.translation.z
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_can_appear_anywhere() -> anyhow::Result<()> {
        let (opts, cmd) = parse(&[
            "--json", "look-at", "0", "0", "0", "--axis", "-z", "1", "2", "3",
        ])?;
        assert!(opts.json);
        assert_eq!(opts.axis, Axis::ZNegative);
        assert_eq!(
            cmd,
            Command::LookAt {
                from: Vec3::ZERO,
                to: Vec3::new(1.0, 2.0, 3.0)
            }
        );
        Ok(())
    }

    #[test]
    fn empty_input_is_help() -> anyhow::Result<()> {
        let (_, cmd) = parse(&[])?;
        assert_eq!(cmd, Command::Help);
        assert!(exec_line("   ")?.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_bad_arity_and_numbers() {
        assert!(parse(&["euler-to-quat", "1", "2"]).is_err());
        assert!(parse(&["axis-angle", "0", "0", "zero", "1"]).is_err());
        assert!(parse(&["look-at", "--axis"]).is_err());
        assert!(parse(&["--axis", "w", "help"]).is_err());
        assert!(parse(&["spin"]).is_err());
    }

    #[test]
    fn normalizes_quaternion_input() -> anyhow::Result<()> {
        let (_, cmd) = parse(&["quat-to-euler", "0", "0", "0", "2"])?;
        assert_eq!(cmd, Command::QuatToEuler(Quat::IDENTITY));
        Ok(())
    }

    #[test]
    fn euler_to_quat_text() -> anyhow::Result<()> {
        let out = exec_line("euler-to-quat 90 0 0")?;
        assert_eq!(out, vec!["quat x=0.707107 y=0.000000 z=0.000000 w=0.707107".to_string()]);
        Ok(())
    }

    #[test]
    fn axis_angle_json() -> anyhow::Result<()> {
        let out = exec_line("axis-angle 0 0 0 1 --json")?;
        let aa: rotation_core::axis_angle::AxisAngle = serde_json::from_str(&out[0])?;
        assert_eq!(aa.axis, Vec3::UNIT_Y);
        assert_eq!(aa.angle, 0.0);
        Ok(())
    }

    #[test]
    fn transform_to_euler_accepts_translation() -> anyhow::Result<()> {
        let (_, cmd) = parse(&[
            "transform-to-euler", "1", "0", "0", "0", "1", "0", "0", "0", "1", "4", "5", "6",
        ])?;
        match cmd {
            Command::TransformToEuler(t) => assert_eq!(t.translation, Vec3::new(4.0, 5.0, 6.0)),
            other => panic!("unexpected {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn precise_and_fast_agree_through_json() -> anyhow::Result<()> {
        let fast = exec_line("euler-to-transform 10 20 30 --json")?;
        let precise = exec_line("--precise euler-to-transform 10 20 30 --json")?;
        let fast: Transform = serde_json::from_str(&fast[0])?;
        let precise: Transform = serde_json::from_str(&precise[0])?;
        assert!(fast.basis.abs_diff_eq(&precise.basis, 1e-5));
        Ok(())
    }
}
