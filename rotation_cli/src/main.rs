//! Standalone converter binary.
//!
//! Usage:
//!   cargo run -p rotation_cli -- <command> [args] [--radians] [--precise] [--axis +y] [--json]
//!
//! With no command the binary reads commands from stdin, one per line.
//!
//! Console commands:
//!   euler-to-quat <x> <y> <z>        - Euler angles to quaternion
//!   quat-to-euler <x> <y> <z> <w>    - Quaternion to Euler angles
//!   look-at <from xyz> <to xyz>      - Look-at transform
//!   check [config.json]              - Agreement sweep
//!   help                             - Full command list
//!   quit                             - Exit

use std::env;
use std::io::{BufRead, Write};

use anyhow::Context;
use rotation_cli::command::{exec_args, exec_line};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        for line in exec_args(&args)? {
            println!("{}", line);
        }
        return Ok(());
    }

    info!("Starting console");
    println!("Type 'help' for commands, 'quit' to exit.");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("] ");
        stdout.flush().context("flush stdout")?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("read stdin")? == 0 {
            break;
        }
        let line = line.trim();
        if line == "quit" || line == "exit" {
            break;
        }
        match exec_line(line) {
            Ok(output) => {
                for line in output {
                    println!("{}", line);
                }
            }
            Err(e) => {
                println!("Error: {:#}", e);
            }
        }
    }

    Ok(())
}
