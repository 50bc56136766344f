//! `rotation_cli`
//!
//! Command-line front end for `rotation_core`:
//! - One-shot conversions (`rotconv euler-to-quat 90 0 0`)
//! - An interactive console when started without a command
//! - The randomized agreement sweep (`rotconv check`)

pub mod command;

pub use command::{exec_args, exec_line, execute, parse, Command, Options};
