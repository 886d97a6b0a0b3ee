//! CLI crate for the wktest port layer.
//!
//! The binary is a thin dispatcher; everything testable lives here:
//! parser definition, subcommands, the bootstrap composition root, and
//! the handlers.

mod bootstrap;
mod commands;
pub mod handlers;
mod parser;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::Commands;
pub use parser::Cli;
