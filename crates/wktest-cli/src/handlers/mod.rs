//! Subcommand handlers. Each handler takes the constructed port and
//! owns its terminal output; nothing here reaches around the port into
//! the ambient environment.

pub mod check_deps;
pub mod env;
pub mod harness;
pub mod paths;
pub mod version;
