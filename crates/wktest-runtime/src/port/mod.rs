//! Platform port implementations.

mod qt;

pub use qt::{DEFAULT_TOOL_VERSION, PORT_FLAG, QtPort, TESTFONTS_ENV};
