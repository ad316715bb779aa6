//! Runtime bootstrap for the command-line front end.

pub mod error;
pub mod telemetry;
