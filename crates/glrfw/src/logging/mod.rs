//! Logging setup.
//!
//! The crate logs through the `log` facade only: compiler and linker
//! diagnostics at `error`, resource lifetimes at `debug`. Applications that
//! want those records on stderr call [`init_logging`] early in `main`.

mod init;

pub use init::{init_logging, LoggingConfig};
