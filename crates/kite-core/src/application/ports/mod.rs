//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kite-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: existence probes and writes
//!   - `TemplateProvider`: built-in template text

pub mod output;

pub use output::{Filesystem, TemplateProvider};

#[cfg(test)]
pub use output::MockFilesystem;
