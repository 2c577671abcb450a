//! Diagnostics: `tracing` subscriber with optional OTLP file export.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (stderr)
//!                            → tracing-opentelemetry → SDK → OTLP JSON lines → rotating file
//! ```
//!
//! The stderr layer is always on. The file pipeline only exists when
//! `trace_file` is configured; it rotates at 10 MiB and keeps 3 backups.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`exporter`]: span exporter and OTLP JSON encoding
//! - [`rotation`]: size-rotated file

mod exporter;
mod init;
mod rotation;

pub use init::init_tracing;
