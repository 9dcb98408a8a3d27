//! Logging, tracing and error reporting.
//!
//! Everything in the crate logs through `tracing`. [`init_tracing`] installs
//! the subscriber the binary uses:
//!
//! ```text
//! tracing macros ─┬─▶ EnvFilter ─▶ fmt layer ─▶ stderr
//!                 └─▶ EnvFilter ─▶ tracing-opentelemetry ─▶ FileSpanExporter ─▶ OTLP JSON lines
//! ```
//!
//! The OpenTelemetry branch is only installed when `trace_file` is configured.
//! Trace files rotate at 10 MiB and keep three timestamped backups.
//!
//! # Configuration
//!
//! The filter is resolved from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use devradar::observability::init_tracing;
//! use devradar::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("tracing is now active");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`reporter`]: The collaborator failed searches are reported to
//! - [`rotation`]: Size-rotated line writer
//! - `exporter`: OpenTelemetry span exporter over a rotated file
//! - `otlp`: OTLP JSON encoding of span batches

mod exporter;
pub mod init;
mod otlp;
pub mod reporter;
pub mod rotation;

pub use init::init_tracing;
pub use reporter::{ErrorReporter, TracingReporter};
pub use rotation::RotatingFile;
