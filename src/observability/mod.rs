//! Logging and tracing for the plugin and its worker.
//!
//! Zellij plugins have no terminal of their own to log to, so everything goes
//! to files in the data directory:
//!
//! ```text
//! tracing ─┬─ fmt layer ─────────────────────── shopdash.log
//!          └─ tracing-opentelemetry ─ exporter ─ shopdash-spans.json
//! ```
//!
//! Both files rotate at 10 MB and keep three backups. Plugin and worker each
//! call [`init_tracing`] once; trace context travels with every worker request
//! so worker spans join the plugin trace that caused them.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, LOG_FILE, SPAN_FILE};
