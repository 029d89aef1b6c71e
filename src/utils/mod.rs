//! Utility module

mod error;
mod span;

pub use error::{CapturingSink, DiagnosticSink, LogSink, NameError};
pub use span::Span;
