//! Name-resolution diagnostics for Larch
//!
//! Errors found during resolution are recoverable: they are reported
//! through a [`DiagnosticSink`] and the pass keeps walking the tree so
//! one compilation attempt surfaces as many diagnostics as possible.

use crate::utils::Span;
use serde::Serialize;
use thiserror::Error;

/// A user-facing name-resolution error
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NameError {
    /// A name declared twice in the same lexical scope
    #[error("Multiply declared identifier")]
    MultipleDeclaration { span: Span },

    /// A name referenced but not bound in any enclosing scope, or a
    /// field name missing from a class
    #[error("Undeclared identifier")]
    UndeclaredIdentifier { span: Span },

    /// A type that is structurally invalid for its context: a void
    /// variable, an unresolved class name, or member access on a
    /// non-class base
    #[error("Invalid type in declaration")]
    BadVariableType { span: Span },
}

impl NameError {
    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            Self::MultipleDeclaration { span } => *span,
            Self::UndeclaredIdentifier { span } => *span,
            Self::BadVariableType { span } => *span,
        }
    }
}

/// Receives name-resolution errors as they are found.
///
/// The resolver only triggers events; formatting and aggregation are
/// the sink's business. Tests substitute a capturing sink.
pub trait DiagnosticSink {
    fn report(&mut self, err: NameError);
}

/// Sink that forwards every diagnostic through the `log` facade
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, err: NameError) {
        log::error!("{} {}", err.span(), err);
    }
}

/// Sink that remembers every diagnostic, in report order
#[derive(Debug, Default)]
pub struct CapturingSink {
    pub errors: Vec<NameError>,
}

impl DiagnosticSink for CapturingSink {
    fn report(&mut self, err: NameError) {
        self.errors.push(err);
    }
}
