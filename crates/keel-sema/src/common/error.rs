//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::ops::Range;
use thiserror::Error;

/// A semantic violation, carrying the 1-based source line of the offending
/// construct.
///
/// Analysis is fail-fast: the first error unwinds the whole `analyze` call,
/// so one value of this type is the complete diagnostic output of a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemaError {
    #[error("symbol '{name}' is already defined")]
    DuplicateSymbol { name: String, line: u32 },

    #[error("duplicate parameter name '{name}'")]
    DuplicateParameter { name: String, line: u32 },

    #[error("declaration of '{name}' requires an initializer")]
    MissingInitializer { name: String, line: u32 },

    #[error("type annotation needed for '{name}'")]
    MissingAnnotation { name: String, line: u32 },

    #[error("mismatched types: expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
        line: u32,
    },

    #[error("unknown type '{spelling}'")]
    UnknownType { spelling: String, line: u32 },

    #[error("undefined identifier '{name}'")]
    UndeclaredIdentifier { name: String, line: u32 },

    #[error("use of uninitialized variable '{name}'")]
    UninitializedVariable { name: String, line: u32 },

    #[error("'{name}' is not a function")]
    NotCallable { name: String, line: u32 },

    #[error("function '{name}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        line: u32,
    },

    #[error("invalid operands to '{op}': {left} and {right}")]
    OperandTypeMismatch {
        op: String,
        left: String,
        right: String,
        line: u32,
    },

    #[error("cannot assign to immutable binding '{name}'")]
    AssignToImmutable { name: String, line: u32 },

    #[error("return outside of a function")]
    ReturnOutsideFunction { line: u32 },

    #[error("no semantic handler for {kind} node")]
    UnhandledNodeKind { kind: &'static str, line: u32 },

    #[error("scope stack underflow")]
    ScopeUnderflow { line: u32 },
}

impl SemaError {
    /// 1-based source line the diagnostic points at
    pub fn line(&self) -> u32 {
        match self {
            Self::DuplicateSymbol { line, .. }
            | Self::DuplicateParameter { line, .. }
            | Self::MissingInitializer { line, .. }
            | Self::MissingAnnotation { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::UnknownType { line, .. }
            | Self::UndeclaredIdentifier { line, .. }
            | Self::UninitializedVariable { line, .. }
            | Self::NotCallable { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::OperandTypeMismatch { line, .. }
            | Self::AssignToImmutable { line, .. }
            | Self::ReturnOutsideFunction { line }
            | Self::UnhandledNodeKind { line, .. }
            | Self::ScopeUnderflow { line } => *line,
        }
    }

    /// True for analyzer-defect signals, as opposed to diagnostics about the
    /// analyzed source. Callers seeing one of these should abort the run
    /// rather than report-and-retry.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::UnhandledNodeKind { .. } | Self::ScopeUnderflow { .. }
        )
    }
}

pub type SemaResult<T> = Result<T, SemaError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Emit one error against a registered file, labeling its source line
    pub fn report(&self, file_id: usize, error: &SemaError) {
        let header = if error.is_internal() {
            "internal error"
        } else {
            "semantic error"
        };

        let diagnostic = Diagnostic::error().with_message(header).with_labels(vec![
            Label::primary(file_id, self.line_range(file_id, error.line()))
                .with_message(error.to_string()),
        ]);

        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }

    /// Byte range covering a 1-based source line, for label placement
    fn line_range(&self, file_id: usize, line: u32) -> Range<usize> {
        let index = line.saturating_sub(1) as usize;
        self.files.line_range(file_id, index).unwrap_or(0..0)
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
