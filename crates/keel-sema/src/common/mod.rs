//! Shared infrastructure: the diagnostic taxonomy and error reporting

mod error;

pub use error::{DiagnosticReporter, SemaError, SemaResult};
