//! Keel semantic analysis
//!
//! The analysis pass of the Keel front end: given an AST produced by the
//! parser, it verifies lexical scoping, detects symbol redeclaration,
//! assigns and checks static types, and tracks definite-initialization
//! state. Analysis is fail-fast: the first violation aborts the walk and
//! comes back as one line-carrying error.
//!
//! ## Architecture
//!
//! - **AST** (`ast/`): the closed node family the parser hands over
//! - **Semantic analysis** (`sema/`): the scope stack, type rules, and the
//!   analyzer that walks one program depth-first
//! - **Common** (`common/`): the diagnostic taxonomy and error reporting
//!
//! ```
//! use keel_sema::ast::{Binding, Expr, ExprKind, Program, Stmt, StmtKind};
//! use keel_sema::Analyzer;
//!
//! // let answer: i32 = 42;
//! let program = Program::new(vec![Stmt::new(
//!     StmtKind::Let(Binding::new(
//!         "answer".to_string(),
//!         Some("i32".to_string()),
//!         Some(Expr::new(ExprKind::IntLiteral(42), 1)),
//!     )),
//!     1,
//! )]);
//!
//! let mut analyzer = Analyzer::new();
//! assert!(analyzer.analyze(&program).is_ok());
//! ```

pub mod ast;
pub mod common;
pub mod sema;

// Re-exports for convenience
pub use common::{DiagnosticReporter, SemaError, SemaResult};
pub use sema::{Analyzer, ScopeStack, Symbol, SymbolKind, TypeChecker, TypeInfo, TypeKind};
