//! Semantic analysis: scoping, symbols, and type checking

mod analyzer;
mod scope;
mod types;

pub use analyzer::Analyzer;
pub use scope::{ScopeStack, Symbol, SymbolKind};
pub use types::{TypeChecker, TypeInfo, TypeKind};
