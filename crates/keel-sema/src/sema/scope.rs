//! Scopes and the symbol table

use super::types::TypeInfo;
use crate::common::{SemaError, SemaResult};
use std::collections::HashMap;

/// The analyzer's record of one declared name
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// For functions this is the return type
    pub ty: TypeInfo,
    pub is_initialized: bool,
    /// 1-based line of the declaration
    pub line: u32,
}

impl Symbol {
    pub fn new(name: String, kind: SymbolKind, ty: TypeInfo, line: u32) -> Self {
        Self {
            name,
            kind,
            ty,
            is_initialized: false,
            line,
        }
    }

    pub fn with_initialized(mut self, is_initialized: bool) -> Self {
        self.is_initialized = is_initialized;
        self
    }
}

/// Kind of symbol
#[derive(Debug, Clone)]
pub enum SymbolKind {
    /// let/var binding or function parameter
    Variable,
    /// const binding
    Constant,
    /// Function, with its ordered parameter types
    Function { params: Vec<TypeInfo> },
}

/// Stack of nested scopes, innermost last.
///
/// The global scope is pushed at construction; the stack is never empty
/// while an analysis runs. Each scope exclusively owns the symbols declared
/// directly in it; popping the scope drops them.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    /// Drop all scopes and start over with a fresh global scope
    pub fn reset(&mut self) {
        self.scopes.clear();
        self.scopes.push(HashMap::new());
    }

    /// Push an empty scope
    pub fn enter(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pop the innermost scope. Underflow means the analyzer itself is
    /// broken, not the analyzed source.
    pub fn exit(&mut self, line: u32) -> SemaResult<()> {
        if self.scopes.pop().is_none() {
            return Err(SemaError::ScopeUnderflow { line });
        }
        Ok(())
    }

    /// True if the current (innermost) scope already binds `name`
    pub fn declared_in_current(&self, name: &str) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.contains_key(name))
    }

    /// Insert into the current scope only. Bindings in outer scopes never
    /// block a declaration; shadowing is name resolution, not a collision.
    pub fn declare(&mut self, symbol: Symbol) -> SemaResult<()> {
        let scope = match self.scopes.last_mut() {
            Some(scope) => scope,
            None => return Err(SemaError::ScopeUnderflow { line: symbol.line }),
        };
        if scope.contains_key(&symbol.name) {
            return Err(SemaError::DuplicateSymbol {
                name: symbol.name,
                line: symbol.line,
            });
        }
        scope.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Find the nearest binding of `name`, scanning innermost to outermost
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Mutable variant of `lookup`, for initialization-state updates
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
