//! The semantic analysis pass

use super::scope::{ScopeStack, Symbol, SymbolKind};
use super::types::{TypeChecker, TypeInfo};
use crate::ast::*;
use crate::common::{SemaError, SemaResult};

/// Semantic analyzer for one compilation unit.
///
/// Walks the AST depth-first, checking scoping, redeclaration, types, and
/// initialization state. Fail-fast: the first violation aborts the walk.
/// State is private and unsynchronized; analyzing independent units
/// concurrently takes independent instances.
pub struct Analyzer {
    scope: ScopeStack,
    types: TypeChecker,
    current_return_type: Option<TypeInfo>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            scope: ScopeStack::new(),
            types: TypeChecker::new(),
            current_return_type: None,
        }
    }

    /// Analyze a complete program.
    ///
    /// Starts from a fresh global scope, so no symbols survive from a previous
    /// call. The scope stack is left balanced on every path, so the instance
    /// can be reused after an error.
    pub fn analyze(&mut self, program: &Program) -> SemaResult<()> {
        self.scope.reset();
        self.current_return_type = None;
        for stmt in &program.body {
            self.visit_stmt(stmt)?;
        }
        Ok(())
    }

    /// Route one statement to its handler by kind tag
    fn visit_stmt(&mut self, stmt: &Stmt) -> SemaResult<()> {
        match &stmt.kind {
            StmtKind::Function(func) => self.visit_function(func, stmt.line),
            StmtKind::Let(binding) => self.visit_let(binding, stmt.line),
            StmtKind::Var(binding) => self.visit_var(binding, stmt.line),
            StmtKind::Const(binding) => self.visit_const(binding, stmt.line),
            StmtKind::Assign { target, value } => self.visit_assign(target, value, stmt.line),
            StmtKind::Return(value) => self.visit_return(value.as_ref(), stmt.line),
            StmtKind::Expr(expr) => self.resolve_expr(expr).map(|_| ()),
            // TODO: handle If/While once control-flow analysis lands
            StmtKind::If { .. } | StmtKind::While { .. } => Err(SemaError::UnhandledNodeKind {
                kind: stmt.kind.name(),
                line: stmt.line,
            }),
        }
    }

    fn visit_let(&mut self, binding: &Binding, line: u32) -> SemaResult<()> {
        self.declare_binding(binding, line, SymbolKind::Variable, false, false)
    }

    fn visit_var(&mut self, binding: &Binding, line: u32) -> SemaResult<()> {
        self.declare_binding(binding, line, SymbolKind::Variable, true, true)
    }

    fn visit_const(&mut self, binding: &Binding, line: u32) -> SemaResult<()> {
        self.declare_binding(binding, line, SymbolKind::Constant, true, false)
    }

    /// Shared let/var/const algorithm: duplicate check, annotation
    /// resolution, initializer rules, inference, registration
    fn declare_binding(
        &mut self,
        binding: &Binding,
        line: u32,
        kind: SymbolKind,
        requires_init: bool,
        mutable: bool,
    ) -> SemaResult<()> {
        if self.scope.declared_in_current(&binding.name) {
            return Err(SemaError::DuplicateSymbol {
                name: binding.name.clone(),
                line,
            });
        }

        let declared = match &binding.annotation {
            Some(spelling) => self.types.resolve_spelling(spelling, line)?,
            None => TypeInfo::auto(),
        };

        let (ty, is_initialized) = match &binding.init {
            Some(init) => {
                let init_ty = self.resolve_expr(init)?;
                if declared.is_auto() {
                    (init_ty, true)
                } else if self.types.compatible(&declared, &init_ty) {
                    (declared, true)
                } else {
                    return Err(SemaError::TypeMismatch {
                        expected: declared.to_string(),
                        found: init_ty.to_string(),
                        line,
                    });
                }
            }
            None if requires_init => {
                return Err(SemaError::MissingInitializer {
                    name: binding.name.clone(),
                    line,
                });
            }
            // No initializer to infer from either
            None if declared.is_auto() => {
                return Err(SemaError::MissingAnnotation {
                    name: binding.name.clone(),
                    line,
                });
            }
            None => (declared, false),
        };

        self.scope.declare(
            Symbol::new(binding.name.clone(), kind, ty.with_mutability(mutable), line)
                .with_initialized(is_initialized),
        )
    }

    /// Functions stay callable wherever they are visible, so uniqueness is
    /// checked against the whole visible chain, not just the current scope.
    fn visit_function(&mut self, func: &FnDecl, line: u32) -> SemaResult<()> {
        if self.scope.lookup(&func.name).is_some() {
            return Err(SemaError::DuplicateSymbol {
                name: func.name.clone(),
                line,
            });
        }

        let return_type = match func.return_type.as_str() {
            // Accepted in return position only; not part of the type catalog
            "void" => TypeInfo::void(),
            spelling => self.types.resolve_spelling(spelling, line)?,
        };

        let mut param_types = Vec::with_capacity(func.params.len());
        for param in &func.params {
            param_types.push(self.types.resolve_spelling(&param.ty, param.line)?);
        }

        // Declared before the body scope is pushed, so recursive calls
        // resolve
        self.scope.declare(
            Symbol::new(
                func.name.clone(),
                SymbolKind::Function {
                    params: param_types.clone(),
                },
                return_type.clone(),
                line,
            )
            .with_initialized(true),
        )?;

        // The pop and the state restore must run on every path, error
        // included, to keep the stack balanced
        let saved_return_type = self.current_return_type.replace(return_type);
        self.scope.enter();
        let body_result = self.check_function_body(func, &param_types);
        let balance = self.scope.exit(line);
        self.current_return_type = saved_return_type;
        body_result?;
        balance
    }

    fn check_function_body(&mut self, func: &FnDecl, param_types: &[TypeInfo]) -> SemaResult<()> {
        for (param, ty) in func.params.iter().zip(param_types) {
            // Duplicates are checked against the body scope only
            if self.scope.declared_in_current(&param.name) {
                return Err(SemaError::DuplicateParameter {
                    name: param.name.clone(),
                    line: param.line,
                });
            }
            self.scope.declare(
                Symbol::new(
                    param.name.clone(),
                    SymbolKind::Variable,
                    ty.clone(),
                    param.line,
                )
                .with_initialized(true),
            )?;
        }

        for stmt in &func.body {
            self.visit_stmt(stmt)?;
        }
        Ok(())
    }

    fn visit_assign(&mut self, target: &str, value: &Expr, line: u32) -> SemaResult<()> {
        let target_ty = match self.scope.lookup(target) {
            None => {
                return Err(SemaError::UndeclaredIdentifier {
                    name: target.to_string(),
                    line,
                });
            }
            Some(symbol) => {
                let assignable = match symbol.kind {
                    // An uninitialized `let` accepts its first assignment
                    SymbolKind::Variable => symbol.ty.is_mutable || !symbol.is_initialized,
                    SymbolKind::Constant | SymbolKind::Function { .. } => false,
                };
                if !assignable {
                    return Err(SemaError::AssignToImmutable {
                        name: target.to_string(),
                        line,
                    });
                }
                symbol.ty.clone()
            }
        };

        let value_ty = self.resolve_expr(value)?;
        if !self.types.compatible(&target_ty, &value_ty) {
            return Err(SemaError::TypeMismatch {
                expected: target_ty.to_string(),
                found: value_ty.to_string(),
                line,
            });
        }

        if let Some(symbol) = self.scope.lookup_mut(target) {
            symbol.is_initialized = true;
        }
        Ok(())
    }

    fn visit_return(&mut self, value: Option<&Expr>, line: u32) -> SemaResult<()> {
        let expected = match &self.current_return_type {
            Some(ty) => ty.clone(),
            None => return Err(SemaError::ReturnOutsideFunction { line }),
        };

        let found = match value {
            Some(expr) => self.resolve_expr(expr)?,
            None => TypeInfo::void(),
        };

        if !self.types.compatible(&expected, &found) {
            return Err(SemaError::TypeMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
                line,
            });
        }
        Ok(())
    }

    /// Compute the static type of an expression subtree
    fn resolve_expr(&mut self, expr: &Expr) -> SemaResult<TypeInfo> {
        match &expr.kind {
            ExprKind::IntLiteral(_) => Ok(TypeInfo::int(32, true)),
            ExprKind::FloatLiteral(_) => Ok(TypeInfo::float(64)),
            ExprKind::StringLiteral(_) => Ok(TypeInfo::string()),
            ExprKind::BoolLiteral(_) => Ok(TypeInfo::bool()),
            ExprKind::Identifier(name) => self.resolve_identifier(name, expr.line),
            ExprKind::Binary { op, left, right } => {
                let left_ty = self.resolve_expr(left)?;
                let right_ty = self.resolve_expr(right)?;
                self.types
                    .binary_result_type(*op, &left_ty, &right_ty, expr.line)
            }
            ExprKind::Call { callee, args } => self.resolve_call(callee, args, expr.line),
        }
    }

    fn resolve_identifier(&self, name: &str, line: u32) -> SemaResult<TypeInfo> {
        let symbol =
            self.scope
                .lookup(name)
                .ok_or_else(|| SemaError::UndeclaredIdentifier {
                    name: name.to_string(),
                    line,
                })?;
        if !symbol.is_initialized {
            return Err(SemaError::UninitializedVariable {
                name: name.to_string(),
                line,
            });
        }
        Ok(symbol.ty.clone())
    }

    fn resolve_call(&mut self, callee: &str, args: &[Expr], line: u32) -> SemaResult<TypeInfo> {
        let (param_types, return_type) = match self.scope.lookup(callee) {
            None => {
                return Err(SemaError::UndeclaredIdentifier {
                    name: callee.to_string(),
                    line,
                });
            }
            Some(symbol) => match &symbol.kind {
                SymbolKind::Function { params } => (params.clone(), symbol.ty.clone()),
                SymbolKind::Variable | SymbolKind::Constant => {
                    return Err(SemaError::NotCallable {
                        name: callee.to_string(),
                        line,
                    });
                }
            },
        };

        if args.len() != param_types.len() {
            return Err(SemaError::ArityMismatch {
                name: callee.to_string(),
                expected: param_types.len(),
                found: args.len(),
                line,
            });
        }

        for (arg, param_ty) in args.iter().zip(&param_types) {
            let arg_ty = self.resolve_expr(arg)?;
            if !self.types.compatible(param_ty, &arg_ty) {
                return Err(SemaError::TypeMismatch {
                    expected: param_ty.to_string(),
                    found: arg_ty.to_string(),
                    line: arg.line,
                });
            }
        }

        Ok(return_type)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
