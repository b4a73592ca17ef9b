//! Statement and declaration AST nodes

use super::Expr;

/// A statement
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: u32) -> Self {
        Self { kind, line }
    }
}

/// Statement kinds
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Function declaration: fn f(n: i32) -> i32 { ... }
    Function(FnDecl),
    /// Immutable binding: let x: i32 = 1;
    Let(Binding),
    /// Mutable binding: var x: i32 = 1;
    Var(Binding),
    /// Named constant: const x: i32 = 1;
    Const(Binding),
    /// Assignment to an existing binding: x = 1;
    Assign { target: String, value: Expr },
    /// Return from the enclosing function: return x;
    Return(Option<Expr>),
    /// Expression evaluated for effect: f(1);
    Expr(Expr),
    /// Conditional: if c { ... } else { ... }
    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    /// Loop: while c { ... }
    While { condition: Expr, body: Vec<Stmt> },
}

impl StmtKind {
    /// Kind tag name, for dispatch diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Function(_) => "Function",
            Self::Let(_) => "Let",
            Self::Var(_) => "Var",
            Self::Const(_) => "Const",
            Self::Assign { .. } => "Assign",
            Self::Return(_) => "Return",
            Self::Expr(_) => "Expr",
            Self::If { .. } => "If",
            Self::While { .. } => "While",
        }
    }
}

/// A let/var/const declaration: name, optional type annotation spelling,
/// optional initializer
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub annotation: Option<String>,
    pub init: Option<Expr>,
}

impl Binding {
    pub fn new(name: String, annotation: Option<String>, init: Option<Expr>) -> Self {
        Self {
            name,
            annotation,
            init,
        }
    }
}

/// Function declaration
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub name: String,
    pub params: Vec<Param>,
    /// Return type spelling; "void" for functions that return nothing
    pub return_type: String,
    pub body: Vec<Stmt>,
}

impl FnDecl {
    pub fn new(name: String, params: Vec<Param>, return_type: String, body: Vec<Stmt>) -> Self {
        Self {
            name,
            params,
            return_type,
            body,
        }
    }
}

/// Function parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
    pub line: u32,
}

impl Param {
    pub fn new(name: String, ty: String, line: u32) -> Self {
        Self { name, ty, line }
    }
}
