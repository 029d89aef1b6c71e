//! Abstract Syntax Tree definitions for Larch
//!
//! The tree arrives fully parsed and is read-only for resolution,
//! except for the annotation slots: identifier and member-access nodes
//! take a write-once reference to the symbol they resolved to, and
//! type nodes take the canonical type they denote. Later phases read
//! the slots instead of re-resolving.

use crate::frontend::symbols::Symbol;
use crate::types::{PrimitiveType, TypeId};
use crate::utils::Span;
use std::rc::Rc;

/// A complete program (compilation unit)
#[derive(Debug, Clone)]
pub struct Program {
    pub globals: Vec<Decl>,
}

/// Declarations
#[derive(Debug, Clone)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
    Class(ClassDecl),
}

/// Variable declaration, also used for formals and class fields
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ty: TypeNode,
    pub name: Ident,
    pub init: Option<Expr>,
    pub span: Span,
}

/// Function declaration
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub ret: TypeNode,
    pub name: Ident,
    pub formals: Vec<VarDecl>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Class declaration
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: Ident,
    pub members: Vec<Decl>,
    pub span: Span,
}

/// An identifier occurrence with its resolution slot
#[derive(Debug, Clone)]
pub struct Ident {
    pub name: String,
    pub span: Span,
    symbol: Option<Rc<Symbol>>,
}

impl Ident {
    pub fn new(name: &str, span: Span) -> Self {
        Self {
            name: name.to_string(),
            span,
            symbol: None,
        }
    }

    /// Record the symbol this occurrence resolved to. Write-once.
    pub fn attach_symbol(&mut self, symbol: Rc<Symbol>) {
        debug_assert!(self.symbol.is_none(), "symbol attached twice to `{}`", self.name);
        self.symbol = Some(symbol);
    }

    pub fn symbol(&self) -> Option<&Rc<Symbol>> {
        self.symbol.as_ref()
    }
}

/// A type annotation with its resolution slot
#[derive(Debug, Clone)]
pub struct TypeNode {
    pub kind: TypeNodeKind,
    pub span: Span,
    resolved: Option<TypeId>,
}

#[derive(Debug, Clone)]
pub enum TypeNodeKind {
    Primitive(PrimitiveType),
    Class(Ident),
}

impl TypeNode {
    pub fn new(kind: TypeNodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            resolved: None,
        }
    }

    pub fn primitive(prim: PrimitiveType, span: Span) -> Self {
        Self::new(TypeNodeKind::Primitive(prim), span)
    }

    pub fn class(name: &str, span: Span) -> Self {
        Self::new(TypeNodeKind::Class(Ident::new(name, span)), span)
    }

    /// Record the canonical type this annotation denotes. Write-once.
    pub fn attach_type(&mut self, ty: TypeId) {
        debug_assert!(self.resolved.is_none(), "type attached twice");
        self.resolved = Some(ty);
    }

    pub fn resolved(&self) -> Option<TypeId> {
        self.resolved
    }
}

/// Statements
#[derive(Debug, Clone)]
pub enum Stmt {
    Decl(VarDecl),
    Assign { dst: Loc, src: Expr, span: Span },
    PostInc { loc: Loc, span: Span },
    PostDec { loc: Loc, span: Span },
    /// Read a value from the input stream into a location
    Input { dst: Loc, span: Span },
    /// Write a value to the output stream
    Output { src: Expr, span: Span },
    Call(CallExpr),
    If { cond: Expr, body: Vec<Stmt>, span: Span },
    IfElse {
        cond: Expr,
        body_true: Vec<Stmt>,
        body_false: Vec<Stmt>,
        span: Span,
    },
    While { cond: Expr, body: Vec<Stmt>, span: Span },
    Return { expr: Option<Expr>, span: Span },
    Exit { span: Span },
}

/// Expressions
#[derive(Debug, Clone)]
pub enum Expr {
    IntLit { value: i64, span: Span },
    StrLit { value: String, span: Span },
    True { span: Span },
    False { span: Span },
    Loc(Loc),
    Call(CallExpr),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        span: Span,
    },
}

/// Call expression; the callee is a location so methods on class
/// fields stay expressible
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Loc,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

/// A storage location: a bare identifier or a member access chain
#[derive(Debug, Clone)]
pub enum Loc {
    Id(Ident),
    Member {
        base: Box<Loc>,
        field: Ident,
        span: Span,
        /// Resolution slot for the access as a whole; mirrors the
        /// field identifier's slot
        symbol: Option<Rc<Symbol>>,
    },
}

impl Loc {
    pub fn id(name: &str, span: Span) -> Self {
        Self::Id(Ident::new(name, span))
    }

    pub fn member(base: Loc, field: &str, span: Span) -> Self {
        Self::Member {
            base: Box::new(base),
            field: Ident::new(field, span),
            span,
            symbol: None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Id(id) => id.span,
            Self::Member { span, .. } => *span,
        }
    }

    /// The symbol this location resolved to, if resolution succeeded
    pub fn symbol(&self) -> Option<&Rc<Symbol>> {
        match self {
            Self::Id(id) => id.symbol(),
            Self::Member { symbol, .. } => symbol.as_ref(),
        }
    }

    /// Record the symbol a member access resolved to. Write-once.
    pub fn attach_symbol(&mut self, sym: Rc<Symbol>) {
        match self {
            Self::Id(id) => id.attach_symbol(sym),
            Self::Member { symbol, .. } => {
                debug_assert!(symbol.is_none(), "symbol attached twice to member access");
                *symbol = Some(sym);
            }
        }
    }
}
