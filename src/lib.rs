//! Larch compiler front end
//!
//! The name-resolution phase for Larch, a statically-typed language
//! with variables, recursive functions, and classes. Given a parsed
//! tree, it binds every identifier to its declaration, enforces
//! scoping and redeclaration rules, builds the symbol tables later
//! phases depend on, and interns canonical types for declared
//! functions and classes.
//!
//! ```
//! use larch_lang::ast::{Decl, Program, TypeNode, VarDecl, Ident};
//! use larch_lang::{resolve_names, LogSink, PrimitiveType, Span, TypeTable};
//!
//! let mut program = Program {
//!     globals: vec![Decl::Var(VarDecl {
//!         ty: TypeNode::primitive(PrimitiveType::Int, Span::dummy()),
//!         name: Ident::new("answer", Span::dummy()),
//!         init: None,
//!         span: Span::dummy(),
//!     })],
//! };
//! let mut types = TypeTable::new();
//! let mut sink = LogSink;
//! assert!(resolve_names(&mut program, &mut types, &mut sink));
//! ```

pub mod frontend;
pub mod types;
pub mod utils;

pub use frontend::ast;
pub use frontend::names::{resolve_names, NameResolver};
pub use frontend::symbols::{ScopeTable, Symbol, SymbolKind, SymbolTable};
pub use types::{PrimitiveType, Type, TypeId, TypeTable};
pub use utils::{CapturingSink, DiagnosticSink, LogSink, NameError, Span};
