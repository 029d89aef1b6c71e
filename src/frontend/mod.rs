//! Frontend module - AST, symbol tables, name resolution

pub mod ast;
pub mod names;
pub mod symbols;
