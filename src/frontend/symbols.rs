//! Symbol tables for Larch
//!
//! A [`ScopeTable`] is one lexical level; a [`SymbolTable`] is the
//! stack of levels tracking the current nesting during resolution.
//! Symbols are created once, when their declaration resolves, and are
//! shared from then on: the owning scope holds one reference and every
//! identifier they resolved is attached another.

use crate::types::{TypeId, TypeTable};
use std::collections::HashMap;
use std::rc::Rc;

/// Kind of symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Fn,
    Class,
}

/// One bound name, immutable after creation
#[derive(Debug)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
    ty: TypeId,
}

impl Symbol {
    pub fn new(name: &str, kind: SymbolKind, ty: TypeId) -> Self {
        Self {
            name: name.to_string(),
            kind,
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// The declared type: a variable's type, a function's signature,
    /// or a class's own type
    pub fn data_type(&self) -> TypeId {
        self.ty
    }
}

/// A single lexical scope: name to symbol, names unique within it
#[derive(Debug, Default)]
pub struct ScopeTable {
    symbols: HashMap<String, Rc<Symbol>>,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `name` is already bound in this table. Enclosing scopes
    /// are not consulted; shadowing across levels is legal.
    pub fn clash(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Bind the symbol under its name. Returns false and leaves the
    /// table untouched if the name is already bound here.
    pub fn insert(&mut self, symbol: Rc<Symbol>) -> bool {
        if self.clash(symbol.name()) {
            return false;
        }
        self.symbols.insert(symbol.name().to_string(), symbol);
        true
    }

    /// Look up a name in this table only
    pub fn lookup_local(&self, name: &str) -> Option<&Rc<Symbol>> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Stack of scopes implementing nested lexical scoping
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Vec<ScopeTable>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new empty scope
    pub fn enter_scope(&mut self) {
        log::trace!("enter scope (depth {})", self.scopes.len());
        self.scopes.push(ScopeTable::new());
    }

    /// Pop the innermost scope and hand it back, so callers that need
    /// to retain it (class field namespaces) can.
    ///
    /// # Panics
    ///
    /// Panics if no scope is open; an unbalanced leave is a defect in
    /// the pass, not a user error.
    pub fn leave_scope(&mut self) -> ScopeTable {
        log::trace!("leave scope (depth {})", self.scopes.len());
        match self.scopes.pop() {
            Some(scope) => scope,
            None => panic!("leave_scope on an empty scope stack"),
        }
    }

    /// Innermost-to-outermost search across the whole stack
    pub fn find(&self, name: &str) -> Option<&Rc<Symbol>> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.lookup_local(name))
    }

    /// Redeclaration check against the innermost scope only
    pub fn clash(&self, name: &str) -> bool {
        self.current().clash(name)
    }

    /// Handle for the innermost scope, valid until it is left
    pub fn current_depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Redeclaration check against the scope at `depth`
    pub fn clash_at(&self, depth: usize, name: &str) -> bool {
        self.scopes[depth].clash(name)
    }

    /// Insert into the innermost scope
    pub fn insert(&mut self, symbol: Rc<Symbol>) -> bool {
        self.current_mut().insert(symbol)
    }

    /// Create a class symbol in the innermost scope, carrying `fields`
    /// as its member namespace. The caller has already verified there
    /// is no local clash.
    pub fn add_class(
        &mut self,
        name: &str,
        fields: Rc<ScopeTable>,
        types: &mut TypeTable,
    ) -> Rc<Symbol> {
        let class_ty = types.make_class(name, fields);
        let sym = Rc::new(Symbol::new(name, SymbolKind::Class, class_ty));
        self.insert(Rc::clone(&sym));
        log::debug!("registered class `{}`", name);
        sym
    }

    /// Create a function symbol in the scope at `depth`, not
    /// necessarily the innermost one: a function name must be visible
    /// in its declaring scope, including to recursive calls in its own
    /// body, before the body is resolved.
    pub fn add_fn_at(&mut self, depth: usize, name: &str, signature: TypeId) -> Rc<Symbol> {
        let sym = Rc::new(Symbol::new(name, SymbolKind::Fn, signature));
        self.scopes[depth].insert(Rc::clone(&sym));
        log::debug!("registered function `{}`", name);
        sym
    }

    fn current(&self) -> &ScopeTable {
        self.scopes.last().expect("no scope open")
    }

    fn current_mut(&mut self) -> &mut ScopeTable {
        self.scopes.last_mut().expect("no scope open")
    }
}
