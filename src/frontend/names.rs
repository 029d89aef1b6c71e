//! Name resolution for Larch
//!
//! Walks the parsed tree top-down, binds every identifier occurrence
//! to the declaration it refers to, and attaches the resolved symbols
//! and canonical types onto the tree for later phases.
//!
//! The traversal is fail-soft: every node reports its own success and
//! the caller combines results with a logical AND, so a failure in one
//! subtree never stops its siblings from being visited. One run
//! therefore surfaces every diagnostic the program deserves.

use crate::frontend::ast::*;
use crate::frontend::symbols::{Symbol, SymbolKind, SymbolTable};
use crate::types::TypeTable;
use crate::utils::{DiagnosticSink, NameError, Span};
use std::rc::Rc;

/// Resolve every name in `program`, interning types into `types` and
/// reporting errors through `sink`. Returns whether the whole program
/// resolved.
pub fn resolve_names(
    program: &mut Program,
    types: &mut TypeTable,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    NameResolver::new(types, sink).resolve_program(program)
}

/// The resolution pass. The symbol table is its only mutable state;
/// scopes are entered and left in strict stack order as the traversal
/// descends and returns.
pub struct NameResolver<'a> {
    symbols: SymbolTable,
    types: &'a mut TypeTable,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> NameResolver<'a> {
    pub fn new(types: &'a mut TypeTable, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            symbols: SymbolTable::new(),
            types,
            sink,
        }
    }

    /// Resolve the whole program inside the global scope. A failing
    /// top-level declaration does not block the ones after it.
    pub fn resolve_program(&mut self, program: &mut Program) -> bool {
        log::debug!("resolving {} top-level declarations", program.globals.len());
        self.symbols.enter_scope();
        let mut result = true;
        for decl in &mut program.globals {
            result = self.resolve_decl(decl) && result;
        }
        self.symbols.leave_scope();
        result
    }

    fn resolve_decl(&mut self, decl: &mut Decl) -> bool {
        match decl {
            Decl::Var(d) => self.resolve_var_decl(d),
            Decl::Fn(d) => self.resolve_fn_decl(d),
            Decl::Class(d) => self.resolve_class_decl(d),
        }
    }

    /// A variable declaration must have a usable type and a locally
    /// fresh name. The initializer is resolved either way, for its own
    /// diagnostics; on any failure the symbol is not inserted, so a
    /// later same-name declaration clashes against the first accepted
    /// one, not a rejected one.
    fn resolve_var_decl(&mut self, d: &mut VarDecl) -> bool {
        let mut valid_type = self.resolve_type_node(&mut d.ty);
        let data_type = d.ty.resolved();

        let valid_init = match &mut d.init {
            Some(init) => self.resolve_expr(init),
            None => true,
        };

        // A missing type after structural resolution is a defect in
        // the pass, not in the input program.
        let data_type = data_type.expect("type node resolved without a type");
        if valid_type {
            valid_type = self.types.valid_var_type(data_type);
        }
        if !valid_type {
            self.report_bad_type(d.name.span);
        }

        let valid_name = !self.symbols.clash(&d.name.name);
        if !valid_name {
            self.report_multi_decl(d.name.span);
        }

        if !valid_type || !valid_name || !valid_init {
            return false;
        }
        let sym = Rc::new(Symbol::new(&d.name.name, SymbolKind::Var, data_type));
        self.symbols.insert(Rc::clone(&sym));
        d.name.attach_symbol(sym);
        true
    }

    fn resolve_fn_decl(&mut self, d: &mut FnDecl) -> bool {
        let valid_ret = self.resolve_type_node(&mut d.ret);

        // Hold onto the function's declaring scope, then open the body
        // scope. The name clash is checked against the declaring scope
        // (e.g. the global scope for a global function), not the body.
        let declaring = self.symbols.current_depth();
        self.symbols.enter_scope();

        let mut valid_name = true;
        if self.symbols.clash_at(declaring, &d.name.name) {
            valid_name = self.report_multi_decl(d.name.span);
        }

        let mut valid_formals = true;
        let mut formal_tys = Vec::with_capacity(d.formals.len());
        for formal in &mut d.formals {
            valid_formals = self.resolve_var_decl(formal) && valid_formals;
            let ty = match formal.ty.resolved() {
                Some(ty) => ty,
                None => self.types.error_type(),
            };
            formal_tys.push(ty);
        }
        let params = self.types.make_list(formal_tys);
        let ret_ty = d.ret.resolved().expect("return type node resolved without a type");
        let signature = self.types.make_fn(params, ret_ty);

        // The symbol must be registered before the body is resolved so
        // recursive calls to the function's own name succeed.
        if valid_name {
            let sym = self.symbols.add_fn_at(declaring, &d.name.name, signature);
            d.name.attach_symbol(sym);
        }

        let mut valid_body = true;
        for stmt in &mut d.body {
            valid_body = self.resolve_stmt(stmt) && valid_body;
        }

        self.symbols.leave_scope();
        valid_ret && valid_formals && valid_name && valid_body
    }

    /// Members are resolved inside a fresh scope, which both validates
    /// them and populates the class's field namespace. Only a fully
    /// valid class is registered; a failed one is dropped entirely and
    /// later references to it cascade as undeclared.
    fn resolve_class_decl(&mut self, d: &mut ClassDecl) -> bool {
        let mut result = true;
        if self.symbols.clash(&d.name.name) {
            result = self.report_multi_decl(d.name.span);
        }

        self.symbols.enter_scope();
        for member in &mut d.members {
            result = self.resolve_decl(member) && result;
        }
        let fields = Rc::new(self.symbols.leave_scope());

        if result {
            let sym = self.symbols.add_class(&d.name.name, fields, self.types);
            d.name.attach_symbol(sym);
        }
        result
    }

    fn resolve_stmt(&mut self, stmt: &mut Stmt) -> bool {
        match stmt {
            Stmt::Decl(d) => self.resolve_var_decl(d),
            Stmt::Assign { dst, src, .. } => {
                let dst_ok = self.resolve_loc(dst);
                let src_ok = self.resolve_expr(src);
                dst_ok && src_ok
            }
            Stmt::PostInc { loc, .. } | Stmt::PostDec { loc, .. } => self.resolve_loc(loc),
            Stmt::Input { dst, .. } => self.resolve_loc(dst),
            Stmt::Output { src, .. } => self.resolve_expr(src),
            Stmt::Call(call) => self.resolve_call(call),
            Stmt::If { cond, body, .. } => {
                let mut result = self.resolve_expr(cond);
                result = self.resolve_block(body) && result;
                result
            }
            Stmt::IfElse {
                cond,
                body_true,
                body_false,
                ..
            } => {
                // Each branch gets its own scope: a name declared in
                // the true branch is not visible in the false branch.
                let mut result = self.resolve_expr(cond);
                result = self.resolve_block(body_true) && result;
                result = self.resolve_block(body_false) && result;
                result
            }
            Stmt::While { cond, body, .. } => {
                let mut result = self.resolve_expr(cond);
                result = self.resolve_block(body) && result;
                result
            }
            Stmt::Return { expr, .. } => match expr {
                Some(expr) => self.resolve_expr(expr),
                None => true,
            },
            Stmt::Exit { .. } => true,
        }
    }

    /// Statement list in its own scope
    fn resolve_block(&mut self, body: &mut [Stmt]) -> bool {
        self.symbols.enter_scope();
        let mut result = true;
        for stmt in body {
            result = self.resolve_stmt(stmt) && result;
        }
        self.symbols.leave_scope();
        result
    }

    fn resolve_expr(&mut self, expr: &mut Expr) -> bool {
        match expr {
            Expr::IntLit { .. } | Expr::StrLit { .. } | Expr::True { .. } | Expr::False { .. } => {
                true
            }
            Expr::Loc(loc) => self.resolve_loc(loc),
            Expr::Call(call) => self.resolve_call(call),
            Expr::Binary { lhs, rhs, .. } => {
                let lhs_ok = self.resolve_expr(lhs);
                let rhs_ok = self.resolve_expr(rhs);
                lhs_ok && rhs_ok
            }
            Expr::Unary { operand, .. } => self.resolve_expr(operand),
        }
    }

    /// Callee before arguments
    fn resolve_call(&mut self, call: &mut CallExpr) -> bool {
        let mut result = self.resolve_loc(&mut call.callee);
        for arg in &mut call.args {
            result = self.resolve_expr(arg) && result;
        }
        result
    }

    /// Base before field. Field names live in the base class's own
    /// namespace, never in the lexical scope stack.
    fn resolve_loc(&mut self, loc: &mut Loc) -> bool {
        match loc {
            Loc::Id(ident) => match self.symbols.find(&ident.name).cloned() {
                Some(sym) => {
                    ident.attach_symbol(sym);
                    true
                }
                None => self.report_undeclared(ident.span),
            },
            Loc::Member {
                base,
                field,
                span,
                symbol,
            } => {
                let result = self.resolve_loc(base);
                let base_sym = match base.symbol() {
                    Some(sym) => Rc::clone(sym),
                    // The base already failed; its diagnostic is out
                    None => return false,
                };

                let fields = match self.types.class_fields(base_sym.data_type()) {
                    Some(fields) => Rc::clone(fields),
                    None => return self.report_bad_type(*span),
                };
                let field_sym = match fields.lookup_local(&field.name) {
                    Some(sym) => Rc::clone(sym),
                    None => return self.report_undeclared(field.span),
                };

                field.attach_symbol(Rc::clone(&field_sym));
                debug_assert!(symbol.is_none(), "symbol attached twice to member access");
                *symbol = Some(field_sym);
                result
            }
        }
    }

    /// Resolve a type annotation and attach its canonical type. Class
    /// names must denote an aggregate; anything else gets the error
    /// sentinel so downstream checks fail without re-reporting.
    fn resolve_type_node(&mut self, node: &mut TypeNode) -> bool {
        let span = node.span;
        let (ty, ok) = match &mut node.kind {
            TypeNodeKind::Primitive(prim) => (self.types.primitive(*prim), true),
            TypeNodeKind::Class(ident) => match self.symbols.find(&ident.name).cloned() {
                Some(sym) if sym.kind() == SymbolKind::Class => {
                    let ty = sym.data_type();
                    ident.attach_symbol(sym);
                    (ty, true)
                }
                _ => {
                    self.report_bad_type(span);
                    (self.types.error_type(), false)
                }
            },
        };
        node.attach_type(ty);
        ok
    }

    fn report_multi_decl(&mut self, span: Span) -> bool {
        self.sink.report(NameError::MultipleDeclaration { span });
        false
    }

    fn report_undeclared(&mut self, span: Span) -> bool {
        self.sink.report(NameError::UndeclaredIdentifier { span });
        false
    }

    fn report_bad_type(&mut self, span: Span) -> bool {
        self.sink.report(NameError::BadVariableType { span });
        false
    }
}
