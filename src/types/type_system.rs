//! Canonical type representations for Larch
//!
//! All types live in a single append-only [`TypeTable`]. Construction
//! is canonicalizing: structurally identical requests for a list or
//! function type return the same [`TypeId`], so later phases compare
//! types by handle identity instead of walking structures. Class types
//! are nominal; every class declaration mints a fresh one.

use crate::frontend::symbols::ScopeTable;
use std::collections::HashMap;
use std::rc::Rc;

/// Primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Int,
    Bool,
    Str,
    Void,
}

/// Opaque handle to an interned type.
///
/// Two handles are equal exactly when they denote the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

/// An immutable type
#[derive(Debug, Clone)]
pub enum Type {
    Primitive(PrimitiveType),
    /// Sentinel meaning "analysis already failed here"; it propagates
    /// without being re-reported.
    Error,
    /// A class with a named field namespace. The field scope is
    /// attached once, after the class body has resolved, and never
    /// mutated afterwards.
    Class {
        name: String,
        fields: Rc<ScopeTable>,
    },
    /// A function signature; `params` always refers to a `List`.
    Fn { params: TypeId, ret: TypeId },
    /// An ordered parameter-type sequence
    List(Vec<TypeId>),
}

/// Structural keys for the intern table. Class types are nominal and
/// deliberately have no key here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum InternKey {
    Primitive(PrimitiveType),
    Error,
    Fn(TypeId, TypeId),
    List(Vec<TypeId>),
}

/// Append-only table of canonical types
#[derive(Debug, Default)]
pub struct TypeTable {
    types: Vec<Type>,
    interned: HashMap<InternKey, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, key: InternKey, ty: Type) -> TypeId {
        if let Some(&id) = self.interned.get(&key) {
            return id;
        }
        let id = self.push(ty);
        self.interned.insert(key, id);
        id
    }

    fn push(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    /// Canonical handle for a primitive type
    pub fn primitive(&mut self, prim: PrimitiveType) -> TypeId {
        self.intern(InternKey::Primitive(prim), Type::Primitive(prim))
    }

    /// The error sentinel (a singleton)
    pub fn error_type(&mut self) -> TypeId {
        self.intern(InternKey::Error, Type::Error)
    }

    /// Canonical handle for an ordered type sequence
    pub fn make_list(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.intern(InternKey::List(elements.clone()), Type::List(elements))
    }

    /// Canonical handle for a function signature. `params` must be a
    /// handle produced by [`TypeTable::make_list`].
    pub fn make_fn(&mut self, params: TypeId, ret: TypeId) -> TypeId {
        self.intern(InternKey::Fn(params, ret), Type::Fn { params, ret })
    }

    /// Mint a fresh class type carrying its resolved field scope
    pub fn make_class(&mut self, name: &str, fields: Rc<ScopeTable>) -> TypeId {
        self.push(Type::Class {
            name: name.to_string(),
            fields,
        })
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.0 as usize]
    }

    /// The field scope of a class type, or None for any other type
    pub fn class_fields(&self, id: TypeId) -> Option<&Rc<ScopeTable>> {
        match self.get(id) {
            Type::Class { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Whether a variable may be declared with this type
    pub fn valid_var_type(&self, id: TypeId) -> bool {
        match self.get(id) {
            Type::Primitive(PrimitiveType::Void) => false,
            Type::Error => false,
            Type::List(_) => false,
            Type::Primitive(_) | Type::Class { .. } | Type::Fn { .. } => true,
        }
    }
}
