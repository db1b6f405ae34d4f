// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Lexical scope chain for name resolution.
//!
//! Scopes form a stack: the global scope at the bottom, then one level per
//! function body and per nested block. Lookup walks from the innermost level
//! outwards; definition always targets the innermost level.

use std::collections::HashMap;

use ecow::EcoString;

use crate::source_analysis::Span;
use crate::types::Type;

/// What a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Constant,
    Parameter,
    DataBlock,
}

/// A resolved name with its type and declaration site.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: EcoString,
    pub kind: SymbolKind,
    pub ty: Type,
    pub span: Span,
    /// Built-in symbols have no declaration site in user code.
    pub builtin: bool,
}

impl Symbol {
    #[must_use]
    pub fn new(name: impl Into<EcoString>, kind: SymbolKind, ty: Type, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            span,
            builtin: false,
        }
    }

    #[must_use]
    pub fn builtin_constant(name: impl Into<EcoString>, ty: Type) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Constant,
            ty,
            span: Span::point(0),
            builtin: true,
        }
    }

    /// Constants and data blocks cannot be assigned to.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self.kind, SymbolKind::Constant | SymbolKind::DataBlock)
    }
}

/// A stack of name-to-symbol maps.
pub struct ScopeChain {
    levels: Vec<HashMap<EcoString, Symbol>>,
}

impl ScopeChain {
    /// Creates a chain with an empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: vec![HashMap::new()],
        }
    }

    pub fn push(&mut self) {
        self.levels.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        // The global scope stays.
        if self.levels.len() > 1 {
            self.levels.pop();
        }
    }

    /// Defines `symbol` in the innermost scope. Returns the previous symbol
    /// when the name was already defined at this level.
    pub fn define(&mut self, symbol: Symbol) -> Option<Symbol> {
        // The chain always has at least the global level.
        self.levels
            .last_mut()
            .and_then(|level| level.insert(symbol.name.clone(), symbol))
    }

    /// Resolves `name`, innermost scope first.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.levels.iter().rev().find_map(|level| level.get(name))
    }

    /// Returns true if `name` is visible in an enclosing scope (not the
    /// innermost one).
    #[must_use]
    pub fn shadows(&self, name: &str) -> bool {
        self.levels
            .iter()
            .rev()
            .skip(1)
            .any(|level| level.contains_key(name))
    }
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(name: &str, ty: Type) -> Symbol {
        Symbol::new(name, SymbolKind::Variable, ty, Span::new(0, 1))
    }

    #[test]
    fn lookup_walks_outwards() {
        let mut scopes = ScopeChain::new();
        scopes.define(symbol("x", Type::Byte));
        scopes.push();
        scopes.define(symbol("y", Type::Word));

        assert_eq!(scopes.lookup("x").map(|s| &s.ty), Some(&Type::Byte));
        assert_eq!(scopes.lookup("y").map(|s| &s.ty), Some(&Type::Word));
        assert!(scopes.lookup("z").is_none());
    }

    #[test]
    fn inner_definition_shadows_outer() {
        let mut scopes = ScopeChain::new();
        scopes.define(symbol("x", Type::Byte));
        scopes.push();
        assert!(scopes.shadows("x"));
        scopes.define(symbol("x", Type::Word));
        assert_eq!(scopes.lookup("x").map(|s| &s.ty), Some(&Type::Word));

        scopes.pop();
        assert_eq!(scopes.lookup("x").map(|s| &s.ty), Some(&Type::Byte));
    }

    #[test]
    fn redefinition_in_same_scope_returns_previous() {
        let mut scopes = ScopeChain::new();
        assert!(scopes.define(symbol("x", Type::Byte)).is_none());
        assert!(scopes.define(symbol("x", Type::Word)).is_some());
    }

    #[test]
    fn global_scope_cannot_be_popped() {
        let mut scopes = ScopeChain::new();
        scopes.define(symbol("x", Type::Byte));
        scopes.pop();
        assert!(scopes.lookup("x").is_some());
    }

    #[test]
    fn constants_are_immutable() {
        let c = Symbol::new("MAX", SymbolKind::Constant, Type::Byte, Span::new(0, 3));
        assert!(c.is_immutable());
        assert!(!symbol("x", Type::Byte).is_immutable());
    }
}
