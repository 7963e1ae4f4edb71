//! Transient stack-of-scopes symbol table.
//!
//! Lives only for the duration of one analysis pass; it is not part of the
//! AST and is dropped when analysis finishes.

use crate::ast::Type;
use std::collections::HashMap;

/// Lexical scope stack mapping identifier names to declared types.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, Type>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack { scopes: Vec::new() }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    /// Bind `name` in the innermost scope, shadowing any outer binding.
    pub fn define(&mut self, name: impl Into<String>, ty: Type) {
        if self.scopes.is_empty() {
            self.enter_scope();
        }
        self.scopes
            .last_mut()
            .expect("scope stack is non-empty after enter_scope")
            .insert(name.into(), ty);
    }

    /// Resolve `name` through the scope chain, innermost to outermost.
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Resolve `name` in the innermost scope only (duplicate detection).
    pub fn lookup_current(&self, name: &str) -> Option<&Type> {
        self.scopes.last().and_then(|scope| scope.get(name))
    }
}
