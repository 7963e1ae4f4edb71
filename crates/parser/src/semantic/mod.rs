//! Scope-and-type-directed semantic analysis.
//!
//! Two passes: the first registers every class name (failing on duplicates
//! before any checking starts), the second walks each class enforcing the
//! scoping and typing rules and recording every expression's synthesized
//! type in a [`TypeMap`] keyed by `NodeId`. The AST itself is never mutated.
//!
//! Deliberately preserved simplifications of the source language's checker:
//! method calls resolve their return type by name against the class under
//! analysis only (defaulting to `int`) and never validate arity or argument
//! types against the callee; field access types as `int` without checking
//! that the field exists.

mod symbols;

pub use symbols::ScopeStack;

use crate::ast::*;
use crate::error::SemanticError;
use std::collections::{HashMap, HashSet};

pub type SemanticResult<T> = Result<T, SemanticError>;

/// Side table of resolved expression types, written exactly once per node
/// during analysis and read afterwards by the code generator.
#[derive(Debug, Default, Clone)]
pub struct TypeMap {
    types: HashMap<NodeId, Type>,
}

impl TypeMap {
    pub fn new() -> Self {
        TypeMap::default()
    }

    /// Record a node's resolved type. Writing a node twice is a bug in the
    /// analysis pass, not a user error.
    fn insert(&mut self, id: NodeId, ty: Type) {
        let previous = self.types.insert(id, ty);
        assert!(previous.is_none(), "resolved type written twice for {id}");
    }

    pub fn get(&self, id: NodeId) -> Option<&Type> {
        self.types.get(&id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

pub struct SemanticAnalyzer {
    scopes: ScopeStack,
    classes: HashSet<String>,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        SemanticAnalyzer {
            scopes: ScopeStack::new(),
            classes: HashSet::new(),
        }
    }

    pub fn analyze(mut self, program: &Program) -> SemanticResult<TypeMap> {
        // Pass 1: collect class names, rejecting duplicates up front.
        for class in &program.classes {
            if !self.classes.insert(class.name.clone()) {
                return Err(SemanticError::DuplicateClass {
                    name: class.name.clone(),
                });
            }
        }

        // Pass 2: check each class.
        let mut types = TypeMap::new();
        for class in &program.classes {
            self.check_class(class, &mut types)?;
        }
        Ok(types)
    }

    fn check_class(&mut self, class: &ClassDecl, types: &mut TypeMap) -> SemanticResult<()> {
        self.scopes.enter_scope();

        for field in &class.fields {
            if self.scopes.lookup_current(&field.name).is_some() {
                return Err(SemanticError::DuplicateField {
                    name: field.name.clone(),
                    line: field.line,
                    column: field.column,
                });
            }
            self.scopes.define(field.name.clone(), field.ty.clone());

            if let Some(init) = &field.initializer {
                let init_ty = self.check_expr(init, class, types)?;
                if !is_assignable(&field.ty, &init_ty) {
                    return Err(SemanticError::TypeMismatch {
                        context: "field initializer",
                        expected: field.ty.clone(),
                        found: init_ty,
                        line: field.line,
                        column: field.column,
                    });
                }
            }
        }

        for method in &class.methods {
            self.check_method(method, class, types)?;
        }

        self.scopes.exit_scope();
        Ok(())
    }

    fn check_method(
        &mut self,
        method: &MethodDecl,
        class: &ClassDecl,
        types: &mut TypeMap,
    ) -> SemanticResult<()> {
        self.scopes.enter_scope();

        for param in &method.params {
            if self.scopes.lookup_current(&param.name).is_some() {
                return Err(SemanticError::DuplicateParameter {
                    name: param.name.clone(),
                    line: param.line,
                    column: param.column,
                });
            }
            self.scopes.define(param.name.clone(), param.ty.clone());
        }

        self.check_block(&method.body, class, method, types)?;

        self.scopes.exit_scope();
        Ok(())
    }

    fn check_block(
        &mut self,
        block: &Block,
        class: &ClassDecl,
        method: &MethodDecl,
        types: &mut TypeMap,
    ) -> SemanticResult<()> {
        self.scopes.enter_scope();
        for stmt in &block.statements {
            self.check_stmt(stmt, class, method, types)?;
        }
        self.scopes.exit_scope();
        Ok(())
    }

    fn check_stmt(
        &mut self,
        stmt: &Stmt,
        class: &ClassDecl,
        method: &MethodDecl,
        types: &mut TypeMap,
    ) -> SemanticResult<()> {
        match stmt {
            Stmt::Block(block) => self.check_block(block, class, method, types),
            Stmt::VarDecl(decl) => {
                if self.scopes.lookup_current(&decl.name).is_some() {
                    return Err(SemanticError::DuplicateVariable {
                        name: decl.name.clone(),
                        line: decl.line,
                        column: decl.column,
                    });
                }
                self.scopes.define(decl.name.clone(), decl.ty.clone());

                if let Some(init) = &decl.initializer {
                    let init_ty = self.check_expr(init, class, types)?;
                    if !is_assignable(&decl.ty, &init_ty) {
                        return Err(SemanticError::TypeMismatch {
                            context: "variable declaration",
                            expected: decl.ty.clone(),
                            found: init_ty,
                            line: decl.line,
                            column: decl.column,
                        });
                    }
                }
                Ok(())
            }
            Stmt::If(s) => {
                let cond_ty = self.check_expr(&s.condition, class, types)?;
                if !cond_ty.is_boolean() {
                    return Err(SemanticError::ConditionNotBoolean {
                        construct: "if",
                        found: cond_ty,
                        line: s.line,
                        column: s.column,
                    });
                }
                self.check_stmt(&s.then_stmt, class, method, types)?;
                if let Some(else_stmt) = &s.else_stmt {
                    self.check_stmt(else_stmt, class, method, types)?;
                }
                Ok(())
            }
            Stmt::While(s) => {
                let cond_ty = self.check_expr(&s.condition, class, types)?;
                if !cond_ty.is_boolean() {
                    return Err(SemanticError::ConditionNotBoolean {
                        construct: "while",
                        found: cond_ty,
                        line: s.line,
                        column: s.column,
                    });
                }
                self.check_stmt(&s.body, class, method, types)
            }
            Stmt::For(s) => {
                // The init clause's scope spans condition, update and body.
                self.scopes.enter_scope();
                if let Some(init) = &s.init {
                    self.check_stmt(init, class, method, types)?;
                }
                if let Some(cond) = &s.condition {
                    let cond_ty = self.check_expr(cond, class, types)?;
                    if !cond_ty.is_boolean() {
                        self.scopes.exit_scope();
                        return Err(SemanticError::ConditionNotBoolean {
                            construct: "for",
                            found: cond_ty,
                            line: s.line,
                            column: s.column,
                        });
                    }
                }
                if let Some(update) = &s.update {
                    self.check_expr(update, class, types)?;
                }
                let result = self.check_stmt(&s.body, class, method, types);
                self.scopes.exit_scope();
                result
            }
            Stmt::Return(s) => {
                let return_type = &method.return_type;
                match &s.value {
                    None => {
                        if !return_type.is_void() {
                            return Err(SemanticError::MissingReturnValue {
                                expected: return_type.clone(),
                                line: s.line,
                                column: s.column,
                            });
                        }
                        Ok(())
                    }
                    Some(value) => {
                        let value_ty = self.check_expr(value, class, types)?;
                        if !is_assignable(return_type, &value_ty) {
                            return Err(SemanticError::TypeMismatch {
                                context: "return value",
                                expected: return_type.clone(),
                                found: value_ty,
                                line: s.line,
                                column: s.column,
                            });
                        }
                        Ok(())
                    }
                }
            }
            Stmt::Expr(s) => {
                self.check_expr(&s.expr, class, types)?;
                Ok(())
            }
        }
    }

    /// Synthesize and record the type of an expression, bottom-up.
    fn check_expr(
        &mut self,
        expr: &Expr,
        class: &ClassDecl,
        types: &mut TypeMap,
    ) -> SemanticResult<Type> {
        let ty = match expr {
            Expr::Binary(e) => {
                let left = self.check_expr(&e.left, class, types)?;
                let right = self.check_expr(&e.right, class, types)?;
                self.binary_type(e, left, right)?
            }
            Expr::Unary(e) => {
                let operand = self.check_expr(&e.operand, class, types)?;
                match e.op {
                    UnaryOp::Neg => {
                        if !operand.is_int() {
                            return Err(SemanticError::InvalidOperand {
                                op: e.op.to_string(),
                                expected: Type::int(),
                                found: operand,
                                line: e.line,
                                column: e.column,
                            });
                        }
                        Type::int()
                    }
                    UnaryOp::Not => {
                        if !operand.is_boolean() {
                            return Err(SemanticError::InvalidOperand {
                                op: e.op.to_string(),
                                expected: Type::boolean(),
                                found: operand,
                                line: e.line,
                                column: e.column,
                            });
                        }
                        Type::boolean()
                    }
                }
            }
            Expr::Assign(e) => {
                let target = self.check_expr(&e.target, class, types)?;
                let value = self.check_expr(&e.value, class, types)?;
                if !is_assignable(&target, &value) {
                    return Err(SemanticError::TypeMismatch {
                        context: "assignment",
                        expected: target,
                        found: value,
                        line: e.line,
                        column: e.column,
                    });
                }
                target
            }
            Expr::Call(e) => {
                if let Some(receiver) = &e.receiver {
                    self.check_expr(receiver, class, types)?;
                }
                for arg in &e.args {
                    self.check_expr(arg, class, types)?;
                }
                if e.receiver.is_none() && e.method == "println" {
                    // Receiverless println is always the built-in print
                    // call; it produces no value.
                    Type::void()
                } else {
                    // Name-only lookup against the class under analysis; no
                    // arity or parameter checking. Unknown callees default
                    // to int.
                    class
                        .method(&e.method)
                        .map(|m| m.return_type.clone())
                        .unwrap_or_else(Type::int)
                }
            }
            Expr::FieldAccess(e) => {
                self.check_expr(&e.object, class, types)?;
                // Field existence is not verified; the field's type is
                // assumed int.
                Type::int()
            }
            Expr::ArrayAccess(e) => {
                let array = self.check_expr(&e.array, class, types)?;
                let index = self.check_expr(&e.index, class, types)?;
                if !index.is_int() {
                    return Err(SemanticError::IndexNotInt {
                        found: index,
                        line: e.line,
                        column: e.column,
                    });
                }
                if !array.is_array {
                    return Err(SemanticError::NotAnArray {
                        found: array,
                        line: e.line,
                        column: e.column,
                    });
                }
                array.element_type()
            }
            Expr::New(e) => {
                match &e.init {
                    NewInit::Object(args) => {
                        for arg in args {
                            self.check_expr(arg, class, types)?;
                        }
                    }
                    NewInit::Array(size) => {
                        let size_ty = self.check_expr(size, class, types)?;
                        if !size_ty.is_int() {
                            return Err(SemanticError::ArraySizeNotInt {
                                found: size_ty,
                                line: e.line,
                                column: e.column,
                            });
                        }
                    }
                }
                e.ty.clone()
            }
            Expr::IntLiteral(_) => Type::int(),
            Expr::BoolLiteral(_) => Type::boolean(),
            Expr::StringLiteral(_) => Type::new("String", false),
            Expr::NullLiteral(_) => Type::null(),
            Expr::Identifier(e) => match self.scopes.lookup(&e.name) {
                Some(ty) => ty.clone(),
                None => {
                    return Err(SemanticError::UndefinedVariable {
                        name: e.name.clone(),
                        line: e.line,
                        column: e.column,
                    });
                }
            },
            // The traversal only ever visits expressions inside a class
            // body, so `this` always has an enclosing class here.
            Expr::This(_) => Type::new(class.name.clone(), false),
        };

        types.insert(expr.id(), ty.clone());
        Ok(ty)
    }

    fn binary_type(&self, e: &BinaryExpr, left: Type, right: Type) -> SemanticResult<Type> {
        let op = e.op;
        if op.is_arithmetic() || op.is_relational() {
            for operand in [&left, &right] {
                if !operand.is_int() {
                    return Err(SemanticError::InvalidOperand {
                        op: op.to_string(),
                        expected: Type::int(),
                        found: operand.clone(),
                        line: e.line,
                        column: e.column,
                    });
                }
            }
            return Ok(if op.is_arithmetic() {
                Type::int()
            } else {
                Type::boolean()
            });
        }
        if op.is_equality() {
            if !is_assignable(&left, &right) && !is_assignable(&right, &left) {
                return Err(SemanticError::IncomparableTypes {
                    left,
                    right,
                    line: e.line,
                    column: e.column,
                });
            }
            return Ok(Type::boolean());
        }
        // Logical && and ||.
        for operand in [&left, &right] {
            if !operand.is_boolean() {
                return Err(SemanticError::InvalidOperand {
                    op: op.to_string(),
                    expected: Type::boolean(),
                    found: operand.clone(),
                    line: e.line,
                    column: e.column,
                });
            }
        }
        Ok(Type::boolean())
    }
}

/// One-directional assignability: structural equality, or a null source
/// against any reference (non-primitive) target. No widening, no array
/// covariance.
pub fn is_assignable(target: &Type, source: &Type) -> bool {
    if target == source {
        return true;
    }
    source.is_null() && !target.is_primitive()
}
