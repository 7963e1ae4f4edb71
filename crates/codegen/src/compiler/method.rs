//! Method compilation state: the code buffer, the local-variable slot
//! table, and the shared lookups the statement and expression compilers
//! need.

use crate::classfile::{CodeBuffer, ConstantPool, Opcode};
use crate::error::{CodegenError, CodegenResult};
use javelin_parser::ast::{ClassDecl, Expr, MethodDecl, Program, Type};
use javelin_parser::semantic::TypeMap;
use std::collections::HashMap;

pub(super) struct Local {
    pub slot: u16,
    pub ty: Type,
}

pub(super) struct CompiledMethod {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
}

pub(super) struct MethodCompiler<'a> {
    pub(super) program: &'a Program,
    pub(super) types: &'a TypeMap,
    pub(super) class: &'a ClassDecl,
    pub(super) pool: &'a mut ConstantPool,
    pub(super) code: CodeBuffer,
    /// Flat name-to-slot table. The analyzer has already enforced scoping;
    /// a redeclaration in any later block rebinds the name to a fresh slot
    /// for the rest of the method, so an inner declaration that shadows an
    /// outer local stays bound after its block ends.
    locals: HashMap<String, Local>,
    next_slot: u16,
}

impl<'a> MethodCompiler<'a> {
    pub(super) fn new(
        program: &'a Program,
        types: &'a TypeMap,
        class: &'a ClassDecl,
        pool: &'a mut ConstantPool,
    ) -> Self {
        MethodCompiler {
            program,
            types,
            class,
            pool,
            code: CodeBuffer::new(),
            locals: HashMap::new(),
            // Slot 0 is `this`.
            next_slot: 1,
        }
    }

    pub(super) fn compile(mut self, method: &MethodDecl) -> CodegenResult<CompiledMethod> {
        for param in &method.params {
            self.define_local(&param.name, param.ty.clone());
        }

        for stmt in &method.body.statements {
            self.compile_stmt(stmt)?;
        }

        // A void method may fall off the end of its body.
        if method.return_type.is_void() && !self.code.ends_with_return() {
            self.code.ret(Opcode::Return);
        }

        Ok(CompiledMethod {
            max_stack: self.code.max_stack(),
            max_locals: self.next_slot,
            code: self.code.into_bytes(),
        })
    }

    pub(super) fn define_local(&mut self, name: &str, ty: Type) -> u16 {
        let slot = self.next_slot;
        self.next_slot += 1;
        self.locals.insert(name.to_string(), Local { slot, ty });
        slot
    }

    pub(super) fn local(&self, name: &str) -> Option<&Local> {
        self.locals.get(name)
    }

    /// The analyzer's resolved type for an expression.
    pub(super) fn resolved_type(&self, expr: &Expr) -> CodegenResult<&Type> {
        self.types.get(expr.id()).ok_or_else(|| {
            let (line, column) = expr.position();
            CodegenError::MissingType { line, column }
        })
    }

    /// `int` and `boolean` live in int slots; everything else is a
    /// reference.
    pub(super) fn is_int_like(ty: &Type) -> bool {
        ty.is_int() || ty.is_boolean()
    }

    pub(super) fn load_local(&mut self, local_ty: &Type, slot: u16) {
        if Self::is_int_like(local_ty) {
            self.code.load_int(slot);
        } else {
            self.code.load_ref(slot);
        }
    }

    pub(super) fn store_local(&mut self, local_ty: &Type, slot: u16) {
        if Self::is_int_like(local_ty) {
            self.code.store_int(slot);
        } else {
            self.code.store_ref(slot);
        }
    }
}
