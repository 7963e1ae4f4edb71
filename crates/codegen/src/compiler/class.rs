//! Per-class compilation: fields, the synthesized default constructor, and
//! each declared method.

use super::method::MethodCompiler;
use super::{method_descriptor, type_descriptor};
use crate::classfile::{ClassFile, CodeBuffer, Opcode};
use crate::error::CodegenResult;
use javelin_parser::ast::{ClassDecl, Program};
use javelin_parser::semantic::TypeMap;

pub const OBJECT: &str = "java/lang/Object";

pub struct ClassCompiler<'a> {
    program: &'a Program,
    types: &'a TypeMap,
    class: &'a ClassDecl,
}

impl<'a> ClassCompiler<'a> {
    pub fn new(program: &'a Program, types: &'a TypeMap, class: &'a ClassDecl) -> Self {
        ClassCompiler {
            program,
            types,
            class,
        }
    }

    /// Compile the class to a complete class-file image.
    pub fn compile(self) -> CodegenResult<Vec<u8>> {
        let mut file = ClassFile::new(&self.class.name, OBJECT);

        for field in &self.class.fields {
            // Field initializer expressions are type-checked but have no
            // instance-initialization code to live in; only the declaration
            // is emitted.
            file.add_field(&field.name, &type_descriptor(&field.ty));
        }

        self.default_constructor(&mut file);

        for method in &self.class.methods {
            let descriptor = method_descriptor(method);
            let compiled =
                MethodCompiler::new(self.program, self.types, self.class, file.pool())
                    .compile(method)?;
            file.add_method(
                &method.name,
                &descriptor,
                compiled.max_stack,
                compiled.max_locals,
                compiled.code,
            );
        }

        Ok(file.to_bytes())
    }

    /// `<init>()V`: call the superclass constructor and return.
    fn default_constructor(&self, file: &mut ClassFile) {
        let init = file.pool().method_ref(OBJECT, "<init>", "()V");
        let mut code = CodeBuffer::new();
        code.load_ref(0);
        code.invoke(Opcode::Invokespecial, init, 0, false);
        code.ret(Opcode::Return);
        file.add_method("<init>", "()V", 1, 1, code.into_bytes());
    }
}
