//! Javelin back end: JVM class-file generation.
//!
//! Consumes the analyzed AST (the program plus the resolved-type side table
//! the analyzer produced) and emits one class file per source class. The
//! translation is a single pass, no optimization: expressions compile to
//! stack code, control flow to conditional branches over materialized
//! booleans, and branch targets are fixed up through [`classfile::Label`]
//! handles.
//!
//! Emitted files target class-file version 49.0 so the classes verify
//! without StackMapTable frames.
//!
//! ```no_run
//! let (program, types) = javelin_parser::check("class A { int one() { return 1; } }").unwrap();
//! let classes = javelin_codegen::generate(&program, &types).unwrap();
//! assert!(classes.contains_key("A"));
//! ```
//!
//! A side facility, [`ir::generate_ir`], renders the program as a linear
//! three-address text for inspection; the class-file generator does not use
//! it.

pub mod classfile;
pub mod compiler;
pub mod error;
pub mod ir;

pub use classfile::{ClassFile, CodeBuffer, ConstantPool, Label, Opcode};
pub use compiler::ClassCompiler;
pub use error::{CodegenError, CodegenResult};
pub use ir::generate_ir;

use indexmap::IndexMap;
use javelin_parser::ast::Program;
use javelin_parser::semantic::TypeMap;

/// Compile every class in the program. Returns class name to class-file
/// bytes, in declaration order.
pub fn generate(
    program: &Program,
    types: &TypeMap,
) -> CodegenResult<IndexMap<String, Vec<u8>>> {
    let mut classes = IndexMap::new();
    for class in &program.classes {
        let bytes = ClassCompiler::new(program, types, class).compile()?;
        classes.insert(class.name.clone(), bytes);
    }
    Ok(classes)
}
