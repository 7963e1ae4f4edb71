//! AST-to-bytecode compilation, one class per class file.

mod class;
mod expr;
mod method;
mod stmt;

pub use class::ClassCompiler;

use javelin_parser::ast::{MethodDecl, Type};

/// Field descriptor for a source type: `I`, `Z`, `V`, `L<name>;`, with a
/// `[` prefix for arrays.
pub fn type_descriptor(ty: &Type) -> String {
    let base = match ty.name.as_str() {
        "int" => "I".to_string(),
        "boolean" => "Z".to_string(),
        "void" => "V".to_string(),
        other => format!("L{other};"),
    };
    if ty.is_array {
        format!("[{base}")
    } else {
        base
    }
}

/// `(<param descriptors>)<return descriptor>`.
pub fn method_descriptor(method: &MethodDecl) -> String {
    let mut descriptor = String::from("(");
    for param in &method.params {
        descriptor.push_str(&type_descriptor(&param.ty));
    }
    descriptor.push(')');
    descriptor.push_str(&type_descriptor(&method.return_type));
    descriptor
}
