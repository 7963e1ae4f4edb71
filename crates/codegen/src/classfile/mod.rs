//! Class-file model and serialization.
//!
//! Targets class-file version 49.0 (Java 5): new enough for every construct
//! the generator emits, old enough that the verifier infers stack shapes
//! itself and no StackMapTable attribute is needed.

pub mod code;
pub mod constant_pool;
pub mod opcode;

pub use code::{CodeBuffer, Label};
pub use constant_pool::ConstantPool;
pub use opcode::Opcode;

pub const MAGIC: u32 = 0xCAFE_BABE;
pub const MINOR_VERSION: u16 = 0;
pub const MAJOR_VERSION: u16 = 49;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_SUPER: u16 = 0x0020;

/// A field declaration; name and descriptor are pool indices.
#[derive(Debug)]
pub struct FieldInfo {
    pub access_flags: u16,
    pub name: u16,
    pub descriptor: u16,
}

/// A method with its single Code attribute.
#[derive(Debug)]
pub struct MethodInfo {
    pub access_flags: u16,
    pub name: u16,
    pub descriptor: u16,
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
}

/// One class under construction. Serialization order follows the class-file
/// layout: header, pool, flags, this/super, interfaces, fields, methods,
/// attributes.
#[derive(Debug)]
pub struct ClassFile {
    pool: ConstantPool,
    this_class: u16,
    super_class: u16,
    code_attribute_name: u16,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
}

impl ClassFile {
    pub fn new(name: &str, super_name: &str) -> Self {
        let mut pool = ConstantPool::new();
        let this_class = pool.class(name);
        let super_class = pool.class(super_name);
        let code_attribute_name = pool.utf8("Code");
        ClassFile {
            pool,
            this_class,
            super_class,
            code_attribute_name,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn pool(&mut self) -> &mut ConstantPool {
        &mut self.pool
    }

    pub fn add_field(&mut self, name: &str, descriptor: &str) {
        let name = self.pool.utf8(name);
        let descriptor = self.pool.utf8(descriptor);
        self.fields.push(FieldInfo {
            access_flags: ACC_PUBLIC,
            name,
            descriptor,
        });
    }

    pub fn add_method(
        &mut self,
        name: &str,
        descriptor: &str,
        max_stack: u16,
        max_locals: u16,
        code: Vec<u8>,
    ) {
        let name = self.pool.utf8(name);
        let descriptor = self.pool.utf8(descriptor);
        self.methods.push(MethodInfo {
            access_flags: ACC_PUBLIC,
            name,
            descriptor,
            max_stack,
            max_locals,
            code,
        });
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&MAGIC.to_be_bytes());
        out.extend_from_slice(&MINOR_VERSION.to_be_bytes());
        out.extend_from_slice(&MAJOR_VERSION.to_be_bytes());
        self.pool.write_to(&mut out);
        out.extend_from_slice(&(ACC_PUBLIC | ACC_SUPER).to_be_bytes());
        out.extend_from_slice(&self.this_class.to_be_bytes());
        out.extend_from_slice(&self.super_class.to_be_bytes());
        // interfaces_count
        out.extend_from_slice(&0u16.to_be_bytes());

        out.extend_from_slice(&(self.fields.len() as u16).to_be_bytes());
        for field in &self.fields {
            out.extend_from_slice(&field.access_flags.to_be_bytes());
            out.extend_from_slice(&field.name.to_be_bytes());
            out.extend_from_slice(&field.descriptor.to_be_bytes());
            // attributes_count
            out.extend_from_slice(&0u16.to_be_bytes());
        }

        out.extend_from_slice(&(self.methods.len() as u16).to_be_bytes());
        for method in &self.methods {
            out.extend_from_slice(&method.access_flags.to_be_bytes());
            out.extend_from_slice(&method.name.to_be_bytes());
            out.extend_from_slice(&method.descriptor.to_be_bytes());
            // One attribute: Code.
            out.extend_from_slice(&1u16.to_be_bytes());
            out.extend_from_slice(&self.code_attribute_name.to_be_bytes());
            // max_stack + max_locals + code_length + code + empty exception
            // table + empty attribute list.
            let length = 2 + 2 + 4 + method.code.len() as u32 + 2 + 2;
            out.extend_from_slice(&length.to_be_bytes());
            out.extend_from_slice(&method.max_stack.to_be_bytes());
            out.extend_from_slice(&method.max_locals.to_be_bytes());
            out.extend_from_slice(&(method.code.len() as u32).to_be_bytes());
            out.extend_from_slice(&method.code);
            out.extend_from_slice(&0u16.to_be_bytes());
            out.extend_from_slice(&0u16.to_be_bytes());
        }

        // class attributes_count
        out.extend_from_slice(&0u16.to_be_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_version() {
        let class = ClassFile::new("A", "java/lang/Object");
        let bytes = class.to_bytes();
        assert_eq!(&bytes[0..4], &[0xca, 0xfe, 0xba, 0xbe]);
        assert_eq!(u16::from_be_bytes([bytes[4], bytes[5]]), 0);
        assert_eq!(u16::from_be_bytes([bytes[6], bytes[7]]), 49);
    }

    #[test]
    fn serialization_is_deterministic() {
        let build = || {
            let mut class = ClassFile::new("A", "java/lang/Object");
            class.add_field("x", "I");
            class.add_method("m", "()V", 0, 1, vec![Opcode::Return.byte()]);
            class.to_bytes()
        };
        assert_eq!(build(), build());
    }
}
