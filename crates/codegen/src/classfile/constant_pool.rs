//! Deduplicating constant pool builder.
//!
//! Entries are interned on first use and keep their insertion order, so the
//! same program always serializes to the same pool. Indices are 1-based as
//! the class-file format requires.

use indexmap::IndexSet;

const TAG_UTF8: u8 = 1;
const TAG_INTEGER: u8 = 3;
const TAG_CLASS: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_FIELDREF: u8 = 9;
const TAG_METHODREF: u8 = 10;
const TAG_NAME_AND_TYPE: u8 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Constant {
    Utf8(String),
    Integer(i32),
    Class { name: u16 },
    String { value: u16 },
    Fieldref { class: u16, name_and_type: u16 },
    Methodref { class: u16, name_and_type: u16 },
    NameAndType { name: u16, descriptor: u16 },
}

#[derive(Debug, Default)]
pub struct ConstantPool {
    entries: IndexSet<Constant>,
}

impl ConstantPool {
    pub fn new() -> Self {
        ConstantPool::default()
    }

    fn intern(&mut self, constant: Constant) -> u16 {
        let (index, _) = self.entries.insert_full(constant);
        // Index 0 is reserved; entries are numbered from 1.
        (index + 1) as u16
    }

    pub fn utf8(&mut self, text: &str) -> u16 {
        self.intern(Constant::Utf8(text.to_string()))
    }

    pub fn integer(&mut self, value: i32) -> u16 {
        self.intern(Constant::Integer(value))
    }

    pub fn class(&mut self, name: &str) -> u16 {
        let name = self.utf8(name);
        self.intern(Constant::Class { name })
    }

    pub fn string(&mut self, value: &str) -> u16 {
        let value = self.utf8(value);
        self.intern(Constant::String { value })
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let name = self.utf8(name);
        let descriptor = self.utf8(descriptor);
        self.intern(Constant::NameAndType { name, descriptor })
    }

    pub fn field_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
        let class = self.class(class);
        let name_and_type = self.name_and_type(name, descriptor);
        self.intern(Constant::Fieldref {
            class,
            name_and_type,
        })
    }

    pub fn method_ref(&mut self, class: &str, name: &str, descriptor: &str) -> u16 {
        let class = self.class(class);
        let name_and_type = self.name_and_type(name, descriptor);
        self.intern(Constant::Methodref {
            class,
            name_and_type,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as `constant_pool_count` followed by the entries.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&((self.entries.len() + 1) as u16).to_be_bytes());
        for entry in &self.entries {
            match entry {
                Constant::Utf8(text) => {
                    out.push(TAG_UTF8);
                    let bytes = modified_utf8(text);
                    out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
                    out.extend_from_slice(&bytes);
                }
                Constant::Integer(value) => {
                    out.push(TAG_INTEGER);
                    out.extend_from_slice(&value.to_be_bytes());
                }
                Constant::Class { name } => {
                    out.push(TAG_CLASS);
                    out.extend_from_slice(&name.to_be_bytes());
                }
                Constant::String { value } => {
                    out.push(TAG_STRING);
                    out.extend_from_slice(&value.to_be_bytes());
                }
                Constant::Fieldref {
                    class,
                    name_and_type,
                } => {
                    out.push(TAG_FIELDREF);
                    out.extend_from_slice(&class.to_be_bytes());
                    out.extend_from_slice(&name_and_type.to_be_bytes());
                }
                Constant::Methodref {
                    class,
                    name_and_type,
                } => {
                    out.push(TAG_METHODREF);
                    out.extend_from_slice(&class.to_be_bytes());
                    out.extend_from_slice(&name_and_type.to_be_bytes());
                }
                Constant::NameAndType { name, descriptor } => {
                    out.push(TAG_NAME_AND_TYPE);
                    out.extend_from_slice(&name.to_be_bytes());
                    out.extend_from_slice(&descriptor.to_be_bytes());
                }
            }
        }
    }
}

/// Encode a string the way `CONSTANT_Utf8_info` requires: NUL becomes the
/// two-byte sequence `0xC0 0x80`, and code points above U+FFFF become a
/// UTF-16 surrogate pair with each surrogate written as three bytes.
fn modified_utf8(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = c as u32;
        match code {
            0 => bytes.extend_from_slice(&[0xc0, 0x80]),
            0x01..=0x7f => bytes.push(code as u8),
            0x80..=0x7ff => {
                bytes.push(0xc0 | (code >> 6) as u8);
                bytes.push(0x80 | (code & 0x3f) as u8);
            }
            0x800..=0xffff => push_three_byte(&mut bytes, code),
            _ => {
                let bits = code - 0x1_0000;
                push_three_byte(&mut bytes, 0xd800 + (bits >> 10));
                push_three_byte(&mut bytes, 0xdc00 + (bits & 0x3ff));
            }
        }
    }
    bytes
}

fn push_three_byte(bytes: &mut Vec<u8>, code: u32) {
    bytes.push(0xe0 | (code >> 12) as u8);
    bytes.push(0x80 | ((code >> 6) & 0x3f) as u8);
    bytes.push(0x80 | (code & 0x3f) as u8);
}
