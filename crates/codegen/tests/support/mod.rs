//! Minimal class-file reader used to assert on generated output.

use indexmap::IndexMap;

pub fn compile(source: &str) -> IndexMap<String, Vec<u8>> {
    let (program, types) = javelin_parser::check(source).expect("source must analyze");
    javelin_codegen::generate(&program, &types).expect("source must compile")
}

pub fn compile_one(source: &str) -> ParsedClass {
    let classes = compile(source);
    assert_eq!(classes.len(), 1, "expected exactly one class");
    ParsedClass::parse(&classes[0])
}

#[derive(Debug, Clone, PartialEq)]
pub enum PoolEntry {
    Utf8(String),
    Integer(i32),
    Class(u16),
    Str(u16),
    FieldRef(u16, u16),
    MethodRef(u16, u16),
    NameAndType(u16, u16),
}

#[derive(Debug)]
pub struct ParsedField {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
}

#[derive(Debug)]
pub struct ParsedMethod {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
}

#[derive(Debug)]
pub struct ParsedClass {
    pub minor: u16,
    pub major: u16,
    pub access_flags: u16,
    pub pool: Vec<PoolEntry>,
    pub this_class: u16,
    pub super_class: u16,
    pub fields: Vec<ParsedField>,
    pub methods: Vec<ParsedMethod>,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn u8(&mut self) -> u8 {
        let v = self.bytes[self.pos];
        self.pos += 1;
        v
    }

    fn u16(&mut self) -> u16 {
        u16::from_be_bytes([self.u8(), self.u8()])
    }

    fn u32(&mut self) -> u32 {
        u32::from_be_bytes([self.u8(), self.u8(), self.u8(), self.u8()])
    }

    fn take(&mut self, n: usize) -> &'a [u8] {
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        slice
    }
}

impl ParsedClass {
    pub fn parse(bytes: &[u8]) -> Self {
        let mut r = Reader { bytes, pos: 0 };
        assert_eq!(r.u32(), 0xCAFE_BABE, "bad magic");
        let minor = r.u16();
        let major = r.u16();

        let pool_count = r.u16();
        let mut pool = Vec::new();
        for _ in 1..pool_count {
            let tag = r.u8();
            pool.push(match tag {
                1 => {
                    let len = r.u16() as usize;
                    PoolEntry::Utf8(String::from_utf8(r.take(len).to_vec()).unwrap())
                }
                3 => PoolEntry::Integer(i32::from_be_bytes(r.take(4).try_into().unwrap())),
                7 => PoolEntry::Class(r.u16()),
                8 => PoolEntry::Str(r.u16()),
                9 => PoolEntry::FieldRef(r.u16(), r.u16()),
                10 => PoolEntry::MethodRef(r.u16(), r.u16()),
                12 => PoolEntry::NameAndType(r.u16(), r.u16()),
                other => panic!("unexpected constant pool tag {other}"),
            });
        }

        let access_flags = r.u16();
        let this_class = r.u16();
        let super_class = r.u16();
        let interface_count = r.u16();
        assert_eq!(interface_count, 0);

        let utf8 = |pool: &[PoolEntry], index: u16| -> String {
            match &pool[index as usize - 1] {
                PoolEntry::Utf8(text) => text.clone(),
                other => panic!("expected Utf8 at {index}, found {other:?}"),
            }
        };

        let field_count = r.u16();
        let mut fields = Vec::new();
        for _ in 0..field_count {
            let access_flags = r.u16();
            let name = utf8(&pool, r.u16());
            let descriptor = utf8(&pool, r.u16());
            let attribute_count = r.u16();
            assert_eq!(attribute_count, 0, "fields carry no attributes");
            fields.push(ParsedField {
                access_flags,
                name,
                descriptor,
            });
        }

        let method_count = r.u16();
        let mut methods = Vec::new();
        for _ in 0..method_count {
            let access_flags = r.u16();
            let name = utf8(&pool, r.u16());
            let descriptor = utf8(&pool, r.u16());
            let attribute_count = r.u16();
            assert_eq!(attribute_count, 1, "methods carry exactly one attribute");
            assert_eq!(utf8(&pool, r.u16()), "Code");
            let attribute_length = r.u32();
            let max_stack = r.u16();
            let max_locals = r.u16();
            let code_length = r.u32() as usize;
            assert_eq!(
                attribute_length as usize,
                2 + 2 + 4 + code_length + 2 + 2,
                "Code attribute length mismatch"
            );
            let code = r.take(code_length).to_vec();
            assert_eq!(r.u16(), 0, "exception table must be empty");
            assert_eq!(r.u16(), 0, "code attributes must be empty");
            methods.push(ParsedMethod {
                access_flags,
                name,
                descriptor,
                max_stack,
                max_locals,
                code,
            });
        }

        assert_eq!(r.u16(), 0, "class attributes must be empty");
        assert_eq!(r.pos, bytes.len(), "trailing bytes after class file");

        ParsedClass {
            minor,
            major,
            access_flags,
            pool,
            this_class,
            super_class,
            fields,
            methods,
        }
    }

    pub fn class_name(&self, index: u16) -> String {
        match &self.pool[index as usize - 1] {
            PoolEntry::Class(name) => match &self.pool[*name as usize - 1] {
                PoolEntry::Utf8(text) => text.clone(),
                other => panic!("expected Utf8, found {other:?}"),
            },
            other => panic!("expected Class at {index}, found {other:?}"),
        }
    }

    pub fn method(&self, name: &str) -> &ParsedMethod {
        self.methods
            .iter()
            .find(|m| m.name == name)
            .unwrap_or_else(|| panic!("no method named {name}"))
    }
}
