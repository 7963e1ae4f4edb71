//! The type value object shared by every stage.

/// A source-level type: a name plus an array flag. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    pub name: String,
    pub is_array: bool,
}

/// Sentinel type name for the null literal. Exists only during semantic
/// analysis; it never appears in declarations.
pub const NULL_TYPE: &str = "null";

impl Type {
    pub fn new(name: impl Into<String>, is_array: bool) -> Self {
        Type {
            name: name.into(),
            is_array,
        }
    }

    pub fn int() -> Self {
        Type::new("int", false)
    }

    pub fn boolean() -> Self {
        Type::new("boolean", false)
    }

    pub fn void() -> Self {
        Type::new("void", false)
    }

    pub fn null() -> Self {
        Type::new(NULL_TYPE, false)
    }

    pub fn is_int(&self) -> bool {
        !self.is_array && self.name == "int"
    }

    pub fn is_boolean(&self) -> bool {
        !self.is_array && self.name == "boolean"
    }

    pub fn is_void(&self) -> bool {
        !self.is_array && self.name == "void"
    }

    pub fn is_null(&self) -> bool {
        !self.is_array && self.name == NULL_TYPE
    }

    /// `int`, `boolean` and `void` are primitive; everything else (and any
    /// array) is a reference type.
    pub fn is_primitive(&self) -> bool {
        !self.is_array && matches!(self.name.as_str(), "int" | "boolean" | "void")
    }

    /// The element type of an array type (array flag cleared).
    pub fn element_type(&self) -> Type {
        Type::new(self.name.clone(), false)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.name, if self.is_array { "[]" } else { "" })
    }
}
