//! JVM opcode numbers, limited to the subset the generator emits.
//!
//! Organized by category:
//! - Constants (iconst, bipush, sipush, ldc)
//! - Local variable loads and stores (with the compact `_0..=_3` forms)
//! - Stack manipulation
//! - Integer arithmetic and bitwise logic
//! - Branches (all with 16-bit signed offsets)
//! - Returns
//! - Field and method access, object and array creation

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // Constants
    AconstNull = 0x01,
    IconstM1 = 0x02,
    Iconst0 = 0x03,
    Iconst1 = 0x04,
    Iconst2 = 0x05,
    Iconst3 = 0x06,
    Iconst4 = 0x07,
    Iconst5 = 0x08,
    Bipush = 0x10,
    Sipush = 0x11,
    Ldc = 0x12,
    LdcW = 0x13,

    // Loads
    Iload = 0x15,
    Aload = 0x19,
    Iload0 = 0x1a,
    Iload1 = 0x1b,
    Iload2 = 0x1c,
    Iload3 = 0x1d,
    Aload0 = 0x2a,
    Aload1 = 0x2b,
    Aload2 = 0x2c,
    Aload3 = 0x2d,
    Iaload = 0x2e,

    // Stores
    Istore = 0x36,
    Astore = 0x3a,
    Istore0 = 0x3b,
    Istore1 = 0x3c,
    Istore2 = 0x3d,
    Istore3 = 0x3e,
    Astore0 = 0x4b,
    Astore1 = 0x4c,
    Astore2 = 0x4d,
    Astore3 = 0x4e,
    Iastore = 0x4f,

    // Stack
    Pop = 0x57,
    Dup = 0x59,
    DupX2 = 0x5b,

    // Arithmetic and logic
    Iadd = 0x60,
    Isub = 0x64,
    Imul = 0x68,
    Idiv = 0x6c,
    Irem = 0x70,
    Ineg = 0x74,
    Iand = 0x7e,
    Ior = 0x80,
    Ixor = 0x82,

    // Branches
    Ifeq = 0x99,
    IfIcmpeq = 0x9f,
    IfIcmpne = 0xa0,
    IfIcmplt = 0xa1,
    IfIcmpge = 0xa2,
    IfIcmpgt = 0xa3,
    IfIcmple = 0xa4,
    Goto = 0xa7,
    IfAcmpeq = 0xa5,
    IfAcmpne = 0xa6,

    // Returns
    Ireturn = 0xac,
    Areturn = 0xb0,
    Return = 0xb1,

    // Fields, methods, allocation
    Getstatic = 0xb2,
    Getfield = 0xb4,
    Invokevirtual = 0xb6,
    Invokespecial = 0xb7,
    New = 0xbb,
    Newarray = 0xbc,
}

/// `newarray` array-type code for `int[]`.
pub const T_INT: u8 = 10;

impl Opcode {
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Net operand-stack effect for opcodes with a fixed effect. Branches,
    /// returns and invocations are emitted through dedicated
    /// [`CodeBuffer`](super::code::CodeBuffer) methods that account for
    /// their own effect.
    pub fn stack_effect(self) -> i32 {
        use Opcode::*;
        match self {
            AconstNull | IconstM1 | Iconst0 | Iconst1 | Iconst2 | Iconst3 | Iconst4 | Iconst5
            | Bipush | Sipush | Ldc | LdcW => 1,
            Iload | Aload | Iload0 | Iload1 | Iload2 | Iload3 | Aload0 | Aload1 | Aload2
            | Aload3 => 1,
            Iaload => -1,
            Istore | Astore | Istore0 | Istore1 | Istore2 | Istore3 | Astore0 | Astore1
            | Astore2 | Astore3 => -1,
            Iastore => -3,
            Pop => -1,
            Dup | DupX2 => 1,
            Iadd | Isub | Imul | Idiv | Irem | Iand | Ior | Ixor => -1,
            Ineg => 0,
            Getstatic => 1,
            Getfield => 0,
            New => 1,
            Newarray => 0,
            Ifeq | IfIcmpeq | IfIcmpne | IfIcmplt | IfIcmpge | IfIcmpgt | IfIcmple | IfAcmpeq
            | IfAcmpne | Goto | Ireturn | Areturn | Return | Invokevirtual | Invokespecial => {
                unreachable!("{self:?} has no fixed stack effect")
            }
        }
    }

    /// Operand-stack pops performed by a conditional branch before jumping.
    pub fn branch_pops(self) -> i32 {
        use Opcode::*;
        match self {
            Goto => 0,
            Ifeq => 1,
            IfIcmpeq | IfIcmpne | IfIcmplt | IfIcmpge | IfIcmpgt | IfIcmple | IfAcmpeq
            | IfAcmpne => 2,
            other => unreachable!("{other:?} is not a branch"),
        }
    }
}
