//! Bytecode buffer for one method body.
//!
//! Branch targets are [`Label`] handles: a branch to an unbound label leaves
//! a two-byte placeholder that is patched when the label is bound. Binding a
//! label twice, or finishing with an unbound-but-referenced label, is a
//! generator bug and panics.
//!
//! The buffer also tracks the operand-stack depth to compute `max_stack`.
//! Every branch records the depth at its target; binding a label restores
//! the recorded depth, which keeps the count right across the join points
//! the comparison and if/else lowerings create.

use super::opcode::Opcode;

/// Handle to a branch target inside one [`CodeBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label(usize);

#[derive(Debug, Default)]
struct LabelState {
    /// Bytecode offset once bound.
    target: Option<u32>,
    /// Offsets of branch opcodes waiting for this label.
    patches: Vec<u32>,
    /// Operand-stack depth control flow arrives with.
    entry_depth: Option<i32>,
}

#[derive(Debug, Default)]
pub struct CodeBuffer {
    bytes: Vec<u8>,
    labels: Vec<LabelState>,
    depth: i32,
    max_depth: i32,
    /// False right after an unconditional transfer (goto or return), until
    /// the next label is bound.
    reachable: bool,
    last_opcode: Option<Opcode>,
}

impl CodeBuffer {
    pub fn new() -> Self {
        CodeBuffer {
            reachable: true,
            ..CodeBuffer::default()
        }
    }

    pub fn new_label(&mut self) -> Label {
        self.labels.push(LabelState::default());
        Label(self.labels.len() - 1)
    }

    fn here(&self) -> u32 {
        self.bytes.len() as u32
    }

    fn adjust(&mut self, delta: i32) {
        self.depth += delta;
        debug_assert!(self.depth >= 0, "operand stack underflow");
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn note(&mut self, op: Opcode) {
        self.last_opcode = Some(op);
    }

    /// Emit an opcode with a fixed stack effect and no operands.
    pub fn simple(&mut self, op: Opcode) {
        self.bytes.push(op.byte());
        self.adjust(op.stack_effect());
        self.note(op);
    }

    /// Emit an opcode with a fixed stack effect and a one-byte operand.
    pub fn with_u8(&mut self, op: Opcode, operand: u8) {
        self.bytes.push(op.byte());
        self.bytes.push(operand);
        self.adjust(op.stack_effect());
        self.note(op);
    }

    /// Emit an opcode with a fixed stack effect and a two-byte operand.
    pub fn with_u16(&mut self, op: Opcode, operand: u16) {
        self.bytes.push(op.byte());
        self.bytes.extend_from_slice(&operand.to_be_bytes());
        self.adjust(op.stack_effect());
        self.note(op);
    }

    /// Emit a branch to `label`, patching later if the label is not yet
    /// bound. Records the stack depth arriving at the target.
    pub fn branch(&mut self, op: Opcode, label: Label) {
        let site = self.here();
        self.adjust(-op.branch_pops());
        let depth = self.depth;
        self.record_entry_depth(label, depth);

        self.bytes.push(op.byte());
        let state = &mut self.labels[label.0];
        match state.target {
            Some(target) => {
                let offset = target as i64 - site as i64;
                self.bytes.extend_from_slice(&(offset as i16).to_be_bytes());
            }
            None => {
                state.patches.push(site);
                self.bytes.extend_from_slice(&[0, 0]);
            }
        }
        self.note(op);

        if op == Opcode::Goto {
            self.reachable = false;
            self.depth = 0;
        }
    }

    /// Bind `label` to the current offset and patch pending branches.
    pub fn bind(&mut self, label: Label) {
        let target = self.here();
        let state = &mut self.labels[label.0];
        assert!(state.target.is_none(), "label bound twice");
        state.target = Some(target);

        for &site in &state.patches {
            let offset = target as i64 - site as i64;
            let bytes = (offset as i16).to_be_bytes();
            self.bytes[site as usize + 1] = bytes[0];
            self.bytes[site as usize + 2] = bytes[1];
        }

        if let Some(depth) = self.labels[label.0].entry_depth {
            self.depth = if self.reachable {
                self.depth.max(depth)
            } else {
                depth
            };
            self.reachable = true;
        }
        // A bound label makes what follows a branch target.
        self.last_opcode = None;
    }

    fn record_entry_depth(&mut self, label: Label, depth: i32) {
        let state = &mut self.labels[label.0];
        state.entry_depth = Some(match state.entry_depth {
            Some(existing) => existing.max(depth),
            None => depth,
        });
    }

    /// Emit a method invocation; the stack effect depends on the arity.
    pub fn invoke(&mut self, op: Opcode, index: u16, arg_count: usize, returns_value: bool) {
        self.bytes.push(op.byte());
        self.bytes.extend_from_slice(&index.to_be_bytes());
        // Pops the receiver and the arguments, pushes the result if any.
        let mut delta = -(arg_count as i32) - 1;
        if returns_value {
            delta += 1;
        }
        self.adjust(delta);
        self.note(op);
    }

    pub fn ret(&mut self, op: Opcode) {
        debug_assert!(matches!(
            op,
            Opcode::Return | Opcode::Ireturn | Opcode::Areturn
        ));
        self.bytes.push(op.byte());
        self.note(op);
        self.reachable = false;
        self.depth = 0;
    }

    /// Push an int constant using the shortest encoding.
    pub fn push_int(&mut self, value: i32, pool_index: impl FnOnce() -> u16) {
        match value {
            -1 => self.simple(Opcode::IconstM1),
            0 => self.simple(Opcode::Iconst0),
            1 => self.simple(Opcode::Iconst1),
            2 => self.simple(Opcode::Iconst2),
            3 => self.simple(Opcode::Iconst3),
            4 => self.simple(Opcode::Iconst4),
            5 => self.simple(Opcode::Iconst5),
            _ if i8::try_from(value).is_ok() => self.with_u8(Opcode::Bipush, value as u8),
            _ if i16::try_from(value).is_ok() => {
                self.with_u16(Opcode::Sipush, value as u16);
            }
            _ => self.load_constant(pool_index()),
        }
    }

    /// `ldc` or `ldc_w` depending on the pool index width.
    pub fn load_constant(&mut self, index: u16) {
        if let Ok(narrow) = u8::try_from(index) {
            self.with_u8(Opcode::Ldc, narrow);
        } else {
            self.with_u16(Opcode::LdcW, index);
        }
    }

    pub fn load_int(&mut self, slot: u16) {
        self.var_insn(
            slot,
            Opcode::Iload,
            [Opcode::Iload0, Opcode::Iload1, Opcode::Iload2, Opcode::Iload3],
        );
    }

    pub fn load_ref(&mut self, slot: u16) {
        self.var_insn(
            slot,
            Opcode::Aload,
            [Opcode::Aload0, Opcode::Aload1, Opcode::Aload2, Opcode::Aload3],
        );
    }

    pub fn store_int(&mut self, slot: u16) {
        self.var_insn(
            slot,
            Opcode::Istore,
            [
                Opcode::Istore0,
                Opcode::Istore1,
                Opcode::Istore2,
                Opcode::Istore3,
            ],
        );
    }

    pub fn store_ref(&mut self, slot: u16) {
        self.var_insn(
            slot,
            Opcode::Astore,
            [
                Opcode::Astore0,
                Opcode::Astore1,
                Opcode::Astore2,
                Opcode::Astore3,
            ],
        );
    }

    fn var_insn(&mut self, slot: u16, wide: Opcode, short_forms: [Opcode; 4]) {
        match slot {
            0..=3 => self.simple(short_forms[slot as usize]),
            _ => {
                debug_assert!(slot <= u8::MAX as u16, "slot {slot} needs the wide prefix");
                self.with_u8(wide, slot as u8);
            }
        }
    }

    /// Whether control can fall through to the next emitted instruction.
    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    pub fn ends_with_return(&self) -> bool {
        matches!(
            self.last_opcode,
            Some(Opcode::Return | Opcode::Ireturn | Opcode::Areturn)
        )
    }

    pub fn max_stack(&self) -> u16 {
        self.max_depth as u16
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the buffer. Panics if a referenced label was never bound.
    pub fn into_bytes(self) -> Vec<u8> {
        for state in &self.labels {
            assert!(
                state.target.is_some() || state.patches.is_empty(),
                "branch to unbound label"
            );
        }
        self.bytes
    }
}
