//! Expression lowering.
//!
//! Every expression leaves exactly one value on the operand stack, except
//! calls to void methods which leave none. Comparisons materialize their
//! boolean through a branch-and-join: jump to a `1` push when the condition
//! holds, fall through to a `0` push otherwise. `&&` and `||` compile to
//! `iand`/`ior` over already-materialized booleans; there is no
//! short-circuit evaluation.

use super::method::MethodCompiler;
use super::type_descriptor;
use crate::classfile::opcode::T_INT;
use crate::classfile::Opcode;
use crate::error::{CodegenError, CodegenResult};
use javelin_parser::ast::{
    AssignExpr, BinaryExpr, BinaryOp, CallExpr, Expr, NewExpr, NewInit, UnaryOp,
};

const PRINT_STREAM: &str = "java/io/PrintStream";

impl MethodCompiler<'_> {
    pub(super) fn compile_expr(&mut self, expr: &Expr) -> CodegenResult<()> {
        match expr {
            Expr::IntLiteral(e) => {
                let value = e.value;
                self.code.push_int(value, || self.pool.integer(value));
            }
            Expr::BoolLiteral(e) => {
                self.code.simple(if e.value {
                    Opcode::Iconst1
                } else {
                    Opcode::Iconst0
                });
            }
            Expr::StringLiteral(e) => {
                let index = self.pool.string(&e.value);
                self.code.load_constant(index);
            }
            Expr::NullLiteral(_) => self.code.simple(Opcode::AconstNull),
            Expr::This(_) => self.code.load_ref(0),
            Expr::Identifier(e) => {
                let (slot, ty) = match self.local(&e.name) {
                    Some(local) => (local.slot, local.ty.clone()),
                    None => {
                        return Err(CodegenError::UnresolvedLocal {
                            name: e.name.clone(),
                            line: e.line,
                            column: e.column,
                        });
                    }
                };
                self.load_local(&ty, slot);
            }
            Expr::Binary(e) => self.compile_binary(e)?,
            Expr::Unary(e) => {
                self.compile_expr(&e.operand)?;
                match e.op {
                    UnaryOp::Neg => self.code.simple(Opcode::Ineg),
                    UnaryOp::Not => {
                        self.code.simple(Opcode::Iconst1);
                        self.code.simple(Opcode::Ixor);
                    }
                }
            }
            Expr::Assign(e) => self.compile_assign(e)?,
            Expr::Call(e) => self.compile_call(e)?,
            Expr::FieldAccess(e) => {
                self.compile_expr(&e.object)?;
                // The analyzer resolves every field access against the
                // class under compilation; so does the emitted getfield.
                let descriptor = type_descriptor(self.resolved_type(expr)?);
                let index = self
                    .pool
                    .field_ref(&self.class.name, &e.field, &descriptor);
                self.code.with_u16(Opcode::Getfield, index);
            }
            Expr::ArrayAccess(e) => {
                self.compile_expr(&e.array)?;
                self.compile_expr(&e.index)?;
                self.code.simple(Opcode::Iaload);
            }
            Expr::New(e) => self.compile_new(e)?,
        }
        Ok(())
    }

    fn compile_binary(&mut self, e: &BinaryExpr) -> CodegenResult<()> {
        let reference_operands = !Self::is_int_like(self.resolved_type(&e.left)?)
            || !Self::is_int_like(self.resolved_type(&e.right)?);

        self.compile_expr(&e.left)?;
        self.compile_expr(&e.right)?;

        match e.op {
            BinaryOp::Add => self.code.simple(Opcode::Iadd),
            BinaryOp::Sub => self.code.simple(Opcode::Isub),
            BinaryOp::Mul => self.code.simple(Opcode::Imul),
            BinaryOp::Div => self.code.simple(Opcode::Idiv),
            BinaryOp::Mod => self.code.simple(Opcode::Irem),
            BinaryOp::And => self.code.simple(Opcode::Iand),
            BinaryOp::Or => self.code.simple(Opcode::Ior),
            BinaryOp::Eq => self.compile_comparison(if reference_operands {
                Opcode::IfAcmpeq
            } else {
                Opcode::IfIcmpeq
            }),
            BinaryOp::Ne => self.compile_comparison(if reference_operands {
                Opcode::IfAcmpne
            } else {
                Opcode::IfIcmpne
            }),
            BinaryOp::Lt => self.compile_comparison(Opcode::IfIcmplt),
            BinaryOp::Le => self.compile_comparison(Opcode::IfIcmple),
            BinaryOp::Gt => self.compile_comparison(Opcode::IfIcmpgt),
            BinaryOp::Ge => self.compile_comparison(Opcode::IfIcmpge),
        }
        Ok(())
    }

    /// Branch-and-join materialization of a comparison result.
    fn compile_comparison(&mut self, branch_op: Opcode) {
        let on_true = self.code.new_label();
        let end = self.code.new_label();

        self.code.branch(branch_op, on_true);
        self.code.simple(Opcode::Iconst0);
        self.code.branch(Opcode::Goto, end);
        self.code.bind(on_true);
        self.code.simple(Opcode::Iconst1);
        self.code.bind(end);
    }

    /// Assignment is an expression; the assigned value stays on the stack.
    fn compile_assign(&mut self, e: &AssignExpr) -> CodegenResult<()> {
        match e.target.as_ref() {
            Expr::Identifier(target) => {
                let (slot, ty) = match self.local(&target.name) {
                    Some(local) => (local.slot, local.ty.clone()),
                    None => {
                        return Err(CodegenError::UnresolvedLocal {
                            name: target.name.clone(),
                            line: target.line,
                            column: target.column,
                        });
                    }
                };
                self.compile_expr(&e.value)?;
                self.code.simple(Opcode::Dup);
                self.store_local(&ty, slot);
                Ok(())
            }
            Expr::ArrayAccess(target) => {
                self.compile_expr(&target.array)?;
                self.compile_expr(&target.index)?;
                self.compile_expr(&e.value)?;
                // Keep a copy of the value below the array/index pair so it
                // survives the store as the expression result.
                self.code.simple(Opcode::DupX2);
                self.code.simple(Opcode::Iastore);
                Ok(())
            }
            _ => Err(CodegenError::InvalidAssignTarget {
                line: e.line,
                column: e.column,
            }),
        }
    }

    fn compile_call(&mut self, e: &CallExpr) -> CodegenResult<()> {
        if e.receiver.is_none() && e.method == "println" {
            return self.compile_println(e);
        }

        let program = self.program;
        let owner = match &e.receiver {
            None => {
                self.code.load_ref(0);
                self.class.name.clone()
            }
            Some(receiver) => {
                self.compile_expr(receiver)?;
                let ty = self.resolved_type(receiver)?;
                if ty.is_primitive() || ty.is_array {
                    return Err(CodegenError::UnknownMethod {
                        owner: ty.to_string(),
                        name: e.method.clone(),
                        line: e.line,
                        column: e.column,
                    });
                }
                ty.name.clone()
            }
        };

        let callee = program
            .class(&owner)
            .and_then(|class| class.method(&e.method))
            .ok_or_else(|| CodegenError::UnknownMethod {
                owner: owner.clone(),
                name: e.method.clone(),
                line: e.line,
                column: e.column,
            })?;
        let descriptor = super::method_descriptor(callee);
        let returns_value = !callee.return_type.is_void();

        for arg in &e.args {
            self.compile_expr(arg)?;
        }

        let index = self.pool.method_ref(&owner, &e.method, &descriptor);
        self.code
            .invoke(Opcode::Invokevirtual, index, e.args.len(), returns_value);
        Ok(())
    }

    /// `println(x)` lowers to a call on `System.out`, picking the overload
    /// from the argument's resolved type.
    fn compile_println(&mut self, e: &CallExpr) -> CodegenResult<()> {
        let out = self
            .pool
            .field_ref("java/lang/System", "out", "Ljava/io/PrintStream;");
        self.code.with_u16(Opcode::Getstatic, out);

        let descriptor = match e.args.first() {
            None => "()V",
            Some(arg) => {
                self.compile_expr(arg)?;
                let ty = self.resolved_type(arg)?;
                if ty.is_int() {
                    "(I)V"
                } else if ty.is_boolean() {
                    "(Z)V"
                } else {
                    "(Ljava/lang/String;)V"
                }
            }
        };

        let index = self.pool.method_ref(PRINT_STREAM, "println", descriptor);
        let arg_count = e.args.len().min(1);
        self.code
            .invoke(Opcode::Invokevirtual, index, arg_count, false);
        Ok(())
    }

    fn compile_new(&mut self, e: &NewExpr) -> CodegenResult<()> {
        match &e.init {
            NewInit::Object(_args) => {
                // User classes only ever have the synthesized no-argument
                // constructor; constructor arguments are type-checked but
                // not passed.
                let class = self.pool.class(&e.ty.name);
                self.code.with_u16(Opcode::New, class);
                self.code.simple(Opcode::Dup);
                let init = self.pool.method_ref(&e.ty.name, "<init>", "()V");
                self.code.invoke(Opcode::Invokespecial, init, 0, false);
            }
            NewInit::Array(size) => {
                self.compile_expr(size)?;
                self.code.with_u8(Opcode::Newarray, T_INT);
            }
        }
        Ok(())
    }
}
