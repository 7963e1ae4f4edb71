//! Statement lowering.
//!
//! Control flow compiles to conditional branches over the boolean value the
//! condition leaves on the stack: `ifeq` falls through on true and jumps on
//! false.

use super::method::MethodCompiler;
use crate::classfile::Opcode;
use crate::error::CodegenResult;
use javelin_parser::ast::{ForStmt, IfStmt, ReturnStmt, Stmt, WhileStmt};

impl MethodCompiler<'_> {
    pub(super) fn compile_stmt(&mut self, stmt: &Stmt) -> CodegenResult<()> {
        match stmt {
            Stmt::Block(block) => {
                for stmt in &block.statements {
                    self.compile_stmt(stmt)?;
                }
                Ok(())
            }
            Stmt::VarDecl(decl) => {
                let slot = self.define_local(&decl.name, decl.ty.clone());
                if let Some(init) = &decl.initializer {
                    self.compile_expr(init)?;
                    self.store_local(&decl.ty, slot);
                }
                Ok(())
            }
            Stmt::If(s) => self.compile_if(s),
            Stmt::While(s) => self.compile_while(s),
            Stmt::For(s) => self.compile_for(s),
            Stmt::Return(s) => self.compile_return(s),
            Stmt::Expr(s) => {
                self.compile_expr(&s.expr)?;
                // Discard the value unless the expression was a void call.
                if !self.resolved_type(&s.expr)?.is_void() {
                    self.code.simple(Opcode::Pop);
                }
                Ok(())
            }
        }
    }

    fn compile_if(&mut self, s: &IfStmt) -> CodegenResult<()> {
        let else_label = self.code.new_label();
        let end_label = self.code.new_label();

        self.compile_expr(&s.condition)?;
        self.code.branch(Opcode::Ifeq, else_label);

        self.compile_stmt(&s.then_stmt)?;
        // A then-arm that already transferred control needs no jump over
        // the else-arm; an offset past the last instruction would not
        // verify.
        if self.code.is_reachable() {
            self.code.branch(Opcode::Goto, end_label);
        }

        self.code.bind(else_label);
        if let Some(else_stmt) = &s.else_stmt {
            self.compile_stmt(else_stmt)?;
        }

        self.code.bind(end_label);
        Ok(())
    }

    fn compile_while(&mut self, s: &WhileStmt) -> CodegenResult<()> {
        let start_label = self.code.new_label();
        let end_label = self.code.new_label();

        self.code.bind(start_label);
        self.compile_expr(&s.condition)?;
        self.code.branch(Opcode::Ifeq, end_label);

        self.compile_stmt(&s.body)?;
        self.code.branch(Opcode::Goto, start_label);

        self.code.bind(end_label);
        Ok(())
    }

    fn compile_for(&mut self, s: &ForStmt) -> CodegenResult<()> {
        if let Some(init) = &s.init {
            self.compile_stmt(init)?;
        }

        let start_label = self.code.new_label();
        let end_label = self.code.new_label();

        self.code.bind(start_label);
        if let Some(condition) = &s.condition {
            self.compile_expr(condition)?;
            self.code.branch(Opcode::Ifeq, end_label);
        }

        self.compile_stmt(&s.body)?;

        if let Some(update) = &s.update {
            self.compile_expr(update)?;
            if !self.resolved_type(update)?.is_void() {
                self.code.simple(Opcode::Pop);
            }
        }

        self.code.branch(Opcode::Goto, start_label);
        self.code.bind(end_label);
        Ok(())
    }

    fn compile_return(&mut self, s: &ReturnStmt) -> CodegenResult<()> {
        match &s.value {
            Some(value) => {
                self.compile_expr(value)?;
                let op = if Self::is_int_like(self.resolved_type(value)?) {
                    Opcode::Ireturn
                } else {
                    Opcode::Areturn
                };
                self.code.ret(op);
            }
            None => self.code.ret(Opcode::Return),
        }
        Ok(())
    }
}
