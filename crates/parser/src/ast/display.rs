//! Diagnostic AST dump.
//!
//! Produces the indented textual tree shown by the CLI's `--ast` flag. This
//! is a read-only collaborator of the pipeline; nothing downstream consumes
//! its output.

use super::expr::{Expr, NewInit};
use super::nodes::{Block, ClassDecl, FieldDecl, MethodDecl, Program, Stmt};

pub fn dump_program(program: &Program) -> String {
    let mut printer = Printer::default();
    printer.line("Program");
    printer.indented(|p| {
        for class in &program.classes {
            p.class_decl(class);
        }
    });
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    fn class_decl(&mut self, class: &ClassDecl) {
        self.line(format!("ClassDecl: {}", class.name));
        self.indented(|p| {
            if !class.fields.is_empty() {
                p.line("Fields:");
                p.indented(|p| {
                    for field in &class.fields {
                        p.field_decl(field);
                    }
                });
            }
            if !class.methods.is_empty() {
                p.line("Methods:");
                p.indented(|p| {
                    for method in &class.methods {
                        p.method_decl(method);
                    }
                });
            }
        });
    }

    fn field_decl(&mut self, field: &FieldDecl) {
        self.line(format!("FieldDecl: {} {}", field.ty, field.name));
        if let Some(init) = &field.initializer {
            self.indented(|p| p.expr(init));
        }
    }

    fn method_decl(&mut self, method: &MethodDecl) {
        self.line(format!("MethodDecl: {} {}", method.return_type, method.name));
        self.indented(|p| {
            for param in &method.params {
                p.line(format!("Param: {} {}", param.ty, param.name));
            }
            p.block(&method.body);
        });
    }

    fn block(&mut self, block: &Block) {
        self.line("Block");
        self.indented(|p| {
            for stmt in &block.statements {
                p.stmt(stmt);
            }
        });
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(b) => self.block(b),
            Stmt::VarDecl(s) => {
                self.line(format!("VarDecl: {} {}", s.ty, s.name));
                if let Some(init) = &s.initializer {
                    self.indented(|p| p.expr(init));
                }
            }
            Stmt::If(s) => {
                self.line("If");
                self.indented(|p| {
                    p.expr(&s.condition);
                    p.stmt(&s.then_stmt);
                    if let Some(else_stmt) = &s.else_stmt {
                        p.line("Else");
                        p.indented(|p| p.stmt(else_stmt));
                    }
                });
            }
            Stmt::While(s) => {
                self.line("While");
                self.indented(|p| {
                    p.expr(&s.condition);
                    p.stmt(&s.body);
                });
            }
            Stmt::For(s) => {
                self.line("For");
                self.indented(|p| {
                    if let Some(init) = &s.init {
                        p.stmt(init);
                    }
                    if let Some(cond) = &s.condition {
                        p.expr(cond);
                    }
                    if let Some(update) = &s.update {
                        p.expr(update);
                    }
                    p.stmt(&s.body);
                });
            }
            Stmt::Return(s) => {
                self.line("Return");
                if let Some(value) = &s.value {
                    self.indented(|p| p.expr(value));
                }
            }
            Stmt::Expr(s) => {
                self.line("ExprStmt");
                self.indented(|p| p.expr(&s.expr));
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Binary(e) => {
                self.line(format!("Binary: {}", e.op));
                self.indented(|p| {
                    p.expr(&e.left);
                    p.expr(&e.right);
                });
            }
            Expr::Unary(e) => {
                self.line(format!("Unary: {}", e.op));
                self.indented(|p| p.expr(&e.operand));
            }
            Expr::Assign(e) => {
                self.line("Assign");
                self.indented(|p| {
                    p.expr(&e.target);
                    p.expr(&e.value);
                });
            }
            Expr::Call(e) => {
                self.line(format!("Call: {}", e.method));
                self.indented(|p| {
                    if let Some(receiver) = &e.receiver {
                        p.expr(receiver);
                    }
                    for arg in &e.args {
                        p.expr(arg);
                    }
                });
            }
            Expr::FieldAccess(e) => {
                self.line(format!("FieldAccess: {}", e.field));
                self.indented(|p| p.expr(&e.object));
            }
            Expr::ArrayAccess(e) => {
                self.line("ArrayAccess");
                self.indented(|p| {
                    p.expr(&e.array);
                    p.expr(&e.index);
                });
            }
            Expr::New(e) => match &e.init {
                NewInit::Object(args) => {
                    self.line(format!("New: {}", e.ty));
                    self.indented(|p| {
                        for arg in args {
                            p.expr(arg);
                        }
                    });
                }
                NewInit::Array(size) => {
                    self.line(format!("NewArray: {}", e.ty));
                    self.indented(|p| p.expr(size));
                }
            },
            Expr::IntLiteral(e) => self.line(format!("IntLiteral: {}", e.value)),
            Expr::BoolLiteral(e) => self.line(format!("BoolLiteral: {}", e.value)),
            Expr::StringLiteral(e) => self.line(format!("StringLiteral: {:?}", e.value)),
            Expr::NullLiteral(_) => self.line("NullLiteral"),
            Expr::Identifier(e) => self.line(format!("Identifier: {}", e.name)),
            Expr::This(_) => self.line("This"),
        }
    }
}
