//! Linear three-address intermediate representation, for inspection only.
//!
//! The text form is deliberately simple: one instruction per line, `t<n>`
//! temporaries, `L<n>` labels, uppercase keywords. Nothing downstream
//! consumes it; the class-file generator works straight from the AST.

use javelin_parser::ast::{
    BinaryOp, ClassDecl, Expr, MethodDecl, NewInit, Program, Stmt, UnaryOp,
};

/// Render the whole program as IR lines.
pub fn generate_ir(program: &Program) -> Vec<String> {
    let mut gen = IrGenerator::default();
    for class in &program.classes {
        gen.class(class);
    }
    gen.instructions
}

#[derive(Default)]
struct IrGenerator {
    instructions: Vec<String>,
    temp_counter: u32,
    label_counter: u32,
}

impl IrGenerator {
    fn emit(&mut self, instruction: String) {
        self.instructions.push(instruction);
    }

    fn new_temp(&mut self) -> String {
        let temp = format!("t{}", self.temp_counter);
        self.temp_counter += 1;
        temp
    }

    fn new_label(&mut self) -> String {
        let label = format!("L{}", self.label_counter);
        self.label_counter += 1;
        label
    }

    fn class(&mut self, class: &ClassDecl) {
        self.emit(format!("CLASS {}", class.name));
        for field in &class.fields {
            self.emit(format!("FIELD {} {}", field.ty, field.name));
        }
        for method in &class.methods {
            self.method(method);
        }
        self.emit("END_CLASS".to_string());
    }

    fn method(&mut self, method: &MethodDecl) {
        self.emit(format!("METHOD {} {}", method.return_type, method.name));
        for param in &method.params {
            self.emit(format!("PARAM {} {}", param.ty, param.name));
        }
        for stmt in &method.body.statements {
            self.stmt(stmt);
        }
        self.emit("END_METHOD".to_string());
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => {
                for stmt in &block.statements {
                    self.stmt(stmt);
                }
            }
            Stmt::VarDecl(decl) => match &decl.initializer {
                Some(init) => {
                    let value = self.expr(init);
                    self.emit(format!("{} = {}", decl.name, value));
                }
                None => self.emit(format!("DECLARE {} {}", decl.ty, decl.name)),
            },
            Stmt::If(s) => {
                let condition = self.expr(&s.condition);
                let else_label = self.new_label();
                let end_label = self.new_label();

                self.emit(format!("IF_FALSE {condition} GOTO {else_label}"));
                self.stmt(&s.then_stmt);
                self.emit(format!("GOTO {end_label}"));

                self.emit(format!("{else_label}:"));
                if let Some(else_stmt) = &s.else_stmt {
                    self.stmt(else_stmt);
                }
                self.emit(format!("{end_label}:"));
            }
            Stmt::While(s) => {
                let start_label = self.new_label();
                let end_label = self.new_label();

                self.emit(format!("{start_label}:"));
                let condition = self.expr(&s.condition);
                self.emit(format!("IF_FALSE {condition} GOTO {end_label}"));

                self.stmt(&s.body);
                self.emit(format!("GOTO {start_label}"));
                self.emit(format!("{end_label}:"));
            }
            Stmt::For(s) => {
                if let Some(init) = &s.init {
                    self.stmt(init);
                }
                let start_label = self.new_label();
                let end_label = self.new_label();

                self.emit(format!("{start_label}:"));
                if let Some(condition) = &s.condition {
                    let condition = self.expr(condition);
                    self.emit(format!("IF_FALSE {condition} GOTO {end_label}"));
                }

                self.stmt(&s.body);
                if let Some(update) = &s.update {
                    self.expr(update);
                }
                self.emit(format!("GOTO {start_label}"));
                self.emit(format!("{end_label}:"));
            }
            Stmt::Return(s) => match &s.value {
                Some(value) => {
                    let value = self.expr(value);
                    self.emit(format!("RETURN {value}"));
                }
                None => self.emit("RETURN".to_string()),
            },
            Stmt::Expr(s) => {
                self.expr(&s.expr);
            }
        }
    }

    /// Evaluate an expression, returning the name of the value it produced.
    fn expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::IntLiteral(e) => e.value.to_string(),
            Expr::BoolLiteral(e) => e.value.to_string(),
            Expr::StringLiteral(e) => format!("\"{}\"", e.value),
            Expr::NullLiteral(_) => "null".to_string(),
            Expr::Identifier(e) => e.name.clone(),
            Expr::This(_) => "this".to_string(),
            Expr::Binary(e) => {
                let left = self.expr(&e.left);
                let right = self.expr(&e.right);
                let temp = self.new_temp();
                self.emit(format!("{temp} = {left} {} {right}", binary_op_name(e.op)));
                temp
            }
            Expr::Unary(e) => {
                let operand = self.expr(&e.operand);
                let temp = self.new_temp();
                self.emit(format!("{temp} = {} {operand}", unary_op_name(e.op)));
                temp
            }
            Expr::Assign(e) => {
                let target = self.expr(&e.target);
                let value = self.expr(&e.value);
                self.emit(format!("{target} = {value}"));
                target
            }
            Expr::Call(e) => {
                let args: Vec<String> = e.args.iter().map(|arg| self.expr(arg)).collect();
                let temp = self.new_temp();
                let args = args.join(", ");
                match &e.receiver {
                    Some(receiver) => {
                        let receiver = self.expr(receiver);
                        self.emit(format!("{temp} = CALL {receiver}.{}({args})", e.method));
                    }
                    None => self.emit(format!("{temp} = CALL {}({args})", e.method)),
                }
                temp
            }
            Expr::FieldAccess(e) => {
                let object = self.expr(&e.object);
                let temp = self.new_temp();
                self.emit(format!("{temp} = {object}.{}", e.field));
                temp
            }
            Expr::ArrayAccess(e) => {
                let array = self.expr(&e.array);
                let index = self.expr(&e.index);
                let temp = self.new_temp();
                self.emit(format!("{temp} = {array}[{index}]"));
                temp
            }
            Expr::New(e) => {
                let temp = self.new_temp();
                match &e.init {
                    NewInit::Array(size) => {
                        let size = self.expr(size);
                        self.emit(format!("{temp} = NEW {}[{size}]", e.ty));
                    }
                    NewInit::Object(_) => self.emit(format!("{temp} = NEW {}", e.ty)),
                }
                temp
            }
        }
    }
}

fn binary_op_name(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "ADD",
        BinaryOp::Sub => "SUB",
        BinaryOp::Mul => "MUL",
        BinaryOp::Div => "DIV",
        BinaryOp::Mod => "MOD",
        BinaryOp::Eq => "EQ",
        BinaryOp::Ne => "NE",
        BinaryOp::Lt => "LT",
        BinaryOp::Gt => "GT",
        BinaryOp::Le => "LE",
        BinaryOp::Ge => "GE",
        BinaryOp::And => "AND",
        BinaryOp::Or => "OR",
    }
}

fn unary_op_name(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Neg => "NEG",
        UnaryOp::Not => "NOT",
    }
}
