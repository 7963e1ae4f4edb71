//! Integration tests for the typing rules and the resolved-type side table.

use javelin_parser::ast::{Expr, Stmt, Type};
use javelin_parser::error::SemanticError;
use javelin_parser::{check, Program, TypeMap};

fn analyze_ok(source: &str) -> (Program, TypeMap) {
    match check(source) {
        Ok(result) => result,
        Err(e) => panic!("expected analysis to succeed, got: {e}"),
    }
}

fn analyze_err(source: &str) -> SemanticError {
    let program = javelin_parser::parse(source).unwrap();
    match javelin_parser::SemanticAnalyzer::new().analyze(&program) {
        Ok(_) => panic!("expected analysis to fail"),
        Err(e) => e,
    }
}

#[test]
fn arithmetic_requires_int_operands() {
    analyze_ok("class A { int m() { return 1 + 2 * 3 % 4; } }");
    let err = analyze_err("class A { void m() { int x; x = 1 + true; } }");
    assert!(matches!(err, SemanticError::InvalidOperand { ref op, .. } if op == "+"));
}

#[test]
fn relational_requires_int_and_yields_boolean() {
    analyze_ok("class A { boolean m() { return 1 < 2; } }");
    let err = analyze_err("class A { boolean m() { return true < false; } }");
    assert!(matches!(err, SemanticError::InvalidOperand { .. }));
}

#[test]
fn logical_requires_boolean_operands() {
    analyze_ok("class A { boolean m() { return true && 1 < 2 || false; } }");
    let err = analyze_err("class A { boolean m() { return 1 && true; } }");
    assert!(matches!(err, SemanticError::InvalidOperand { ref op, .. } if op == "&&"));
}

#[test]
fn unary_operand_types() {
    analyze_ok("class A { int m() { return -5; } boolean n() { return !false; } }");
    assert!(matches!(
        analyze_err("class A { void m() { boolean b; b = -true; } }"),
        SemanticError::InvalidOperand { .. }
    ));
    assert!(matches!(
        analyze_err("class A { void m() { boolean b; b = !3; } }"),
        SemanticError::InvalidOperand { .. }
    ));
}

#[test]
fn equality_needs_compatible_operands() {
    analyze_ok("class A { boolean m() { return 1 == 2; } }");
    analyze_ok("class A { boolean m(A other) { return other == null; } }");
    let err = analyze_err("class A { boolean m() { return 1 != true; } }");
    assert!(matches!(err, SemanticError::IncomparableTypes { .. }));
}

#[test]
fn null_is_assignable_to_references_only() {
    analyze_ok("class A { void m(A a, int[] xs) { a = null; xs = null; } }");
    let err = analyze_err("class A { void m() { int x; x = null; } }");
    assert!(matches!(err, SemanticError::TypeMismatch { .. }));
}

#[test]
fn assignment_requires_matching_types() {
    let err = analyze_err("class A { void m() { int x; x = true; } }");
    let SemanticError::TypeMismatch {
        context,
        expected,
        found,
        ..
    } = err
    else {
        panic!("expected TypeMismatch");
    };
    assert_eq!(context, "assignment");
    assert_eq!(expected, Type::int());
    assert_eq!(found, Type::boolean());
}

#[test]
fn initializer_types_are_checked() {
    let err = analyze_err("class A { int x = true; }");
    assert!(matches!(
        err,
        SemanticError::TypeMismatch {
            context: "field initializer",
            ..
        }
    ));
    let err = analyze_err("class A { void m() { boolean b = 0; } }");
    assert!(matches!(
        err,
        SemanticError::TypeMismatch {
            context: "variable declaration",
            ..
        }
    ));
}

#[test]
fn conditions_must_be_boolean() {
    for (construct, source) in [
        ("if", "class A { void m() { if (1) { } } }"),
        ("while", "class A { void m() { while (0) { } } }"),
        ("for", "class A { void m() { for (; 5;) { } } }"),
    ] {
        let err = analyze_err(source);
        let SemanticError::ConditionNotBoolean { construct: got, .. } = err else {
            panic!("expected ConditionNotBoolean for {construct}");
        };
        assert_eq!(got, construct);
    }
}

#[test]
fn return_type_agreement() {
    analyze_ok("class A { int m() { return 1; } void n() { return; } }");

    let err = analyze_err("class A { int m() { return; } }");
    assert!(matches!(err, SemanticError::MissingReturnValue { .. }));

    let err = analyze_err("class A { int m() { return true; } }");
    assert!(matches!(
        err,
        SemanticError::TypeMismatch {
            context: "return value",
            ..
        }
    ));

    // A valued return in a void method is a mismatch against void.
    let err = analyze_err("class A { void m() { return 1; } }");
    assert!(matches!(err, SemanticError::TypeMismatch { .. }));
}

#[test]
fn array_access_rules() {
    analyze_ok("class A { int m(int[] xs) { return xs[0]; } }");

    let err = analyze_err("class A { int m(int[] xs) { return xs[true]; } }");
    assert!(matches!(err, SemanticError::IndexNotInt { .. }));

    let err = analyze_err("class A { int m(int x) { return x[0]; } }");
    assert!(matches!(err, SemanticError::NotAnArray { .. }));

    let err = analyze_err("class A { void m(int[] xs) { xs = new int[true]; } }");
    assert!(matches!(err, SemanticError::ArraySizeNotInt { .. }));
}

#[test]
fn indexing_strips_one_array_dimension() {
    let (program, types) = analyze_ok("class A { int m(int[] xs) { return xs[1]; } }");
    let Stmt::Return(ret) = &program.classes[0].methods[0].body.statements[0] else {
        panic!("expected return");
    };
    let value = ret.value.as_ref().unwrap();
    assert_eq!(types.get(value.id()), Some(&Type::int()));
}

#[test]
fn known_call_uses_declared_return_type() {
    analyze_ok(
        "class A { boolean flag() { return true; } void m() { boolean b; b = flag(); } }",
    );
}

#[test]
fn unknown_call_defaults_to_int() {
    // Name-only resolution against the current class; unknown callees
    // type as int rather than failing.
    analyze_ok("class A { void m() { int x; x = mystery(); } }");
    let err = analyze_err("class A { void m() { boolean b; b = mystery(); } }");
    assert!(matches!(err, SemanticError::TypeMismatch { .. }));
}

#[test]
fn call_arguments_are_not_checked_against_the_callee() {
    // Arity and argument types are not validated, only the arguments
    // themselves must be well-typed.
    analyze_ok("class A { int f(int a) { return a; } void m() { int x; x = f(); } }");
    let err = analyze_err("class A { int f(int a) { return a; } void m() { int x; x = f(y); } }");
    assert!(matches!(err, SemanticError::UndefinedVariable { .. }));
}

#[test]
fn bare_println_types_as_void() {
    // The built-in print call produces no value, so its result cannot be
    // consumed.
    let (program, types) = analyze_ok("class A { void m(int x) { println(x); } }");
    let Stmt::Expr(s) = &program.classes[0].methods[0].body.statements[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(types.get(s.expr.id()), Some(&Type::void()));

    let err = analyze_err("class A { void m() { int x; x = println(1); } }");
    assert!(matches!(err, SemanticError::TypeMismatch { .. }));
}

#[test]
fn field_access_types_as_int() {
    analyze_ok("class A { void m(A other) { int x; x = other.count; } }");
    let err = analyze_err("class A { void m(A other) { boolean b; b = other.count; } }");
    assert!(matches!(err, SemanticError::TypeMismatch { .. }));
}

#[test]
fn this_types_as_the_enclosing_class() {
    let (program, types) = analyze_ok("class A { A me() { return this; } }");
    let Stmt::Return(ret) = &program.classes[0].methods[0].body.statements[0] else {
        panic!("expected return");
    };
    let value = ret.value.as_ref().unwrap();
    assert_eq!(types.get(value.id()), Some(&Type::new("A", false)));
}

#[test]
fn string_literals_have_type_string() {
    let (program, types) = analyze_ok(r#"class A { void m() { println("hi"); } }"#);
    let Stmt::Expr(s) = &program.classes[0].methods[0].body.statements[0] else {
        panic!("expected expression statement");
    };
    let Expr::Call(call) = &s.expr else {
        panic!("expected call");
    };
    assert_eq!(
        types.get(call.args[0].id()),
        Some(&Type::new("String", false))
    );
}

#[test]
fn every_expression_gets_a_resolved_type() {
    let (program, types) = analyze_ok(
        "class A { int x; int m(int a) { int b; b = a + x; if (b > 0) { b = -b; } return b; } }",
    );
    fn count(expr: &Expr, types: &TypeMap, n: &mut usize) {
        assert!(
            types.get(expr.id()).is_some(),
            "missing resolved type for {:?}",
            expr
        );
        *n += 1;
        match expr {
            Expr::Binary(e) => {
                count(&e.left, types, n);
                count(&e.right, types, n);
            }
            Expr::Unary(e) => count(&e.operand, types, n),
            Expr::Assign(e) => {
                count(&e.target, types, n);
                count(&e.value, types, n);
            }
            _ => {}
        }
    }
    let mut seen = 0;
    fn walk_stmt(stmt: &Stmt, types: &TypeMap, seen: &mut usize) {
        match stmt {
            Stmt::Expr(s) => count(&s.expr, types, seen),
            Stmt::If(s) => {
                count(&s.condition, types, seen);
                walk_stmt(&s.then_stmt, types, seen);
                if let Some(e) = &s.else_stmt {
                    walk_stmt(e, types, seen);
                }
            }
            Stmt::Block(b) => {
                for s in &b.statements {
                    walk_stmt(s, types, seen);
                }
            }
            Stmt::Return(s) => {
                if let Some(v) = &s.value {
                    count(v, types, seen);
                }
            }
            _ => {}
        }
    }
    for stmt in &program.classes[0].methods[0].body.statements {
        walk_stmt(stmt, &types, &mut seen);
    }
    assert!(seen >= 8);
    assert!(types.len() >= seen);
}
