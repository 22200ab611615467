//! Tree-walking evaluator.
//!
//! `eval` walks a parsed program under an environment and yields one value.
//! Control flow rides the value channel: `return` wraps its result in
//! `Value::Return`, runtime failures become `Value::Error`, and both
//! short-circuit blocks while propagating outward. Programs unwrap the
//! return marker; blocks pass it through so nested returns escape nested
//! blocks.

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{
    AssignExpression, BlockStatement, CallExpression, Expression, Identifier, IfExpression,
    IndexExpression, MapLiteral, Program, Statement, WhileStatement,
};
use crate::builtins::BuiltinFunction;
use crate::runtime::env::Environment;
use crate::runtime::error::RuntimeError;
use crate::runtime::value::{ClassObject, FunctionObject, InstanceObject, MapObject, Value};

/// Evaluates a program, returning the value of its final statement, the
/// value of an early `return`, or the first error encountered.
pub fn eval(program: &Program, env: &Environment) -> Value {
    let mut result = Value::Empty;
    for statement in &program.statements {
        match eval_statement(statement, env) {
            Value::Return(value) => return *value,
            error @ Value::Error(_) => return error,
            value => result = value,
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Environment) -> Value {
    match statement {
        Statement::Let(statement) => {
            let value = eval_expression(&statement.value, env);
            if value.is_error() {
                return value;
            }
            env.define(statement.name.name.clone(), value);
            Value::Empty
        }
        Statement::Return(statement) => {
            let value = eval_expression(&statement.value, env);
            if value.is_error() {
                return value;
            }
            Value::Return(Box::new(value))
        }
        Statement::Expression(statement) => eval_expression(&statement.expression, env),
        Statement::Block(block) => eval_block(block, env),
        Statement::While(statement) => eval_while(statement, env),
        Statement::Function(statement) => {
            let function = Value::Function(Rc::new(FunctionObject {
                parameters: statement.parameters.clone(),
                body: statement.body.clone(),
                env: env.clone(),
                name: Some(statement.name.name.clone()),
            }));
            env.define(statement.name.name.clone(), function);
            Value::Empty
        }
        Statement::Class(statement) => {
            let class = Value::Class(Rc::new(ClassObject {
                name: statement.name.name.clone(),
                methods: statement.methods.clone(),
                env: env.clone(),
            }));
            env.define(statement.name.name.clone(), class);
            Value::Empty
        }
    }
}

// Return and Error short-circuit the block without being unwrapped; they
// keep propagating so a nested `return` escapes nested blocks.
fn eval_block(block: &BlockStatement, env: &Environment) -> Value {
    let mut result = Value::Empty;
    for statement in &block.statements {
        match eval_statement(statement, env) {
            outcome @ (Value::Return(_) | Value::Error(_)) => return outcome,
            value => result = value,
        }
    }
    result
}

// Loop bodies share the enclosing frame; `let` inside a while is visible
// after it.
fn eval_while(statement: &WhileStatement, env: &Environment) -> Value {
    loop {
        let condition = eval_expression(&statement.condition, env);
        if condition.is_error() {
            return condition;
        }
        if !condition.is_truthy() {
            return Value::Null;
        }
        match eval_block(&statement.body, env) {
            outcome @ (Value::Return(_) | Value::Error(_)) => return outcome,
            _ => {}
        }
    }
}

fn eval_expression(expression: &Expression, env: &Environment) -> Value {
    match expression {
        Expression::Integer(literal) => Value::Integer(literal.value),
        Expression::Str(literal) => Value::string(literal.value.clone()),
        Expression::Boolean(literal) => Value::Boolean(literal.value),
        Expression::Identifier(identifier) => eval_identifier(identifier, env),
        Expression::Prefix(expression) => {
            let right = eval_expression(&expression.right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix(&expression.operator, right)
        }
        Expression::Infix(expression) => {
            let left = eval_expression(&expression.left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(&expression.right, env);
            if right.is_error() {
                return right;
            }
            eval_infix(&expression.operator, left, right)
        }
        Expression::Assign(expression) => eval_assign(expression, env),
        Expression::If(expression) => eval_if(expression, env),
        Expression::Function(literal) => Value::Function(Rc::new(FunctionObject {
            parameters: literal.parameters.clone(),
            body: literal.body.clone(),
            env: env.clone(),
            name: None,
        })),
        Expression::Call(expression) => eval_call(expression, env),
        Expression::Get(expression) => {
            let object = eval_expression(&expression.object, env);
            if object.is_error() {
                return object;
            }
            eval_get(object, &expression.property)
        }
        Expression::Index(expression) => eval_index_expression(expression, env),
        Expression::List(literal) => match eval_expressions(&literal.elements, env) {
            Ok(elements) => Value::list(elements),
            Err(error) => error,
        },
        Expression::Map(literal) => eval_map_literal(literal, env),
    }
}

fn eval_identifier(identifier: &Identifier, env: &Environment) -> Value {
    if let Some(value) = env.lookup(&identifier.name) {
        return value;
    }
    if let Some(builtin) = BuiltinFunction::from_name(&identifier.name) {
        return Value::Builtin(builtin);
    }
    Value::error(RuntimeError::UndefinedVariable {
        name: identifier.name.clone(),
    })
}

fn eval_prefix(operator: &str, right: Value) -> Value {
    match operator {
        "!" => match right {
            Value::Boolean(value) => Value::Boolean(!value),
            Value::Null => Value::Boolean(true),
            _ => Value::Boolean(false),
        },
        "-" => match right {
            Value::Integer(value) => match value.checked_neg() {
                Some(negated) => Value::Integer(negated),
                None => Value::error(RuntimeError::IntegerOverflow),
            },
            other => Value::error(RuntimeError::InvalidPrefixOperator {
                operator: operator.to_string(),
                type_name: other.type_name(),
            }),
        },
        _ => Value::error(RuntimeError::InvalidPrefixOperator {
            operator: operator.to_string(),
            type_name: right.type_name(),
        }),
    }
}

fn eval_infix(operator: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::Str(l), Value::Str(r)) => eval_string_infix(operator, l, r),
        _ => match operator {
            "==" => Value::Boolean(left.equals(&right)),
            "!=" => Value::Boolean(!left.equals(&right)),
            _ if left.type_name() != right.type_name() => {
                Value::error(RuntimeError::TypeMismatch {
                    operator: operator.to_string(),
                    left: left.type_name(),
                    right: right.type_name(),
                })
            }
            _ => Value::error(RuntimeError::UnknownOperator {
                operator: operator.to_string(),
                left: left.type_name(),
                right: right.type_name(),
            }),
        },
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    let checked = match operator {
        "+" => left.checked_add(right),
        "-" => left.checked_sub(right),
        "*" => left.checked_mul(right),
        "/" => {
            if right == 0 {
                return Value::error(RuntimeError::DivisionByZero);
            }
            left.checked_div(right)
        }
        "<" => return Value::Boolean(left < right),
        ">" => return Value::Boolean(left > right),
        "==" => return Value::Boolean(left == right),
        "!=" => return Value::Boolean(left != right),
        _ => {
            return Value::error(RuntimeError::UnknownOperator {
                operator: operator.to_string(),
                left: "INTEGER",
                right: "INTEGER",
            })
        }
    };
    match checked {
        Some(value) => Value::Integer(value),
        None => Value::error(RuntimeError::IntegerOverflow),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Value {
    match operator {
        "+" => Value::string(format!("{left}{right}")),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        _ => Value::error(RuntimeError::UnknownOperator {
            operator: operator.to_string(),
            left: "STRING",
            right: "STRING",
        }),
    }
}

fn eval_if(expression: &IfExpression, env: &Environment) -> Value {
    let condition = eval_expression(&expression.condition, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        eval_block(&expression.consequence, env)
    } else if let Some(alternative) = &expression.alternative {
        eval_block(alternative, env)
    } else {
        Value::Null
    }
}

// Plain assignment rebinds the nearest frame containing the name; field
// assignment writes through to the instance. Either form yields the
// assigned value.
fn eval_assign(expression: &AssignExpression, env: &Environment) -> Value {
    let value = eval_expression(&expression.value, env);
    if value.is_error() {
        return value;
    }
    match expression.target.as_ref() {
        Expression::Identifier(identifier) => {
            if env.update(&identifier.name, value.clone()) {
                value
            } else {
                Value::error(RuntimeError::UndefinedVariable {
                    name: identifier.name.clone(),
                })
            }
        }
        Expression::Get(get) => {
            let object = eval_expression(&get.object, env);
            if object.is_error() {
                return object;
            }
            match object {
                Value::Instance(instance) => {
                    instance.set_field(get.property.name.clone(), value.clone());
                    value
                }
                other => Value::error(RuntimeError::PropertyAssignUnsupported {
                    property: get.property.name.clone(),
                    type_name: other.type_name(),
                }),
            }
        }
        _ => Value::error(RuntimeError::InvalidAssignTarget),
    }
}

fn eval_call(expression: &CallExpression, env: &Environment) -> Value {
    let callee = eval_expression(&expression.callee, env);
    if callee.is_error() {
        return callee;
    }
    let args = match eval_expressions(&expression.arguments, env) {
        Ok(args) => args,
        Err(error) => return error,
    };
    apply(callee, args)
}

// Strict left-to-right evaluation; the first error aborts the whole list.
fn eval_expressions(
    expressions: &[Expression],
    env: &Environment,
) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(expressions.len());
    for expression in expressions {
        let value = eval_expression(expression, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn apply(callee: Value, args: Vec<Value>) -> Value {
    match callee {
        Value::Function(function) => apply_function(&function, args),
        Value::Builtin(builtin) => builtin.call(args),
        Value::Class(class) => construct_instance(&class, args),
        other => Value::error(RuntimeError::UndefinedCallable {
            type_name: other.type_name(),
        }),
    }
}

// Parameters bind positionally in a frame extending the closure env, not the
// caller's. Missing arguments stay unbound and surface as lookup errors;
// extras are ignored.
fn apply_function(function: &FunctionObject, args: Vec<Value>) -> Value {
    let call_env = Environment::enclosed(&function.env);
    for (parameter, arg) in function.parameters.iter().zip(args) {
        call_env.define(parameter.name.clone(), arg);
    }
    match eval_block(&function.body, &call_env) {
        Value::Return(value) => *value,
        other => other,
    }
}

// Calling a class allocates an instance and, when an `init` method exists,
// runs it with the identifier `inst` bound to the new instance.
fn construct_instance(class: &Rc<ClassObject>, args: Vec<Value>) -> Value {
    let instance = Rc::new(InstanceObject::new(class.clone()));
    if let Some(init) = class.method("init") {
        let call_env = Environment::enclosed(&class.env);
        for (parameter, arg) in init.parameters.iter().zip(args) {
            call_env.define(parameter.name.clone(), arg);
        }
        call_env.define("inst", Value::Instance(instance.clone()));
        match eval_block(&init.body, &call_env) {
            error @ Value::Error(_) => return error,
            _ => {}
        }
    }
    Value::Instance(instance)
}

fn eval_get(object: Value, property: &Identifier) -> Value {
    match &object {
        Value::Instance(instance) => match instance.get_field(&property.name) {
            Some(value) => value,
            None => Value::error(RuntimeError::UnknownProperty {
                object: object.to_output(),
                property: property.name.clone(),
            }),
        },
        other => Value::error(RuntimeError::PropertyAccessUnsupported {
            property: property.name.clone(),
            type_name: other.type_name(),
        }),
    }
}

fn eval_index_expression(expression: &IndexExpression, env: &Environment) -> Value {
    let container = eval_expression(&expression.container, env);
    if container.is_error() {
        return container;
    }
    let index = eval_expression(&expression.index, env);
    if index.is_error() {
        return index;
    }
    eval_index(container, index)
}

fn eval_index(container: Value, index: Value) -> Value {
    match (&container, &index) {
        (Value::List(elements), Value::Integer(position)) => {
            // Negative indices count back from the end.
            let resolved = if *position < 0 {
                position.checked_add(elements.len() as i64)
            } else {
                Some(*position)
            };
            match resolved {
                Some(at) if at >= 0 && (at as usize) < elements.len() => {
                    elements[at as usize].clone()
                }
                _ => Value::error(RuntimeError::IndexOutOfBounds { index: *position }),
            }
        }
        (Value::List(_), other) => Value::error(RuntimeError::InvalidIndexType {
            container: "LIST",
            index: other.type_name(),
        }),
        (Value::Map(map), key) => match key.hash_key() {
            Some(hash) => match map.get(&hash) {
                Some((_, value)) => value.clone(),
                None => Value::error(RuntimeError::MissingKey {
                    key: key.to_output(),
                }),
            },
            None => Value::error(RuntimeError::UnusableMapKey {
                type_name: key.type_name(),
            }),
        },
        (other, _) => Value::error(RuntimeError::NotIndexable {
            type_name: other.type_name(),
        }),
    }
}

// Entries evaluate key-then-value, left to right; duplicate keys collapse to
// the last occurrence.
fn eval_map_literal(literal: &MapLiteral, env: &Environment) -> Value {
    let mut entries = HashMap::with_capacity(literal.entries.len());
    for (key_expression, value_expression) in &literal.entries {
        let key = eval_expression(key_expression, env);
        if key.is_error() {
            return key;
        }
        let Some(hash) = key.hash_key() else {
            return Value::error(RuntimeError::UnusableMapKey {
                type_name: key.type_name(),
            });
        };
        let value = eval_expression(value_expression, env);
        if value.is_error() {
            return value;
        }
        entries.insert(hash, (key, value));
    }
    Value::Map(Rc::new(MapObject::new(entries)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use indoc::indoc;

    fn run(source: &str) -> Value {
        let (program, errors) = parse(source);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        eval(&program, &Environment::new())
    }

    fn assert_integer(source: &str, expected: i64) {
        match run(source) {
            Value::Integer(value) => assert_eq!(value, expected, "source: {source}"),
            other => panic!("expected INTEGER from {source}, got {}", other.to_output()),
        }
    }

    fn assert_boolean(source: &str, expected: bool) {
        match run(source) {
            Value::Boolean(value) => assert_eq!(value, expected, "source: {source}"),
            other => panic!("expected BOOLEAN from {source}, got {}", other.to_output()),
        }
    }

    fn assert_string(source: &str, expected: &str) {
        match run(source) {
            Value::Str(value) => assert_eq!(value.as_str(), expected, "source: {source}"),
            other => panic!("expected STRING from {source}, got {}", other.to_output()),
        }
    }

    fn assert_error(source: &str, expected: &str) {
        match run(source) {
            Value::Error(message) => assert_eq!(message.as_str(), expected, "source: {source}"),
            other => panic!("expected ERROR from {source}, got {}", other.to_output()),
        }
    }

    #[test]
    fn evaluates_integer_arithmetic() {
        assert_integer("5", 5);
        assert_integer("-5", -5);
        assert_integer("5 + 5 + 5 + 5 - 10", 10);
        assert_integer("2 * 2 * 2 * 2 * 2", 32);
        assert_integer("-50 + 100 + -50", 0);
        assert_integer("50 / 2 * 2 + 10", 60);
        assert_integer("3 * (3 * 3) + 10", 37);
        assert_integer("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50);
        assert_integer("-7 / 2", -3);
    }

    #[test]
    fn evaluates_comparisons_and_equality() {
        assert_boolean("true", true);
        assert_boolean("1 < 2", true);
        assert_boolean("1 > 2", false);
        assert_boolean("1 == 1", true);
        assert_boolean("1 != 2", true);
        assert_boolean("true == true", true);
        assert_boolean("true != false", true);
        assert_boolean("(1 < 2) == true", true);
    }

    #[test]
    fn bang_operator_follows_truthiness() {
        assert_boolean("!true", false);
        assert_boolean("!false", true);
        assert_boolean("!5", false);
        assert_boolean("!!true", true);
        assert_boolean("!0", false);
    }

    #[test]
    fn mixed_type_equality_is_reference_inequality() {
        assert_boolean("5 == true", false);
        assert_boolean("5 != true", true);
        assert_boolean("\"1\" == 1", false);
    }

    #[test]
    fn string_concatenation_and_equality() {
        assert_string("\"hello\" + \" \" + \"world\"", "hello world");
        assert_boolean("\"a\" == \"a\"", true);
        assert_boolean("\"a\" != \"b\"", true);
        assert_error(
            "\"a\" - \"b\"",
            "unknown operator '-' for types STRING, STRING",
        );
    }

    #[test]
    fn reports_operator_type_errors() {
        assert_error("5 + true", "type error: cannot perform '+' on INTEGER, BOOLEAN");
        assert_error("-true", "invalid operator '-' for type BOOLEAN");
        assert_error("true + false", "unknown operator '+' for types BOOLEAN, BOOLEAN");
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_error("5 / 0", "division by zero");
        assert_error("let x = 0; 1 / x", "division by zero");
    }

    #[test]
    fn integer_overflow_is_an_error() {
        assert_error("9223372036854775807 + 1", "integer overflow");
        assert_error("-9223372036854775807 - 2", "integer overflow");
        assert_error("9223372036854775807 * 2", "integer overflow");
    }

    #[test]
    fn if_expressions_pick_branches_by_truthiness() {
        assert_integer("if (true) { 10 }", 10);
        assert_integer("if (1) { 10 } else { 20 }", 10);
        assert_integer("if (0) { 10 } else { 20 }", 10);
        assert_integer("if (false) { 10 } else { 20 }", 20);
        assert!(matches!(run("if (false) { 10 }"), Value::Null));
    }

    #[test]
    fn while_loops_run_until_condition_is_falsy() {
        assert_integer("let x = 0; while (x < 3) { x = x + 1; } return x;", 3);
        assert!(matches!(run("while (false) { 1 }"), Value::Null));
    }

    #[test]
    fn while_body_shares_the_enclosing_frame() {
        let source = indoc! {"
            let i = 0;
            while (i < 1) {
                let seen = 42;
                i = i + 1;
            }
            seen
        "};
        assert_integer(source, 42);
    }

    #[test]
    fn return_escapes_nested_blocks() {
        let source = indoc! {"
            fn f() {
                if (true) {
                    if (true) {
                        return 10;
                    }
                    return 1;
                }
            }
            f()
        "};
        assert_integer(source, 10);
    }

    #[test]
    fn return_inside_while_exits_the_function() {
        let source = indoc! {"
            fn first() {
                let i = 0;
                while (true) {
                    if (i > 2) { return i; }
                    i = i + 1;
                }
            }
            first()
        "};
        assert_integer(source, 3);
    }

    #[test]
    fn top_level_return_stops_the_program() {
        assert_integer("return 7; 9", 7);
    }

    #[test]
    fn let_binds_and_assignment_rebinds() {
        assert_integer("let a = 5; a", 5);
        assert_integer("let a = 5; a = a + 1; a", 6);
        assert_integer("let a = 1; let b = a = 3; b", 3);
        assert_error("b = 1", "undefined variable 'b'");
    }

    #[test]
    fn assignment_writes_the_frame_that_owns_the_name() {
        let source = indoc! {"
            let x = 1;
            fn bump() { x = x + 1; }
            bump();
            bump();
            x
        "};
        assert_integer(source, 3);
    }

    #[test]
    fn functions_bind_parameters_positionally() {
        assert_integer("let add = fn(x, y) { x + y }; add(1, 2)", 3);
        assert_integer("fn add(x, y) { return x + y; } add(3, 4)", 7);
        assert_integer("let identity = fn(x) { x }; identity(5)", 5);
        // Extra arguments are ignored; missing ones surface on lookup.
        assert_integer("let first = fn(x) { x }; first(1, 2)", 1);
        assert_error("let f = fn(x) { x }; f()", "undefined variable 'x'");
    }

    #[test]
    fn closures_capture_their_definition_environment() {
        let source = indoc! {"
            let adder = fn(x) { fn(y) { x + y } };
            let a = adder(5);
            a(10) + a(2)
        "};
        assert_integer(source, 22);
    }

    #[test]
    fn closures_observe_later_updates_to_captured_names() {
        let source = indoc! {"
            let x = 1;
            let f = fn() { x };
            x = 2;
            f()
        "};
        assert_integer(source, 2);
    }

    #[test]
    fn named_functions_support_recursion() {
        let source = indoc! {"
            fn fib(n) {
                if (n < 2) { return n; }
                return fib(n - 1) + fib(n - 2);
            }
            fib(10)
        "};
        assert_integer(source, 55);
    }

    #[test]
    fn top_level_functions_can_be_mutually_recursive() {
        let source = indoc! {"
            fn even(n) {
                if (n == 0) { return true; }
                return odd(n - 1);
            }
            fn odd(n) {
                if (n == 0) { return false; }
                return even(n - 1);
            }
            even(8)
        "};
        assert_boolean(source, true);
    }

    #[test]
    fn calling_a_non_callable_is_an_error() {
        assert_error("let x = 5; x()", "undefined callable 'INTEGER'");
        assert_error(
            "class Box { } let b = Box(); b()",
            "undefined callable 'INSTANCE'",
        );
    }

    #[test]
    fn list_literals_evaluate_left_to_right() {
        let Value::List(elements) = run("[1, 2 * 2, 3 + 3]") else {
            panic!("expected LIST");
        };
        assert_eq!(elements.len(), 3);
        assert!(matches!(elements[2], Value::Integer(6)));
    }

    #[test]
    fn list_indexing_supports_negative_positions() {
        assert_integer("[1, 2, 3][0]", 1);
        assert_integer("[1, 2, 3][-1]", 3);
        assert_integer("[1, 2, 3][-3]", 1);
        assert_integer("let xs = [1, 2, 3]; let i = xs[0]; xs[i]", 2);
    }

    #[test]
    fn list_index_errors() {
        assert_error("[1, 2, 3][4]", "index out of bounds: 4");
        assert_error("[1, 2, 3][-4]", "index out of bounds: -4");
        assert_error("[1, 2, 3][\"0\"]", "cannot index LIST with STRING");
        assert_error("5[0]", "type INTEGER does not support indexing");
    }

    #[test]
    fn map_literals_and_lookups() {
        assert_string("{1: \"one\", \"two\": 2}[1]", "one");
        assert_integer("{1: \"one\", \"two\": 2}[\"two\"]", 2);
        assert_integer("{true: 1, false: 0}[true]", 1);
        assert_integer("let key = \"k\"; {key: 5}[\"k\"]", 5);
    }

    #[test]
    fn duplicate_map_keys_collapse_to_the_last_value() {
        assert_integer("{1: 1, 1: 2}[1]", 2);
    }

    #[test]
    fn map_index_errors() {
        assert_error("{}[\"missing\"]", "no key found for missing");
        assert_error("{}[[1]]", "unusable as map key: LIST");
        assert_error("{[1]: 2}", "unusable as map key: LIST");
    }

    #[test]
    fn classes_construct_instances_with_init() {
        let source = indoc! {"
            class Item {
                init(p) {
                    inst.price = p
                }
            }
            let pen = Item(10);
            let er = Item(5);
            return pen.price + er.price;
        "};
        assert_integer(source, 15);
    }

    #[test]
    fn instance_fields_are_mutable() {
        let source = indoc! {"
            class Box {
                init(v) {
                    inst.value = v
                }
            }
            let b = Box(1);
            b.value = b.value + 41;
            b.value
        "};
        assert_integer(source, 42);
    }

    #[test]
    fn classes_without_init_still_construct() {
        let source = indoc! {"
            class Bare { }
            let b = Bare();
            b
        "};
        assert!(matches!(run(source), Value::Instance(_)));
    }

    #[test]
    fn init_errors_propagate_out_of_construction() {
        let source = indoc! {"
            class Bad {
                init() {
                    inst.x = 1 / 0
                }
            }
            Bad()
        "};
        assert_error(source, "division by zero");
    }

    #[test]
    fn property_access_errors() {
        assert_error(
            "class Item { } let i = Item(); i.price",
            "object <Item instance> has no property price",
        );
        assert_error("5 . price", "cannot access property 'price' on type INTEGER");
        assert_error(
            "let x = 5; x.price = 1",
            "cannot set property 'price' on type INTEGER",
        );
        assert_error("[1, 2] = 3", "invalid assignment target");
    }

    #[test]
    fn builtin_len_is_reachable_by_name() {
        assert_integer("len(\"hello\")", 5);
        assert_integer("len([1, 2, 3])", 3);
        assert_error("len(1)", "invalid argument INTEGER");
        assert_error("len(\"a\", \"b\")", "invalid number of args 2, expected 1");
    }

    #[test]
    fn bindings_shadow_builtins() {
        assert_integer("let len = 3; len", 3);
    }

    #[test]
    fn print_yields_null() {
        assert!(matches!(run("print(\"x\")"), Value::Null));
    }

    #[test]
    fn reference_identity_for_composites() {
        assert_boolean("let x = []; x == x", true);
        assert_boolean("[] == []", false);
        assert_boolean("{} == {}", false);
        assert_boolean("let m = {}; m == m", true);
        assert_boolean("let f = fn() { 1 }; f == f", true);
    }

    #[test]
    fn errors_short_circuit_statement_sequences() {
        assert_error("5 + true; 9;", "type error: cannot perform '+' on INTEGER, BOOLEAN");
        assert_error("let x = 1 / 0; x", "division by zero");
        assert_error("[1 / 0, 2]", "division by zero");
        assert_error("let f = fn(x) { x }; f(1 / 0)", "division by zero");
        assert_error("{1 / 0: 1}", "division by zero");
        assert_error("(1 / 0) + (2 / 0)", "division by zero");
    }

    #[test]
    fn declarations_yield_no_value() {
        assert!(matches!(run("let a = 1;"), Value::Empty));
        assert!(matches!(run("fn f() { 1 }"), Value::Empty));
        assert!(matches!(run("class C { }"), Value::Empty));
    }

    #[test]
    fn function_values_format_with_their_source() {
        let rendered = run("fn double(x) { x * 2 } double").to_output();
        assert_eq!(rendered, "fn double(x) {\n(x * 2)\n}");

        let rendered = run("let id = fn(x) { x }; id").to_output();
        assert_eq!(rendered, "fn(x) {\nx\n}");
    }
}
