use std::rc::Rc;
use log::trace;
use crate::ast::{BlockStatement, Expression, Node, Program, Statement};
use crate::builtin::BuiltinFunction;
use crate::environment::{Env, Environment};
use crate::object::{native_bool_to_object, new_error, Function, HashPair, HashPairs, Object, NULL};

/// Evaluates `program` in `env`, returning its final value.
///
/// A top-level `return` is unwrapped; an `Error` is returned as the result.
pub fn eval(program: &Program, env: Env) -> Object {
    Evaluator::with_env(env).eval_program(program)
}

/// Tree-walking evaluator bound to one environment frame.
pub struct Evaluator {
    env: Env
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            env: Environment::new_root()
        }
    }

    pub fn with_env(env: Env) -> Self {
        Self { env }
    }

    pub fn env(&self) -> Env {
        Rc::clone(&self.env)
    }

    pub fn get(&self, key: &str) -> Option<Object> {
        self.env.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: Object) {
        self.env.borrow_mut().set(key, value)
    }

    pub fn eval(&mut self, node: Node) -> Object {
        match node {
            Node::Program(program) => self.eval_program(program),
            Node::Statement(stmt) => self.eval_statement(stmt),
            Node::Expression(exp) => self.eval_expression(exp),
        }
    }

    pub fn eval_program(&mut self, program: &Program) -> Object {
        let mut result = NULL;

        for stmt in &program.statements {
            result = self.eval_statement(stmt);

            match result {
                Object::ReturnValue(ret) => return *ret,
                Object::Error(_) => return result,
                _ => {}
            }
        }
        result
    }

    fn eval_block_statement(&mut self, block: &BlockStatement) -> Object {
        let mut result = NULL;

        for stmt in &block.statements {
            result = self.eval_statement(stmt);

            // an enclosing block or call must see these untouched
            if result.is_control_signal() {
                return result;
            }
        }
        result
    }

    fn eval_statement(&mut self, stmt: &Statement) -> Object {
        match stmt {
            Statement::BlockStatement(block) => self.eval_block_statement(block),
            Statement::ExpressionStatement(exp) => self.eval_expression(exp),
            Statement::ReturnStatement(r) => {
                let val = self.eval_expression(r);
                if val.is_control_signal() {
                    return val;
                }
                Object::ReturnValue(Box::new(val))
            }
            Statement::LetStatement { name, value } => {
                let val = self.eval_expression(value);
                if val.is_control_signal() {
                    return val;
                }
                self.set(name, val);
                NULL
            }
        }
    }

    fn eval_expression(&mut self, exp: &Expression) -> Object {
        match exp {
            Expression::Integer(i) => Object::Integer(*i),
            Expression::String(s) => Object::String(s.clone()),
            Expression::Boolean(b) => native_bool_to_object(*b),
            Expression::PrefixExpression { operator, right } => {
                let right = self.eval_expression(right);
                if right.is_control_signal() {
                    return right;
                }
                eval_prefix_expression(operator, right)
            },
            Expression::InfixExpression { operator, left, right } => {
                let left = self.eval_expression(left);
                if left.is_control_signal() {
                    return left;
                }
                let right = self.eval_expression(right);
                if right.is_control_signal() {
                    return right;
                }
                eval_infix_expression(operator, left, right)
            },
            Expression::IfExpression { condition, consequence, alternative } => {
                self.eval_if_expression(condition, consequence, alternative.as_ref())
            },
            Expression::Identifier(name) => self.eval_identifier(name),
            Expression::Function { parameters, body } => {
                Object::Function(Rc::new(Function {
                    parameters: parameters.clone(),
                    body: body.clone(),
                    env: Rc::clone(&self.env),
                }))
            },
            Expression::CallExpression { function, arguments } => {
                let function = self.eval_expression(function);
                if function.is_control_signal() {
                    return function;
                }
                match self.eval_expressions(arguments) {
                    Ok(args) => apply_function(function, args),
                    Err(signal) => signal,
                }
            },
            Expression::Array(exps) => match self.eval_expressions(exps) {
                Ok(elements) => Object::Array(Rc::new(elements)),
                Err(signal) => signal,
            },
            Expression::IndexExpression { left, index } => {
                let left = self.eval_expression(left);
                if left.is_control_signal() {
                    return left;
                }
                let index = self.eval_expression(index);
                if index.is_control_signal() {
                    return index;
                }
                eval_index_expression(left, index)
            },
            Expression::Hash(pairs) => self.eval_hash_literal(pairs),
        }
    }

    fn eval_if_expression(
        &mut self,
        condition: &Expression,
        consequence: &BlockStatement,
        alternative: Option<&BlockStatement>,
    ) -> Object {
        let condition = self.eval_expression(condition);
        if condition.is_control_signal() {
            return condition;
        }

        if is_truthy(&condition) {
            self.eval_block_statement(consequence)
        } else {
            match alternative {
                None => NULL,
                Some(alt) => self.eval_block_statement(alt),
            }
        }
    }

    fn eval_identifier(&self, name: &str) -> Object {
        match self.get(name) {
            Some(obj) => obj,
            None => match BuiltinFunction::look_up(name) {
                Some(builtin) => Object::Builtin(builtin),
                None => new_error(format!("identifier not found: {}", name)),
            },
        }
    }

    /// Evaluates left to right, stopping at the first control signal.
    fn eval_expressions(&mut self, exps: &[Expression]) -> Result<Vec<Object>, Object> {
        let mut result = Vec::with_capacity(exps.len());

        for exp in exps {
            let evaluated = self.eval_expression(exp);
            if evaluated.is_control_signal() {
                return Err(evaluated);
            }
            result.push(evaluated);
        }
        Ok(result)
    }

    fn eval_hash_literal(&mut self, pairs: &[(Expression, Expression)]) -> Object {
        let mut hash = HashPairs::with_capacity(pairs.len());
        for (key_exp, value_exp) in pairs {
            let key = self.eval_expression(key_exp);
            if key.is_control_signal() {
                return key;
            }

            let hash_key = match key.hash_key() {
                Some(k) => k,
                None => return new_error(format!("unusable as hash key: {}", key.object_type())),
            };

            let value = self.eval_expression(value_exp);
            if value.is_control_signal() {
                return value;
            }

            hash.insert(hash_key, HashPair { key, value });
        }
        Object::Hash(Rc::new(hash))
    }
}

/// `Null` and `false` are falsy; everything else, including `0`, is truthy.
fn is_truthy(obj: &Object) -> bool {
    match obj {
        Object::Null => false,
        Object::Boolean(b) => *b,
        _ => true,
    }
}

/// Identity comparison used by `==`/`!=` on non-integer, non-string operands.
/// Reference values are never compared structurally.
fn is_identical(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(l), Object::Boolean(r)) => l == r,
        (Object::Null, Object::Null) => true,
        (Object::Array(l), Object::Array(r)) => Rc::ptr_eq(l, r),
        (Object::Hash(l), Object::Hash(r)) => Rc::ptr_eq(l, r),
        (Object::Function(l), Object::Function(r)) => Rc::ptr_eq(l, r),
        (Object::Builtin(l), Object::Builtin(r)) => l == r,
        _ => false,
    }
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => native_bool_to_object(!is_truthy(&right)),
        "-" => eval_minus_prefix_expression(right),
        _ => new_error(format!("unknown operator: {}{}", operator, right.object_type())),
    }
}

fn eval_minus_prefix_expression(right: Object) -> Object {
    match right {
        Object::Integer(i) => Object::Integer(i.wrapping_neg()),
        _ => new_error(format!("unknown operator: -{}", right.object_type())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    let (left_type, right_type) = (left.object_type(), right.object_type());
    if left_type != right_type {
        return new_error(format!("type mismatch: {} {} {}", left_type, operator, right_type));
    }

    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix_expression(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix_expression(operator, l, r),
        _ => match operator {
            "==" => native_bool_to_object(is_identical(&left, &right)),
            "!=" => native_bool_to_object(!is_identical(&left, &right)),
            _ => new_error(format!("unknown operator: {} {} {}", left_type, operator, right_type)),
        }
    }
}

fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        "/" => match right {
            0 => new_error("division by zero"),
            _ => Object::Integer(left.wrapping_div(right)),
        },
        "<" => native_bool_to_object(left < right),
        ">" => native_bool_to_object(left > right),
        "==" => native_bool_to_object(left == right),
        "!=" => native_bool_to_object(left != right),
        _ => new_error(format!("unknown operator: INTEGER {} INTEGER", operator)),
    }
}

fn eval_string_infix_expression(operator: &str, left: &str, right: &str) -> Object {
    match operator {
        "+" => Object::String(format!("{}{}", left, right)),
        _ => new_error(format!("operator not supported: STRING {} STRING", operator)),
    }
}

fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function(func) => {
            if func.parameters.len() != args.len() {
                return new_error(format!("wrong number of arguments: want={}, got={}",
                    func.parameters.len(), args.len()));
            }
            trace!("calling fn({}) with {} argument(s)", func.parameters.join(", "), args.len());

            // the call frame hangs off the defining scope, not the caller's
            let mut eval = Evaluator::with_env(Environment::new_enclosed(Rc::clone(&func.env)));
            for (param, arg) in func.parameters.iter().zip(args) {
                eval.set(param, arg);
            }

            match eval.eval_block_statement(&func.body) {
                Object::ReturnValue(ret) => *ret,
                other => other,
            }
        }
        Object::Builtin(bf) => {
            trace!("calling builtin {} with {} argument(s)", bf.name(), args.len());
            bf.call(&args)
        },
        other => new_error(format!("not a function: {}", other.object_type())),
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(arr), Object::Integer(i)) => eval_array_index(arr, *i),
        (Object::Hash(pairs), _) => eval_hash_index(pairs, &index),
        _ => new_error(format!("index operator not supported: {}[{}]",
            left.object_type(), index.object_type())),
    }
}

fn eval_array_index(arr: &[Object], index: i64) -> Object {
    usize::try_from(index)
        .ok()
        .and_then(|i| arr.get(i))
        .cloned()
        .unwrap_or(NULL)
}

fn eval_hash_index(pairs: &HashPairs, index: &Object) -> Object {
    match index.hash_key() {
        Some(key) => pairs.get(&key).map(|pair| pair.value.clone()).unwrap_or(NULL),
        None => new_error(format!("unusable as hash key: {}", index.object_type())),
    }
}

#[cfg(test)]
mod test {
    use crate::ast::Node;
    use crate::environment::Environment;
    use crate::evaluator::{eval, Evaluator};
    use crate::lexer::Lexer;
    use crate::object::Object;
    use crate::parser::Parser;

    #[test]
    fn test_eval_integer() {
        struct Test<'a> {
            input: &'a str,
            expected: i64
        }
        let tests = vec![
            Test{input: "5", expected: 5},
            Test{input: "-5", expected: -5},
            Test{input: "--5", expected: 5},
            Test{input: "5 + 5+5 -7", expected: 8},
            Test{input: "5 + 5*5", expected: 30},
            Test{input: "50 / 2 * 2 + 10", expected: 60},
            Test{input: "7 / 2", expected: 3},
            Test{input: "-7 / 2", expected: -3},
            Test{input: "2 * (5 + 10)", expected: 30},
            Test{input: "(5 + 10 * 2 + 15 / 3) * 2 + -10", expected: 50},
            Test{input: "9223372036854775807 + 1", expected: i64::MIN},
        ];

        for tt in tests {
            test_integer(tt.input, tt.expected);
        }
    }

    #[test]
    fn test_eval_bool() {
        struct Test<'a> {
            input: &'a str,
            expected: bool
        }
        let tests = vec![
            Test{input: "true", expected: true},
            Test{input: "false", expected: false},
            Test{input: "1<2", expected: true},
            Test{input: "1>2", expected: false},
            Test{input: "1>1", expected: false},
            Test{input: "1==2", expected: false},
            Test{input: "1!=2", expected: true},
            Test{input: "true==true", expected: true},
            Test{input: "true!=true", expected: false},
            Test{input: "false==false", expected: true},
            Test{input: "(1<2)==true", expected: true},
            Test{input: "(1>2)==true", expected: false},
            Test{input: "(1 > 2) == false", expected: true},
        ];

        for tt in tests {
            test_boolean(tt.input, tt.expected);
        }
    }

    #[test]
    fn test_eval_bang_op() {
        struct Test<'a> {
            input: &'a str,
            expected: bool
        }
        let tests = vec![
            Test{input: "!true", expected: false},
            Test{input: "!false", expected: true},
            Test{input: "!5", expected: false},
            Test{input: "!0", expected: false},
            Test{input: "!!true", expected: true},
            Test{input: "!!5", expected: true},
            Test{input: "!if (false) { 1 }", expected: true},
        ];

        for tt in tests {
            test_boolean(tt.input, tt.expected);
        }
    }

    #[test]
    fn test_eval_if_expression() {
        struct Test<'a> {
            input: &'a str,
            expected: Object,
        }
        let tests = vec![
            Test{input: "if(true){10}", expected: Object::Integer(10)},
            Test{input: "if(false){10}", expected: Object::Null},
            Test{input: "if(1){10}", expected: Object::Integer(10)},
            Test{input: "if (0) { 10 }", expected: Object::Integer(10)},
            Test{input: "if(1<2){10}", expected: Object::Integer(10)},
            Test{input: "if(1>2){10}", expected: Object::Null},
            Test{input: "if(1>2){10}else{20}", expected: Object::Integer(20)},
            Test{input: "if(1<2){10}else{20}", expected: Object::Integer(10)},
            Test{input: "if (true) { }", expected: Object::Null},
        ];

        for tt in tests {
            assert_eq!(test_eval(tt.input), tt.expected, "input {:?}", tt.input);
        }
    }

    #[test]
    fn test_eval_return_statement() {
        struct Test<'a> {
            input: &'a str,
            expected: i64,
        }
        let tests = vec![
            Test{input: "return 10", expected: 10},
            Test{input: "return 10; 9", expected: 10},
            Test{input: "return 4+3; 9", expected: 7},
            Test{input: "9; return 2*5; 9", expected: 10},
            Test{input: "if(10>1){return 4+3;} ", expected: 7},
            Test{input: r#"if (10>1) {
                if (true) {
                    return 5;
                }
                return 2;
            }"#, expected: 5},
            Test{input: r#"let f = fn(x){return x+10;};
            13;"#, expected: 13},
            Test{input: r#"let f = fn(x){return x+10;};
            f(5);"#, expected: 15},
            Test{input: r#"let f = fn(x) { if (x > 1) { return 1; } return 0; };
            f(5) + f(0) + 10"#, expected: 11},
            Test{input: "1 + if (true) { return 2; }", expected: 2},
        ];

        for tt in tests {
            test_integer(tt.input, tt.expected);
        }
    }

    #[test]
    fn test_eval_let_statement() {
        struct Test<'a> {
            input: &'a str,
            expected: i64,
        }
        let tests = vec![
            Test{input: "let a = 3; a+5", expected: 8},
            Test{input: "let a = 2+3*5; a", expected: 17},
            Test{input: "let a = 5; let b = a; b", expected: 5},
            Test{input: "let a = 5; let a = a * 2; a", expected: 10},
            Test{input: "let a = 5; let b = a; let c = a + b + 5; c;", expected: 15},
        ];

        for tt in tests {
            test_integer(tt.input, tt.expected);
        }

        assert_eq!(test_eval("let a = 1;"), Object::Null);
        assert_eq!(test_eval(""), Object::Null);
    }

    #[test]
    fn test_error_handling() {
        struct Test<'a> {
            input: &'a str,
            expected: &'a str,
        }
        let tests = vec![
            Test{input: "5 + true;", expected: "type mismatch: INTEGER + BOOLEAN"},
            Test{input: "5 + true; 5;", expected: "type mismatch: INTEGER + BOOLEAN"},
            Test{input: "-true", expected: "unknown operator: -BOOLEAN"},
            Test{input: "-\"a\"", expected: "unknown operator: -STRING"},
            Test{input: "true + false;", expected: "unknown operator: BOOLEAN + BOOLEAN"},
            Test{input: "5; true + false; 5", expected: "unknown operator: BOOLEAN + BOOLEAN"},
            Test{input: "if (10 > 1) { true + false; }", expected: "unknown operator: BOOLEAN + BOOLEAN"},
            Test{input: r#"if (10 > 1) {
                if (10 > 1) {
                    return true + false;
                }
                return 1;
            }"#, expected: "unknown operator: BOOLEAN + BOOLEAN"},
            Test{input: "foobar", expected: "identifier not found: foobar"},
            Test{input: r#""Hello" - "World""#, expected: "operator not supported: STRING - STRING"},
            Test{input: r#""a" == "a""#, expected: "operator not supported: STRING == STRING"},
            Test{input: r#"{"name": "Monkey"}[fn(x) { x }];"#, expected: "unusable as hash key: FUNCTION"},
            Test{input: "{[1]: 2}", expected: "unusable as hash key: ARRAY"},
            Test{input: "[1, 2][\"a\"]", expected: "index operator not supported: ARRAY[STRING]"},
            Test{input: "5[0]", expected: "index operator not supported: INTEGER[INTEGER]"},
            Test{input: "10 / 0", expected: "division by zero"},
            Test{input: "5()", expected: "not a function: INTEGER"},
            Test{input: "fn(a, b) { a }(1)", expected: "wrong number of arguments: want=2, got=1"},
            Test{input: "let x = y; 5", expected: "identifier not found: y"},
            Test{input: "len(1, missing, 3)", expected: "identifier not found: missing"},
            Test{input: "[1, missing][0]", expected: "identifier not found: missing"},
            Test{input: "null == null", expected: "identifier not found: null"},
        ];

        for tt in tests {
            match test_eval(tt.input) {
                Object::Error(msg) => assert_eq!(msg, tt.expected, "input {:?}", tt.input),
                other => panic!("no error object returned for {:?}, got {}", tt.input, other),
            }
        }
    }

    #[test]
    fn test_first_argument_error_wins() {
        let input = "let f = fn(a, b) { a }; f(first_missing, second_missing)";
        assert_eq!(test_eval(input), Object::Error("identifier not found: first_missing".to_string()));
    }

    #[test]
    fn test_function_object() {
        match test_eval("fn(x) { x + 2; };") {
            Object::Function(func) => {
                assert_eq!(func.parameters, vec!["x".to_string()]);
                assert_eq!(func.body.to_string(), "{ (x + 2) }");
            },
            other => panic!("object is not a function, got {}", other),
        }
    }

    #[test]
    fn test_function_application() {
        struct Test<'a> {
            input: &'a str,
            expected: i64,
        }
        let tests = vec![
            Test{input: "let identity = fn(x) { x; }; identity(5);", expected: 5},
            Test{input: "let identity = fn(x) { return x; }; identity(5);", expected: 5},
            Test{input: "let double = fn(x) { x * 2; }; double(5);", expected: 10},
            Test{input: "let add = fn(x, y) { x + y; }; add(5, 5);", expected: 10},
            Test{input: "let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", expected: 20},
            Test{input: "fn(x) { x; }(5)", expected: 5},
            Test{input: "let fib = fn(n) { if (n < 2) { n } else { fib(n - 1) + fib(n - 2) } }; fib(15)", expected: 610},
        ];

        for tt in tests {
            test_integer(tt.input, tt.expected);
        }
    }

    #[test]
    fn test_eval_enclosed() {
        struct Test<'a> {
            input: &'a str,
            expected: i64,
        }
        let tests = vec![
            Test{input: "let one = 1; let two = 2; let func = fn(x){x+one;}; func(3)", expected: 4},
            Test{input: "let one = 1; let two = 2; let func = fn(x){let two = 20; x+one+two;}; func(3)", expected: 24},
            Test{input: "let one = 1; let two = 2; let func = fn(x){let two = 20; x+one+two;}; func(3)+two", expected: 26},
            Test{input: "let x = 1; let shadow = fn() { let x = 99; x }; shadow(); x", expected: 1},
        ];

        for tt in tests {
            test_integer(tt.input, tt.expected);
        }
    }

    #[test]
    fn test_closures() {
        struct Test<'a> {
            input: &'a str,
            expected: i64,
        }
        let tests = vec![
            Test{input: "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(3);", expected: 5},
            Test{input: r#"let newAdder = fn(x) { fn(y) { x + y } };
            let addTwo = newAdder(2);
            let addTen = newAdder(10);
            addTwo(1) + addTen(1)"#, expected: 14},
            // the callee resolves free names in its defining scope, not the caller's
            Test{input: r#"let x = 1;
            let getX = fn() { x };
            let caller = fn(x) { getX() };
            caller(50)"#, expected: 1},
            // captured by reference: bindings added after definition are visible
            Test{input: "let f = fn() { later }; let later = 7; f()", expected: 7},
        ];

        for tt in tests {
            test_integer(tt.input, tt.expected);
        }
    }

    #[test]
    fn test_eval_string() {
        struct Test<'a> {
            input: &'a str,
            expected: &'a str,
        }
        let tests = vec![
            Test{input: r#""Hello World!""#, expected: "Hello World!"},
            Test{input: r#""hello"+" "+"world""#, expected: "hello world"},
            Test{input: r#"let hi = "hello"; hi+" "+"world""#, expected: "hello world"},
        ];

        for tt in tests {
            assert_eq!(test_eval(tt.input), Object::String(tt.expected.to_string()));
        }
    }

    #[test]
    fn test_array_literal() {
        match test_eval("[1, 2*2, 3+3]") {
            Object::Array(arr) => assert_eq!(*arr, vec![Object::Integer(1), Object::Integer(4), Object::Integer(6)]),
            other => panic!("object is not an array, got {}", other),
        }
    }

    #[test]
    fn test_eval_array_index() {
        struct Test<'a> {
            input: &'a str,
            expected: Object,
        }
        let tests = vec![
            Test{input: "[1, 2, 3][0]", expected: Object::Integer(1)},
            Test{input: "[1, 2, 3][1]", expected: Object::Integer(2)},
            Test{input: "[1, 2, 3][1+1]", expected: Object::Integer(3)},
            Test{input: "let arr = [1, 2, 3+2]; arr[1+1]", expected: Object::Integer(5)},
            Test{input: "let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];", expected: Object::Integer(6)},
            Test{input: "[1, 2, 3][3]", expected: Object::Null},
            Test{input: "[1, 2, 3][10]", expected: Object::Null},
            Test{input: "[1, 2, 3][-1]", expected: Object::Null},
        ];

        for tt in tests {
            assert_eq!(test_eval(tt.input), tt.expected, "input {:?}", tt.input);
        }
    }

    #[test]
    fn test_hash_literal() {
        let input = r#"let two = "two";
        {
            "one": 10 - 9,
            two: 1 + 1,
            "thr" + "ee": 6 / 2,
            4: 4,
            true: 5,
            false: 6
        }"#;
        match test_eval(input) {
            Object::Hash(pairs) => {
                let got: Vec<(String, Object)> = pairs.values()
                    .map(|p| (p.key.to_string(), p.value.clone()))
                    .collect();
                assert_eq!(got, vec![
                    ("one".to_string(), Object::Integer(1)),
                    ("two".to_string(), Object::Integer(2)),
                    ("three".to_string(), Object::Integer(3)),
                    ("4".to_string(), Object::Integer(4)),
                    ("true".to_string(), Object::Integer(5)),
                    ("false".to_string(), Object::Integer(6)),
                ]);
            },
            other => panic!("object is not a hash, got {}", other),
        }
    }

    #[test]
    fn test_eval_hash_index() {
        struct Test<'a> {
            input: &'a str,
            expected: Object,
        }
        let tests = vec![
            Test{input: r#"{"foo": 5}["foo"]"#, expected: Object::Integer(5)},
            Test{input: r#"{"foo": 5, "bar": 7}["foo"]"#, expected: Object::Integer(5)},
            Test{input: r#"let key = "bar"; {"foo": 5, "bar": 7}[key]"#, expected: Object::Integer(7)},
            Test{input: r#"{"a": 1}["missing"]"#, expected: Object::Null},
            Test{input: r#"{}["foo"]"#, expected: Object::Null},
            Test{input: "{5: 5}[5]", expected: Object::Integer(5)},
            Test{input: "{true: 5}[true]", expected: Object::Integer(5)},
            Test{input: "{1: 5}[true]", expected: Object::Null},
            Test{input: "{1: 1, 1: 2}[1]", expected: Object::Integer(2)},
        ];

        for tt in tests {
            assert_eq!(test_eval(tt.input), tt.expected, "input {:?}", tt.input);
        }
    }

    #[test]
    fn test_identity_equality() {
        struct Test<'a> {
            input: &'a str,
            expected: bool,
        }
        let tests = vec![
            Test{input: "[1] == [1]", expected: false},
            Test{input: "let a = [1]; a == a", expected: true},
            Test{input: "let a = [1]; let b = a; a != b", expected: false},
            Test{input: "{} == {}", expected: false},
            Test{input: "let f = fn() { 1 }; f == f", expected: true},
            Test{input: "fn() { 1 } == fn() { 1 }", expected: false},
            Test{input: "len == len", expected: true},
            Test{input: "len == puts", expected: false},
            Test{input: "if (false) { 1 } == if (false) { 2 }", expected: true},
        ];

        for tt in tests {
            test_boolean(tt.input, tt.expected);
        }
    }

    #[test]
    fn test_eval_builtin_function() {
        struct Test<'a> {
            input: &'a str,
            expected: Object,
        }
        let tests = vec![
            Test{input: r#"len("")"#, expected: Object::Integer(0)},
            Test{input: r#"len("hello world")"#, expected: Object::Integer(11)},
            Test{input: "let a = [1, 2]; len(a);", expected: Object::Integer(2)},
            Test{input: "len(1)", expected: Object::Error("argument to `len` not supported, got INTEGER".to_string())},
            Test{input: "first(rest(push([1, 2], 3)))", expected: Object::Integer(2)},
            Test{input: "last([1, 2, 3])", expected: Object::Integer(3)},
            Test{input: "let len = fn(x) { 42 }; len([1])", expected: Object::Integer(42)},
        ];

        for tt in tests {
            assert_eq!(test_eval(tt.input), tt.expected, "input {:?}", tt.input);
        }
    }

    #[test]
    fn test_node_dispatch_keeps_return_signal() {
        let mut p = Parser::new(Lexer::new("return 5"));
        let program = p.parse_program();
        let mut evaluator = Evaluator::new();
        match evaluator.eval(Node::Statement(&program.statements[0])) {
            Object::ReturnValue(inner) => assert_eq!(*inner, Object::Integer(5)),
            other => panic!("expected a return signal, got {:?}", other),
        }
        assert_eq!(evaluator.eval(Node::Program(&program)), Object::Integer(5));
    }

    #[test]
    fn test_root_environment_persists_between_programs() {
        let mut evaluator = Evaluator::new();
        let first = Parser::new(Lexer::new("let a = 40;")).parse_program();
        let second = Parser::new(Lexer::new("a + 2")).parse_program();
        evaluator.eval_program(&first);
        assert_eq!(evaluator.eval_program(&second), Object::Integer(42));
        assert_eq!(evaluator.get("a"), Some(Object::Integer(40)));
    }

    //utils
    fn test_eval(input: &str) -> Object {
        let l = Lexer::new(input);
        let mut p = Parser::new(l);
        let program = p.parse_program();
        assert!(p.errors().is_empty(), "parser errors for {:?}: {:?}", input, p.errors());
        eval(&program, Environment::new_root())
    }

    fn test_integer(input: &str, expected: i64) {
        match test_eval(input) {
            Object::Integer(val) => assert_eq!(val, expected, "input {:?}", input),
            obj => panic!("returned object is not an integer for {:?}, got {}", input, obj)
        }
    }

    fn test_boolean(input: &str, expected: bool) {
        match test_eval(input) {
            Object::Boolean(val) => assert_eq!(val, expected, "input {:?}", input),
            obj => panic!("returned object is not a boolean for {:?}, got {}", input, obj)
        }
    }
}
