use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;
use crate::object::{new_error, Object, NULL};

pub type BuiltinFn = fn(args: &[Object]) -> Object;

/// A host function reachable from scripts by name.
#[derive(Clone, Copy)]
pub struct BuiltinFunction {
    name: &'static str,
    func: BuiltinFn
}

const BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction { name: "len", func: len },
    BuiltinFunction { name: "puts", func: puts },
    BuiltinFunction { name: "first", func: first },
    BuiltinFunction { name: "last", func: last },
    BuiltinFunction { name: "rest", func: rest },
    BuiltinFunction { name: "push", func: push },
];

impl fmt::Display for BuiltinFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.name)
    }
}

// The table holds one entry per name, so the name identifies the function.
impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl BuiltinFunction {
    pub fn look_up(name: &str) -> Option<Self> {
        BUILTINS.iter().find(|b| b.name == name).copied()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: &[Object]) -> Object {
        (self.func)(args)
    }
}

fn check_arity(args: &[Object], want: usize) -> Option<Object> {
    if args.len() != want {
        Some(new_error(format!("wrong number of arguments. got={}, want={}", args.len(), want)))
    } else {
        None
    }
}

fn len(args: &[Object]) -> Object {
    if let Some(err) = check_arity(args, 1) {
        return err;
    }
    match &args[0] {
        Object::String(s) => Object::Integer(s.chars().count() as i64),
        Object::Array(v) => Object::Integer(v.len() as i64),
        Object::Hash(h) => Object::Integer(h.len() as i64),
        other => new_error(format!("argument to `len` not supported, got {}", other.object_type())),
    }
}

fn puts(args: &[Object]) -> Object {
    for arg in args {
        println!("{}", arg)
    }
    NULL
}

fn array_arg<'a>(name: &str, args: &'a [Object]) -> Result<&'a Rc<Vec<Object>>, Object> {
    match &args[0] {
        Object::Array(arr) => Ok(arr),
        other => Err(new_error(format!("argument to `{}` must be ARRAY, got {}", name, other.object_type()))),
    }
}

fn first(args: &[Object]) -> Object {
    if let Some(err) = check_arity(args, 1) {
        return err;
    }
    match array_arg("first", args) {
        Ok(arr) => arr.first().cloned().unwrap_or(NULL),
        Err(err) => err,
    }
}

fn last(args: &[Object]) -> Object {
    if let Some(err) = check_arity(args, 1) {
        return err;
    }
    match array_arg("last", args) {
        Ok(arr) => arr.last().cloned().unwrap_or(NULL),
        Err(err) => err,
    }
}

fn rest(args: &[Object]) -> Object {
    if let Some(err) = check_arity(args, 1) {
        return err;
    }
    match array_arg("rest", args) {
        Ok(arr) if arr.is_empty() => NULL,
        Ok(arr) => Object::Array(Rc::new(arr[1..].to_vec())),
        Err(err) => err,
    }
}

fn push(args: &[Object]) -> Object {
    if let Some(err) = check_arity(args, 2) {
        return err;
    }
    match array_arg("push", args) {
        Ok(arr) => {
            let mut elements = Vec::with_capacity(arr.len() + 1);
            elements.extend(arr.iter().cloned());
            elements.push(args[1].clone());
            Object::Array(Rc::new(elements))
        },
        Err(err) => err,
    }
}
