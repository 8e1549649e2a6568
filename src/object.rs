use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;
use indexmap::IndexMap;
use crate::ast::BlockStatement;
use crate::builtin::BuiltinFunction;
use crate::environment::Env;

pub const NULL: Object = Object::Null;
pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    String,
    Null,
    Array,
    Hash,
    Function,
    Builtin,
    ReturnValue,
    Error,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::String => "STRING",
            ObjectType::Null => "NULL",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
        })
    }
}

/// Type-tagged key of a hash entry. Only integers, booleans and strings have one.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct HashKey {
    pub object_type: ObjectType,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

pub type HashPairs = IndexMap<HashKey, HashPair>;

/// A user-defined function together with the environment it was defined in.
pub struct Function {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
    pub env: Env,
}

// Function values compare by identity.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Rc<Vec<Object>>),
    Hash(Rc<HashPairs>),
    Function(Rc<Function>),
    Builtin(BuiltinFunction),
    ReturnValue(Box<Object>),
    Error(String),
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Null => ObjectType::Null,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
        }
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Object::Integer(i) => *i as u64,
            Object::Boolean(b) => u64::from(*b),
            Object::String(s) => fnv1a_64(s.as_bytes()),
            _ => return None,
        };
        Some(HashKey { object_type: self.object_type(), value })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// `Error` and `ReturnValue` interrupt evaluation of whatever contains them.
    pub fn is_control_signal(&self) -> bool {
        matches!(self, Object::Error(_) | Object::ReturnValue(_))
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

pub fn native_bool_to_object(input: bool) -> Object {
    if input { TRUE } else { FALSE }
}

pub fn new_error(msg: impl Into<String>) -> Object {
    Object::Error(msg.into())
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(i) => write!(f, "{}", i),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::String(s) => write!(f, "{}", s),
            Object::Null => write!(f, "null"),
            Object::Array(arr) => write!(f, "[{}]",
                arr.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")),
            Object::Hash(pairs) => write!(f, "{{{}}}",
                pairs.values().map(|p| format!("{}: {}", p.key, p.value)).collect::<Vec<_>>().join(", ")),
            Object::Function(func) => write!(f, "fn({}) {}", func.parameters.join(", "), func.body),
            Object::Builtin(bf) => write!(f, "builtin function {}", bf),
            Object::ReturnValue(obj) => write!(f, "{}", obj),
            Object::Error(msg) => write!(f, "ERROR: {}", msg),
        }
    }
}
