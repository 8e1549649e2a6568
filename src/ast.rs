use std::fmt;
use std::fmt::Formatter;

/// A borrowed view over any evaluable node.
#[derive(Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expression(&'a Expression),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.statements, "; ")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{ ")?;
        write_joined(f, &self.statements, "; ")?;
        write!(f, " }}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    LetStatement{name: String, value: Expression},
    ReturnStatement(Expression),
    ExpressionStatement(Expression),
    BlockStatement(BlockStatement)
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::LetStatement { name, value } => write!(f, "let {} = {}", name, value),
            Statement::ReturnStatement(ret) => write!(f, "return {}", ret),
            Statement::ExpressionStatement(exp) => write!(f, "{}", exp),
            Statement::BlockStatement(block) => write!(f, "{}", block),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    Boolean(bool),
    Integer(i64),
    String(String),
    Array(Vec<Expression>),
    /// Key/value pairs in source order.
    Hash(Vec<(Expression, Expression)>),
    PrefixExpression{
        operator: String,
        right: Box<Expression>
    },
    InfixExpression {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    IfExpression{
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Function{
        parameters: Vec<String>,
        body: BlockStatement,
    },
    CallExpression{
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    IndexExpression{
        left: Box<Expression>,
        index: Box<Expression>,
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::Boolean(b) => write!(f, "{}", b),
            Expression::Integer(int) => write!(f, "{}", int),
            Expression::String(st) => write!(f, "\"{}\"", st),
            Expression::Array(exps) => {
                write!(f, "[")?;
                write_joined(f, exps, ", ")?;
                write!(f, "]")
            },
            Expression::Hash(pairs) => {
                write!(f, "{{{}}}", pairs.iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>().join(", "))
            },
            Expression::PrefixExpression { operator, right } => {
                write!(f, "({}{})", operator, right)
            },
            Expression::InfixExpression { operator, left, right } => {
                write!(f, "({} {} {})", left, operator, right)
            }
            Expression::IfExpression { condition, consequence, alternative } => {
                write!(f, "if ({}) {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {}", alt)?;
                }
                Ok(())
            },
            Expression::Function { parameters, body } => {
                write!(f, "fn({}) {}", parameters.join(", "), body)
            },
            Expression::CallExpression { function, arguments } => {
                write!(f, "{}(", function)?;
                write_joined(f, arguments, ", ")?;
                write!(f, ")")
            }
            Expression::IndexExpression { left, index } => {
                write!(f, "({}[{}])", left, index)
            }
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
