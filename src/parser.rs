use std::fmt;
use std::fmt::Formatter;
use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenSource, TokenType};

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
pub enum Precedence {
    Lowest,
    Equals, // ==
    LessGreater, // > <
    Sum, // +, -
    Product, // *, /
    Prefix, // -X, !X
    Call, // myFunction(X)
    Index // array[index]
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self {
            Precedence::Lowest => write!(f, "LOWEST"),
            Precedence::Equals => write!(f, "EQUALS"),
            Precedence::LessGreater => write!(f, "LESSGREATER"),
            Precedence::Sum => write!(f, "SUM"),
            Precedence::Product => write!(f, "PRODUCT"),
            Precedence::Prefix => write!(f, "PREFIX"),
            Precedence::Call => write!(f, "CALL"),
            Precedence::Index => write!(f, "INDEX")
        }
    }
}

fn get_precedence(token: TokenType) -> Option<Precedence> {
    match token {
        TokenType::Eq | TokenType::NotEq => Some(Precedence::Equals),
        TokenType::Lt | TokenType::Gt => Some(Precedence::LessGreater),
        TokenType::Plus | TokenType::Minus => Some(Precedence::Sum),
        TokenType::Asterisk | TokenType::Slash => Some(Precedence::Product),
        TokenType::LParen => Some(Precedence::Call),
        TokenType::LBracket => Some(Precedence::Index),
        _ => None
    }
}

type PrefixParseFn<S> = fn(&mut Parser<S>) -> Option<Expression>;
type InfixParseFn<S> = fn(&mut Parser<S>, Expression) -> Option<Expression>;

/// Prefix rule table: which rule starts an expression at a given token kind.
fn prefix_rule<S: TokenSource>(token: TokenType) -> Option<PrefixParseFn<S>> {
    let rule: PrefixParseFn<S> = match token {
        TokenType::Ident => Parser::<S>::parse_identifier,
        TokenType::Int => Parser::<S>::parse_integer_literal,
        TokenType::String => Parser::<S>::parse_string_literal,
        TokenType::Minus | TokenType::Bang => Parser::<S>::parse_prefix_expression,
        TokenType::True | TokenType::False => Parser::<S>::parse_boolean,
        TokenType::LParen => Parser::<S>::parse_grouped_expression,
        TokenType::LBracket => Parser::<S>::parse_array_literal,
        TokenType::LBrace => Parser::<S>::parse_hash_literal,
        TokenType::If => Parser::<S>::parse_if_expression,
        TokenType::Function => Parser::<S>::parse_function_literal,
        _ => return None,
    };
    Some(rule)
}

/// Infix rule table; every entry here has a precedence in `get_precedence`.
fn infix_rule<S: TokenSource>(token: TokenType) -> Option<InfixParseFn<S>> {
    let rule: InfixParseFn<S> = match token {
        TokenType::Plus | TokenType::Minus | TokenType::Asterisk | TokenType::Slash |
            TokenType::Eq | TokenType::NotEq | TokenType::Lt | TokenType::Gt => Parser::<S>::parse_infix_expression,
        TokenType::LParen => Parser::<S>::parse_call_expression,
        TokenType::LBracket => Parser::<S>::parse_index_expression,
        _ => return None,
    };
    Some(rule)
}

/// Parses a whole token stream, returning the (possibly partial) program
/// together with every error encountered along the way.
pub fn parse<S: TokenSource>(source: S) -> (Program, Vec<String>) {
    let mut p = Parser::new(source);
    let program = p.parse_program();
    (program, p.errors)
}

pub struct Parser<S: TokenSource = Lexer> {
    l: S,
    errors: Vec<String>,

    cur_token: Token,
    peek_token: Token,
}

impl<S: TokenSource> Parser<S> {

    pub fn new(l: S) -> Self {
        let mut p = Parser {
            l,
            errors: Vec::new(),

            cur_token: Token::eof(),
            peek_token: Token::eof(),
        };

        // fill cur_token and peek_token
        p.next_token();
        p.next_token();

        p
    }

    fn next_token(&mut self) {
        let next = self.l.next_token();
        self.cur_token = std::mem::replace(&mut self.peek_token, next);
    }

    fn cur_token_is(&self, t: TokenType) -> bool {
        self.cur_token.token_type == t
    }

    fn peek_token_is(&self, t: TokenType) -> bool {
        self.peek_token.token_type == t
    }

    fn expect_peek(&mut self, t: TokenType) -> bool {
        if self.peek_token_is(t) {
            self.next_token();
            true
        } else {
            self.peek_error(t);
            false
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn peek_error(&mut self, t: TokenType) {
        self.errors.push(format!("expected next token to be {}, got {} instead",
            t, self.peek_token.token_type))
    }

    fn no_prefix_parse_fn_error(&mut self, t: TokenType) {
        self.errors.push(format!("no prefix parse function for {} found", t))
    }

    pub fn parse_program(&mut self) -> Program {
        let mut p = Program::default();

        while !self.cur_token_is(TokenType::Eof) {
            if let Some(s) = self.parse_statement() {
                p.statements.push(s);
            }
            self.next_token();
        }
        p
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type {
            TokenType::Let => self.parse_let_statement(),
            TokenType::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement()
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenType::Ident) {
            return None;
        }

        let name = self.cur_token.literal.clone();

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenType::Semicolon) {
            self.next_token();
        }
        Some(Statement::LetStatement { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.next_token();
        let ret_val = self.parse_expression(Precedence::Lowest)?;
        if self.peek_token_is(TokenType::Semicolon) {
            self.next_token();
        }
        Some(Statement::ReturnStatement(ret_val))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenType::Semicolon) {
            self.next_token();
        }
        Some(Statement::ExpressionStatement(expression))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match prefix_rule::<S>(self.cur_token.token_type) {
            Some(rule) => rule,
            None => {
                self.no_prefix_parse_fn_error(self.cur_token.token_type);
                return None;
            }
        };
        let mut left_exp = prefix(self)?;

        while !self.peek_token_is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            let infix = match infix_rule::<S>(self.peek_token.token_type) {
                Some(rule) => rule,
                None => return Some(left_exp),
            };
            self.next_token();
            left_exp = infix(self, left_exp)?;
        }
        Some(left_exp)
    }

    fn peek_precedence(&self) -> Precedence {
        get_precedence(self.peek_token.token_type).unwrap_or(Precedence::Lowest)
    }

    fn cur_precedence(&self) -> Precedence {
        get_precedence(self.cur_token.token_type).unwrap_or(Precedence::Lowest)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.cur_token.literal.clone()))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.cur_token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer(value)),
            Err(_) => {
                let msg = format!("could not parse {:?} as integer", self.cur_token.literal);
                self.errors.push(msg);
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::String(self.cur_token.literal.clone()))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = self.cur_token.literal.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::PrefixExpression {
            operator,
            right: Box::new(right)
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = self.cur_token.literal.clone();

        // passing `precedence - 1` here would make the operator right-associative
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::InfixExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right)
        })
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.cur_token_is(TokenType::True)))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let exp = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        Some(exp)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let consequence = self.parse_block_statement();

        let alternative = if self.peek_token_is(TokenType::Else) {
            self.next_token();
            if !self.expect_peek(TokenType::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };
        Some(Expression::IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let mut block = BlockStatement::default();
        self.next_token();
        while !self.cur_token_is(TokenType::RBrace) && !self.cur_token_is(TokenType::Eof) {
            if let Some(st) = self.parse_statement() {
                block.statements.push(st);
            }
            self.next_token();
        }
        block
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let body = self.parse_block_statement();

        Some(Expression::Function { parameters, body })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();
        if self.peek_token_is(TokenType::RParen) {
            self.next_token();
            return Some(params);
        }

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        params.push(self.cur_token.literal.clone());

        while self.peek_token_is(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            params.push(self.cur_token.literal.clone());
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        Some(params)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_expression_list(TokenType::RParen)?;
        Some(Expression::CallExpression { function: Box::new(function), arguments })
    }

    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_token_is(end) {
            self.next_token();
            return Some(list)
        }
        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenType::RBracket)?;
        Some(Expression::Array(elements))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RBracket) {
            return None;
        }

        Some(Expression::IndexExpression { left: Box::new(left), index: Box::new(index) })
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let mut pairs = Vec::new();

        while !self.peek_token_is(TokenType::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek(TokenType::Colon) {
                return None;
            }

            self.next_token();

            let value = self.parse_expression(Precedence::Lowest)?;
            if !self.peek_token_is(TokenType::RBrace) && !self.expect_peek(TokenType::Comma) {
                return None;
            }

            pairs.push((key, value));
        }

        if !self.expect_peek(TokenType::RBrace) {
            return None;
        }
        Some(Expression::Hash(pairs))
    }
}
