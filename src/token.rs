use std::fmt;
use std::fmt::Formatter;

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy)]
pub enum TokenType {
    Illegal,
    Eof,

    Ident,
    Int,
    String,

    Assign,
    Plus,
    Minus,
    Bang, // !
    Asterisk,
    Slash,

    Lt,
    Gt,
    Eq,
    NotEq,

    Comma,
    Semicolon,
    Colon,

    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }
    LBracket, // [
    RBracket, // ]

    // keywords
    Function, // fn
    Let, // let
    True, // true
    False, // false
    If, // if
    Else, // else
    Return, // return
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}",
            match &self {
                TokenType::Illegal => "ILLEGAL",
                TokenType::Eof => "EOF",
                TokenType::Ident => "IDENT",
                TokenType::Int => "INT",
                TokenType::String => "STRING",
                TokenType::Assign => "ASSIGN",
                TokenType::Plus => "PLUS",
                TokenType::Minus => "MINUS",
                TokenType::Bang => "BANG",
                TokenType::Asterisk => "ASTERISK",
                TokenType::Slash => "SLASH",
                TokenType::Lt => "LT",
                TokenType::Gt => "GT",
                TokenType::Eq => "EQ",
                TokenType::NotEq => "NOT_EQ",
                TokenType::Comma => "COMMA",
                TokenType::Semicolon => "SEMICOLON",
                TokenType::Colon => "COLON",
                TokenType::LParen => "LPAREN",
                TokenType::RParen => "RPAREN",
                TokenType::LBrace => "LBRACE",
                TokenType::RBrace => "RBRACE",
                TokenType::LBracket => "LBRACKET",
                TokenType::RBracket => "RBRACKET",
                TokenType::Function => "FUNCTION",
                TokenType::Let => "LET",
                TokenType::True => "TRUE",
                TokenType::False => "FALSE",
                TokenType::If => "IF",
                TokenType::Else => "ELSE",
                TokenType::Return => "RETURN",
            }
        )
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String
}

impl Token {
    pub fn new(token_type: TokenType, literal: impl Into<String>) -> Self {
        Token { token_type, literal: literal.into() }
    }

    pub fn eof() -> Self {
        Token::new(TokenType::Eof, "")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}: {}}}", self.token_type, self.literal)
    }
}

/// Anything the parser can pull tokens from.
///
/// Implementations must keep returning an `Eof` token once input is exhausted.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// A pre-scanned token list. Yields `Eof` after the last element.
impl TokenSource for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Token {
        self.next().unwrap_or_else(Token::eof)
    }
}

pub fn look_up_ident(ident: &str) -> TokenType {
    match ident {
        "fn" => TokenType::Function,
        "let" => TokenType::Let,
        "true" => TokenType::True,
        "false" => TokenType::False,
        "if" => TokenType::If,
        "else" => TokenType::Else,
        "return" => TokenType::Return,
        _ => TokenType::Ident,
    }
}
