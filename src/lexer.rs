use crate::token::{look_up_ident, Token, TokenSource, TokenType};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    read_position: usize,
    ch: char,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut l = Lexer {
            input: input.chars().collect(),
            position: 0,
            read_position: 0,
            ch: char::from(0),
        };
        l.read_char();
        l
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_white_space();

        let tok = match self.ch {
            '=' => if self.peek_char() == '=' {
                    self.read_char();
                    Token::new(TokenType::Eq, "==")
                } else {
                    new_token(TokenType::Assign, self.ch)
                },
            '+' => new_token(TokenType::Plus, self.ch),
            '-' => new_token(TokenType::Minus, self.ch),
            '*' => new_token(TokenType::Asterisk, self.ch),
            '/' => new_token(TokenType::Slash, self.ch),
            '!' => if self.peek_char() == '=' {
                self.read_char();
                Token::new(TokenType::NotEq, "!=")
            } else {
                new_token(TokenType::Bang, self.ch)
            },
            '<' => new_token(TokenType::Lt, self.ch),
            '>' => new_token(TokenType::Gt, self.ch),
            ';' => new_token(TokenType::Semicolon, self.ch),
            ':' => new_token(TokenType::Colon, self.ch),
            ',' => new_token(TokenType::Comma, self.ch),
            '{' => new_token(TokenType::LBrace, self.ch),
            '}' => new_token(TokenType::RBrace, self.ch),
            '(' => new_token(TokenType::LParen, self.ch),
            ')' => new_token(TokenType::RParen, self.ch),
            '[' => new_token(TokenType::LBracket, self.ch),
            ']' => new_token(TokenType::RBracket, self.ch),
            '"' => Token::new(TokenType::String, self.read_string()),
            '\0' if self.position >= self.input.len() => return Token::eof(),
            _ => if is_letter(self.ch) {
                let literal = self.read_identifier();
                return Token::new(look_up_ident(&literal), literal);
            } else if is_digit(self.ch) {
                return Token::new(TokenType::Int, self.read_number());
            } else {
                new_token(TokenType::Illegal, self.ch)
            },
        };
        self.read_char();

        tok
    }

    fn skip_white_space(&mut self) {
        while self.ch == ' ' || self.ch == '\t' || self.ch == '\n' || self.ch == '\r' {
            self.read_char();
        }
    }

    fn read_char(&mut self) {
        self.ch = self.input.get(self.read_position).copied().unwrap_or('\0');
        self.position = self.read_position;
        self.read_position = (self.read_position + 1).min(self.input.len() + 1);
    }

    fn peek_char(&self) -> char {
        self.input.get(self.read_position).copied().unwrap_or('\0')
    }

    fn read_identifier(&mut self) -> String {
        let position = self.position;
        // digits are allowed after the first character
        while is_letter(self.ch) || is_digit(self.ch) {
            self.read_char();
        }
        self.input[position..self.position].iter().collect()
    }

    fn read_number(&mut self) -> String {
        let position = self.position;
        while is_digit(self.ch) {
            self.read_char();
        }
        self.input[position..self.position].iter().collect()
    }

    // An unterminated string runs to the end of input.
    fn read_string(&mut self) -> String {
        let position = self.position + 1;
        loop {
            self.read_char();
            if self.ch == '"' || self.position >= self.input.len() {
                break;
            }
        }
        self.input[position..self.position.min(self.input.len())].iter().collect()
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn new_token(token_type: TokenType, ch: char) -> Token {
    Token::new(token_type, ch.to_string())
}
