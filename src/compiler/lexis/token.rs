use std::collections::HashMap;
use std::fmt::{self, Display};

use once_cell::sync::Lazy;

use crate::constants::common::COMMENT_MARKER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Int,
    String,
    Bool,
    Float,
    If,
    Else,
    While,
    For,
    In,
    And,
    Or,
    Print,
    Gets,
    Func,
    Return,
}

static KEYWORD_MAP: Lazy<HashMap<&'static str, Keyword>> = Lazy::new(|| {
    HashMap::from([
        ("int", Keyword::Int),
        ("string", Keyword::String),
        ("bool", Keyword::Bool),
        ("float", Keyword::Float),
        ("if", Keyword::If),
        ("else", Keyword::Else),
        ("while", Keyword::While),
        ("for", Keyword::For),
        ("in", Keyword::In),
        ("and", Keyword::And),
        ("or", Keyword::Or),
        ("print", Keyword::Print),
        ("gets", Keyword::Gets),
        ("func", Keyword::Func),
        ("return", Keyword::Return),
    ])
});

impl Keyword {
    /// Looks up a whole word run; prefixes never match.
    #[must_use]
    pub fn of(s: &str) -> Option<Keyword> {
        KEYWORD_MAP.get(s).copied()
    }

    #[must_use]
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Keyword::Int | Keyword::String | Keyword::Bool | Keyword::Float
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Int => "int",
            Keyword::String => "string",
            Keyword::Bool => "bool",
            Keyword::Float => "float",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::In => "in",
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::Print => "print",
            Keyword::Gets => "gets",
            Keyword::Func => "func",
            Keyword::Return => "return",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Comma,
    Semicolon,
    Colon,
    LeftParentheses,
    RightParentheses,
    LeftBrace,
    RightBrace,
    Quote,
    DoubleQuote,
    Backslash,
    Dot,
    Comment,

    Add,
    Subtract,
    Multiply,
    Divide,

    Equal,
    LessThan,
    GreaterThan,
}

impl Symbol {
    #[must_use]
    pub fn of(c: char) -> Option<Symbol> {
        let symbol = match c {
            ',' => Symbol::Comma,
            ';' => Symbol::Semicolon,
            ':' => Symbol::Colon,
            '(' => Symbol::LeftParentheses,
            ')' => Symbol::RightParentheses,
            '{' => Symbol::LeftBrace,
            '}' => Symbol::RightBrace,
            '\'' => Symbol::Quote,
            '"' => Symbol::DoubleQuote,
            '\\' => Symbol::Backslash,
            '.' => Symbol::Dot,
            COMMENT_MARKER => Symbol::Comment,
            '+' => Symbol::Add,
            '-' => Symbol::Subtract,
            '*' => Symbol::Multiply,
            '/' => Symbol::Divide,
            '=' => Symbol::Equal,
            '<' => Symbol::LessThan,
            '>' => Symbol::GreaterThan,
            _ => return None,
        };
        Some(symbol)
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Symbol::Comma => ',',
            Symbol::Semicolon => ';',
            Symbol::Colon => ':',
            Symbol::LeftParentheses => '(',
            Symbol::RightParentheses => ')',
            Symbol::LeftBrace => '{',
            Symbol::RightBrace => '}',
            Symbol::Quote => '\'',
            Symbol::DoubleQuote => '"',
            Symbol::Backslash => '\\',
            Symbol::Dot => '.',
            Symbol::Comment => COMMENT_MARKER,
            Symbol::Add => '+',
            Symbol::Subtract => '-',
            Symbol::Multiply => '*',
            Symbol::Divide => '/',
            Symbol::Equal => '=',
            Symbol::LessThan => '<',
            Symbol::GreaterThan => '>',
        }
    }

    #[must_use]
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Symbol::Add | Symbol::Subtract | Symbol::Multiply | Symbol::Divide
        )
    }

    #[must_use]
    pub fn is_relational(self) -> bool {
        matches!(self, Symbol::Equal | Symbol::LessThan | Symbol::GreaterThan)
    }

    #[must_use]
    pub fn is_quote(self) -> bool {
        matches!(self, Symbol::Quote | Symbol::DoubleQuote)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    IntLiteral,
    Identifier,
    /// A resolved escape such as `\n`; the token text keeps both characters.
    Escaped,

    Keyword(Keyword),
    Symbol(Symbol),

    Whitespace,
    Error,
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IntLiteral => write!(f, "IntLiteral"),
            TokenKind::Identifier => write!(f, "Identifier"),
            TokenKind::Escaped => write!(f, "Escaped"),
            TokenKind::Keyword(keyword) => write!(f, "Keyword({keyword})"),
            TokenKind::Symbol(symbol) => write!(f, "Symbol({symbol})"),
            TokenKind::Whitespace => write!(f, "Whitespace"),
            TokenKind::Error => write!(f, "Error"),
            TokenKind::Eof => write!(f, "Eof"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Token {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// The end-of-input sentinel. It never appears in lexer output.
    #[must_use]
    pub fn eof(line: u32, column: u32) -> Token {
        Token::new(TokenKind::Eof, "", line, column)
    }

    #[must_use]
    pub fn is_keyword(&self, expected: Keyword) -> bool {
        self.kind == TokenKind::Keyword(expected)
    }

    #[must_use]
    pub fn is_symbol(&self, expected: Symbol) -> bool {
        self.kind == TokenKind::Symbol(expected)
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.is_symbol(Symbol::Comment)
    }

    /// Column just past the last character of the token.
    #[must_use]
    pub fn end_column(&self) -> u32 {
        let width = u32::try_from(self.text.chars().count()).unwrap_or(u32::MAX);
        self.column.saturating_add(width)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} `{}`", self.line, self.column, self.kind, self.text)
    }
}
