use crate::compiler::lexis::token::{Keyword, Symbol, Token};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected identifier after {0}")]
    MissingIdentifier(&'static str),
    #[error("expected keyword `{0}`")]
    MissingKeyword(Keyword),
    #[error("expected `{0}`")]
    MissingSymbol(Symbol),
    #[error("expected a type (int, string, bool or float)")]
    MissingType,
    #[error("expected expression")]
    ExpectedExpression,

    #[error("unclosed group, expected `)`")]
    UnclosedGroup,
    #[error("unclosed block, expected `}}`")]
    UnclosedBlock,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated statement, expected `;`")]
    UnterminatedStatement,
    #[error("`}}` does not close any block")]
    UnbalancedBrace,

    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("statement ends too early")]
    UnexpectedEndOfStatement,
    #[error("integer literal out of range")]
    IllegalIntegerLiteral,
    #[error("float literal is out of range")]
    IllegalFloatLiteral,
    #[error("nesting is too deep")]
    NestingTooDeep,
    #[error("`else` without a preceding `if`")]
    ElseWithoutIf,
}

/// A violated grammar expectation, pinned to the token that violated it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}, found {}", found(.text))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub text: String,
    pub line: u32,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, token: &Token) -> ParseError {
        ParseError {
            kind,
            text: token.text.clone(),
            line: token.line,
        }
    }
}

fn found(text: &str) -> String {
    if text.is_empty() {
        String::from("end of statement")
    } else {
        format!("`{text}`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::lexis::token::TokenKind;
    use test_log::test;

    #[test]
    fn message_names_expectation_line_and_token() {
        let token = Token::new(TokenKind::IntLiteral, "5", 4, 5);
        let error = ParseError::new(ParseErrorKind::MissingIdentifier("type"), &token);
        assert_eq!(
            error.to_string(),
            "line 4: expected identifier after type, found `5`"
        );
    }

    #[test]
    fn end_of_statement_has_no_text() {
        let error = ParseError::new(ParseErrorKind::UnclosedGroup, &Token::eof(2, 9));
        assert_eq!(
            error.to_string(),
            "line 2: unclosed group, expected `)`, found end of statement"
        );
        let error = ParseError::new(ParseErrorKind::UnclosedBlock, &Token::eof(2, 9));
        assert_eq!(
            error.to_string(),
            "line 2: unclosed block, expected `}`, found end of statement"
        );
    }
}
