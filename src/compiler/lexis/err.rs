use super::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: u32,
    pub column: u32,
}

impl LexError {
    /// The lexer never aborts, so its diagnostics are read back from the error tokens it emitted.
    #[must_use]
    pub fn collect(tokens: &[Token]) -> Vec<LexError> {
        tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Error)
            .filter_map(|token| {
                token.text.chars().next().map(|c| LexError {
                    kind: LexErrorKind::UnexpectedCharacter(c),
                    line: token.line,
                    column: token.column,
                })
            })
            .collect()
    }
}
