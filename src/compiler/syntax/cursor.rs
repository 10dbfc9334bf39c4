use crate::compiler::lexis::token::{Keyword, Symbol, Token, TokenKind};
use crate::constants::common::{FIRST_COLUMN, FIRST_LINE};
use crate::define_token_matchers;

use super::ast::crumb::Identifier;
use super::err::{ParseError, ParseErrorKind};

/// Read position inside one statement slice. Comment markers are invisible to `peek` and
/// `next`; past the last token `peek` yields an end-of-statement sentinel.
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    position: usize,
    eof: Token,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> TokenCursor<'a> {
        let eof = tokens.last().map_or_else(
            || Token::eof(FIRST_LINE, FIRST_COLUMN),
            |last| Token::eof(last.line, last.end_column()),
        );
        TokenCursor {
            tokens,
            position: 0,
            eof,
        }
    }

    fn visible_position(&self) -> usize {
        self.tokens[self.position.min(self.tokens.len())..]
            .iter()
            .position(|token| !token.is_comment())
            .map_or(self.tokens.len(), |offset| self.position + offset)
    }

    pub fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    pub fn peek_nth(&self, n: usize) -> &Token {
        self.tokens[self.position.min(self.tokens.len())..]
            .iter()
            .filter(|token| !token.is_comment())
            .nth(n)
            .unwrap_or(&self.eof)
    }

    pub fn next(&mut self) -> Option<&'a Token> {
        let position = self.visible_position();
        let token = self.tokens.get(position)?;
        self.position = position + 1;
        Some(token)
    }

    pub fn is_exhausted(&self) -> bool {
        self.visible_position() >= self.tokens.len()
    }

    /// Raw tokens from the next visible one onward, comment markers included.
    pub fn rest(&self) -> &'a [Token] {
        &self.tokens[self.visible_position()..]
    }

    /// Skips `n` raw tokens counted from the start of [`TokenCursor::rest`].
    pub fn advance(&mut self, n: usize) {
        self.position = (self.visible_position() + n).min(self.tokens.len());
    }

    pub fn digest_identifier(&mut self, after: &'static str) -> Result<Identifier, ParseError> {
        let token = self.peek();
        if token.kind != TokenKind::Identifier {
            return Err(ParseError::new(ParseErrorKind::MissingIdentifier(after), token));
        }
        let identifier = token.text.clone();
        self.next();
        Ok(identifier)
    }

    define_token_matchers!(Keyword, Symbol);
}
