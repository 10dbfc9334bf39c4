use log::trace;

use crate::compiler::lexis::token::{Symbol, Token, TokenKind};

use super::err::{ParseError, ParseErrorKind};

/// Cuts a token stream into statement slices.
///
/// A slice ends at a `;` outside any braces (the `;` is dropped) or at the `}` that closes
/// its outermost brace (the `}` is kept). Quoted text is opaque to both. Slices holding
/// nothing but comment markers are skipped.
pub struct Slicer<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> Slicer<'a> {
    pub fn new(tokens: &'a [Token]) -> Slicer<'a> {
        Slicer {
            tokens,
            position: 0,
        }
    }

    fn cut(&mut self) -> Option<Result<&'a [Token], ParseError>> {
        let tokens = self.tokens;
        let start = self.position;
        let rest = tokens.get(start..).filter(|rest| !rest.is_empty())?;
        let mut depth = 0usize;
        let mut open_quote: Option<Symbol> = None;
        for (offset, token) in rest.iter().enumerate() {
            let TokenKind::Symbol(symbol) = token.kind else {
                continue;
            };
            if let Some(quote) = open_quote {
                if symbol == quote {
                    open_quote = None;
                }
                continue;
            }
            match symbol {
                Symbol::Quote | Symbol::DoubleQuote => open_quote = Some(symbol),
                Symbol::LeftBrace => depth += 1,
                Symbol::RightBrace if depth == 0 => {
                    self.position = start + offset + 1;
                    return Some(Err(ParseError::new(ParseErrorKind::UnbalancedBrace, token)));
                }
                Symbol::RightBrace => {
                    depth -= 1;
                    if depth == 0 {
                        self.position = start + offset + 1;
                        return Some(Ok(&rest[..=offset]));
                    }
                }
                Symbol::Semicolon if depth == 0 => {
                    self.position = start + offset + 1;
                    return Some(Ok(&rest[..offset]));
                }
                _ => {}
            }
        }

        self.position = tokens.len();
        let last = rest.iter().rev().find(|token| !token.is_comment())?;
        let kind = if open_quote.is_some() {
            ParseErrorKind::UnterminatedString
        } else if depth > 0 {
            ParseErrorKind::UnclosedBlock
        } else {
            ParseErrorKind::UnterminatedStatement
        };
        Some(Err(ParseError::new(kind, last)))
    }
}

impl<'a> Iterator for Slicer<'a> {
    type Item = Result<&'a [Token], ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.cut()? {
                Ok(slice) if slice.iter().all(Token::is_comment) => {
                    trace!("skipped empty statement");
                }
                slice => return Some(slice),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::lexis::lexer::tokenize;
    use test_log::test;

    fn texts(slice: &[Token]) -> Vec<&str> {
        slice.iter().map(|token| token.text.as_str()).collect()
    }

    #[test]
    fn semicolons_end_statements() {
        let tokens = tokenize("int x gets 5;\nprint x;");
        let slices = Slicer::new(&tokens).collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(slices.len(), 2);
        assert_eq!(texts(slices[0]), ["int", "x", "gets", "5"]);
        assert_eq!(texts(slices[1]), ["print", "x"]);
    }

    #[test]
    fn blocks_end_at_their_closing_brace() {
        let tokens = tokenize("while x { print x; { x gets 1; } } print 2;");
        let slices = Slicer::new(&tokens).collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].first().map(|token| token.text.as_str()), Some("while"));
        assert!(slices[0].last().unwrap().is_symbol(Symbol::RightBrace));
        assert_eq!(texts(slices[1]), ["print", "2"]);
    }

    #[test]
    fn quotes_hide_terminators() {
        let tokens = tokenize("print \"a;b}\";");
        let slices = Slicer::new(&tokens).collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].len(), 7);
    }

    #[test]
    fn empty_statements_are_skipped() {
        let tokens = tokenize(";;\n# only a comment\n;print 1;");
        let slices = Slicer::new(&tokens).collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(slices.len(), 1);
        assert_eq!(texts(slices[0]), ["print", "1"]);
    }

    #[test]
    fn trailing_comment_is_not_a_statement() {
        let tokens = tokenize("print 1; # done");
        assert_eq!(Slicer::new(&tokens).count(), 1);
    }

    #[test]
    fn unfinished_input_is_diagnosed() {
        let cases = [
            ("print 1", ParseErrorKind::UnterminatedStatement),
            ("if x { print 1;", ParseErrorKind::UnclosedBlock),
            ("print 'abc;", ParseErrorKind::UnterminatedString),
        ];
        for (code, kind) in cases {
            let tokens = tokenize(code);
            let results = Slicer::new(&tokens).collect::<Vec<_>>();
            assert_eq!(results.len(), 1, "{code}");
            assert_eq!(results[0].as_ref().unwrap_err().kind, kind, "{code}");
        }
    }

    #[test]
    fn stray_brace_is_reported_and_skipped() {
        let tokens = tokenize("} print 1;");
        let results = Slicer::new(&tokens).collect::<Vec<_>>();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].as_ref().unwrap_err().kind,
            ParseErrorKind::UnbalancedBrace
        );
        assert_eq!(texts(results[1].as_ref().unwrap()), ["print", "1"]);
    }
}
