use log::{trace, warn};

use crate::constants::common::{BACKSLASH, ESCAPES};

use super::text::Reader;
use super::token::{Keyword, Symbol, Token, TokenKind};

/// Splits source text into tokens. Never fails: characters no rule accepts become
/// [`TokenKind::Error`] tokens. Whitespace is dropped from the result.
#[must_use]
pub fn tokenize(code: &str) -> Vec<Token> {
    Lexer::new(code).tokenize()
}

pub struct Lexer {
    reader: Reader,
    open_quote: Option<Symbol>,
}

impl Lexer {
    #[must_use]
    pub fn new(code: &str) -> Lexer {
        Lexer {
            reader: Reader::new(code),
            open_quote: None,
        }
    }

    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(c) = self.reader.peek() {
            let token = self.digest_token(c);
            trace!("lexed {token}");
            if token.kind == TokenKind::Whitespace {
                continue;
            }
            if token.is_comment() && self.open_quote.is_none() {
                self.reader.skip_until('\n');
            }
            self.track_quote(&token);
            tokens.push(token);
        }
        tokens
    }

    fn digest_token(&mut self, c: char) -> Token {
        match c {
            '\n' | '\r' | '\t' => self.digest_whitespace(""),
            ' ' => self.digest_whitespace(" "),
            '\\' => self.digest_backslash(),
            ',' | ';' | ':' | '{' | '}' | '(' | ')' | '\'' | '"' | '.' | '#' => {
                self.digest_symbol(c)
            }
            c if is_word_character(c) => self.digest_word(),
            c if c.is_ascii_digit() => self.digest_number(),
            '+' | '-' | '*' | '/' => self.digest_symbol(c),
            '=' | '<' | '>' => self.digest_symbol(c),
            c => self.digest_unexpected(c),
        }
    }

    fn digest_whitespace(&mut self, text: &str) -> Token {
        let token = Token::new(
            TokenKind::Whitespace,
            text,
            self.reader.line(),
            self.reader.column(),
        );
        self.reader.forward();
        token
    }

    /// A backslash looks at the next character only. When the pair is a known escape both
    /// characters are consumed; otherwise the lookahead stays in place and lexing resumes on it.
    fn digest_backslash(&mut self) -> Token {
        let (line, column) = (self.reader.line(), self.reader.column());
        self.reader.forward();
        let lookahead = self.reader.peek();
        for (follower, escaped) in ESCAPES {
            if lookahead == Some(follower) {
                self.reader.forward();
                return Token::new(TokenKind::Escaped, escaped, line, column);
            }
        }
        Token::new(TokenKind::Symbol(Symbol::Backslash), BACKSLASH, line, column)
    }

    fn digest_symbol(&mut self, c: char) -> Token {
        let Some(symbol) = Symbol::of(c) else {
            return self.digest_unexpected(c);
        };
        let token = Token::new(
            TokenKind::Symbol(symbol),
            c,
            self.reader.line(),
            self.reader.column(),
        );
        self.reader.forward();
        token
    }

    fn digest_word(&mut self) -> Token {
        let (line, column) = (self.reader.line(), self.reader.column());
        let mut word = String::new();
        while let Some(c) = self.reader.peek() {
            if !is_word_character(c) {
                break;
            }
            word.push(c);
            self.reader.forward();
        }
        let kind = Keyword::of(&word).map_or(TokenKind::Identifier, TokenKind::Keyword);
        Token::new(kind, word, line, column)
    }

    fn digest_number(&mut self) -> Token {
        let (line, column) = (self.reader.line(), self.reader.column());
        let mut number = String::new();
        while let Some(c) = self.reader.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            number.push(c);
            self.reader.forward();
        }
        Token::new(TokenKind::IntLiteral, number, line, column)
    }

    fn digest_unexpected(&mut self, c: char) -> Token {
        let (line, column) = (self.reader.line(), self.reader.column());
        warn!("unexpected character {c:?} at {line}:{column}");
        self.reader.forward();
        Token::new(TokenKind::Error, c, line, column)
    }

    fn track_quote(&mut self, token: &Token) {
        let TokenKind::Symbol(symbol) = token.kind else {
            return;
        };
        if !symbol.is_quote() {
            return;
        }
        match self.open_quote {
            None => self.open_quote = Some(symbol),
            Some(open) if open == symbol => self.open_quote = None,
            Some(_) => {}
        }
    }
}

fn is_word_character(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '!' | '@' | '$')
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use test_log::test;

    use super::*;
    use crate::compiler::lexis::err::{LexError, LexErrorKind};

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|token| token.kind).collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|token| token.text.as_str()).collect()
    }

    #[test]
    fn digits_form_one_integer_literal() {
        let tokens = tokenize("123");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[0].text, "123");
    }

    #[test]
    fn keyword_needs_the_whole_run() {
        let tokens = tokenize("if");
        assert_eq!(kinds(&tokens), [TokenKind::Keyword(Keyword::If)]);

        let tokens = tokenize("ifx");
        assert_eq!(kinds(&tokens), [TokenKind::Identifier]);
        assert_eq!(tokens[0].text, "ifx");
    }

    #[test]
    fn word_runs_accept_sigils_but_stop_at_digits() {
        let tokens = tokenize("$total! x1");
        assert_eq!(texts(&tokens), ["$total!", "x", "1"]);
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::IntLiteral
            ]
        );
    }

    #[test]
    fn escape_pairs_become_one_token() {
        let tokens = tokenize(r"\n");
        assert_eq!(kinds(&tokens), [TokenKind::Escaped]);
        assert_eq!(tokens[0].text, r"\n");

        let tokens = tokenize(r#"\"\'"#);
        assert_eq!(kinds(&tokens), [TokenKind::Escaped, TokenKind::Escaped]);
        assert_eq!(texts(&tokens), [r#"\""#, r"\'"]);
    }

    #[test]
    fn unknown_escape_backs_off_to_a_plain_backslash() {
        let tokens = tokenize(r"\x");
        assert_eq!(
            kinds(&tokens),
            [TokenKind::Symbol(Symbol::Backslash), TokenKind::Identifier]
        );
        assert_eq!(texts(&tokens), ["\\", "x"]);

        let tokens = tokenize(r"\5;");
        assert_eq!(texts(&tokens), ["\\", "5", ";"]);
    }

    #[test]
    fn escape_only_takes_one_character_of_a_word() {
        let tokens = tokenize(r"\nabc");
        assert_eq!(kinds(&tokens), [TokenKind::Escaped, TokenKind::Identifier]);
        assert_eq!(texts(&tokens), [r"\n", "abc"]);
    }

    #[test]
    fn word_ending_on_backslash_still_sees_the_escape() {
        let tokens = tokenize(r"ab\nc");
        assert_eq!(texts(&tokens), ["ab", r"\n", "c"]);
    }

    #[test]
    fn trailing_backslash_is_kept() {
        let tokens = tokenize("a\\");
        assert_eq!(
            kinds(&tokens),
            [TokenKind::Identifier, TokenKind::Symbol(Symbol::Backslash)]
        );
    }

    #[test]
    fn whitespace_is_dropped_but_counts_lines() {
        let tokens = tokenize("int\tx\n\n  gets 5 ;");
        assert_eq!(texts(&tokens), ["int", "x", "gets", "5", ";"]);
        let lines: Vec<_> = tokens.iter().map(|token| token.line).collect();
        assert_eq!(lines, [1, 1, 3, 3, 3]);
        assert_eq!(tokens[2].column, 3);
    }

    #[test]
    fn lines_increase_once_per_newline() {
        let source = "a\nb c\n\n\nd\n";
        let tokens = tokenize(source);
        assert!(tokens.windows(2).all(|pair| pair[0].line <= pair[1].line));
        let last = tokens.last().map(|token| token.line);
        let before_d = &source[..source.find('d').unwrap()];
        let newlines_before_d = u32::try_from(before_d.matches('\n').count()).unwrap();
        assert_eq!(last, Some(1 + newlines_before_d));
    }

    #[test]
    fn operators_and_punctuation() {
        let tokens = tokenize("(a+b)*c/d-e=f<g>h,i:j.k{}");
        let symbols: Vec<_> = tokens
            .iter()
            .filter_map(|token| match token.kind {
                TokenKind::Symbol(symbol) => Some(symbol),
                _ => None,
            })
            .collect();
        assert_eq!(
            symbols,
            [
                Symbol::LeftParentheses,
                Symbol::Add,
                Symbol::RightParentheses,
                Symbol::Multiply,
                Symbol::Divide,
                Symbol::Subtract,
                Symbol::Equal,
                Symbol::LessThan,
                Symbol::GreaterThan,
                Symbol::Comma,
                Symbol::Colon,
                Symbol::Dot,
                Symbol::LeftBrace,
                Symbol::RightBrace,
            ]
        );
    }

    #[test]
    fn unclassified_characters_become_error_tokens() {
        let tokens = tokenize("a _ %b");
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::Identifier,
                TokenKind::Error,
                TokenKind::Error,
                TokenKind::Identifier
            ]
        );
        assert_eq!(
            LexError::collect(&tokens),
            [
                LexError {
                    kind: LexErrorKind::UnexpectedCharacter('_'),
                    line: 1,
                    column: 3,
                },
                LexError {
                    kind: LexErrorKind::UnexpectedCharacter('%'),
                    line: 1,
                    column: 5,
                },
            ]
        );
    }

    #[test]
    fn carriage_returns_are_whitespace() {
        let tokens = tokenize("a;\r\nb;");
        assert!(LexError::collect(&tokens).is_empty());
        assert_eq!(tokens[2].line, 2);
    }

    #[test]
    fn comment_skips_to_end_of_line() {
        let source = indoc! {"
            print 1; # print 2; _%
            print 3;
        "};
        let tokens = tokenize(source);
        assert_eq!(texts(&tokens), ["print", "1", ";", "#", "print", "3", ";"]);
        assert_eq!(tokens[4].line, 2);
    }

    #[test]
    fn comment_marker_inside_quotes_is_text() {
        let tokens = tokenize(r#"print "no # comment"; x"#);
        assert_eq!(
            texts(&tokens),
            ["print", "\"", "no", "#", "comment", "\"", ";", "x"]
        );
    }

    #[test]
    fn escaped_quote_does_not_close_a_string() {
        let tokens = tokenize(r##""a\"#b" # gone"##);
        assert_eq!(texts(&tokens), ["\"", "a", r#"\""#, "#", "b", "\"", "#"]);
    }

    #[test]
    fn tokenizing_is_repeatable() {
        let source = "func f(int a) { return a * 2; } print f(3); \\q";
        assert_eq!(tokenize(source), tokenize(source));
    }
}
