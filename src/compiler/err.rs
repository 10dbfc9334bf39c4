use std::fmt::Display;

use super::lexis::err::LexError;
use super::syntax::err::ParseError;

/// Internal invariant violations. These are compiler bugs, never user errors.
#[macro_export]
macro_rules! sys_error {
    ($($arg:tt)*) => {
        panic!($($arg)*)
    };
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("{}", join_lines(.0))]
    Lex(Vec<LexError>),
    #[error("{}", join_lines(.0))]
    Parse(Vec<ParseError>),
}

fn join_lines<I>(errors: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    errors
        .into_iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
