use compiler::err::CompileError;
use compiler::lexis::err::LexError;
use compiler::syntax::ast::Program;

pub mod compiler;
pub mod constants;
pub mod util;

pub use compiler::lexis::lexer::tokenize;
pub use compiler::syntax::parser::{parse, Parsed};

/// Tokenizes and parses `code` in one go.
///
/// # Errors
/// [`CompileError::Lex`] when the source holds characters no lexical rule accepts, otherwise
/// [`CompileError::Parse`] with one diagnostic per statement that failed to parse.
pub fn compile(code: &str) -> Result<Program, CompileError> {
    let tokens = tokenize(code);
    let lex_errors = LexError::collect(&tokens);
    if !lex_errors.is_empty() {
        return Err(CompileError::Lex(lex_errors));
    }
    parse(&tokens).into_result()
}
