use helper::test_with;
use indoc::indoc;
use test_log::test;
use tinyscript::compiler::err::CompileError;
use tinyscript::compiler::lexis::err::{LexError, LexErrorKind};
use tinyscript::{compile, parse, tokenize};

mod helper;

#[test]
fn test_minimal() {
    test_with("minimal");
}

#[test]
fn test_hello_world() {
    test_with("hello_world");
}

#[test]
fn test_fibonacci() {
    test_with("fibonacci");
}

#[test]
fn test_control_flow() {
    test_with("control_flow");
}

#[test]
fn test_diagnostics() {
    test_with("diagnostics");
}

#[test]
fn test_lex_error() {
    test_with("lex_error");
}

#[test]
fn test_lex_errors_stop_the_pipeline() {
    let error = compile("int x gets 1 ~ 2;\nprint x ^ 3;").unwrap_err();
    assert_eq!(
        error,
        CompileError::Lex(vec![
            LexError {
                kind: LexErrorKind::UnexpectedCharacter('~'),
                line: 1,
                column: 14,
            },
            LexError {
                kind: LexErrorKind::UnexpectedCharacter('^'),
                line: 2,
                column: 9,
            },
        ])
    );
}

#[test]
fn test_parse_continues_past_bad_statements() {
    let tokens = tokenize(indoc! {"
        int 5 gets x;
        string name gets 'tiny';
        print (name;
        print name;
    "});
    let parsed = parse(&tokens);
    assert_eq!(parsed.statements.len(), 2);
    let messages = parsed
        .errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_eq!(
        messages,
        [
            "line 1: expected identifier after type, found `5`",
            "line 3: unclosed group, expected `)`, found end of statement",
        ]
    );
}
