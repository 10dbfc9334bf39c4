use const_format::formatcp;

pub const LANGUAGE: &str = "tiny";
pub const SOURCE_EXT: &str = formatcp!(".{LANGUAGE}");

pub const FIRST_LINE: u32 = 1;
pub const FIRST_COLUMN: u32 = 1;

pub const INDENTATION: &str = "    ";

/// Deepest nesting of statements and expressions the parser descends into.
pub const MAX_NESTING_DEPTH: usize = 96;

pub const BACKSLASH: char = '\\';
pub const COMMENT_MARKER: char = '#';

pub const ESCAPED_NEWLINE: &str = formatcp!("{BACKSLASH}n");
pub const ESCAPED_QUOTE: &str = formatcp!("{BACKSLASH}'");
pub const ESCAPED_DOUBLE_QUOTE: &str = formatcp!("{BACKSLASH}\"");

/// Escapes the lexer resolves, keyed by the character that follows the backslash.
pub const ESCAPES: [(char, &str); 3] = [
    ('n', ESCAPED_NEWLINE),
    ('\'', ESCAPED_QUOTE),
    ('"', ESCAPED_DOUBLE_QUOTE),
];
