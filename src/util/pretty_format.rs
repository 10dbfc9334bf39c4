use std::fmt;

use crate::constants::common::INDENTATION;

/// Tree dump with one node per line, children one level deeper than their parent.
pub trait PrettyFormat {
    /// # Errors
    fn pretty_format(&self, f: &mut fmt::Formatter, indentation_num: usize) -> fmt::Result;
}

#[must_use]
pub fn indent(n: usize) -> String {
    INDENTATION.repeat(n)
}
