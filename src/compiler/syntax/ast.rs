use std::fmt::{self, Display};

use crate::util::pretty_format::PrettyFormat;

use self::statement::Statement;

pub mod crumb;
pub mod expression;
pub mod operator;
pub mod statement;
pub mod ty;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl PrettyFormat for Program {
    fn pretty_format(&self, f: &mut fmt::Formatter, indentation_num: usize) -> fmt::Result {
        self.statements
            .iter()
            .try_for_each(|statement| statement.pretty_format(f, indentation_num))
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pretty_format(f, 0)
    }
}
