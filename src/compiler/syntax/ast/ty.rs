use std::fmt::{self, Display};

use crate::compiler::lexis::token::Keyword;

/// Value type hint attached to expressions for a later semantic pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Unknown,
    Int,
    Float,
    Bool,
    String,
}

impl ValueType {
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueType::Int | ValueType::Float)
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueType::Unknown => "unknown",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::String => "string",
        };
        write!(f, "{s}")
    }
}

impl TryFrom<Keyword> for ValueType {
    type Error = Keyword;

    fn try_from(keyword: Keyword) -> Result<ValueType, Keyword> {
        match keyword {
            Keyword::Int => Ok(ValueType::Int),
            Keyword::Float => Ok(ValueType::Float),
            Keyword::Bool => Ok(ValueType::Bool),
            Keyword::String => Ok(ValueType::String),
            keyword => Err(keyword),
        }
    }
}
