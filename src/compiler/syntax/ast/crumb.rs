use std::fmt::{self, Display};

use super::ty::ValueType;

pub type Identifier = String;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter(pub ValueType, pub Identifier);

impl Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Parameter(parameter_type, identifier) = self;
        write!(f, "{parameter_type} {identifier}")
    }
}

/// What the symbol table knows about a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Variable(ValueType),
    Function,
}
