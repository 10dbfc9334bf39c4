use std::fmt::Display;
use std::fmt::{self};

use crate::compiler::lexis::token::{Keyword, Symbol, TokenKind};

/// Binding tiers of binary operators, loosest first:
/// - `or`
/// - `and`
/// - `=` `<` `>`
/// - `+` `-`
/// - `*` `/`
///
/// Every tier folds left-associatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    LogicalOr,
    LogicalAnd,
    Comparison,
    Additive,
    Multiplicative,
}

impl Precedence {
    pub const LOWEST: Precedence = Precedence::LogicalOr;

    /// The next tighter tier, `None` above the multiplicative one.
    #[must_use]
    pub fn tighter(self) -> Option<Precedence> {
        match self {
            Precedence::LogicalOr => Some(Precedence::LogicalAnd),
            Precedence::LogicalAnd => Some(Precedence::Comparison),
            Precedence::Comparison => Some(Precedence::Additive),
            Precedence::Additive => Some(Precedence::Multiplicative),
            Precedence::Multiplicative => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unary {
    Negative,
}

impl Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unary::Negative => write!(f, "Negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binary {
    Add,
    Subtract,
    Multiply,
    Divide,

    Equal,
    LessThan,
    GreaterThan,

    LogicalAnd,
    LogicalOr,
}

impl Binary {
    #[must_use]
    pub fn of(kind: TokenKind) -> Option<Binary> {
        let operator = match kind {
            TokenKind::Symbol(Symbol::Add) => Binary::Add,
            TokenKind::Symbol(Symbol::Subtract) => Binary::Subtract,
            TokenKind::Symbol(Symbol::Multiply) => Binary::Multiply,
            TokenKind::Symbol(Symbol::Divide) => Binary::Divide,
            TokenKind::Symbol(Symbol::Equal) => Binary::Equal,
            TokenKind::Symbol(Symbol::LessThan) => Binary::LessThan,
            TokenKind::Symbol(Symbol::GreaterThan) => Binary::GreaterThan,
            TokenKind::Keyword(Keyword::And) => Binary::LogicalAnd,
            TokenKind::Keyword(Keyword::Or) => Binary::LogicalOr,
            _ => return None,
        };
        Some(operator)
    }

    #[must_use]
    pub fn precedence(self) -> Precedence {
        match self {
            Binary::Multiply | Binary::Divide => Precedence::Multiplicative,
            Binary::Add | Binary::Subtract => Precedence::Additive,
            Binary::Equal | Binary::LessThan | Binary::GreaterThan => Precedence::Comparison,
            Binary::LogicalAnd => Precedence::LogicalAnd,
            Binary::LogicalOr => Precedence::LogicalOr,
        }
    }

    /// Comparisons and logic yield `bool` whatever their operands are.
    #[must_use]
    pub fn is_predicate(self) -> bool {
        matches!(
            self.precedence(),
            Precedence::Comparison | Precedence::LogicalAnd | Precedence::LogicalOr
        )
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Binary::Add => "Add",
            Binary::Subtract => "Subtract",
            Binary::Multiply => "Multiply",
            Binary::Divide => "Divide",
            Binary::Equal => "Equal",
            Binary::LessThan => "LessThan",
            Binary::GreaterThan => "GreaterThan",
            Binary::LogicalAnd => "LogicalAnd",
            Binary::LogicalOr => "LogicalOr",
        };
        write!(f, "{s}")
    }
}
