use std::fmt;

use crate::util::pretty_format::{indent, PrettyFormat};

use super::crumb::{Identifier, Parameter};
use super::expression::Expression;
use super::ty::ValueType;

#[derive(Debug, Clone, PartialEq)]
pub struct IfDetail {
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseDetail {
    pub body: Box<Statement>,
}

impl ElseDetail {
    /// `else if ...` chains keep accepting further `else` statements.
    #[must_use]
    pub fn is_else_if(&self) -> bool {
        matches!(self.body.as_ref(), Statement::If(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileDetail(pub Expression, pub Box<Statement>);

#[derive(Debug, Clone, PartialEq)]
pub struct ForDetail {
    pub variable: Identifier,
    pub iterable: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclDetail {
    pub value_type: ValueType,
    pub identifier: Identifier,
    pub initializer: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDeclDetail {
    pub identifier: Identifier,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetsDetail {
    pub value_type: ValueType,
    pub target: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Vec<Statement>),
    Expression(Expression),
    Return(Option<Expression>),
    If(IfDetail),
    Else(ElseDetail),
    While(WhileDetail),
    For(ForDetail),
    VarDecl(VarDeclDetail),
    FuncDecl(FuncDeclDetail),
    Print(Expression),
    Gets(GetsDetail),
}

impl Statement {
    /// Whether an `else` may directly follow this statement.
    #[must_use]
    pub fn accepts_else(&self) -> bool {
        match self {
            Statement::If(_) => true,
            Statement::Else(detail) => detail.is_else_if(),
            _ => false,
        }
    }
}

impl PrettyFormat for Statement {
    fn pretty_format(&self, f: &mut fmt::Formatter, indentation_num: usize) -> fmt::Result {
        let indentation = indent(indentation_num);
        match self {
            Statement::Block(statements) => {
                writeln!(f, "{indentation}Block")?;
                statements
                    .iter()
                    .try_for_each(|statement| statement.pretty_format(f, indentation_num + 1))?;
            }
            Statement::Expression(expression) => {
                expression.pretty_format(f, indentation_num)?;
            }
            Statement::Return(expression) => {
                writeln!(f, "{indentation}Return")?;
                if let Some(expression) = expression {
                    expression.pretty_format(f, indentation_num + 1)?;
                }
            }
            Statement::If(IfDetail { condition, body }) => {
                writeln!(f, "{indentation}If")?;
                condition.pretty_format(f, indentation_num + 1)?;
                writeln!(f, "{indentation}Then")?;
                body.pretty_format(f, indentation_num + 1)?;
            }
            Statement::Else(ElseDetail { body }) => {
                writeln!(f, "{indentation}Else")?;
                body.pretty_format(f, indentation_num + 1)?;
            }
            Statement::While(WhileDetail(condition, body)) => {
                writeln!(f, "{indentation}While")?;
                condition.pretty_format(f, indentation_num + 1)?;
                writeln!(f, "{indentation}Do")?;
                body.pretty_format(f, indentation_num + 1)?;
            }
            Statement::For(ForDetail {
                variable,
                iterable,
                body,
            }) => {
                writeln!(f, "{indentation}For {variable} In")?;
                iterable.pretty_format(f, indentation_num + 1)?;
                writeln!(f, "{indentation}Do")?;
                body.pretty_format(f, indentation_num + 1)?;
            }
            Statement::VarDecl(VarDeclDetail {
                value_type,
                identifier,
                initializer,
            }) => {
                writeln!(f, "{indentation}Declare {value_type} {identifier}")?;
                initializer.pretty_format(f, indentation_num + 1)?;
            }
            Statement::FuncDecl(FuncDeclDetail {
                identifier,
                parameters,
                body,
            }) => {
                let parameters = parameters
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(f, "{indentation}Func {identifier}({parameters})")?;
                body.iter()
                    .try_for_each(|statement| statement.pretty_format(f, indentation_num + 1))?;
            }
            Statement::Print(expression) => {
                writeln!(f, "{indentation}Print")?;
                expression.pretty_format(f, indentation_num + 1)?;
            }
            Statement::Gets(GetsDetail { value_type, target }) => match target {
                Some(target) => writeln!(f, "{indentation}Gets {value_type} {target}")?,
                None => writeln!(f, "{indentation}Gets {value_type}")?,
            },
        };
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pretty_format(f, 0)
    }
}
