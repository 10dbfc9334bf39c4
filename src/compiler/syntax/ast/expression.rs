use std::fmt::{self, Display};

use crate::util::pretty_format::{indent, PrettyFormat};

use super::crumb::Identifier;
use super::operator::{Binary, Unary};
use super::ty::ValueType;

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    IntLiteral(i64),
    FloatLiteral(f64),
    BoolLiteral(bool),
    StringLiteral(String),
    FunctionName(Identifier),

    Unary(Unary, Box<Expression>),
    Binary(Binary, Box<Expression>, Box<Expression>),
    Assignment(Box<Expression>, Box<Expression>),

    Variable(Identifier),
    Call(Identifier, Vec<Expression>),
    Access(Box<Expression>, Box<Expression>),
}

/// An expression node. `value_type`, `assignable` and `constant` are hints filled in while
/// parsing; nothing checks them before a semantic pass does.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub value_type: ValueType,
    pub assignable: bool,
    pub constant: bool,
}

impl Expression {
    fn new(kind: ExpressionKind, value_type: ValueType, assignable: bool, constant: bool) -> Self {
        Expression {
            kind,
            value_type,
            assignable,
            constant,
        }
    }

    fn literal(kind: ExpressionKind, value_type: ValueType) -> Self {
        Expression::new(kind, value_type, false, true)
    }

    #[must_use]
    pub fn int(literal: i64) -> Self {
        Expression::literal(ExpressionKind::IntLiteral(literal), ValueType::Int)
    }

    #[must_use]
    pub fn float(literal: f64) -> Self {
        Expression::literal(ExpressionKind::FloatLiteral(literal), ValueType::Float)
    }

    #[must_use]
    pub fn bool(literal: bool) -> Self {
        Expression::literal(ExpressionKind::BoolLiteral(literal), ValueType::Bool)
    }

    #[must_use]
    pub fn string(literal: String) -> Self {
        Expression::literal(ExpressionKind::StringLiteral(literal), ValueType::String)
    }

    #[must_use]
    pub fn function_name(identifier: Identifier) -> Self {
        Expression::new(
            ExpressionKind::FunctionName(identifier),
            ValueType::Unknown,
            false,
            false,
        )
    }

    #[must_use]
    pub fn variable(identifier: Identifier, value_type: ValueType) -> Self {
        Expression::new(ExpressionKind::Variable(identifier), value_type, true, false)
    }

    #[must_use]
    pub fn unary(operator: Unary, operand: Expression) -> Self {
        let value_type = match operator {
            Unary::Negative if operand.value_type.is_numeric() => operand.value_type,
            Unary::Negative => ValueType::Unknown,
        };
        let constant = operand.constant;
        Expression::new(
            ExpressionKind::Unary(operator, Box::new(operand)),
            value_type,
            false,
            constant,
        )
    }

    #[must_use]
    pub fn binary(operator: Binary, left: Expression, right: Expression) -> Self {
        let value_type = if operator.is_predicate() {
            ValueType::Bool
        } else if left.value_type != right.value_type {
            ValueType::Unknown
        } else if left.value_type.is_numeric()
            || (operator == Binary::Add && left.value_type == ValueType::String)
        {
            left.value_type
        } else {
            ValueType::Unknown
        };
        let constant = left.constant && right.constant;
        Expression::new(
            ExpressionKind::Binary(operator, Box::new(left), Box::new(right)),
            value_type,
            false,
            constant,
        )
    }

    #[must_use]
    pub fn assignment(target: Expression, value: Expression) -> Self {
        let value_type = value.value_type;
        Expression::new(
            ExpressionKind::Assignment(Box::new(target), Box::new(value)),
            value_type,
            false,
            false,
        )
    }

    #[must_use]
    pub fn call(callee: Identifier, arguments: Vec<Expression>) -> Self {
        Expression::new(
            ExpressionKind::Call(callee, arguments),
            ValueType::Unknown,
            false,
            false,
        )
    }

    #[must_use]
    pub fn access(object: Expression, member: Expression) -> Self {
        Expression::new(
            ExpressionKind::Access(Box::new(object), Box::new(member)),
            ValueType::Unknown,
            true,
            false,
        )
    }
}

impl PrettyFormat for Expression {
    fn pretty_format(&self, f: &mut fmt::Formatter, indentation_num: usize) -> fmt::Result {
        let indentation = indent(indentation_num);
        match &self.kind {
            ExpressionKind::IntLiteral(literal) => {
                writeln!(f, "{indentation}Int {literal}")?;
            }
            ExpressionKind::FloatLiteral(literal) => {
                writeln!(f, "{indentation}Float {literal}")?;
            }
            ExpressionKind::BoolLiteral(literal) => {
                writeln!(f, "{indentation}Bool {literal}")?;
            }
            ExpressionKind::StringLiteral(literal) => {
                writeln!(f, "{indentation}String {literal:?}")?;
            }
            ExpressionKind::FunctionName(identifier) => {
                writeln!(f, "{indentation}Function {identifier}")?;
            }
            ExpressionKind::Variable(identifier) => {
                writeln!(f, "{indentation}Variable {identifier}: {}", self.value_type)?;
            }
            ExpressionKind::Unary(operator, operand) => {
                writeln!(f, "{indentation}{operator}")?;
                operand.pretty_format(f, indentation_num + 1)?;
            }
            ExpressionKind::Binary(operator, left, right) => {
                writeln!(f, "{indentation}{operator}")?;
                left.pretty_format(f, indentation_num + 1)?;
                right.pretty_format(f, indentation_num + 1)?;
            }
            ExpressionKind::Assignment(target, value) => {
                writeln!(f, "{indentation}Assign")?;
                target.pretty_format(f, indentation_num + 1)?;
                value.pretty_format(f, indentation_num + 1)?;
            }
            ExpressionKind::Call(callee, arguments) => {
                writeln!(f, "{indentation}Call {callee}")?;
                for argument in arguments {
                    argument.pretty_format(f, indentation_num + 1)?;
                }
            }
            ExpressionKind::Access(object, member) => {
                writeln!(f, "{indentation}Access")?;
                object.pretty_format(f, indentation_num + 1)?;
                member.pretty_format(f, indentation_num + 1)?;
            }
        }
        Ok(())
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pretty_format(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use test_log::test;

    use super::*;

    #[test]
    fn literals_are_constant_and_typed() {
        let literal = Expression::int(4);
        assert!(literal.constant);
        assert!(!literal.assignable);
        assert_eq!(literal.value_type, ValueType::Int);
        assert_eq!(Expression::string("hi".into()).value_type, ValueType::String);
    }

    #[test]
    fn binary_hints_follow_operands() {
        let sum = Expression::binary(Binary::Add, Expression::int(1), Expression::int(2));
        assert_eq!(sum.value_type, ValueType::Int);
        assert!(sum.constant);

        let mixed = Expression::binary(
            Binary::Multiply,
            Expression::int(1),
            Expression::variable("x".into(), ValueType::Float),
        );
        assert_eq!(mixed.value_type, ValueType::Unknown);
        assert!(!mixed.constant);

        let joined = Expression::binary(
            Binary::Add,
            Expression::string("a".into()),
            Expression::string("b".into()),
        );
        assert_eq!(joined.value_type, ValueType::String);

        let test = Expression::binary(
            Binary::LessThan,
            Expression::variable("x".into(), ValueType::Unknown),
            Expression::int(3),
        );
        assert_eq!(test.value_type, ValueType::Bool);
    }

    #[test]
    fn only_places_are_assignable() {
        assert!(Expression::variable("x".into(), ValueType::Int).assignable);
        let access = Expression::access(
            Expression::variable("point".into(), ValueType::Unknown),
            Expression::variable("x".into(), ValueType::Unknown),
        );
        assert!(access.assignable);
        assert!(!Expression::call("f".into(), Vec::new()).assignable);
        assert!(!Expression::function_name("f".into()).constant);
    }

    #[test]
    fn negation_keeps_numeric_type() {
        let negative = Expression::unary(Unary::Negative, Expression::float(1.5));
        assert_eq!(negative.value_type, ValueType::Float);
        assert!(negative.constant);
        let odd = Expression::unary(Unary::Negative, Expression::bool(true));
        assert_eq!(odd.value_type, ValueType::Unknown);
    }

    #[test]
    fn pretty_format_nests_children() {
        let expression = Expression::assignment(
            Expression::variable("x".into(), ValueType::Int),
            Expression::binary(
                Binary::Add,
                Expression::int(5),
                Expression::call("f".into(), vec![Expression::string("s".into())]),
            ),
        );
        let expected = indoc! {r#"
            Assign
                Variable x: int
                Add
                    Int 5
                    Call f
                        String "s"
        "#};
        assert_eq!(expression.to_string(), expected);
    }
}
