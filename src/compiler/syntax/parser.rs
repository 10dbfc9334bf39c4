use std::iter;

use log::{debug, trace};

use crate::compiler::context::Context;
use crate::compiler::err::CompileError;
use crate::compiler::lexis::token::{Keyword, Symbol, Token, TokenKind};
use crate::compiler::scope::Tag;
use crate::constants::common::{
    ESCAPED_DOUBLE_QUOTE, ESCAPED_NEWLINE, ESCAPED_QUOTE, FIRST_COLUMN, MAX_NESTING_DEPTH,
};

use super::{
    ast::{
        crumb::{Binding, Parameter},
        expression::Expression,
        operator::{Binary, Precedence, Unary},
        statement::{
            ElseDetail, ForDetail, FuncDeclDetail, GetsDetail, IfDetail, Statement, VarDeclDetail,
            WhileDetail,
        },
        ty::ValueType,
        Program,
    },
    cursor::TokenCursor,
    err::{ParseError, ParseErrorKind},
    slicer::Slicer,
};

/// Outcome of a parse run: every statement that parsed, plus one diagnostic per statement
/// that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub statements: Vec<Statement>,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    /// # Errors
    /// Returns every collected diagnostic when at least one statement failed to parse.
    pub fn into_result(self) -> Result<Program, CompileError> {
        if self.errors.is_empty() {
            Ok(Program {
                statements: self.statements,
            })
        } else {
            Err(CompileError::Parse(self.errors))
        }
    }
}

/// Builds statements from a token stream. Never aborts on malformed input: a statement that
/// fails is dropped, its diagnostic recorded, and parsing resumes at the next statement.
#[must_use]
pub fn parse(tokens: &[Token]) -> Parsed {
    let mut parser = Parser::new();
    let statements = parser.parse_statements(tokens);
    Parsed {
        statements,
        errors: parser.context.take_errors(),
    }
}

pub struct Parser {
    context: Context,
    depth: usize,
}

impl Parser {
    #[must_use]
    pub fn new() -> Parser {
        Parser {
            context: Context::new(),
            depth: 0,
        }
    }

    fn parse_statements(&mut self, tokens: &[Token]) -> Vec<Statement> {
        let mut statements: Vec<Statement> = Vec::new();
        // Follows the previous slice, not the previous statement that parsed.
        let mut accepts_else = false;
        for slice in Slicer::new(tokens) {
            match slice.and_then(|slice| self.parse_slice(slice, accepts_else)) {
                Ok(statement) => {
                    debug!("parsed statement\n{statement}");
                    accepts_else = statement.accepts_else();
                    statements.push(statement);
                }
                Err(error) => {
                    accepts_else = false;
                    self.context.report(error);
                }
            }
        }
        statements
    }

    fn parse_slice(
        &mut self,
        slice: &[Token],
        accepts_else: bool,
    ) -> Result<Statement, ParseError> {
        trace!("parsing slice of {} tokens", slice.len());
        let mut cursor = TokenCursor::new(slice);
        if cursor.match_keyword(Keyword::Else) && !accepts_else {
            return Err(ParseError::new(ParseErrorKind::ElseWithoutIf, cursor.peek()));
        }
        let statement = self.parse_statement(&mut cursor)?;
        if !cursor.is_exhausted() {
            return Err(ParseError::new(ParseErrorKind::UnexpectedToken, cursor.peek()));
        }
        Ok(statement)
    }

    fn within_scope<T>(&mut self, tag: Tag, f: impl FnOnce(&mut Parser) -> T) -> T {
        self.context.enter(tag.clone());
        let result = f(self);
        self.context.leave(tag);
        result
    }

    /// Runs `f` one nesting level deeper, refusing to go past [`MAX_NESTING_DEPTH`].
    fn nested<'a, T>(
        &mut self,
        cursor: &mut TokenCursor<'a>,
        f: impl FnOnce(&mut Parser, &mut TokenCursor<'a>) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new(ParseErrorKind::NestingTooDeep, cursor.peek()));
        }
        self.depth += 1;
        let result = f(self, cursor);
        self.depth -= 1;
        result
    }

    fn parse_statement(&mut self, cursor: &mut TokenCursor) -> Result<Statement, ParseError> {
        self.nested(cursor, |parser, cursor| parser.dispatch_statement(cursor))
    }

    fn dispatch_statement(&mut self, cursor: &mut TokenCursor) -> Result<Statement, ParseError> {
        let kind = cursor.peek().kind;
        match kind {
            TokenKind::Keyword(keyword) if keyword.is_type() => {
                Ok(Statement::VarDecl(self.parse_var_decl_statement(cursor)?))
            }
            TokenKind::Keyword(Keyword::If) => Ok(Statement::If(self.parse_if_statement(cursor)?)),
            TokenKind::Keyword(Keyword::Else) => {
                Ok(Statement::Else(self.parse_else_statement(cursor)?))
            }
            TokenKind::Keyword(Keyword::While) => {
                Ok(Statement::While(self.parse_while_statement(cursor)?))
            }
            TokenKind::Keyword(Keyword::For) => {
                Ok(Statement::For(self.parse_for_statement(cursor)?))
            }
            TokenKind::Keyword(Keyword::Func) => {
                Ok(Statement::FuncDecl(self.parse_func_decl_statement(cursor)?))
            }
            TokenKind::Keyword(Keyword::Return) => self.parse_return_statement(cursor),
            TokenKind::Keyword(Keyword::Print) => {
                cursor.digest_keyword(Keyword::Print)?;
                Ok(Statement::Print(self.parse_expression(cursor)?))
            }
            TokenKind::Keyword(Keyword::Gets) => {
                Ok(Statement::Gets(Parser::parse_gets_statement(cursor)?))
            }
            TokenKind::Symbol(Symbol::LeftBrace) => Ok(Statement::Block(self.parse_block(cursor)?)),
            TokenKind::Eof => Err(ParseError::new(
                ParseErrorKind::UnexpectedEndOfStatement,
                cursor.peek(),
            )),
            _ => Ok(Statement::Expression(self.parse_expression(cursor)?)),
        }
    }

    /// A `{ ... }` block: its inner tokens are sliced again and each nested statement parsed
    /// on its own, so one broken statement does not take the block down with it.
    fn parse_block(&mut self, cursor: &mut TokenCursor) -> Result<Vec<Statement>, ParseError> {
        if !cursor.match_symbol(Symbol::LeftBrace) {
            return Err(ParseError::new(
                ParseErrorKind::MissingSymbol(Symbol::LeftBrace),
                cursor.peek(),
            ));
        }
        let block = match Slicer::new(cursor.rest()).next() {
            Some(Ok(block)) => block,
            Some(Err(error)) => return Err(error),
            None => return Err(ParseError::new(ParseErrorKind::UnclosedBlock, cursor.peek())),
        };
        let Some((_, inner)) = block
            .split_last()
            .filter(|(closing, _)| closing.is_symbol(Symbol::RightBrace))
        else {
            return Err(ParseError::new(ParseErrorKind::UnclosedBlock, cursor.peek()));
        };
        cursor.advance(block.len());
        let inner = inner.get(1..).unwrap_or_default();
        Ok(self.within_scope(Tag::Block, |parser| parser.parse_statements(inner)))
    }

    /// The statement controlled by `if`, `else`, `while` or `for`.
    fn parse_body(&mut self, cursor: &mut TokenCursor) -> Result<Box<Statement>, ParseError> {
        if cursor.match_keyword(Keyword::Else) {
            return Err(ParseError::new(ParseErrorKind::ElseWithoutIf, cursor.peek()));
        }
        Ok(Box::new(self.parse_statement(cursor)?))
    }

    fn parse_type(cursor: &mut TokenCursor) -> Result<ValueType, ParseError> {
        let token = cursor.peek();
        let value_type = match token.kind {
            TokenKind::Keyword(keyword) => ValueType::try_from(keyword).ok(),
            _ => None,
        };
        let Some(value_type) = value_type else {
            return Err(ParseError::new(ParseErrorKind::MissingType, token));
        };
        cursor.next();
        Ok(value_type)
    }

    fn parse_var_decl_statement(
        &mut self,
        cursor: &mut TokenCursor,
    ) -> Result<VarDeclDetail, ParseError> {
        let value_type = Parser::parse_type(cursor)?;
        let identifier = cursor.digest_identifier("type")?;
        cursor.digest_keyword(Keyword::Gets)?;
        let initializer = self.parse_expression(cursor)?;
        self.context
            .declare(identifier.clone(), Binding::Variable(value_type));
        Ok(VarDeclDetail {
            value_type,
            identifier,
            initializer,
        })
    }

    fn parse_if_statement(&mut self, cursor: &mut TokenCursor) -> Result<IfDetail, ParseError> {
        cursor.digest_keyword(Keyword::If)?;
        let condition = self.parse_expression(cursor)?;
        let body = self.parse_body(cursor)?;
        Ok(IfDetail { condition, body })
    }

    fn parse_else_statement(
        &mut self,
        cursor: &mut TokenCursor,
    ) -> Result<ElseDetail, ParseError> {
        cursor.digest_keyword(Keyword::Else)?;
        let body = self.parse_body(cursor)?;
        Ok(ElseDetail { body })
    }

    fn parse_while_statement(
        &mut self,
        cursor: &mut TokenCursor,
    ) -> Result<WhileDetail, ParseError> {
        cursor.digest_keyword(Keyword::While)?;
        let condition = self.parse_expression(cursor)?;
        let body = self.parse_body(cursor)?;
        Ok(WhileDetail(condition, body))
    }

    fn parse_for_statement(&mut self, cursor: &mut TokenCursor) -> Result<ForDetail, ParseError> {
        cursor.digest_keyword(Keyword::For)?;
        let variable = cursor.digest_identifier("for")?;
        cursor.digest_keyword(Keyword::In)?;
        let iterable = self.parse_expression(cursor)?;
        let body = self.within_scope(Tag::Loop, |parser| {
            parser
                .context
                .declare(variable.clone(), Binding::Variable(ValueType::Unknown));
            parser.parse_body(cursor)
        })?;
        Ok(ForDetail {
            variable,
            iterable,
            body,
        })
    }

    fn parse_function_parameters(
        cursor: &mut TokenCursor,
    ) -> Result<Vec<Parameter>, ParseError> {
        cursor.digest_symbol(Symbol::LeftParentheses)?;
        if cursor.expect_symbol(Symbol::RightParentheses) {
            return Ok(Vec::new());
        }
        let mut parameters = Vec::new();
        loop {
            let parameter_type = Parser::parse_type(cursor)?;
            let identifier = cursor.digest_identifier("parameter type")?;
            parameters.push(Parameter(parameter_type, identifier));
            if !cursor.expect_symbol(Symbol::Comma) {
                break;
            }
        }
        cursor.digest_symbol(Symbol::RightParentheses)?;
        Ok(parameters)
    }

    fn parse_func_decl_statement(
        &mut self,
        cursor: &mut TokenCursor,
    ) -> Result<FuncDeclDetail, ParseError> {
        cursor.digest_keyword(Keyword::Func)?;
        let identifier = cursor.digest_identifier("func")?;
        let parameters = Parser::parse_function_parameters(cursor)?;
        self.context.declare(identifier.clone(), Binding::Function);
        let body = self.within_scope(Tag::Function(identifier.clone()), |parser| {
            for Parameter(parameter_type, name) in &parameters {
                parser
                    .context
                    .declare(name.clone(), Binding::Variable(*parameter_type));
            }
            parser.parse_block(cursor)
        })?;
        Ok(FuncDeclDetail {
            identifier,
            parameters,
            body,
        })
    }

    fn parse_return_statement(
        &mut self,
        cursor: &mut TokenCursor,
    ) -> Result<Statement, ParseError> {
        cursor.digest_keyword(Keyword::Return)?;
        if cursor.is_exhausted() {
            return Ok(Statement::Return(None));
        }
        Ok(Statement::Return(Some(self.parse_expression(cursor)?)))
    }

    fn parse_gets_statement(cursor: &mut TokenCursor) -> Result<GetsDetail, ParseError> {
        cursor.digest_keyword(Keyword::Gets)?;
        let value_type = Parser::parse_type(cursor)?;
        let target = if cursor.peek().kind == TokenKind::Identifier {
            Some(cursor.digest_identifier("gets")?)
        } else {
            None
        };
        Ok(GetsDetail { value_type, target })
    }

    fn parse_expression(&mut self, cursor: &mut TokenCursor) -> Result<Expression, ParseError> {
        self.nested(cursor, |parser, cursor| {
            parser.parse_assignment_expression(cursor)
        })
    }

    fn parse_assignment_expression(
        &mut self,
        cursor: &mut TokenCursor,
    ) -> Result<Expression, ParseError> {
        let target = self.parse_binary_expression(cursor, Precedence::LOWEST)?;
        if !cursor.expect_keyword(Keyword::Gets) {
            return Ok(target);
        }
        let value = self.parse_expression(cursor)?;
        Ok(Expression::assignment(target, value))
    }

    /// One precedence tier: operands come from the next tighter tier and fold to the left.
    fn parse_binary_expression(
        &mut self,
        cursor: &mut TokenCursor,
        precedence: Precedence,
    ) -> Result<Expression, ParseError> {
        let mut lhs = self.parse_operand(cursor, precedence)?;
        while let Some(operator) =
            Binary::of(cursor.peek().kind).filter(|operator| operator.precedence() == precedence)
        {
            cursor.next();
            let rhs = self.parse_operand(cursor, precedence)?;
            lhs = Expression::binary(operator, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_operand(
        &mut self,
        cursor: &mut TokenCursor,
        precedence: Precedence,
    ) -> Result<Expression, ParseError> {
        match precedence.tighter() {
            Some(tighter) => self.parse_binary_expression(cursor, tighter),
            None => self.parse_unary_expression(cursor),
        }
    }

    fn parse_unary_expression(
        &mut self,
        cursor: &mut TokenCursor,
    ) -> Result<Expression, ParseError> {
        if cursor.expect_symbol(Symbol::Subtract) {
            let operand =
                self.nested(cursor, |parser, cursor| parser.parse_unary_expression(cursor))?;
            return Ok(Expression::unary(Unary::Negative, operand));
        }
        self.parse_access_expression(cursor)
    }

    fn parse_access_expression(
        &mut self,
        cursor: &mut TokenCursor,
    ) -> Result<Expression, ParseError> {
        let mut object = self.parse_primary(cursor)?;
        while cursor.expect_symbol(Symbol::Dot) {
            let member = self.parse_member(cursor)?;
            object = Expression::access(object, member);
        }
        Ok(object)
    }

    /// Members are not resolved against the symbol table.
    fn parse_member(&mut self, cursor: &mut TokenCursor) -> Result<Expression, ParseError> {
        let identifier = cursor.digest_identifier(".")?;
        if cursor.match_symbol(Symbol::LeftParentheses) {
            let arguments = self.parse_function_call_args(cursor)?;
            return Ok(Expression::call(identifier, arguments));
        }
        Ok(Expression::variable(identifier, ValueType::Unknown))
    }

    fn parse_primary(&mut self, cursor: &mut TokenCursor) -> Result<Expression, ParseError> {
        let kind = cursor.peek().kind;
        match kind {
            TokenKind::IntLiteral => Parser::parse_number(cursor),
            TokenKind::Identifier => self.parse_identifier(cursor),
            TokenKind::Symbol(Symbol::LeftParentheses) => {
                self.parse_parentheses_expression(cursor)
            }
            TokenKind::Symbol(quote) if quote.is_quote() => {
                Parser::parse_string_literal(cursor, quote)
            }
            TokenKind::Error => Err(ParseError::new(
                ParseErrorKind::UnexpectedCharacter,
                cursor.peek(),
            )),
            TokenKind::Eof => Err(ParseError::new(
                ParseErrorKind::UnexpectedEndOfStatement,
                cursor.peek(),
            )),
            _ => Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                cursor.peek(),
            )),
        }
    }

    /// An integer literal, or a float literal when the integer is immediately followed by
    /// `.` and another integer with no whitespace in between.
    fn parse_number(cursor: &mut TokenCursor) -> Result<Expression, ParseError> {
        let Some(whole) = cursor.next() else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedEndOfStatement,
                cursor.peek(),
            ));
        };
        let dot = cursor.peek_nth(0);
        let fraction = cursor.peek_nth(1);
        let is_float = dot.is_symbol(Symbol::Dot)
            && fraction.kind == TokenKind::IntLiteral
            && dot.line == whole.line
            && fraction.line == whole.line
            && dot.column == whole.end_column()
            && fraction.column == dot.end_column();
        if is_float {
            let literal = format!("{}.{}", whole.text, fraction.text);
            let value = literal.parse::<f64>().ok().filter(|value| value.is_finite());
            let Some(value) = value else {
                return Err(ParseError::new(ParseErrorKind::IllegalFloatLiteral, whole));
            };
            cursor.advance(2);
            return Ok(Expression::float(value));
        }
        whole
            .text
            .parse::<i64>()
            .map(Expression::int)
            .map_err(|_| ParseError::new(ParseErrorKind::IllegalIntegerLiteral, whole))
    }

    fn parse_identifier(&mut self, cursor: &mut TokenCursor) -> Result<Expression, ParseError> {
        let identifier = cursor.digest_identifier("expression")?;
        match identifier.as_str() {
            "true" => return Ok(Expression::bool(true)),
            "false" => return Ok(Expression::bool(false)),
            _ => {}
        }
        if cursor.match_symbol(Symbol::LeftParentheses) {
            let arguments = self.parse_function_call_args(cursor)?;
            return Ok(Expression::call(identifier, arguments));
        }
        match self.context.lookup(&identifier) {
            Some(Binding::Function) => Ok(Expression::function_name(identifier)),
            Some(Binding::Variable(value_type)) => Ok(Expression::variable(identifier, value_type)),
            None => Ok(Expression::variable(identifier, ValueType::Unknown)),
        }
    }

    fn parse_function_call_args(
        &mut self,
        cursor: &mut TokenCursor,
    ) -> Result<Vec<Expression>, ParseError> {
        cursor.digest_symbol(Symbol::LeftParentheses)?;
        if cursor.expect_symbol(Symbol::RightParentheses) {
            return Ok(Vec::new());
        }
        let mut args = Vec::<Expression>::new();
        loop {
            let arg = self.parse_expression(cursor)?;
            args.push(arg);
            if !cursor.expect_symbol(Symbol::Comma) {
                break;
            }
        }
        if !cursor.expect_symbol(Symbol::RightParentheses) {
            return Err(ParseError::new(ParseErrorKind::UnclosedGroup, cursor.peek()));
        }
        Ok(args)
    }

    fn parse_parentheses_expression(
        &mut self,
        cursor: &mut TokenCursor,
    ) -> Result<Expression, ParseError> {
        cursor.digest_symbol(Symbol::LeftParentheses)?;
        let expression = self.parse_expression(cursor)?;
        if !cursor.expect_symbol(Symbol::RightParentheses) {
            return Err(ParseError::new(ParseErrorKind::UnclosedGroup, cursor.peek()));
        }
        Ok(expression)
    }

    /// Quoted text is rebuilt from raw token positions: gaps on one line become spaces, line
    /// breaks become newlines, and escapes are resolved. Comment markers inside the quotes
    /// are kept as text.
    fn parse_string_literal(
        cursor: &mut TokenCursor,
        quote: Symbol,
    ) -> Result<Expression, ParseError> {
        let rest = cursor.rest();
        let Some((opening, body)) = rest.split_first() else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedEndOfStatement,
                cursor.peek(),
            ));
        };
        let Some(length) = body.iter().position(|token| token.is_symbol(quote)) else {
            return Err(ParseError::new(ParseErrorKind::UnterminatedString, opening));
        };
        let literal = assemble_string(opening, &body[..length], &body[length]);
        cursor.advance(length + 2);
        Ok(Expression::string(literal))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn assemble_string(opening: &Token, content: &[Token], closing: &Token) -> String {
    let mut literal = String::new();
    let mut position = (opening.line, opening.end_column());
    for token in content {
        pad(&mut literal, position, token);
        literal.push_str(unescape(token));
        position = (token.line, token.end_column());
    }
    pad(&mut literal, position, closing);
    literal
}

/// Fills the gap between the end of the previous token and the start of `token`.
fn pad(literal: &mut String, (line, column): (u32, u32), token: &Token) {
    let column = if token.line > line {
        literal.extend(iter::repeat('\n').take((token.line - line) as usize));
        FIRST_COLUMN
    } else {
        column
    };
    literal.extend(iter::repeat(' ').take(token.column.saturating_sub(column) as usize));
}

fn unescape(token: &Token) -> &str {
    if token.kind != TokenKind::Escaped {
        return &token.text;
    }
    match token.text.as_str() {
        ESCAPED_NEWLINE => "\n",
        ESCAPED_QUOTE => "'",
        ESCAPED_DOUBLE_QUOTE => "\"",
        text => text,
    }
}
