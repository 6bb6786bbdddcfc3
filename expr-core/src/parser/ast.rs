use std::fmt::Display;

use crate::{
    environment::prelude::ValueType,
    lexer::prelude::{Spanned, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

// assignment -> <identifier> = <assignment> | <additive>
// additive -> <multiplicative> {(+ | -) <multiplicative>}
// multiplicative -> <unary> {(* | /) <unary>}
// unary -> - <unary> | <primary>
// primary -> <number> | <identifier> | ( <assignment> )
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    NumberLiteral(NumberLiteral),
    VariableReference(VariableReference),
    Assignment(Assignment),
    BinaryOp(BinaryOp),
    UnaryOp(UnaryOp),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.descend()?;
        let expression = Self::parse_nested(parser, precedence);
        parser.ascend();

        expression
    }
}

impl Expression {
    fn parse_nested<T: Iterator<Item = Spanned>>(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = precedence.unwrap_or(Precedence::Lowest);

        let mut expr = match &parser.current_token {
            Some((start, token, end)) => match token {
                Token::Ident(_) if precedence == Precedence::Lowest && parser.next_is(&Token::Equals) => {
                    Self::Assignment(Assignment::parse(parser, None)?)
                },
                Token::Ident(_) => {
                    let identifier = Identifier::from(parser.expect_ident()?);
                    parser.finish_node(1, identifier.location)?;

                    Self::VariableReference(VariableReference {
                        name: identifier.value,
                        location: identifier.location,
                        value_type: None
                    })
                },
                Token::Number(_) => Self::NumberLiteral(NumberLiteral::parse(parser, None)?),
                Token::Minus => Self::UnaryOp(UnaryOp::parse(parser, None)?),
                Token::LParen => {
                    let (start, _) = parser.expect_one(Token::LParen)?;
                    let open = SrcSpan { start, end: start + 1 };

                    let mut expression = Expression::parse(parser, None)?;

                    let end = match &parser.current_token {
                        Some((_, Token::RParen, _)) => parser.expect_one(Token::RParen)?.1,
                        Some((_, Token::Eof, _)) | None => return parse_error(
                            ParseErrorType::UnclosedParen { open },
                            SrcSpan::point(parser.end_position())
                        ),
                        Some((start, Token::Equals, end)) => return parse_error(
                            ParseErrorType::InvalidAssignmentTarget { target: expression.location() },
                            SrcSpan { start: *start, end: *end }
                        ),
                        _ => return Err(parser.unexpected(vec!["`)`".to_string()]))
                    };

                    // parentheses belong to the grouped node's source text
                    expression.set_location(SrcSpan { start, end });

                    expression
                },
                Token::RParen => return parse_error(
                    ParseErrorType::UnmatchedParen,
                    SrcSpan { start: *start, end: *end }
                ),
                _ => return Err(parser.unexpected(vec![
                    "a number".to_string(),
                    "an identifier".to_string(),
                    "`-`".to_string(),
                    "`(`".to_string(),
                ]))
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof { expected: vec!["an expression".to_string()] },
                SrcSpan::point(parser.end_position())
            )
        };

        while precedence < parser.current_precedence() {
            expr = Self::BinaryOp(BinaryOp::parse(parser, expr, Some(precedence))?);
        }

        Ok(expr)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NumberLiteral(number) => write!(f, "{number}"),
            Self::VariableReference(variable) => write!(f, "{variable}"),
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::BinaryOp(binary) => write!(f, "{binary}"),
            Self::UnaryOp(unary) => write!(f, "{unary}")
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::NumberLiteral(number) => number.location,
            Self::VariableReference(variable) => variable.location,
            Self::Assignment(assignment) => assignment.location,
            Self::BinaryOp(binary) => binary.location,
            Self::UnaryOp(unary) => unary.location
        }
    }

    fn set_location(&mut self, location: SrcSpan) {
        match self {
            Self::NumberLiteral(number) => number.location = location,
            Self::VariableReference(variable) => variable.location = location,
            Self::Assignment(assignment) => assignment.location = location,
            Self::BinaryOp(binary) => binary.location = location,
            Self::UnaryOp(unary) => unary.location = location
        }
    }

    /// Result type recorded by the analyzer; `None` before analysis.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::NumberLiteral(number) => number.value_type,
            Self::VariableReference(variable) => variable.value_type,
            Self::Assignment(assignment) => assignment.value_type,
            Self::BinaryOp(binary) => binary.value_type,
            Self::UnaryOp(unary) => unary.value_type
        }
    }

    pub fn set_value_type(&mut self, value_type: ValueType) {
        let slot = match self {
            Self::NumberLiteral(number) => &mut number.value_type,
            Self::VariableReference(variable) => &mut variable.value_type,
            Self::Assignment(assignment) => &mut assignment.value_type,
            Self::BinaryOp(binary) => &mut binary.value_type,
            Self::UnaryOp(unary) => &mut unary.value_type
        };

        *slot = Some(value_type);
    }

    /// Renders the tree one node per line with box-drawing guides.
    pub fn pretty_tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, "", None);

        out
    }

    fn write_tree(&self, out: &mut String, indent: &str, is_last: Option<bool>) {
        let marker = match is_last {
            None => "",
            Some(true) => "└── ",
            Some(false) => "├── ",
        };

        let label = match self {
            Self::NumberLiteral(number) => format!("NumberLiteral {}", number.value),
            Self::VariableReference(variable) => format!("VariableReference {}", variable.name),
            Self::Assignment(assignment) => format!("Assignment {}", assignment.identifier),
            Self::BinaryOp(binary) => format!("BinaryOp {}", binary.operator),
            Self::UnaryOp(unary) => format!("UnaryOp {}", unary.operator),
        };

        out.push_str(indent);
        out.push_str(marker);
        out.push_str(&label);

        if let Some(value_type) = self.value_type() {
            out.push_str(&format!(" : {value_type}"));
        }

        out.push('\n');

        let child_indent = match is_last {
            None => indent.to_string(),
            Some(true) => format!("{indent}    "),
            Some(false) => format!("{indent}│   "),
        };

        let children = self.children();
        let count = children.len();

        for (idx, child) in children.into_iter().enumerate() {
            child.write_tree(out, &child_indent, Some(idx + 1 == count));
        }
    }

    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Self::NumberLiteral(_)
            | Self::VariableReference(_) => vec![],
            Self::Assignment(assignment) => vec![&assignment.value],
            Self::BinaryOp(binary) => vec![&binary.left, &binary.right],
            Self::UnaryOp(unary) => vec![&unary.expression]
        }
    }
}

// identifier -> (<letter> | _) {<letter> | <digit> | _}
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: i64,
    pub location: SrcSpan,
    pub value_type: Option<ValueType>
}

impl<T: Iterator<Item = Spanned>> Parse<T> for NumberLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, digits, end) = parser.expect_number()?;
        let location = SrcSpan { start, end };

        let value = match digits.parse::<i64>() {
            Ok(value) => value,
            Err(_) => return parse_error(
                ParseErrorType::NumberOutOfRange { literal: digits },
                location
            )
        };

        parser.finish_node(1, location)?;

        Ok(Self {
            value,
            location,
            value_type: None
        })
    }
}

impl Display for NumberLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableReference {
    pub name: String,
    pub location: SrcSpan,
    pub value_type: Option<ValueType>
}

impl Display for VariableReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

// assignment -> <identifier> = <assignment>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Box<Expression>,
    pub location: SrcSpan,
    pub value_type: Option<ValueType>
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Assignment {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let ident = parser.expect_ident()?;
        let start = ident.0;

        parser.expect_one(Token::Equals)?;

        // right-associative: `a = b = 1` is `a = (b = 1)`
        let value = Expression::parse(parser, None)?;
        let end = value.location().end;

        parser.finish_node(parser.last_height() + 1, SrcSpan { start, end: ident.2 })?;

        Ok(Self {
            identifier: ident.into(),
            value: Box::new(value),
            location: SrcSpan { start, end },
            value_type: None
        })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} = {})", self.identifier, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        Some(match token {
            Token::Plus => Self::Add,
            Token::Minus => Self::Sub,
            Token::Star => Self::Mul,
            Token::Slash => Self::Div,
            _ => return None
        })
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}

// binary -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub operator_location: SrcSpan,
    pub right: Box<Expression>,
    pub location: SrcSpan,
    pub value_type: Option<ValueType>
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for BinaryOp {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();
        let left_height = parser.last_height();

        let (operator, operator_location) = match &parser.current_token {
            Some((op_start, token, op_end)) => match BinaryOperator::from_token(token) {
                Some(operator) => {
                    let location = SrcSpan { start: *op_start, end: *op_end };
                    parser.step();

                    (operator, location)
                },
                None => return parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: token.clone(),
                        expected: vec!["an operator".to_string()]
                    },
                    SrcSpan { start: *op_start, end: *op_end }
                )
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof { expected: vec!["an operator".to_string()] },
                SrcSpan::point(parser.end_position())
            )
        };

        // binding the right side one level tighter keeps the operator left-associative
        let right = Expression::parse(parser, Some(precedence))?;

        parser.finish_node(left_height.max(parser.last_height()) + 1, operator_location)?;

        let location = left.location().merge(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            operator_location,
            right: Box::new(right),
            location,
            value_type: None
        })
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
        }
    }
}

// unary -> - <unary>
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub operator: UnaryOperator,
    pub expression: Box<Expression>,
    pub location: SrcSpan,
    pub value_type: Option<ValueType>
}

impl<T: Iterator<Item = Spanned>> Parse<T> for UnaryOp {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Minus)?;

        let expression = Expression::parse(parser, Some(Precedence::Prefix))?;
        let end = expression.location().end;

        parser.finish_node(parser.last_height() + 1, SrcSpan { start, end: start + 1 })?;

        Ok(Self {
            operator: UnaryOperator::Negate,
            expression: Box::new(expression),
            location: SrcSpan { start, end },
            value_type: None
        })
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.expression)
    }
}
