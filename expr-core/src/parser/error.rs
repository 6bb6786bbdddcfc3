use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::prelude::Token, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorType {
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    UnexpectedEof {
        expected: Vec<String>,
    },
    /// A character that starts no token, surfaced where the grammar needed something else.
    InvalidCharacter {
        ch: char,
        expected: Vec<String>,
    },
    UnclosedParen {
        open: SrcSpan,
    },
    UnmatchedParen,
    /// `=` after something that is not a bare identifier, e.g. `(x) = 1`.
    InvalidAssignmentTarget {
        target: SrcSpan,
    },
    NumberOutOfRange {
        literal: String,
    },
    ExpressionTooDeep {
        limit: usize,
    },
}

/// Syntax error: what was expected, what was found, and where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedToken { token, expected } => {
                let messages = std::iter::once(format!("Found {}, expected one of:", token.describe()))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::UnexpectedEof { expected } => {
                let messages = std::iter::once("Expected one of:".to_string())
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Unexpected end of input", messages)
            },
            ParseErrorType::InvalidCharacter { ch, expected } => {
                let messages = std::iter::once(format!("`{}` does not start any token, expected one of:", ch.escape_debug()))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Invalid character", messages)
            },
            ParseErrorType::UnclosedParen { .. } => ("Expected `)`", vec![]),
            ParseErrorType::UnmatchedParen => ("No matching `(`", vec![]),
            ParseErrorType::InvalidAssignmentTarget { .. } => (
                "Cannot assign here",
                vec!["Only a bare identifier may appear left of `=`.".to_string()]
            ),
            ParseErrorType::NumberOutOfRange { literal } => (
                "Number out of range",
                vec![format!("`{literal}` does not fit a 64-bit signed integer.")]
            ),
            ParseErrorType::ExpressionTooDeep { limit } => (
                "Expression too deep",
                vec![format!("Expressions may be at most {limit} levels deep. Split it using variables.")]
            ),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.error {
            ParseErrorType::UnexpectedToken { .. } => "UnexpectedToken",
            ParseErrorType::UnexpectedEof { .. } => "UnexpectedEndOfInput",
            ParseErrorType::InvalidCharacter { .. } => "InvalidCharacter",
            ParseErrorType::UnclosedParen { .. } => "UnclosedParen",
            ParseErrorType::UnmatchedParen => "UnmatchedParen",
            ParseErrorType::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ParseErrorType::NumberOutOfRange { .. } => "NumberOutOfRange",
            ParseErrorType::ExpressionTooDeep { .. } => "ExpressionTooDeep",
        }
    }
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, expected } => {
                write!(f, "unexpected {}, expected {}", token.describe(), expected.join(" or "))
            },
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {}", expected.join(" or "))
            },
            Self::InvalidCharacter { ch, .. } => write!(f, "invalid character `{}`", ch.escape_debug()),
            Self::UnclosedParen { .. } => write!(f, "unclosed `(`, expected `)`"),
            Self::UnmatchedParen => write!(f, "unmatched `)`"),
            Self::InvalidAssignmentTarget { .. } => write!(f, "invalid assignment target"),
            Self::NumberOutOfRange { literal } => write!(f, "number `{literal}` is out of range"),
            Self::ExpressionTooDeep { limit } => write!(f, "expression is nested more than {limit} levels deep"),
        }
    }
}
