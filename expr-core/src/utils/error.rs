use std::{fmt::Display, path::PathBuf};

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    analyzer::prelude::AnalyzeError,
    eval::prelude::{RuntimeError, RuntimeErrorType},
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Level, Location};

/// A failed input: exactly one stage error plus the line it came from.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("syntax error: {error}")]
    Syntax {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("semantic error: {error}")]
    Semantic {
        path: PathBuf,
        src: String,
        error: AnalyzeError
    },
    #[error("runtime error: {error}")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError,
        location: SrcSpan
    },
    #[error("IO operation failed: {err}")]
    StdIo {
        err: std::io::ErrorKind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Syntax,
    Semantic,
    Runtime,
    Io,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Syntax => write!(f, "SyntaxError"),
            Stage::Semantic => write!(f, "SemanticError"),
            Stage::Runtime => write!(f, "RuntimeError"),
            Stage::Io => write!(f, "IoError"),
        }
    }
}

/// Plain form of an [`Error`] for callers that print their own messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub stage: Stage,
    pub kind: &'static str,
    pub message: String,
    pub span: Option<SrcSpan>,
    /// 0-based, in characters.
    pub column: Option<usize>,
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}[{}] at column {column}: {}", self.stage, self.kind, self.message),
            None => write!(f, "{}[{}]: {}", self.stage, self.kind, self.message),
        }
    }
}

impl Error {
    pub fn span(&self) -> Option<SrcSpan> {
        match self {
            Error::Syntax { error, .. } => Some(error.span),
            Error::Semantic { error, .. } => Some(error.location()),
            Error::Runtime { location, .. } => Some(*location),
            Error::StdIo { .. } => None
        }
    }

    pub fn report(&self) -> Report {
        let column = |src: &str| self.span().map(|span| span.column(src));

        match self {
            Error::Syntax { src, error, .. } => Report {
                stage: Stage::Syntax,
                kind: error.kind_name(),
                message: error.to_string(),
                span: self.span(),
                column: column(src.as_str()),
            },
            Error::Semantic { src, error, .. } => Report {
                stage: Stage::Semantic,
                kind: error.kind_name(),
                message: error.to_string(),
                span: self.span(),
                column: column(src.as_str()),
            },
            Error::Runtime { src, error, .. } => Report {
                stage: Stage::Runtime,
                kind: error.kind_name(),
                message: error.to_string(),
                span: self.span(),
                column: column(src.as_str()),
            },
            Error::StdIo { err } => Report {
                stage: Stage::Io,
                kind: "StdIo",
                message: err.to_string(),
                span: None,
                column: None,
            }
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);

        String::from_utf8_lossy(nocolor.as_slice()).into_owned()
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic<'_>> {
        match self {
            Error::Syntax { path, src, error } => {
                let (label, extra) = error.details();
                let text = extra.join("\n");

                let extra_labels = match &error.error {
                    ParseErrorType::UnclosedParen { open } => vec![Label {
                        text: Some("Unclosed delimiter".into()),
                        span: *open,
                    }],
                    ParseErrorType::InvalidAssignmentTarget { target } => vec![Label {
                        text: Some("Not an identifier".into()),
                        span: *target,
                    }],
                    _ => vec![]
                };

                vec![Diagnostic {
                    title: "Syntax error".into(),
                    text,
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.span,
                        },
                        extra_labels,
                    }),
                }]
            },
            Error::Semantic { path, src, error } => {
                let (title, text) = match error {
                    AnalyzeError::UndefinedVariable { variable, .. } => (
                        "Undefined variable",
                        format!("Variable `{variable}` is not defined. Assign it first, e.g. `{variable} = 0`.")
                    ),
                    AnalyzeError::TypeMismatch { expected, got, .. } => (
                        "Type mismatch",
                        format!("Expected `{expected}`, but got `{got}`")
                    ),
                };

                vec![Diagnostic {
                    title: title.into(),
                    text,
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: None,
                            span: error.location(),
                        },
                        extra_labels: vec![]
                    }),
                }]
            },
            Error::Runtime { path, src, error, location } => {
                let (title, label) = match &error.error {
                    RuntimeErrorType::DivisionByZero => ("Division by zero", Some("The divisor evaluated to 0")),
                    RuntimeErrorType::UndefinedVariable { .. } => ("Undefined variable", None),
                    RuntimeErrorType::Overflow => ("Integer overflow", Some("Result does not fit a 64-bit signed integer")),
                    RuntimeErrorType::StackUnderflow => ("Stack underflow", None),
                    RuntimeErrorType::UnbalancedStack { .. } => ("Unbalanced stack", None),
                };

                vec![Diagnostic {
                    title: title.into(),
                    text: format!("{error} (instruction {})", error.instruction),
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: label.map(String::from),
                            span: *location,
                        },
                        extra_labels: vec![]
                    }),
                }]
            },
            Error::StdIo { err } => vec![Diagnostic {
                title: "IO error".into(),
                text: err.to_string(),
                level: Level::Error,
                location: None,
            }]
        }
    }
}
