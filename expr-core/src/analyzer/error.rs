use thiserror::Error;

use crate::{environment::prelude::ValueType, utils::prelude::SrcSpan};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Problems {
    warnings: Vec<Warning>,
}

impl Problems {
    pub fn warning(&mut self, warning: Warning) {
        self.warnings.push(warning)
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn sort(&mut self) {
        self.warnings.sort_by_key(|w| w.location().start);
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum AnalyzeError {
    /// Occurs when a variable is read before anything was assigned to it
    /// in this session.
    ///
    /// Example:
    /// ```text
    /// > y + 1
    ///   ^ Variable `y` is not defined
    /// ```
    #[error("variable `{variable}` is not defined")]
    UndefinedVariable {
        location: SrcSpan,
        variable: String,
    },
    /// Occurs when an operand or an assigned value has a type the
    /// operator or the variable does not accept.
    #[error("type mismatch: expected `{expected}`, found `{got}`")]
    TypeMismatch {
        location: SrcSpan,
        expected: ValueType,
        got: ValueType,
    },
}

impl AnalyzeError {
    pub fn location(&self) -> SrcSpan {
        match self {
            AnalyzeError::UndefinedVariable { location, .. }
            | AnalyzeError::TypeMismatch { location, .. } => *location
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            AnalyzeError::UndefinedVariable { .. } => "UndefinedVariable",
            AnalyzeError::TypeMismatch { .. } => "TypeMismatch",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Warning {
    /// `4 / 0`: accepted here, fails when executed.
    DivisionByZeroLiteral {
        location: SrcSpan
    },
    /// `x = x`
    SelfAssignment {
        location: SrcSpan
    },
}

impl Warning {
    pub fn location(&self) -> SrcSpan {
        match self {
            Warning::DivisionByZeroLiteral { location }
            | Warning::SelfAssignment { location } => *location
        }
    }
}
