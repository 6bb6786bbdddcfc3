use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeErrorType {
    #[error("division by zero")]
    DivisionByZero,
    /// Analysis rules this out; seeing it means analyzer and generator disagree.
    #[error("variable `{name}` is not defined")]
    UndefinedVariable {
        name: String,
    },
    #[error("integer overflow")]
    Overflow,
    #[error("operand stack underflow")]
    StackUnderflow,
    #[error("program left {depth} values on the stack, expected 1")]
    UnbalancedStack {
        depth: usize,
    },
}

/// Fault raised by the instruction at index `instruction`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub instruction: usize,
}

impl RuntimeError {
    pub fn kind_name(&self) -> &'static str {
        match self.error {
            RuntimeErrorType::DivisionByZero => "DivisionByZero",
            RuntimeErrorType::UndefinedVariable { .. } => "UndefinedVariable",
            RuntimeErrorType::Overflow => "Overflow",
            RuntimeErrorType::StackUnderflow => "StackUnderflow",
            RuntimeErrorType::UnbalancedStack { .. } => "UnbalancedStack",
        }
    }
}
