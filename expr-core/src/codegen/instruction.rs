use std::fmt::Display;

/// One stack-machine operation. Operands of an operator are already on the
/// stack when it runs; the right operand is on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    PushConst(i64),
    LoadVar(String),
    /// Pops a value, binds it, pushes it back.
    StoreVar(String),
    Add,
    Sub,
    Mul,
    Div,
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    PushConst,
    LoadVar,
    StoreVar,
    Add,
    Sub,
    Mul,
    Div,
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    Constant(i64),
    Variable(&'a str),
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::PushConst(_) => Opcode::PushConst,
            Self::LoadVar(_) => Opcode::LoadVar,
            Self::StoreVar(_) => Opcode::StoreVar,
            Self::Add => Opcode::Add,
            Self::Sub => Opcode::Sub,
            Self::Mul => Opcode::Mul,
            Self::Div => Opcode::Div,
            Self::Negate => Opcode::Negate,
        }
    }

    pub fn operand(&self) -> Option<Operand<'_>> {
        match self {
            Self::PushConst(value) => Some(Operand::Constant(*value)),
            Self::LoadVar(name)
            | Self::StoreVar(name) => Some(Operand::Variable(name)),
            _ => None
        }
    }

    /// `(pops, pushes)`
    pub fn stack_effect(&self) -> (usize, usize) {
        match self {
            Self::PushConst(_)
            | Self::LoadVar(_) => (0, 1),
            Self::StoreVar(_)
            | Self::Negate => (1, 1),
            Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div => (2, 1),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PushConst(value) => write!(f, "push {value}"),
            Self::LoadVar(name) => write!(f, "load {name}"),
            Self::StoreVar(name) => write!(f, "store {name}"),
            Self::Add => write!(f, "add"),
            Self::Sub => write!(f, "sub"),
            Self::Mul => write!(f, "mul"),
            Self::Div => write!(f, "div"),
            Self::Negate => write!(f, "neg"),
        }
    }
}
