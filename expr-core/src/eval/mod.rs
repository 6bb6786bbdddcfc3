pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        execute,
        Machine
    };
}


use std::collections::HashMap;

use crate::{
    codegen::prelude::{Chunk, Instruction},
    environment::prelude::{SymbolTable, Value},
};
use error::{RuntimeError, RuntimeErrorType};

/// Runs `chunk` against `symbols`. Writes made by `StoreVar` reach the
/// table only if the whole chunk succeeds.
pub fn execute(chunk: &Chunk, symbols: &mut SymbolTable) -> Result<Value, RuntimeError> {
    let mut machine = Machine::new(chunk, symbols);

    let value = machine.run()?;
    let stores = machine.into_stores();

    for (name, value) in stores {
        symbols.declare_or_update(name, value._type(), value);
    }

    Ok(value)
}

#[derive(Debug)]
pub struct Machine<'a> {
    chunk: &'a Chunk,
    symbols: &'a SymbolTable,
    stack: Vec<Value>,
    stores: HashMap<String, Value>,
}

impl<'a> Machine<'a> {
    pub fn new(chunk: &'a Chunk, symbols: &'a SymbolTable) -> Self {
        Self {
            chunk,
            symbols,
            stack: Vec::with_capacity(chunk.max_depth()),
            stores: HashMap::new(),
        }
    }

    /// Executes every instruction once, in order, halting on the first fault.
    pub fn run(&mut self) -> Result<Value, RuntimeError> {
        let chunk = self.chunk;

        for (index, instruction) in chunk.iter().enumerate() {
            self.step(index, instruction)?;
        }

        match self.stack.as_slice() {
            [value] => Ok(*value),
            stack => Err(RuntimeError {
                error: RuntimeErrorType::UnbalancedStack { depth: stack.len() },
                instruction: chunk.len().saturating_sub(1),
            })
        }
    }

    /// Bindings written by this run, latest value per name.
    pub fn into_stores(self) -> HashMap<String, Value> {
        self.stores
    }

    fn step(&mut self, index: usize, instruction: &Instruction) -> Result<(), RuntimeError> {
        match instruction {
            Instruction::PushConst(value) => self.stack.push(Value::from(*value)),
            Instruction::LoadVar(name) => {
                let value = match self.stores.get(name) {
                    Some(value) => *value,
                    None => match self.symbols.lookup(name) {
                        Some((_, value)) => value,
                        None => return Err(RuntimeError {
                            error: RuntimeErrorType::UndefinedVariable { name: name.clone() },
                            instruction: index,
                        })
                    }
                };

                self.stack.push(value);
            },
            Instruction::StoreVar(name) => {
                let value = self.pop(index)?;

                self.stores.insert(name.clone(), value);
                self.stack.push(value);
            },
            Instruction::Add
            | Instruction::Sub
            | Instruction::Mul
            | Instruction::Div => {
                let right = self.pop_integer(index)?;
                let left = self.pop_integer(index)?;

                let result = match instruction {
                    Instruction::Add => left.checked_add(right),
                    Instruction::Sub => left.checked_sub(right),
                    Instruction::Mul => left.checked_mul(right),
                    _ => {
                        if right == 0 {
                            return Err(RuntimeError {
                                error: RuntimeErrorType::DivisionByZero,
                                instruction: index,
                            });
                        }

                        left.checked_div(right)
                    }
                };

                self.push_checked(index, result)?;
            },
            Instruction::Negate => {
                let operand = self.pop_integer(index)?;

                self.push_checked(index, operand.checked_neg())?;
            }
        }

        Ok(())
    }

    fn pop(&mut self, index: usize) -> Result<Value, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError {
            error: RuntimeErrorType::StackUnderflow,
            instruction: index,
        })
    }

    fn pop_integer(&mut self, index: usize) -> Result<i64, RuntimeError> {
        match self.pop(index)? {
            Value::Integer { value } => Ok(value),
        }
    }

    fn push_checked(&mut self, index: usize, result: Option<i64>) -> Result<(), RuntimeError> {
        match result {
            Some(value) => {
                self.stack.push(Value::from(value));
                Ok(())
            },
            None => Err(RuntimeError {
                error: RuntimeErrorType::Overflow,
                instruction: index,
            })
        }
    }
}
