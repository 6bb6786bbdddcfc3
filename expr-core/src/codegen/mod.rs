pub mod instruction;
pub mod chunk;
pub mod codegen;

pub mod prelude {
    pub use super::{
        instruction::*,
        chunk::*,
        codegen::*
    };
}

#[cfg(test)]
mod tests;
