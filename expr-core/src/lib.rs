pub mod lexer;
pub mod parser;
pub mod environment;
pub mod analyzer;
pub mod codegen;
pub mod eval;
pub mod session;
pub mod utils;
