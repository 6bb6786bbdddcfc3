use std::{path::PathBuf, rc::Rc};

use crate::{
    analyzer::prelude::ExpressionAnalyzer,
    codegen::prelude::{Chunk, Codegen},
    environment::prelude::{SymbolTable, Value},
    eval::prelude::execute,
    parser::prelude::{parse_expression, Expression},
    utils::prelude::{Error, SrcSpan, TypeWarningEmitter, WarningEmitter, WarningEmitterIO}
};

/// Input that passed every static stage and is ready to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub src: String,
    pub expression: Expression,
    pub chunk: Chunk,
}

/// State kept between inputs: the bindings, where input comes from, and
/// where warnings go. Each session owns its own table.
pub struct Session {
    symbols: SymbolTable,
    origin: PathBuf,
    warnings: WarningEmitter,
}

impl Session {
    pub fn new(origin: PathBuf, warnings: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            symbols: SymbolTable::new(),
            origin,
            warnings: WarningEmitter::new(warnings),
        }
    }

    /// Session that drops its warnings.
    pub fn null() -> Self {
        Self {
            symbols: SymbolTable::new(),
            origin: PathBuf::new(),
            warnings: WarningEmitter::null(),
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.count()
    }

    /// Forgets every binding.
    pub fn reset(&mut self) {
        self.symbols.clear();
        self.warnings.reset_count();
    }

    /// Lexes, parses, analyzes and generates code for `line`. The symbol
    /// table is read, never written.
    pub fn compile(&self, line: &str) -> Result<Program, Error> {
        let parsed = parse_expression(line).map_err(|error| Error::Syntax {
            path: self.origin.clone(),
            src: line.to_string(),
            error
        })?;

        let warnings = TypeWarningEmitter::new(
            self.origin.clone(),
            line.to_string(),
            self.warnings.clone()
        );

        let expression = ExpressionAnalyzer::analyze(parsed, &self.symbols, &warnings)
            .map_err(|error| Error::Semantic {
                path: self.origin.clone(),
                src: line.to_string(),
                error
            })?;

        let chunk = Codegen::generate(&expression);

        Ok(Program {
            src: line.to_string(),
            expression,
            chunk,
        })
    }

    /// Executes a compiled line. Bindings change only if it succeeds.
    pub fn execute(&mut self, program: &Program) -> Result<Value, Error> {
        execute(&program.chunk, &mut self.symbols).map_err(|error| {
            let location = program.chunk.span_at(error.instruction)
                .unwrap_or_else(|| SrcSpan::point(program.src.len() as u32));

            Error::Runtime {
                path: self.origin.clone(),
                src: program.src.clone(),
                error,
                location
            }
        })
    }

    pub fn process(&mut self, line: &str) -> Result<Value, Error> {
        let program = self.compile(line)?;

        self.execute(&program)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::null()
    }
}
