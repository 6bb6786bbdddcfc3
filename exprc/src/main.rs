mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{path::PathBuf, rc::Rc};

use clap::Parser;
use cli::{print_aborted, print_finished, print_running, stderr_buffer_writer};
use expr_core::{
    session::prelude::{read_source, Program, Session},
    utils::prelude::{Error, Warning, WarningEmitterIO}
};

#[derive(Parser)]
enum Command {
    /// Starts an interactive session
    Repl,
    /// Evaluates a single expression
    Eval {
        /// Expression to evaluate
        expression: String,
        /// Print the syntax tree
        #[arg(long, default_value_t = false)]
        ast: bool,
        /// Print generated instructions
        #[arg(long, default_value_t = false)]
        ir: bool,
    },
    /// Evaluates every line of a file in one session
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print the syntax tree of each line
        #[arg(long, default_value_t = false)]
        ast: bool,
        /// Print generated instructions of each line
        #[arg(long, default_value_t = false)]
        ir: bool,
        /// Do not print results
        #[arg(short, long, default_value_t = false)]
        no_output: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() {
    let warning_emitter = Rc::new(ConsoleWarningEmitter);

    let result = match Command::parse() {
        Command::Repl => repl::start(warning_emitter).map_err(|err| Error::StdIo { err: err.kind() }),
        Command::Eval { expression, ast, ir } => {
            let mut session = Session::new(PathBuf::from("<eval>"), warning_emitter);

            evaluate(&mut session, &expression, ast, ir, false)
        },
        Command::Run { path, ast, ir, no_output } => run(path, warning_emitter, ast, ir, no_output),
        Command::Rlpl => rlpl::start().map_err(|err| Error::StdIo { err: err.kind() }),
        Command::Rppl => rppl::start().map_err(|err| Error::StdIo { err: err.kind() }),
    };

    if let Err(err) = result {
        let buf_writer = stderr_buffer_writer();
        let mut buf = buf_writer.buffer();

        err.pretty(&mut buf);
        buf_writer
            .print(&buf)
            .expect("Writing error to stderr");

        std::process::exit(1);
    }
}

fn run(
    path: PathBuf,
    warnings: Rc<dyn WarningEmitterIO>,
    ast: bool,
    ir: bool,
    no_output: bool
) -> Result<(), Error> {
    print_running(&path.to_string_lossy());
    let start = std::time::Instant::now();

    let src = read_source(&path)?;
    let mut session = Session::new(path, warnings);
    let mut lines = 0;

    for (index, line) in src.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        if let Err(err) = evaluate(&mut session, line, ast, ir, no_output) {
            print_aborted(index + 1);

            return Err(err);
        }

        lines += 1;
    }

    print_finished(std::time::Instant::now() - start, lines);

    Ok(())
}

fn evaluate(
    session: &mut Session,
    line: &str,
    ast: bool,
    ir: bool,
    no_output: bool
) -> Result<(), Error> {
    let program = session.compile(line)?;

    print_program(&program, ast, ir);

    let value = session.execute(&program)?;

    if !no_output {
        println!("{value}");
    }

    Ok(())
}

fn print_program(program: &Program, ast: bool, ir: bool) {
    if ast {
        print!("{}", program.expression.pretty_tree());
    }

    if ir {
        print!("{}", program.chunk);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
