use std::{io::Write, path::PathBuf, rc::Rc};

use expr_core::{
	session::prelude::{process, Session},
	utils::prelude::WarningEmitterIO
};

use crate::cli::stderr_buffer_writer;

const PROMPT: &str = "> ";

pub fn start(warnings: Rc<dyn WarningEmitterIO>) -> std::io::Result<()> {
	ctrlc::set_handler(|| {
		println!();
		std::process::exit(0);
	}).map_err(std::io::Error::other)?;

	let stdin = std::io::stdin();
	let mut session = Session::new(PathBuf::from("<repl>"), warnings);

	loop {
		let mut input = String::new();

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		let input = input.trim_end_matches(['\n', '\r']);

		match input.trim() {
			"" => {},
			".exit" => return Ok(()),
			".reset" => session.reset(),
			".vars" => {
				for symbol in session.symbols().entries() {
					println!("{} : {} = {}", symbol.name, symbol.value_type, symbol.value);
				}
			},
			_ => match process(input, &mut session) {
				Ok(value) => println!("{value}"),
				Err(err) => {
					let buf_writer = stderr_buffer_writer();
					let mut buf = buf_writer.buffer();

					err.pretty(&mut buf);
					buf_writer.print(&buf)?;
				}
			}
		}
	}
}
