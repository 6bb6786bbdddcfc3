use std::io::Write;

use expr_core::lexer::prelude::tokenize;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::new();

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		let input = input.trim_end_matches(['\n', '\r']);

		match input {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				for (start, token, end) in tokenize(input) {
					println!("{start:>4}..{end:<4} {token}");
				}
			}
		}
	}
}
