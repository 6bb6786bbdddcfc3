use std::io::Write;

use expr_core::{lexer::prelude::tokenize, parser::prelude::Parser};

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
				let mut parser = Parser::new(tokenize(input));

				match parser.parse() {
					Ok(expression) => {
						println!("{}", expression);
						print!("{}", expression.pretty_tree());
					},
					Err(err) => {
						let (message, messages) = err.details();

						println!("[at {}] Parse error: {}.", err.span.column(input), message);
						if !messages.is_empty() {
							println!("\t{}", messages.join("\n\t"));
						}
					}
				}
			}
		}
	}
}
