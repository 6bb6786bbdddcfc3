use super::token::Token;

pub type Spanned = (u32, Token, u32);

/// Character stream with byte offsets, as produced by [`index_chars`].
pub type SourceChars<'a> = std::iter::Map<std::str::CharIndices<'a>, fn((usize, char)) -> (u32, char)>;

fn index_char((pos, ch): (usize, char)) -> (u32, char) {
	(pos as u32, ch)
}

pub fn index_chars(src: &str) -> SourceChars<'_> {
	src.char_indices().map(index_char as fn((usize, char)) -> (u32, char))
}

/// Lazily tokenizes `src`. Calling it again on the same text starts over.
pub fn tokenize(src: &str) -> Lexer<SourceChars<'_>> {
	Lexer::new(index_chars(src))
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	ch: Option<char>,
	input: T,
	finished: bool,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            ch: None,
            input,
			finished: false,
        };

        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> Spanned {
		loop {
			match self.ch {
				Some(ch) if ch.is_whitespace() => {
					let _ = self.next_char();
				},
				_ => break
			}
		}

		match self.ch {
			Some(ch) => match ch {
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'*' => self.eat_one_char(Token::Star),
				'/' => self.eat_one_char(Token::Slash),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'=' => self.eat_one_char(Token::Equals),
				'a'..='z' | 'A'..='Z' | '_' => self.lex_ident(),
				'0'..='9' => self.lex_number(),
				c => self.eat_one_char(Token::Invalid(c)),
			},
			None => (self.position, Token::Eof, self.position)
		}
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		match self.input.next() {
			Some((pos, next)) => {
				self.position = pos;
				self.ch = Some(next);
			},
			None => {
				if let Some(last) = ch {
					self.position += last.len_utf8() as u32;
				}

				self.ch = None;
			}
		}

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			self.next_char();
		}

        (start_pos, Token::Ident(ident), self.position)
	}

	fn lex_number(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut digits = String::new();

		while let Some(ch) = self.ch {
			if !ch.is_ascii_digit() {
				break;
			}

			digits.push(ch);
			self.next_char();
		}

		(start_pos, Token::Number(digits), self.position)
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Spanned;

	/// Yields tokens up to and including a single `Eof`.
	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if token.1 == Token::Eof {
			self.finished = true;
		}

		Some(token)
	}
}
