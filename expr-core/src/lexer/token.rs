use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // {/ <digit> /}, kept as written; range is checked by the parser
    Number(String),
    // (<letter> | _) {<letter> | <digit> | _}
    Ident(String),

    Plus, // +
    Minus, // -
    Star, // *
    Slash, // /

    LParen, // (
    RParen, // )

    Equals, // =

    // a character no token starts with
    Invalid(char),

    Eof,
}

impl Token {
    /// Source text of the token. `Eof` has none.
    pub fn as_literal(&self) -> String {
        match self {
            Token::Number(digits) => digits.clone(),
            Token::Ident(name) => name.clone(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Equals => "=".to_string(),
            Token::Invalid(ch) => ch.to_string(),
            Token::Eof => "".to_string(),
        }
    }

    /// How the token reads in a "found ..." message.
    pub fn describe(&self) -> String {
        match self {
            Token::Number(digits) => format!("number `{digits}`"),
            Token::Ident(name) => format!("identifier `{name}`"),
            Token::Invalid(ch) => format!("character `{}`", ch.escape_debug()),
            Token::Eof => "end of input".to_string(),
            _ => format!("`{}`", self.as_literal())
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Number(_) => "Number",
            Token::Ident(_) => "Identifier",
            Token::Plus => "Plus",
            Token::Minus => "Minus",
            Token::Star => "Star",
            Token::Slash => "Slash",
            Token::LParen => "LParen",
            Token::RParen => "RParen",
            Token::Equals => "Equals",
            Token::Invalid(_) => "Invalid",
            Token::Eof => "EndOfInput",
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(_)
            | Token::Ident(_)
            | Token::Invalid(_) => write!(f, "{}({:?})", self.kind_name(), self.as_literal()),
            _ => write!(f, "{}", self.kind_name())
        }
    }
}
