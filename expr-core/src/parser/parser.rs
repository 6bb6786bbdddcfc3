use crate::{lexer::prelude::{tokenize, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::Expression;

pub trait Parse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

/// Deepest tree the parser builds. Later stages walk trees recursively.
pub const MAX_EXPRESSION_DEPTH: usize = 256;

pub struct Parser<T: Iterator<Item = Spanned>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,

    end_position: u32,
    tokens: T,

    // sub-expressions currently being parsed
    nesting: usize,
    // height of the last node built
    height: usize,
}

impl<T: Iterator<Item = Spanned>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,

            end_position: 0,
            tokens: input,

            nesting: 0,
            height: 0,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();

        let next = self.tokens.next();

        if let Some((start, token, end)) = &next {
            self.end_position = match token {
                Token::Eof => *start,
                _ => (*end).max(self.end_position)
            };
        }

        self.current_token = self.next_token.take();
        self.next_token = next;

        t
    }

    /// Offset just past the last token, where end-of-input is reported.
    pub fn end_position(&self) -> u32 {
        self.end_position
    }

    pub fn next_is(&self, token: &Token) -> bool {
        matches!(&self.next_token, Some((_, next, _)) if next == token)
    }

    /// Enters one more level of sub-expression, failing at the current
    /// token once [`MAX_EXPRESSION_DEPTH`] is passed.
    pub fn descend(&mut self) -> Result<(), ParseError> {
        self.nesting += 1;

        if self.nesting > MAX_EXPRESSION_DEPTH {
            let span = match &self.current_token {
                Some((start, Token::Eof, _)) => SrcSpan::point(*start),
                Some((start, _, end)) => SrcSpan { start: *start, end: *end },
                None => SrcSpan::point(self.end_position)
            };

            return parse_error(ParseErrorType::ExpressionTooDeep { limit: MAX_EXPRESSION_DEPTH }, span);
        }

        Ok(())
    }

    pub fn ascend(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    pub fn last_height(&self) -> usize {
        self.height
    }

    /// Records the height of the node just built; `span` is blamed when it
    /// is too tall.
    pub fn finish_node(&mut self, height: usize, span: SrcSpan) -> Result<(), ParseError> {
        if height > MAX_EXPRESSION_DEPTH {
            return parse_error(ParseErrorType::ExpressionTooDeep { limit: MAX_EXPRESSION_DEPTH }, span);
        }

        self.height = height;

        Ok(())
    }

    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some((_, token, _)) => Precedence::from(token),
            None => Precedence::Lowest
        }
    }

    /// Parses one complete expression followed by end of input.
    pub fn parse(&mut self) -> Result<Expression, ParseError> {
        let expression = Expression::parse(self, None)?;

        match &self.current_token {
            Some((_, Token::Eof, _)) | None => Ok(expression),
            Some((start, Token::Equals, end)) => parse_error(
                ParseErrorType::InvalidAssignmentTarget { target: expression.location() },
                SrcSpan { start: *start, end: *end }
            ),
            Some((start, Token::RParen, end)) => parse_error(
                ParseErrorType::UnmatchedParen,
                SrcSpan { start: *start, end: *end }
            ),
            Some(_) => Err(self.unexpected(vec![
                "an operator".to_string(),
                "end of input".to_string(),
            ]))
        }
    }

    /// Error for the current token, given what the grammar allows here.
    pub fn unexpected(&self, expected: Vec<String>) -> ParseError {
        match &self.current_token {
            Some((start, Token::Invalid(ch), end)) => ParseError {
                error: ParseErrorType::InvalidCharacter { ch: *ch, expected },
                span: SrcSpan { start: *start, end: *end }
            },
            Some((start, Token::Eof, _)) => ParseError {
                error: ParseErrorType::UnexpectedEof { expected },
                span: SrcSpan::point(*start)
            },
            Some((start, token, end)) => ParseError {
                error: ParseErrorType::UnexpectedToken { token: token.clone(), expected },
                span: SrcSpan { start: *start, end: *end }
            },
            None => ParseError {
                error: ParseErrorType::UnexpectedEof { expected },
                span: SrcSpan::point(self.end_position)
            }
        }
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match &self.current_token {
            Some((start, tok, end)) if *tok == token => {
                let span = (*start, *end);
                self.step();

                Ok(span)
            },
            _ => Err(self.unexpected(vec![format!("`{}`", token.as_literal())]))
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            t => {
                self.current_token = t;

                Err(self.unexpected(vec!["an identifier".to_string()]))
            }
        }
    }

    pub fn expect_number(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Number(digits), end)) => {
                self.step();
                Ok((start, digits, end))
            },
            t => {
                self.current_token = t;

                Err(self.unexpected(vec!["a number".to_string()]))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Sum,
    Product,
    Prefix
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::Plus | Token::Minus => Self::Sum,
            Token::Star | Token::Slash => Self::Product,
            _ => Self::Lowest,
        }
    }
}

/// Parses a token stream into a single expression tree.
pub fn parse<T: Iterator<Item = Spanned>>(tokens: T) -> Result<Expression, ParseError> {
    let mut parser = Parser::new(tokens);

    parser.parse()
}

pub fn parse_expression(src: &str) -> Result<Expression, ParseError> {
    parse(tokenize(src))
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
