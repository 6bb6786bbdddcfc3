use std::{io::Write, path::PathBuf};

pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel},
    files::SimpleFile,
    term::{self, Config},
};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use super::src_span::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

impl Level {
    pub fn severity(&self) -> Severity {
        match self {
            Level::Warning => Severity::Warning,
            Level::Error => Severity::Error,
        }
    }

    fn heading(&self) -> (&'static str, Color) {
        match self {
            Level::Warning => ("warning", Color::Yellow),
            Level::Error => ("error", Color::Red),
        }
    }
}

/// Span plus optional message drawn under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, style: LabelStyle) -> CodespanLabel<()> {
        let label = CodespanLabel::new(style, (), self.span.range());

        match &self.text {
            Some(text) => label.with_message(text.clone()),
            None => label,
        }
    }
}

/// Where in an input line a diagnostic points. `label` is primary, the
/// rest are drawn as secondary.
#[derive(Debug, Clone)]
pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
    pub extra_labels: Vec<Label>,
}

#[derive(Debug, Clone)]
pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub level: Level,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) {
        let written = match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        };

        written
            .and_then(|_| match self.text.is_empty() {
                true => Ok(()),
                false => writeln!(buf, "{}", self.text),
            })
            .expect("write diagnostic to buffer");
    }

    fn write_span(&self, location: &Location, buf: &mut Buffer) -> std::io::Result<()> {
        let file = SimpleFile::new(location.path.to_string_lossy(), location.src);

        let labels = std::iter::once(location.label.to_codespan_label(LabelStyle::Primary))
            .chain(location.extra_labels.iter().map(|label| label.to_codespan_label(LabelStyle::Secondary)))
            .collect();

        let diagnostic = CodespanDiagnostic::new(self.level.severity())
            .with_message(&self.title)
            .with_labels(labels);

        term::emit(buf, &Config::default(), &file, &diagnostic)
            .map_err(std::io::Error::other)
    }

    fn write_title(&self, buf: &mut Buffer) -> std::io::Result<()> {
        let (heading, colour) = self.level.heading();

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))?;
        write!(buf, "{heading}")?;

        buf.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(buf, ": {}", self.title)?;

        buf.reset()
    }
}
