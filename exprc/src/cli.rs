use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Status {
    Running,
    Finished,
    Aborted,
}

impl Status {
    fn prefix(&self) -> (&'static str, Color) {
        match self {
            Status::Running => ("Running", Color::Cyan),
            Status::Finished => ("Finished", Color::Green),
            Status::Aborted => ("Aborted", Color::Red),
        }
    }
}

pub(crate) fn print_running(text: &str) {
    print_status(Status::Running, text)
}

pub(crate) fn print_finished(duration: Duration, lines: usize) {
    print_status(Status::Finished, &format!("{lines} line(s) in {}", seconds(duration)))
}

pub(crate) fn print_aborted(line: usize) {
    print_status(Status::Aborted, &format!("at line {line}"))
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f32())
}

/// Writes `   Running text` to stderr, the prefix right-aligned and colored.
pub(crate) fn print_status(status: Status, text: &str) {
    write_status(status, text).expect("print status line")
}

fn write_status(status: Status, text: &str) -> std::io::Result<()> {
    let (prefix, color) = status.prefix();

    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    buffer.set_color(ColorSpec::new().set_intense(true).set_bold(true).set_fg(Some(color)))?;
    write!(buffer, "{prefix: >11}")?;
    buffer.reset()?;
    writeln!(buffer, " {text}")?;

    buffer_writer.print(&buffer)
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn color_choice() -> ColorChoice {
    let forced = std::env::var("FORCE_COLOR")
        .map(|force| !force.is_empty())
        .unwrap_or(false);

    match (forced, std::io::stderr().is_terminal()) {
        (true, _) => ColorChoice::Always,
        (false, true) => ColorChoice::Auto,
        (false, false) => ColorChoice::Never,
    }
}
