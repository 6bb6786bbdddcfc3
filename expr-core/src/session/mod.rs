pub mod session;

pub mod prelude {
    pub use super::{
        session::*,
        process,
        read_source
    };
}


use std::path::Path;

use utf8_chars::BufReadCharsExt;

use crate::{environment::prelude::Value, utils::prelude::Error};
use session::Session;

/// Runs one line through every stage against the session's bindings.
pub fn process(line: &str, session: &mut Session) -> Result<Value, Error> {
    session.process(line)
}

/// Reads a whole source file as a UTF-8 character stream.
pub fn read_source(path: &Path) -> Result<String, Error> {
    let file = std::fs::File::open(path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);

    for ch in reader.chars() {
        let ch = ch.map_err(|err| Error::StdIo { err: err.kind() })?;
        src.push(ch);
    }

    Ok(src)
}
