use std::{cell::{Cell, RefCell}, path::PathBuf, rc::Rc};

use termcolor::Buffer;

use crate::analyzer::error::Warning as AnalyzerWarning;
use super::diagnostic::{Diagnostic, Label, Level, Location};

/// Sink for warnings; the driver prints them, tests collect them.
pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    warnings: Rc<RefCell<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        self.warnings.take()
    }

    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        self.warnings.borrow_mut().push(warning);
    }
}

/// Counts what passes through on the way to the sink. Clones share the count.
#[derive(Clone)]
pub struct WarningEmitter {
    count: Rc<Cell<usize>>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Rc::new(Cell::new(0)),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullWarningEmitterIO))
    }

    pub fn reset_count(&self) {
        self.count.set(0);
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }

    pub fn emit(&self, warning: Warning) {
        self.count.set(self.count.get() + 1);
        self.emitter.emit_warning(warning);
    }
}

/// Attaches the line being analyzed to every warning it forwards.
pub struct TypeWarningEmitter {
    path: PathBuf,
    src: String,
    emitter: WarningEmitter,
}

impl TypeWarningEmitter {
    pub fn new(path: PathBuf, src: String, emitter: WarningEmitter) -> Self {
        Self {
            path,
            src,
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(PathBuf::new(), String::new(), WarningEmitter::null())
    }

    pub fn emit(&self, warning: AnalyzerWarning) {
        self.emitter.emit(Warning::Type {
            path: self.path.clone(),
            src: self.src.clone(),
            warning,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    Type {
        path: PathBuf,
        src: String,
        warning: AnalyzerWarning
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);

        String::from_utf8_lossy(nocolor.as_slice()).into_owned()
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        self.to_diagnostic().write(buf);
    }

    pub fn to_diagnostic(&self) -> Diagnostic<'_> {
        match self {
            Warning::Type { path, src, warning } => {
                let (title, label, text) = match warning {
                    AnalyzerWarning::DivisionByZeroLiteral { .. } => (
                        "Division by zero",
                        "This divisor is always zero",
                        "Evaluating this expression will fail."
                    ),
                    AnalyzerWarning::SelfAssignment { .. } => (
                        "Self assignment",
                        "This assignment does not change the variable",
                        ""
                    ),
                };

                Diagnostic {
                    title: title.into(),
                    text: text.into(),
                    level: Level::Warning,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label.into()),
                            span: warning.location(),
                        },
                        extra_labels: vec![]
                    }),
                }
            }
        }
    }
}
