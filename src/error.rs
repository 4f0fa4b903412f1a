use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidInput(String),
    Layout(String),
    /// The writer produced a different number of pages than the plan the
    /// decorator was built with, so every "page N of M" footer would be wrong.
    PageCountMismatch {
        planned: usize,
        rendered: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::Layout(msg) => write!(f, "layout error: {msg}"),
            Error::PageCountMismatch { planned, rendered } => write!(
                f,
                "page count mismatch: planned {planned} pages but rendered {rendered}"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}
