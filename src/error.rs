//! Unified error type.

use std::fmt;

/// A type-erased error produced by a body stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type returned by seki's fallible operations.
///
/// The gate itself has no error kind: out-of-scope paths get a 404 and
/// everything else is the router's own response. This type surfaces
/// infrastructure failures around the gate: binding to a port, accepting a
/// connection, or reading a request body stream.
#[derive(Debug)]
pub enum Error {
    /// Binding the listener or accepting a connection failed.
    Io(std::io::Error),
    /// A request or response body stream failed mid-read.
    Body(BoxError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Body(e) => write!(f, "body: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Body(e) => Some(&**e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
