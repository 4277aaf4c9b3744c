use std::error::Error;
use std::fmt::{Display, Formatter};
use std::{fmt, io};

/// The error type used in results for all `binq` functionality.
///
/// Every failure in the pipeline is one of four things: a file that breaks
/// its own format, data that breaks an invariant the coder relies on, a
/// parameter outside its legal range, or I/O trouble. All of them are fatal
/// to the running tool; nothing in the pipeline retries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum BinqError {
  /// A bins or `.sidx` file that violates its own format: a bad leading
  /// marker, too few bins, boundaries out of order, impossible dimensions.
  Format(String),
  /// Data that breaks an invariant the pipeline relies on: values out of
  /// sort order, frequencies that don't cover the population being coded,
  /// a float beyond every bin boundary.
  Invariant(String),
  /// A parameter outside its legal range, e.g. an unknown binning method or
  /// a frequency total beyond the coder's precision budget.
  InvalidArgument(String),
  /// A stream that ended before the expected number of bytes.
  Truncated { expected: usize, found: usize },
  /// Errors propagated from `Read` or `Write` implementations passed to
  /// binq.
  Io(io::ErrorKind, String),
}

impl Display for BinqError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      BinqError::Format(message) => write!(f, "format error: {}", message),
      BinqError::Invariant(message) => write!(f, "invariant violated: {}", message),
      BinqError::InvalidArgument(message) => {
        write!(f, "invalid argument: {}", message)
      }
      BinqError::Truncated { expected, found } => write!(
        f,
        "input truncated: expected {} more bytes, found {}",
        expected, found
      ),
      BinqError::Io(kind, message) => write!(f, "io error ({:?}): {}", kind, message),
    }
  }
}

impl From<io::Error> for BinqError {
  fn from(err: io::Error) -> Self {
    BinqError::Io(err.kind(), err.to_string())
  }
}

impl Error for BinqError {}

pub type BinqResult<T> = Result<T, BinqError>;
