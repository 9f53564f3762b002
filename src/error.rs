//! Global error types

use crate::cli::cmd::{self, UsageError};
use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}", source))]
    Cmd { source: cmd::CmdError },
}

impl Error {
    /// Returns the usage error if the arguments did not fit the
    /// command.
    pub fn usage(&self) -> Option<&UsageError> {
        match self {
            Error::Cmd { source } => source.usage(),
        }
    }
}

pub type Result<A> = std::result::Result<A, Error>;

impl From<cmd::CmdError> for Error {
    fn from(e: cmd::CmdError) -> Error {
        Error::Cmd { source: e }
    }
}
