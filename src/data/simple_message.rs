use std::fmt;

use serde::Serialize;

/// A one line informational message, e.g. after saving a session.
#[derive(Debug, Serialize)]
pub struct SimpleMessage {
    pub message: String,
}

impl SimpleMessage {
    pub fn new<S: Into<String>>(message: S) -> SimpleMessage {
        SimpleMessage {
            message: message.into(),
        }
    }
}

impl fmt::Display for SimpleMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
