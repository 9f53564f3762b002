//! Storage for the session cookie obtained at login.
//!
//! The knowledge-base service authenticates requests with a session
//! cookie. Between invocations the cookie value is kept in a plain
//! one-line file (by default `.session` in the working directory).

use std::fmt;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};

pub const DEFAULT_SESSION_FILE: &str = ".session";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Cannot read session file '{}': {}", path.display(), source))]
    ReadFile {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("Cannot write session file '{}': {}", path.display(), source))]
    WriteFile {
        source: std::io::Error,
        path: PathBuf,
    },
}

/// An opaque session cookie value.
#[derive(Clone, PartialEq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new<S: Into<String>>(value: S) -> SessionToken {
        SessionToken(value.into())
    }

    /// Reads a token from the contents of a session file. Trailing
    /// whitespace (the line ending) is removed; blank contents yield
    /// no token.
    pub fn parse(contents: &str) -> Option<SessionToken> {
        let value = contents.trim_end();
        if value.is_empty() {
            None
        } else {
            Some(SessionToken(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// The token is a credential, keep it out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(***)")
    }
}

/// A place to keep the session token between invocations.
pub trait SessionStore {
    fn load(&self) -> Result<Option<SessionToken>, Error>;

    fn save(&self, token: &SessionToken) -> Result<(), Error>;

    fn clear(&self) -> Result<(), Error>;
}

/// Keeps the token in a single-line file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> FileSessionStore {
        FileSessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionToken>, Error> {
        let path = &self.path;
        if !path.try_exists().context(ReadFileSnafu { path })? {
            log::debug!("No session file at {}", path.display());
            return Ok(None);
        }
        let cnt = std::fs::read_to_string(path).context(ReadFileSnafu { path })?;
        let token = SessionToken::parse(&cnt);
        if token.is_none() {
            log::info!("Session file {} is empty", path.display());
        }
        Ok(token)
    }

    fn save(&self, token: &SessionToken) -> Result<(), Error> {
        let path = &self.path;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).context(WriteFileSnafu { path })?;
        }
        std::fs::write(path, format!("{}\n", token.as_str())).context(WriteFileSnafu { path })?;
        log::debug!("Session written to {}", path.display());
        set_owner_only(path)
    }

    fn clear(&self) -> Result<(), Error> {
        let path = &self.path;
        match std::fs::remove_file(path) {
            Ok(()) => {
                log::debug!("Removed session file {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::WriteFile {
                source,
                path: path.clone(),
            }),
        }
    }
}

#[cfg(unix)]
fn set_owner_only(file: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(file)
        .context(WriteFileSnafu { path: file })?
        .permissions();
    perms.set_mode(0o600);
    std::fs::set_permissions(file, perms).context(WriteFileSnafu { path: file })
}

#[cfg(not(unix))]
fn set_owner_only(_file: &Path) -> Result<(), Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_line_ending() {
        let token = SessionToken::parse("abc123\n").unwrap();
        assert_eq!(token.as_str(), "abc123");

        let token = SessionToken::parse("abc123\r\n").unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn parse_keeps_last_char_without_newline() {
        let token = SessionToken::parse("abc123").unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn parse_blank_is_none() {
        assert_eq!(SessionToken::parse(""), None);
        assert_eq!(SessionToken::parse("\n"), None);
    }

    #[test]
    fn debug_hides_value() {
        let token = SessionToken::new("secret-cookie");
        assert!(!format!("{:?}", token).contains("secret"));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join(".session"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn load_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".session");
        std::fs::write(&file, "abc123\n").unwrap();
        let store = FileSessionStore::new(&file);
        assert_eq!(store.load().unwrap(), Some(SessionToken::new("abc123")));
    }

    #[test]
    fn save_load_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join(".session");
        let store = FileSessionStore::new(&file);
        store.save(&SessionToken::new("xyz")).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "xyz\n");
        assert_eq!(store.load().unwrap(), Some(SessionToken::new("xyz")));

        store.clear().unwrap();
        assert!(!file.exists());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".session");
        FileSessionStore::new(&file)
            .save(&SessionToken::new("xyz"))
            .unwrap();
        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
