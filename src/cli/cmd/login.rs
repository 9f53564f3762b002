use super::{check_arity, Context, UsageError};
use crate::cli::sink::Error as SinkError;
use crate::data::simple_message::SimpleMessage;
use crate::httpclient::data::Credentials;
use crate::httpclient::Error as HttpError;
use crate::session::{Error as SessionError, SessionStore};
use clap::Parser;
use snafu::{ResultExt, Snafu};

pub const USAGE: &str = "usage: kb login <username> <password>";

/// Logs in to the knowledge-base service.
///
/// Prints the status code and the response body. The service answers
/// a successful login with a session cookie. It is only written to
/// the session file when `--save` is given.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// Write the session cookie from the response into the session
    /// file.
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// The username followed by the password. Options must come
    /// before them.
    #[arg(value_name = "USERNAME PASSWORD", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}", source))]
    Usage { source: UsageError },

    #[snafu(display("An http error occurred: {}", source))]
    HttpClient { source: HttpError },

    #[snafu(display("Error saving the session: {}", source))]
    SaveSession { source: SessionError },

    #[snafu(display("Error writing data: {}", source))]
    WriteResult { source: SinkError },
}

impl Input {
    pub fn validate(&self) -> Result<(), Error> {
        self.credentials().map(|_| ())
    }

    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let creds = self.credentials()?;
        let (resp, session) = ctx.client.login(&creds).await.context(HttpClientSnafu)?;
        ctx.write_result(&resp).context(WriteResultSnafu)?;

        if self.save {
            let msg = match session {
                Some(token) => {
                    ctx.session.save(&token).context(SaveSessionSnafu)?;
                    format!("Session saved to {}", ctx.session.path().display())
                }
                None => format!(
                    "No '{}' cookie in the response, session not saved",
                    ctx.client.cookie_name()
                ),
            };
            ctx.write_result(&SimpleMessage::new(msg))
                .context(WriteResultSnafu)?;
        }
        Ok(())
    }

    fn credentials(&self) -> Result<Credentials, Error> {
        check_arity(&self.args, &[2], USAGE).context(UsageSnafu)?;
        Ok(Credentials {
            username: self.args[0].clone(),
            password: self.args[1].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(args: &[&str]) -> Input {
        Input {
            save: false,
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn reads_credentials() {
        let creds = input(&["alice", "secret"]).credentials().unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn wrong_arity_is_usage() {
        for args in [&["alice"][..], &[][..], &["a", "b", "c"][..]] {
            assert!(matches!(
                input(args).credentials(),
                Err(Error::Usage { .. })
            ));
        }
    }
}
