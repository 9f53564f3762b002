use super::Context;
use crate::cli::sink::Error as SinkError;
use crate::data::simple_message::SimpleMessage;
use crate::httpclient::Error as HttpError;
use crate::session::{Error as SessionError, SessionStore};
use clap::Parser;
use snafu::{ResultExt, Snafu};
use std::path::PathBuf;

/// Ends the current session at the service.
///
/// Sends the session cookie to the logout endpoint and prints the
/// status code and the response body.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// Remove the session file after the request.
    #[arg(long, default_value_t = false)]
    pub clear: bool,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("No session found in '{}'", path.display()))]
    MissingSession { path: PathBuf },

    #[snafu(display("Error accessing the session: {}", source))]
    Session { source: SessionError },

    #[snafu(display("An http error occurred: {}", source))]
    HttpClient { source: HttpError },

    #[snafu(display("Error writing data: {}", source))]
    WriteResult { source: SinkError },
}

impl Input {
    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let token = match ctx.session.load().context(SessionSnafu)? {
            Some(t) => t,
            None => {
                return MissingSessionSnafu {
                    path: ctx.session.path(),
                }
                .fail()
            }
        };
        let resp = ctx.client.logout(&token).await.context(HttpClientSnafu)?;
        ctx.write_result(&resp).context(WriteResultSnafu)?;

        if self.clear {
            ctx.session.clear().context(SessionSnafu)?;
            let msg = format!("Removed session file {}", ctx.session.path().display());
            ctx.write_result(&SimpleMessage::new(msg))
                .context(WriteResultSnafu)?;
        }
        Ok(())
    }
}
