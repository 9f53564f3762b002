use super::{check_arity, parse_id, Context, UsageError};
use crate::cli::sink::Error as SinkError;
use crate::httpclient::Error as HttpError;
use crate::session::{Error as SessionError, SessionStore};
use clap::Parser;
use snafu::{ResultExt, Snafu};
use std::num::ParseIntError;

pub const USAGE: &str = "usage: kb submit-answer <question-id> <content>";

/// Answers a question.
///
/// The service takes the author from the session, so the session
/// cookie is sent along if a session file exists. Without one, the
/// service refuses the answer and its response is printed.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// The numeric id of the question followed by the answer.
    #[arg(value_name = "QUESTION-ID CONTENT", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}", source))]
    Usage { source: UsageError },

    #[snafu(display("The question id '{}' is not an integer: {}", value, source))]
    ArgumentFormat {
        source: ParseIntError,
        value: String,
    },

    #[snafu(display("Error reading the session: {}", source))]
    ReadSession { source: SessionError },

    #[snafu(display("An http error occurred: {}", source))]
    HttpClient { source: HttpError },

    #[snafu(display("Error writing data: {}", source))]
    WriteResult { source: SinkError },
}

impl Input {
    pub fn validate(&self) -> Result<(), Error> {
        self.answer().map(|_| ())
    }

    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let (id, content) = self.answer()?;
        let session = ctx.session.load().context(ReadSessionSnafu)?;
        let resp = ctx
            .client
            .submit_answer(id, content, session.as_ref())
            .await
            .context(HttpClientSnafu)?;
        ctx.write_result(&resp).context(WriteResultSnafu)?;
        Ok(())
    }

    fn answer(&self) -> Result<(i64, &str), Error> {
        check_arity(&self.args, &[2], USAGE).context(UsageSnafu)?;
        let value = &self.args[0];
        let id = parse_id(value).context(ArgumentFormatSnafu { value })?;
        Ok((id, self.args[1].as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(args: &[&str]) -> Input {
        Input {
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn reads_answer() {
        assert_eq!(input(&["3", "- a list"]).answer().unwrap(), (3, "- a list"));
    }

    #[test]
    fn wrong_arity_and_format() {
        assert!(matches!(input(&["3"]).validate(), Err(Error::Usage { .. })));
        assert!(matches!(
            input(&["x", "text"]).validate(),
            Err(Error::ArgumentFormat { .. })
        ));
    }
}
