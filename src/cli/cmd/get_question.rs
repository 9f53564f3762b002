use super::{check_arity, parse_id, Context, UsageError};
use crate::cli::sink::Error as SinkError;
use crate::httpclient::Error as HttpError;
use clap::Parser;
use snafu::{ResultExt, Snafu};
use std::num::ParseIntError;

pub const USAGE: &str = "usage: kb get-question <question-id>";

/// Fetches a single question by its id.
///
/// Prints the status code and the response body as received.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// The numeric id of the question.
    #[arg(value_name = "QUESTION-ID", allow_hyphen_values = true)]
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

    #[snafu(display("An http error occurred: {}", source))]
    HttpClient { source: HttpError },

    #[snafu(display("Error writing data: {}", source))]
    WriteResult { source: SinkError },
}

impl Input {
    pub fn validate(&self) -> Result<(), Error> {
        self.question_id().map(|_| ())
    }

    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let id = self.question_id()?;
        let resp = ctx
            .client
            .get_question(id)
            .await
            .context(HttpClientSnafu)?;
        ctx.write_result(&resp).context(WriteResultSnafu)?;
        Ok(())
    }

    fn question_id(&self) -> Result<i64, Error> {
        check_arity(&self.args, &[1], USAGE).context(UsageSnafu)?;
        let value = &self.args[0];
        parse_id(value).context(ArgumentFormatSnafu { value })
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
    fn reads_question_id() {
        assert_eq!(input(&["42"]).question_id().unwrap(), 42);
        assert_eq!(input(&["-3"]).question_id().unwrap(), -3);
    }

    #[test]
    fn wrong_arity_is_usage() {
        assert!(matches!(input(&[]).question_id(), Err(Error::Usage { .. })));
        assert!(matches!(
            input(&["1", "2"]).question_id(),
            Err(Error::Usage { .. })
        ));
    }

    #[test]
    fn non_integer_id() {
        assert!(matches!(
            input(&["abc"]).question_id(),
            Err(Error::ArgumentFormat { .. })
        ));
    }
}
