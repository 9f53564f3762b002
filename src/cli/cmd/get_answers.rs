use super::{check_arity, parse_id, Context, UsageError};
use crate::cli::sink::Error as SinkError;
use crate::httpclient::Error as HttpError;
use clap::Parser;
use snafu::{ResultExt, Snafu};
use std::num::ParseIntError;

pub const USAGE: &str = "usage: kb get-answers <question-id>";

/// Lists the answers to a question.
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
            .get_answers(id)
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
