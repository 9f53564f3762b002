use super::Context;
use crate::cli::sink::Error as SinkError;
use crate::httpclient::Error as HttpError;
use clap::Parser;
use snafu::{ResultExt, Snafu};

/// Lists public questions.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// Only list questions of the user with this id.
    #[arg(long, allow_negative_numbers = true)]
    pub user: Option<i64>,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("An http error occurred: {}", source))]
    HttpClient { source: HttpError },

    #[snafu(display("Error writing data: {}", source))]
    WriteResult { source: SinkError },
}

impl Input {
    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let resp = ctx
            .client
            .get_questions(self.user)
            .await
            .context(HttpClientSnafu)?;
        ctx.write_result(&resp).context(WriteResultSnafu)?;
        Ok(())
    }
}
