use super::Context;
use crate::cli::sink::Error as SinkError;
use crate::cli::sink::Sink;
use crate::cli::BuildInfo;
use clap::Parser;
use serde::Serialize;
use snafu::{ResultExt, Snafu};
use std::fmt;

/// Prints version information about this client.
///
/// Shows build details and the knowledge-base url the client is
/// configured for. The service is not contacted.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Error writing data: {}", source))]
    WriteResult { source: SinkError },
}

impl Input {
    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let vinfo = Versions::create(ctx.client.base_url().as_str());
        ctx.write_result(&vinfo).context(WriteResultSnafu)?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct Versions<'a> {
    pub client: BuildInfo,
    pub base_url: &'a str,
}
impl Versions<'_> {
    pub fn create(base_url: &str) -> Versions<'_> {
        Versions {
            client: BuildInfo::default(),
            base_url,
        }
    }
}

impl fmt::Display for Versions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client:\n{}\n\nKnowledge-base @ {}", self.client, self.base_url)
    }
}

impl Sink for Versions<'_> {}
