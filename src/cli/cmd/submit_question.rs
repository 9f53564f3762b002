use super::{check_arity, parse_id, Context, UsageError};
use crate::cli::sink::Error as SinkError;
use crate::httpclient::data::{NewQuestion, TeamRoute};
use crate::httpclient::Error as HttpError;
use crate::session::{Error as SessionError, SessionStore};
use clap::Parser;
use snafu::{ResultExt, Snafu};
use std::num::ParseIntError;
use std::path::PathBuf;

pub const USAGE: &str =
    "usage: kb submit-question <author-id> <title> <content> [<team> <organization>]";

/// Submits a new question.
///
/// Without team and organization, the question is posted publicly.
/// The session cookie is sent along if a session file exists. With
/// team and organization, the question is posted to that team and a
/// session is required.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// The numeric author id, the title and the content, optionally
    /// followed by team and organization.
    #[arg(
        value_name = "AUTHOR-ID TITLE CONTENT [TEAM ORGANIZATION]",
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}", source))]
    Usage { source: UsageError },

    #[snafu(display("The author id '{}' is not an integer: {}", value, source))]
    ArgumentFormat {
        source: ParseIntError,
        value: String,
    },

    #[snafu(display(
        "No session found in '{}'. Posting to a team requires a login.",
        path.display()
    ))]
    MissingSession { path: PathBuf },

    #[snafu(display("Error reading the session: {}", source))]
    ReadSession { source: SessionError },

    #[snafu(display("An http error occurred: {}", source))]
    HttpClient { source: HttpError },

    #[snafu(display("Error writing data: {}", source))]
    WriteResult { source: SinkError },
}

/// What the arguments describe.
#[derive(Debug, PartialEq)]
struct Submission {
    question: NewQuestion,
    route: Option<TeamRoute>,
}

impl Input {
    pub fn validate(&self) -> Result<(), Error> {
        self.submission().map(|_| ())
    }

    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let sub = self.submission()?;
        let session = ctx.session.load().context(ReadSessionSnafu)?;
        if sub.route.is_some() && session.is_none() {
            return MissingSessionSnafu {
                path: ctx.session.path(),
            }
            .fail();
        }
        let resp = ctx
            .client
            .submit_question(&sub.question, sub.route.as_ref(), session.as_ref())
            .await
            .context(HttpClientSnafu)?;
        ctx.write_result(&resp).context(WriteResultSnafu)?;
        Ok(())
    }

    fn submission(&self) -> Result<Submission, Error> {
        check_arity(&self.args, &[3, 5], USAGE).context(UsageSnafu)?;
        let value = &self.args[0];
        let author = parse_id(value).context(ArgumentFormatSnafu { value })?;
        let question = NewQuestion {
            author,
            title: self.args[1].clone(),
            content: self.args[2].clone(),
        };
        let route = match (self.args.get(3), self.args.get(4)) {
            (Some(team), Some(org)) => Some(TeamRoute {
                organization: org.clone(),
                team: team.clone(),
            }),
            _ => None,
        };
        Ok(Submission { question, route })
    }
}
