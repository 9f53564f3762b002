use super::{check_arity, Context, UsageError};
use crate::cli::sink::Error as SinkError;
use crate::httpclient::data::NewUser;
use crate::httpclient::Error as HttpError;
use clap::Parser;
use snafu::{ResultExt, Snafu};

pub const USAGE: &str = "usage: kb signup <username> <password>";

/// Creates a new user account.
///
/// Afterwards, use `login` with the same username and password to
/// obtain a session.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// The email address of the new user.
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

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

    #[snafu(display("Error writing data: {}", source))]
    WriteResult { source: SinkError },
}

impl Input {
    pub fn validate(&self) -> Result<(), Error> {
        self.new_user().map(|_| ())
    }

    pub async fn exec(&self, ctx: &Context) -> Result<(), Error> {
        let user = self.new_user()?;
        let resp = ctx.client.signup(&user).await.context(HttpClientSnafu)?;
        ctx.write_result(&resp).context(WriteResultSnafu)?;
        Ok(())
    }

    fn new_user(&self) -> Result<NewUser, Error> {
        check_arity(&self.args, &[2], USAGE).context(UsageSnafu)?;
        Ok(NewUser {
            username: self.args[0].clone(),
            password: self.args[1].clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_user() {
        let input = Input {
            email: Some("bob@example.com".into()),
            first_name: None,
            last_name: Some("Builder".into()),
            args: vec!["bob".into(), "pw".into()],
        };
        let user = input.new_user().unwrap();
        assert_eq!(user.username, "bob");
        assert_eq!(user.password, "pw");
        assert_eq!(user.email.as_deref(), Some("bob@example.com"));
        assert_eq!(user.last_name.as_deref(), Some("Builder"));
    }

    #[test]
    fn wrong_arity_is_usage() {
        let input = Input {
            email: None,
            first_name: None,
            last_name: None,
            args: vec!["bob".into()],
        };
        assert!(matches!(input.validate(), Err(Error::Usage { .. })));
    }
}
