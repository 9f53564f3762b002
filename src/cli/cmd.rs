pub mod get_answers;
pub mod get_question;
pub mod get_questions;
pub mod login;
pub mod logout;
pub mod shell_completion;
pub mod signup;
pub mod submit_answer;
pub mod submit_question;
pub mod version;

use super::sink::{Error as SinkError, Sink};
use crate::cli::opts::CommonOpts;
use crate::config::{ConfigError, KbConfig};
use crate::data::base_url::{BaseUrl, BaseUrlError, DEFAULT_BASE_URL};
use crate::httpclient::request::DEFAULT_COOKIE_NAME;
use crate::httpclient::{self, Client};
use crate::session::{FileSessionStore, DEFAULT_SESSION_FILE};
use serde::Serialize;
use snafu::{ResultExt, Snafu};
use std::num::ParseIntError;
use std::path::PathBuf;

const BASE_URL_ENV: &str = "KB_CLI_BASE_URL";

pub struct Context {
    pub opts: CommonOpts,
    pub client: Client,
    pub session: FileSessionStore,
}

impl Context {
    pub fn new(opts: &CommonOpts) -> Result<Context, CmdError> {
        let config = KbConfig::load(opts.config.as_deref()).context(ConfigSnafu)?;
        let base_url = get_base_url(opts, &config)?;
        let cookie_name = config
            .cookie_name
            .clone()
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());
        let client =
            Client::with_cookie_name(base_url, cookie_name).context(ContextCreateSnafu)?;
        Ok(Context {
            opts: opts.clone(),
            client,
            session: FileSessionStore::new(get_session_file(opts, &config)),
        })
    }

    /// A short hand for `Sink::write(self.format(), value)`
    fn write_result<A: Sink + Serialize>(&self, value: &A) -> Result<(), SinkError> {
        let fmt = self.opts.format;
        Sink::write(&fmt, value)
    }
}

fn get_base_url(opts: &CommonOpts, config: &KbConfig) -> Result<BaseUrl, CmdError> {
    if let Some(u) = &opts.base_url {
        log::debug!("Use base url from arguments: {}", u);
        return Ok(u.clone());
    }
    if let Some(u) = std::env::var(BASE_URL_ENV).ok().filter(|u| !u.is_empty()) {
        log::debug!("Use base url from env {}: {}", BASE_URL_ENV, u);
        return BaseUrl::parse(&u).context(BaseUrlSnafu { url: u });
    }
    match &config.base_url {
        Some(u) => {
            log::debug!("Use base url from config file: {}", u);
            Ok(u.clone())
        }
        None => {
            log::debug!("Use base url: {}", DEFAULT_BASE_URL);
            BaseUrl::parse(DEFAULT_BASE_URL).context(BaseUrlSnafu {
                url: DEFAULT_BASE_URL,
            })
        }
    }
}

fn get_session_file(opts: &CommonOpts, config: &KbConfig) -> PathBuf {
    opts.session_file
        .clone()
        .or_else(|| config.session_file.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE))
}

/// The positional arguments did not match what the command expects.
/// The usage line is shown to the user and the program exits
/// normally.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(display("{}", usage))]
pub struct UsageError {
    pub usage: &'static str,
}

/// Checks that the number of positional arguments is one of
/// `allowed`.
fn check_arity(args: &[String], allowed: &[usize], usage: &'static str) -> Result<(), UsageError> {
    if allowed.contains(&args.len()) {
        Ok(())
    } else {
        log::debug!(
            "Got {} arguments, expected one of {:?}",
            args.len(),
            allowed
        );
        Err(UsageError { usage })
    }
}

fn parse_id(value: &str) -> Result<i64, ParseIntError> {
    value.trim().parse::<i64>()
}

#[derive(Debug, Snafu)]
pub enum CmdError {
    #[snafu(display("ContextCreate - {}", source))]
    ContextCreate { source: httpclient::Error },

    #[snafu(display("Config - {}", source))]
    Config { source: ConfigError },

    #[snafu(display("Invalid base url '{}': {}", url, source))]
    BaseUrl { source: BaseUrlError, url: String },

    #[snafu(display("GetQuestion - {}", source))]
    GetQuestion { source: get_question::Error },

    #[snafu(display("GetQuestions - {}", source))]
    GetQuestions { source: get_questions::Error },

    #[snafu(display("GetAnswers - {}", source))]
    GetAnswers { source: get_answers::Error },

    #[snafu(display("SubmitAnswer - {}", source))]
    SubmitAnswer { source: submit_answer::Error },

    #[snafu(display("Signup - {}", source))]
    Signup { source: signup::Error },

    #[snafu(display("Login - {}", source))]
    Login { source: login::Error },

    #[snafu(display("SubmitQuestion - {}", source))]
    SubmitQuestion { source: submit_question::Error },

    #[snafu(display("Logout - {}", source))]
    Logout { source: logout::Error },

    #[snafu(display("Version - {}", source))]
    Version { source: version::Error },
}

impl CmdError {
    /// Returns the usage error if this is one.
    pub fn usage(&self) -> Option<&UsageError> {
        match self {
            CmdError::GetQuestion {
                source: get_question::Error::Usage { source },
            } => Some(source),
            CmdError::Login {
                source: login::Error::Usage { source },
            } => Some(source),
            CmdError::SubmitQuestion {
                source: submit_question::Error::Usage { source },
            } => Some(source),
            CmdError::GetAnswers {
                source: get_answers::Error::Usage { source },
            } => Some(source),
            CmdError::SubmitAnswer {
                source: submit_answer::Error::Usage { source },
            } => Some(source),
            CmdError::Signup {
                source: signup::Error::Usage { source },
            } => Some(source),
            _ => None,
        }
    }
}

impl From<get_question::Error> for CmdError {
    fn from(source: get_question::Error) -> Self {
        CmdError::GetQuestion { source }
    }
}

impl From<get_questions::Error> for CmdError {
    fn from(source: get_questions::Error) -> Self {
        CmdError::GetQuestions { source }
    }
}

impl From<get_answers::Error> for CmdError {
    fn from(source: get_answers::Error) -> Self {
        CmdError::GetAnswers { source }
    }
}

impl From<submit_answer::Error> for CmdError {
    fn from(source: submit_answer::Error) -> Self {
        CmdError::SubmitAnswer { source }
    }
}

impl From<signup::Error> for CmdError {
    fn from(source: signup::Error) -> Self {
        CmdError::Signup { source }
    }
}

impl From<login::Error> for CmdError {
    fn from(source: login::Error) -> Self {
        CmdError::Login { source }
    }
}

impl From<submit_question::Error> for CmdError {
    fn from(source: submit_question::Error) -> Self {
        CmdError::SubmitQuestion { source }
    }
}

impl From<logout::Error> for CmdError {
    fn from(source: logout::Error) -> Self {
        CmdError::Logout { source }
    }
}

impl From<version::Error> for CmdError {
    fn from(source: version::Error) -> Self {
        CmdError::Version { source }
    }
}
