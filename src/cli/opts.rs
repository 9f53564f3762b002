use super::cmd::*;
use crate::data::base_url::BaseUrl;
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use std::path::PathBuf;

/// Main options are available to all commands. They must appear
/// before a sub-command.
#[derive(Parser, Debug, Clone)]
#[command()]
pub struct CommonOpts {
    /// Be more verbose when logging. Verbosity increases with each
    /// occurence of that option.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// How to format the output. The default prints the status code
    /// and the response body as text, json prints both as one json
    /// object.
    #[arg(short, long, value_enum, default_value_t = Format::Default)]
    pub format: Format,

    /// The (base) URL to the knowledge-base service. It can be given
    /// as environment variable KB_CLI_BASE_URL. Defaults to
    /// http://localhost:3001.
    #[arg(long, value_hint = ValueHint::Url)]
    pub base_url: Option<BaseUrl>,

    /// The file holding the session cookie. Defaults to `.session` in
    /// the current directory.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub session_file: Option<PathBuf>,

    /// A config file to read. By default, `config.toml` in the
    /// user's config directory is read if it exists.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub enum SubCommand {
    #[command(alias = "getquestion")]
    GetQuestion(get_question::Input),

    #[command()]
    GetQuestions(get_questions::Input),

    #[command()]
    Signup(signup::Input),

    #[command()]
    Login(login::Input),

    #[command(alias = "submitquestion")]
    SubmitQuestion(submit_question::Input),

    #[command()]
    GetAnswers(get_answers::Input),

    #[command()]
    SubmitAnswer(submit_answer::Input),

    #[command()]
    Logout(logout::Input),

    #[command()]
    Version(version::Input),

    #[command()]
    ShellCompletion(shell_completion::Input),
}

/// This is the command line interface to the knowledge-base service.
/// Main options are available to all sub-commands and must appear
/// before them. Each sub command sends one request and prints the
/// status code and body of the response.
#[derive(Parser, Debug)]
#[command(name = "kb", version)]
pub struct MainOpts {
    #[clap(flatten)]
    pub common_opts: CommonOpts,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

/// The format for presenting the results.
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq)]
pub enum Format {
    Json,
    Default,
}
