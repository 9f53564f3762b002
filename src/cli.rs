pub mod cmd;
pub mod opts;
pub mod sink;

use self::cmd::{CmdError, Context};
use self::opts::{MainOpts, SubCommand};
use clap::CommandFactory;
use serde::Serialize;
use std::fmt;

pub async fn execute_cmd(opts: MainOpts) -> Result<(), CmdError> {
    if let SubCommand::ShellCompletion(input) = &opts.subcmd {
        let mut app = MainOpts::command();
        input.print_completions(&mut app);
        return Ok(());
    }

    // A wrong argument count must only print the usage, whatever
    // the config and environment look like.
    validate_args(&opts.subcmd)?;
    let ctx = Context::new(&opts.common_opts)?;

    log::info!("Running command: {:?}", opts.subcmd);
    match &opts.subcmd {
        SubCommand::GetQuestion(input) => input.exec(&ctx).await?,
        SubCommand::GetQuestions(input) => input.exec(&ctx).await?,
        SubCommand::Signup(input) => input.exec(&ctx).await?,
        SubCommand::Login(input) => input.exec(&ctx).await?,
        SubCommand::SubmitQuestion(input) => input.exec(&ctx).await?,
        SubCommand::GetAnswers(input) => input.exec(&ctx).await?,
        SubCommand::SubmitAnswer(input) => input.exec(&ctx).await?,
        SubCommand::Logout(input) => input.exec(&ctx).await?,
        SubCommand::Version(input) => input.exec(&ctx).await?,
        SubCommand::ShellCompletion(_) => {}
    };
    Ok(())
}

/// Checks the positional arguments without touching config, session
/// or network.
fn validate_args(subcmd: &SubCommand) -> Result<(), CmdError> {
    match subcmd {
        SubCommand::GetQuestion(input) => input.validate()?,
        SubCommand::Signup(input) => input.validate()?,
        SubCommand::Login(input) => input.validate()?,
        SubCommand::SubmitQuestion(input) => input.validate()?,
        SubCommand::GetAnswers(input) => input.validate()?,
        SubCommand::SubmitAnswer(input) => input.validate()?,
        SubCommand::GetQuestions(_)
        | SubCommand::Logout(_)
        | SubCommand::Version(_)
        | SubCommand::ShellCompletion(_) => {}
    };
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub build_date: &'static str,
    pub build_version: &'static str,
    pub git_commit: &'static str,
    pub rustc_host_triple: &'static str,
    pub rustc_llvm_version: &'static str,
    pub rustc_version: &'static str,
    pub cargo_target_triple: &'static str,
}
impl Default for BuildInfo {
    fn default() -> Self {
        BuildInfo {
            build_date: env!("VERGEN_BUILD_TIMESTAMP"),
            build_version: env!("CARGO_PKG_VERSION"),
            git_commit: env!("VERGEN_GIT_SHA"),
            rustc_host_triple: env!("VERGEN_RUSTC_HOST_TRIPLE"),
            rustc_llvm_version: env!("VERGEN_RUSTC_LLVM_VERSION"),
            rustc_version: env!("VERGEN_RUSTC_SEMVER"),
            cargo_target_triple: env!("VERGEN_CARGO_TARGET_TRIPLE"),
        }
    }
}
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cc = self.git_commit.get(..8).unwrap_or(self.git_commit);
        write!(
            f,
            "  Built at: {}\n  Version: {}\n  Sha: {}",
            self.build_date, self.build_version, cc
        )
    }
}
