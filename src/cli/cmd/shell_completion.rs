use clap::{Command, Parser};
use clap_complete::{generate, Generator, Shell};

/// Generates completions for some shells.
#[derive(Parser, std::fmt::Debug)]
pub struct Input {
    /// For which shell to generate completions.
    #[arg(long, value_enum)]
    pub shell: Shell,

    /// The binary name.
    #[arg(long, default_value = "kb")]
    pub binary: String,
}

impl Input {
    pub fn print_completions(&self, app: &mut Command) {
        generate_completions(self.shell, &self.binary, app);
    }
}

fn generate_completions<G: Generator>(gen: G, binary: &str, app: &mut Command) {
    generate(gen, app, binary, &mut std::io::stdout());
}
