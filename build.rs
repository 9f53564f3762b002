use std::error::Error;
use vergen::EmitBuilder;

// Provides the VERGEN_* variables shown by `kb version`.
pub fn main() -> Result<(), Box<dyn Error>> {
    EmitBuilder::builder()
        .build_timestamp()
        .git_sha(false)
        .rustc_host_triple()
        .rustc_llvm_version()
        .rustc_semver()
        .cargo_target_triple()
        .emit()?;
    Ok(())
}
