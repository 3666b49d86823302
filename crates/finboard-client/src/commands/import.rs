use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{load_setup, today};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::import;

#[derive(Debug, Default)]
pub struct ImportOptions<'a> {
    /// File path, or `-` for stdin.
    pub path: String,
    pub dry_run: bool,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: String, dry_run: bool) -> ClientResult<SuccessEnvelope> {
    run_with_options(ImportOptions {
        path,
        dry_run,
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ImportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let data = import::execute(
        &setup,
        &options.path,
        options.dry_run,
        options.stdin_override,
        today(),
    )?;
    success("import", data)
}
