use std::path::Path;

use crate::ClientResult;
use crate::audit;
use crate::commands::common::load_setup;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::AuditData;

#[derive(Debug, Default)]
pub struct AuditOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(AuditOptions::default())
}

#[doc(hidden)]
pub fn run_with_options(options: AuditOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let connection = setup.open()?;
    let entries = audit::list(&connection, &setup.db_path)?;
    success("audit", AuditData { entries })
}
