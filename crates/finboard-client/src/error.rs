use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{ImportIssue, ImportSummary};

pub(crate) const IMPORT_HELP_COMMAND: &str = "finboard import --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `finboard {cmd} --help` for usage."),
            None => "Run `finboard --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    /// Never says whether the username exists; the hint only nudges towards
    /// `user create` so the outcome itself stays uniform.
    pub fn invalid_credentials(show_signup_hint: bool) -> Self {
        let mut steps = vec!["Check the username and password and retry.".to_string()];
        if show_signup_hint {
            steps.push(
                "New here? Run `finboard user create <username> --password <pw> --confirm <pw>`."
                    .to_string(),
            );
        }
        Self::new("invalid_credentials", "Access denied: invalid credentials.", steps)
    }

    pub fn user_exists(username: &str) -> Self {
        Self::new(
            "user_exists",
            &format!("User `{username}` already exists."),
            vec!["Choose a different username.".to_string()],
        )
        .with_data(json!({ "username": username }))
    }

    pub fn currency_unavailable(currency: &str, detail: &str) -> Self {
        Self::new(
            "currency_unavailable",
            &format!("Exchange rate for `{currency}` is unavailable: {detail}"),
            vec!["Check your network connection and retry later.".to_string()],
        )
    }

    pub fn invalid_import_format(message: &str) -> Self {
        Self::invalid_argument_with_recovery(
            message,
            vec![
                "Provide a CSV file with a header row.".to_string(),
                format!("Run `{IMPORT_HELP_COMMAND}` to review the expected columns."),
            ],
        )
        .with_data(json!({
            "help_command": IMPORT_HELP_COMMAND,
            "expected_headers": ["Date", "Category", "Description", "Amount", "Kind"],
        }))
    }

    pub fn import_validation_failed(summary: ImportSummary, issues: Vec<ImportIssue>) -> Self {
        let issue_count = summary.rows_invalid;
        Self::new(
            "import_validation_failed",
            &format!("Import failed: {issue_count} rows need fixes. No rows were written."),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Rerun finboard import --dry-run <path>.".to_string(),
                "Then rerun finboard import <path>.".to_string(),
            ],
        )
        .with_data(json!({
            "help_command": IMPORT_HELP_COMMAND,
            "summary": summary,
            "issues": issues,
        }))
    }

    pub fn config_invalid(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_invalid",
            &format!("Configuration at `{location}` could not be read: {detail}"),
            vec![format!(
                "Fix or remove `{location}`; defaults apply when the file is absent."
            )],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn internal_credentials(detail: &str) -> Self {
        Self::new("internal_credentials_error", detail, Vec::new())
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_permission_denied",
            &format!("Cannot initialize ledger at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `FINBOARD_HOME` to a writable directory."
            )],
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_locked",
            &format!("Ledger database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_corrupt",
            &format!("Ledger database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid finboard ledger or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Ledger migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_failed",
            &format!("Ledger initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "ledger_init_permission_denied"
                    | "ledger_locked"
                    | "ledger_corrupt"
                    | "migration_failed"
                    | "ledger_init_failed"
            )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
