mod account_text;
mod entry_text;
mod error_text;
mod format;
mod json;
mod mode;
mod report_text;
mod rows;

use std::io;

use finboard_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_cli, mode_from_raw_args};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    let data = &success.data;
    match success.command.as_str() {
        "expense add" => entry_text::render_expense_add(data),
        "income add" => entry_text::render_income_add(data),
        "import" => entry_text::render_import(data),
        "months" => report_text::render_months(data),
        "summary" => report_text::render_summary(data),
        "search" => report_text::render_search(data),
        "goals list" | "goals set" => report_text::render_goals(data),
        "budget" => report_text::render_budget(data),
        "forecast" => report_text::render_forecast(data),
        "audit" => account_text::render_audit(data),
        "user create" => account_text::render_user_create(data),
        "login" => account_text::render_login(data),
        "convert" => account_text::render_convert(data),
        "classify" => account_text::render_classify(data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
