mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use finboard_client::ClientError;
use stdout_io::write_stdout_line;
use tracing::debug;

const ROOT_HELP: &str = "finboard - personal finance tracker

Usage:
  finboard <command>

Start here:
  finboard expense add <description> <amount>
  finboard summary
  finboard --help
";

const TOP_LEVEL_HELP: &str = "finboard - personal finance tracker

USAGE: finboard <command> [--json]

Record money in and out:
  finboard expense add <description> <amount>          Add an expense (category auto-detected)
      [--category <name>] [--installments <n>] [--date YYYY-MM-DD]
  finboard income add <source> <amount>                Add an income entry
  finboard import --dry-run <path>                     Validate a CSV file without writing
  finboard import <path>                               Import a CSV file (`-` for stdin)

See where it went:
  finboard months                                      Months with transactions
  finboard summary [--month YYYY-MM]                   Totals, categories and transactions
  finboard search <term>                               Find by description or category

Plan ahead:
  finboard goals list                                  Monthly limit per category
  finboard goals set <Category>=<limit>...             Change limits (0 turns a goal off)
  finboard budget [--month YYYY-MM]                    Spending against the goals
  finboard forecast [--month YYYY-MM]                  Spending against your monthly average

Accounts:
  finboard user create <name> --password <pw> --confirm <pw>
  finboard login <name> --password <pw>
  finboard audit                                       Login and account history

Tools:
  finboard convert <amount> <currency>                 Convert to BRL at the current rate
  finboard classify <description>                      Preview the automatic category

Every command accepts --json for machine-readable output.
Run `finboard <command> --help` for command usage.
";

fn main() -> ExitCode {
    logging::init_tracing();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_line(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return Err(report_parse_error(&err, &raw_args)),
    };
    let mode = output::mode_for_cli(&cli);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Help and version requests exit 0; everything else is a usage error.
fn report_parse_error(err: &clap::Error, raw_args: &[String]) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let text = if is_top_level_help_request(raw_args) {
                TOP_LEVEL_HELP.to_string()
            } else {
                err.to_string()
            };
            if write_stdout_line(&text).is_err() {
                return ExitCode::from(2);
            }
            ExitCode::SUCCESS
        }
        ErrorKind::DisplayVersion => {
            if write_stdout_line(&err.to_string()).is_err() {
                return ExitCode::from(2);
            }
            ExitCode::SUCCESS
        }
        _ => {
            let command_hint = command_path_from_args(raw_args);
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = output::mode_from_raw_args(raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return ExitCode::from(2);
            }
            ExitCode::from(1)
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage block so the recovery steps are the only
/// guidance printed.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed
        .trim_start_matches("error: ")
        .trim_end()
        .to_string()
}

/// Maps raw arguments to a known command path such as `goals set`.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    let hint = match non_flags.as_slice() {
        ["expense", "add", ..] => "expense add",
        ["income", "add", ..] => "income add",
        ["goals", "list", ..] => "goals list",
        ["goals", "set", ..] => "goals set",
        ["user", "create", ..] => "user create",
        [
            command @ ("expense" | "income" | "import" | "months" | "summary" | "search" | "goals"
            | "budget" | "forecast" | "audit" | "user" | "login" | "convert" | "classify"),
            ..,
        ] => *command,
        _ => return None,
    };
    Some(hint.to_string())
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.is_internal() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::{command_path_from_args, strip_clap_boilerplate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn command_paths_prefer_the_longest_known_match() {
        assert_eq!(
            command_path_from_args(&args(&["finboard", "goals", "set", "Food=x"])),
            Some("goals set".to_string())
        );
        assert_eq!(
            command_path_from_args(&args(&["finboard", "summary", "--month", "2024-3"])),
            Some("summary".to_string())
        );
        assert_eq!(command_path_from_args(&args(&["finboard", "dashboard"])), None);
        assert_eq!(command_path_from_args(&args(&["finboard", "--json"])), None);
    }

    #[test]
    fn clap_usage_block_is_removed() {
        let message = "error: unexpected argument '--nope' found\n\nUsage: finboard months\n\nFor more information, try '--help'.\n";
        assert_eq!(
            strip_clap_boilerplate(message),
            "unexpected argument '--nope' found"
        );
    }
}
