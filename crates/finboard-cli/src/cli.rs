use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use finboard_client::ledger::types::YearMonth;

pub fn parse_iso_date(value: &str) -> Result<String, String> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !shaped {
        return Err("date must use YYYY-MM-DD format".to_string());
    }
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }
    Ok(value.to_string())
}

pub fn parse_month(value: &str) -> Result<String, String> {
    value.parse::<YearMonth>().map(|month| month.to_string())
}

/// Extended help shown after `finboard import --help`.
pub const IMPORT_AFTER_HELP: &str = "\
How import works:
  One CSV file per call, with a header row. `-` reads stdin.
  Example: cat statement.csv | finboard import --dry-run -

  Every row is validated before anything is written. One bad row rejects
  the whole file; fix it and run the import again.

Columns (header names are case-insensitive):
  date          YYYY-MM-DD. Defaults to today when blank.
  kind          expense or income (also: despesa, receita). Defaults to expense.
  category      One of Food, Transport, Leisure, Education, Hardware,
                Fixed Bills, Other. `auto` classifies from the description.
                Blank expense categories become Other.
  description   Free text. Defaults to `Imported CSV`.
  amount        Non-negative number. `12.50` and `12,50` are both accepted.

  Portuguese headers (data, tipo, categoria, descricao, valor) also work.
  Unknown columns are ignored and listed in the output.

What to do next:
  1. Run `finboard import --dry-run <path>` and fix any reported issues.
  2. Run `finboard import <path>` once the dry run passes.
  3. Run `finboard summary` to see the imported month.
";

#[derive(Debug, Parser)]
#[command(
    name = "finboard",
    version,
    about = "personal finance tracker",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record expenses
    #[command(arg_required_else_help = true)]
    Expense {
        #[command(subcommand)]
        command: ExpenseCommand,
    },
    /// Record income
    #[command(arg_required_else_help = true)]
    Income {
        #[command(subcommand)]
        command: IncomeCommand,
    },
    /// Import transactions from a CSV file
    #[command(after_long_help = IMPORT_AFTER_HELP)]
    Import {
        /// Validate the file without writing to the ledger
        #[arg(long)]
        dry_run: bool,
        /// Path to a CSV file (use `-` for stdin)
        path: String,
    },
    /// List months that have transactions, newest first
    Months,
    /// Income, expenses and balance for one month
    Summary(MonthArgs),
    /// Find transactions by description or category
    Search {
        /// Case-insensitive text to look for
        term: String,
    },
    /// Show or change monthly spending goals
    #[command(arg_required_else_help = true)]
    Goals {
        #[command(subcommand)]
        command: GoalsCommand,
    },
    /// Compare one month's spending against the goals
    Budget(MonthArgs),
    /// Compare one month's spending against the historical average
    Forecast(MonthArgs),
    /// Show the login and account audit trail
    Audit,
    /// Manage local user accounts
    #[command(arg_required_else_help = true)]
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Check a username and password
    Login(LoginArgs),
    /// Convert a foreign-currency amount to BRL
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Three-letter currency code, e.g. USD
        currency: String,
    },
    /// Show which category a description would be filed under
    Classify {
        description: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct MonthArgs {
    /// Month to report on (YYYY-MM). Defaults to the most recent month on record
    #[arg(long, value_parser = parse_month)]
    pub month: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    pub username: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ExpenseCommand {
    /// Add an expense, optionally split into monthly installments
    Add {
        description: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Category name, or `auto` to classify from the description
        #[arg(long)]
        category: Option<String>,
        /// Number of monthly installments (1-12)
        #[arg(long)]
        installments: Option<u32>,
        /// Date of the first installment (YYYY-MM-DD). Defaults to today
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum IncomeCommand {
    /// Add an income entry
    Add {
        /// Where the money came from
        source: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Date received (YYYY-MM-DD). Defaults to today
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum GoalsCommand {
    /// Show the monthly limit for every category
    List,
    /// Set limits, e.g. `finboard goals set Food=800 "Fixed Bills=1500"`
    Set {
        #[arg(required = true, value_name = "CATEGORY=LIMIT")]
        assignments: Vec<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    /// Create a local account
    Create {
        username: String,
        #[arg(long)]
        password: String,
        /// Repeat the password
        #[arg(long = "confirm")]
        confirmation: String,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
