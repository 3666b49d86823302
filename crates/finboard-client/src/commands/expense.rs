use std::num::NonZeroU32;
use std::path::Path;

use crate::commands::common::{
    MAX_INSTALLMENTS, load_setup, parse_date_arg, require_text, validate_amount,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategorySource, ExpenseAddData, TransactionRow};
use crate::ledger::installments::expand;
use crate::ledger::store;
use crate::ledger::types::CategoryChoice;
use crate::{ClientError, ClientResult};

const COMMAND: &str = "expense add";

#[derive(Debug, Default)]
pub struct ExpenseAddOptions<'a> {
    pub description: String,
    /// Purchase total; split evenly across installments.
    pub amount: f64,
    /// Category label or `auto`. `None` means `auto`.
    pub category: Option<String>,
    /// `None` means a single payment.
    pub installments: Option<u32>,
    /// First installment date, `YYYY-MM-DD`. Defaults to today.
    pub date: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn add(
    description: String,
    amount: f64,
    category: Option<String>,
    installments: Option<u32>,
    date: Option<String>,
) -> ClientResult<SuccessEnvelope> {
    add_with_options(ExpenseAddOptions {
        description,
        amount,
        category,
        installments,
        date,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn add_with_options(options: ExpenseAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let description = require_text(&options.description, "description", COMMAND)?;
    let amount = validate_amount(options.amount, "amount", COMMAND)?;
    let choice = parse_category_choice(options.category.as_deref())?;
    let count = parse_installments(options.installments)?;
    let start = parse_date_arg(options.date.as_deref(), COMMAND)?;

    let category = choice.resolve(&description);
    let drafts = expand(amount, count, start, &description, category);

    let setup = load_setup(options.home_override)?;
    let mut connection = setup.open()?;
    let stored = store::insert_drafts(&mut connection, &setup.db_path, &drafts)?;

    success(
        COMMAND,
        ExpenseAddData {
            total: amount,
            installments: count.get(),
            category,
            category_source: match choice {
                CategoryChoice::Auto => CategorySource::Classifier,
                CategoryChoice::Fixed(_) => CategorySource::Explicit,
            },
            rows: stored.iter().map(TransactionRow::from).collect(),
        },
    )
}

fn parse_category_choice(value: Option<&str>) -> ClientResult<CategoryChoice> {
    let Some(text) = value else {
        return Ok(CategoryChoice::Auto);
    };
    CategoryChoice::parse(text).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!(
                "Unknown category `{}`. Use auto, Food, Transport, Leisure, Education, Hardware, Fixed Bills or Other.",
                text.trim()
            ),
            Some(COMMAND),
        )
    })
}

fn parse_installments(value: Option<u32>) -> ClientResult<NonZeroU32> {
    let requested = value.unwrap_or(1);
    NonZeroU32::new(requested)
        .filter(|count| count.get() <= MAX_INSTALLMENTS)
        .ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                &format!("`--installments` must be between 1 and {MAX_INSTALLMENTS}."),
                Some(COMMAND),
            )
        })
}
