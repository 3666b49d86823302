use std::path::Path;

use crate::commands::common::load_setup;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{GoalsData, GoalsSetData};
use crate::ledger::store;
use crate::ledger::types::Category;
use crate::{ClientError, ClientResult};

const SET_COMMAND: &str = "goals set";

#[derive(Debug, Default)]
pub struct GoalsListOptions<'a> {
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct GoalsSetOptions<'a> {
    /// `Category=limit` pairs. Categories not listed keep their limit.
    pub assignments: Vec<String>,
    pub home_override: Option<&'a Path>,
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(GoalsListOptions::default())
}

#[doc(hidden)]
pub fn list_with_options(options: GoalsListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let connection = setup.open()?;
    let goals = store::load_goals(&connection, &setup.db_path)?;
    success("goals list", GoalsData { goals })
}

pub fn set(assignments: Vec<String>) -> ClientResult<SuccessEnvelope> {
    set_with_options(GoalsSetOptions {
        assignments,
        home_override: None,
    })
}

/// Merges the assignments over the stored goals and rewrites the whole set.
#[doc(hidden)]
pub fn set_with_options(options: GoalsSetOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if options.assignments.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Provide at least one `Category=limit` assignment.",
            Some(SET_COMMAND),
        ));
    }
    let parsed = options
        .assignments
        .iter()
        .map(|value| parse_assignment(value))
        .collect::<ClientResult<Vec<_>>>()?;

    let setup = load_setup(options.home_override)?;
    let mut connection = setup.open()?;
    let mut goals = store::load_goals(&connection, &setup.db_path)?;

    let mut changed = Vec::new();
    for (category, limit) in parsed {
        if let Some(goal) = goals.iter_mut().find(|goal| goal.category == category) {
            if goal.limit != limit && !changed.contains(&category) {
                changed.push(category);
            }
            goal.limit = limit;
        }
    }

    store::replace_goals(&mut connection, &setup.db_path, &goals)?;
    success(SET_COMMAND, GoalsSetData { goals, changed })
}

pub(crate) fn parse_assignment(value: &str) -> ClientResult<(Category, f64)> {
    let invalid = |message: String| {
        ClientError::invalid_argument_for_command(&message, Some(SET_COMMAND))
    };

    let Some((label, limit)) = value.split_once('=') else {
        return Err(invalid(format!(
            "`{value}` is not a `Category=limit` assignment."
        )));
    };
    let category = Category::parse(label)
        .ok_or_else(|| invalid(format!("Unknown category `{}`.", label.trim())))?;
    let limit = limit
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|limit| limit.is_finite() && *limit >= 0.0)
        .ok_or_else(|| {
            invalid(format!(
                "Limit for {category} must be a number greater than or equal to 0."
            ))
        })?;

    Ok((category, limit))
}
