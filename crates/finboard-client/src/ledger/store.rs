use std::path::Path;

use rusqlite::{Connection, TransactionBehavior, params};
use tracing::{debug, info, warn};

use crate::ClientResult;
use crate::ledger::date::{format_iso_date, parse_stored_date};
use crate::ledger::types::{BudgetGoal, Category, Transaction, TransactionDraft, TransactionKind};
use crate::state::map_sqlite_error;

/// Inserts all drafts of one entry inside a single SQLite transaction and
/// returns the stored rows with their assigned ids.
pub fn insert_drafts(
    connection: &mut Connection,
    db_path: &Path,
    drafts: &[TransactionDraft],
) -> ClientResult<Vec<Transaction>> {
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut stored = Vec::with_capacity(drafts.len());
    for draft in drafts {
        transaction
            .execute(
                "INSERT INTO transactions (date, category, description, amount, kind)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    format_iso_date(&draft.date),
                    &draft.category,
                    &draft.description,
                    draft.amount,
                    draft.kind.as_str(),
                ],
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;
        stored.push(Transaction {
            id: transaction.last_insert_rowid(),
            date: draft.date,
            category: draft.category.clone(),
            description: draft.description.clone(),
            amount: draft.amount,
            kind: draft.kind,
        });
    }

    transaction
        .commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    info!(inserted = stored.len(), "stored ledger entries");
    Ok(stored)
}

/// Full ledger snapshot, oldest first.
pub fn load_ledger(connection: &Connection, db_path: &Path) -> ClientResult<Vec<Transaction>> {
    let rows = query_transactions(
        connection,
        db_path,
        "SELECT id, date, category, description, amount, kind
         FROM transactions
         ORDER BY date ASC, id ASC",
        &[],
    )?;
    debug!(rows = rows.len(), "loaded ledger snapshot");
    Ok(rows)
}

/// Case-insensitive substring match over description or category, most
/// recent first.
pub fn search(
    connection: &Connection,
    db_path: &Path,
    term: &str,
) -> ClientResult<Vec<Transaction>> {
    let pattern = format!("%{}%", escape_like(term));
    query_transactions(
        connection,
        db_path,
        "SELECT id, date, category, description, amount, kind
         FROM transactions
         WHERE description LIKE ?1 ESCAPE '\\' OR category LIKE ?1 ESCAPE '\\'
         ORDER BY date DESC, id DESC",
        &[&pattern],
    )
}

pub fn load_goals(connection: &Connection, db_path: &Path) -> ClientResult<Vec<BudgetGoal>> {
    let mut statement = connection
        .prepare("SELECT category, limit_amount FROM goals")
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    let rows_iter = statement
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut stored = Vec::new();
    for row in rows_iter {
        stored.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }

    Ok(Category::ALL
        .into_iter()
        .map(|category| BudgetGoal {
            category,
            limit: stored
                .iter()
                .find(|(label, _)| label == category.as_str())
                .map(|(_, limit)| *limit)
                .unwrap_or(0.0),
        })
        .collect())
}

/// Writes every goal row. Callers pass the complete set.
pub fn replace_goals(
    connection: &mut Connection,
    db_path: &Path,
    goals: &[BudgetGoal],
) -> ClientResult<()> {
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    for goal in goals {
        transaction
            .execute(
                "INSERT OR REPLACE INTO goals (category, limit_amount) VALUES (?1, ?2)",
                params![goal.category.as_str(), goal.limit],
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;
    }
    transaction
        .commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    info!(goals = goals.len(), "replaced budget goals");
    Ok(())
}

fn query_transactions(
    connection: &Connection,
    db_path: &Path,
    sql: &str,
    bindings: &[&dyn rusqlite::ToSql],
) -> ClientResult<Vec<Transaction>> {
    let mut statement = connection
        .prepare(sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    let rows_iter = statement
        .query_map(bindings, |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        let (id, date, category, description, amount, kind) =
            row.map_err(|error| map_sqlite_error(db_path, &error))?;
        let (Some(date), Some(kind)) = (parse_stored_date(&date), TransactionKind::parse(&kind))
        else {
            warn!(id, "skipping unreadable ledger row");
            continue;
        };
        rows.push(Transaction {
            id,
            date,
            category,
            description,
            amount,
            kind,
        });
    }

    Ok(rows)
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
