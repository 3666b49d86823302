//! Ledger engine: classification, installment expansion, aggregation, budget
//! evaluation and forecasting over an in-memory snapshot, plus the SQLite
//! store that produces those snapshots.

pub mod aggregate;
pub mod budget;
pub mod classify;
pub mod date;
pub mod forecast;
pub mod installments;
pub mod store;
pub mod types;
