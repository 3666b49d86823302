pub mod audit;
pub mod budget;
pub mod classify;
pub mod common;
pub mod convert;
pub mod expense;
pub mod forecast;
pub mod goals;
pub mod import;
pub mod income;
pub mod months;
pub mod search;
pub mod summary;
pub mod user;
