mod support;

use finboard_client::commands::expense::{self, ExpenseAddOptions};
use finboard_client::commands::months::{self, MonthsOptions};
use finboard_client::commands::search::{self, SearchOptions};
use finboard_client::commands::summary::{self, SummaryOptions};
use serde_json::json;
use support::ledger_testkit::{
    add_expense, add_income, approx, data_of, error_code_of, query_count, temp_home,
};

#[test]
fn installment_purchase_is_stored_as_monthly_rows() {
    let fixture = temp_home("finboard-installments");
    assert!(fixture.is_ok());
    if let Ok((_dir, home)) = fixture {
        let data = add_expense(&home, "Laptop", 100.0, Some("Hardware"), Some(3), "2024-01-15");

        assert_eq!(data["installments"], 3);
        assert_eq!(data["category"], "Hardware");
        assert_eq!(data["category_source"], "explicit");
        let rows = data["rows"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["date"], "2024-01-15");
        assert_eq!(rows[1]["date"], "2024-02-15");
        assert_eq!(rows[2]["date"], "2024-03-15");
        assert_eq!(rows[2]["description"], "Laptop (3/3)");
        assert_eq!(rows[0]["kind"], "Expense");

        assert_eq!(
            query_count(&home, "SELECT COUNT(*) FROM transactions WHERE kind = 'Expense'"),
            3
        );
        let summed = rows
            .iter()
            .filter_map(|row| row["amount"].as_f64())
            .sum::<f64>();
        assert!((summed - 100.0).abs() < 1e-9);
    }
}

#[test]
fn auto_category_uses_the_classifier() {
    let fixture = temp_home("finboard-auto");
    assert!(fixture.is_ok());
    if let Ok((_dir, home)) = fixture {
        let data = add_expense(&home, "Uber to airport", 42.0, None, None, "2024-03-02");
        assert_eq!(data["category"], "Transport");
        assert_eq!(data["category_source"], "classifier");
        assert_eq!(data["rows"][0]["description"], "Uber to airport");
    }
}

#[test]
fn rejected_entries_write_nothing() {
    let fixture = temp_home("finboard-rejected");
    assert!(fixture.is_ok());
    if let Ok((_dir, home)) = fixture {
        let base = || ExpenseAddOptions {
            description: "Phone".to_string(),
            amount: 1200.0,
            category: Some("Hardware".to_string()),
            installments: Some(1),
            date: Some("2024-01-10".to_string()),
            home_override: Some(&home),
        };

        let zero = expense::add_with_options(ExpenseAddOptions {
            installments: Some(0),
            ..base()
        });
        assert_eq!(error_code_of(zero), "invalid_argument");

        let too_many = expense::add_with_options(ExpenseAddOptions {
            installments: Some(13),
            ..base()
        });
        assert_eq!(error_code_of(too_many), "invalid_argument");

        let negative = expense::add_with_options(ExpenseAddOptions {
            amount: -1.0,
            ..base()
        });
        assert_eq!(error_code_of(negative), "invalid_argument");

        let bad_date = expense::add_with_options(ExpenseAddOptions {
            date: Some("2024-02-30".to_string()),
            ..base()
        });
        assert_eq!(error_code_of(bad_date), "invalid_argument");

        let bad_category = expense::add_with_options(ExpenseAddOptions {
            category: Some("Pets".to_string()),
            ..base()
        });
        assert_eq!(error_code_of(bad_category), "invalid_argument");

        assert!(expense::add_with_options(base()).is_ok());
        assert_eq!(query_count(&home, "SELECT COUNT(*) FROM transactions"), 1);
    }
}

#[test]
fn months_and_summary_follow_the_ledger() {
    let fixture = temp_home("finboard-summary");
    assert!(fixture.is_ok());
    if let Ok((_dir, home)) = fixture {
        let empty = data_of(summary::run_with_options(SummaryOptions {
            month: None,
            home_override: Some(&home),
        }));
        assert_eq!(empty["month"], json!(null));
        assert_eq!(empty["transaction_count"], 0);

        add_expense(&home, "Pizza", 60.0, Some("Food"), None, "2024-01-20");
        add_income(&home, "Salary", 3000.0, "2024-02-05");
        add_expense(&home, "Netflix", 40.0, None, None, "2024-02-07");
        add_expense(&home, "iFood dinner", 80.0, None, None, "2024-02-09");

        let listed = data_of(months::run_with_options(MonthsOptions {
            home_override: Some(&home),
        }));
        assert_eq!(listed["months"], json!(["2024-02", "2024-01"]));

        let latest = data_of(summary::run_with_options(SummaryOptions {
            month: None,
            home_override: Some(&home),
        }));
        assert_eq!(latest["month"], "2024-02");
        assert!(approx(&latest["income_total"], 3000.0));
        assert!(approx(&latest["expense_total"], 120.0));
        assert!(approx(&latest["balance"], 2880.0));
        assert_eq!(latest["transaction_count"], 3);
        assert_eq!(latest["expenses_by_category"][0]["category"], "Food");
        assert_eq!(latest["rows"][0]["description"], "iFood dinner");

        let january = data_of(summary::run_with_options(SummaryOptions {
            month: Some("2024-01".to_string()),
            home_override: Some(&home),
        }));
        assert!(approx(&january["expense_total"], 60.0));
        assert!(approx(&january["balance"], -60.0));

        let invalid = summary::run_with_options(SummaryOptions {
            month: Some("January".to_string()),
            home_override: Some(&home),
        });
        assert_eq!(error_code_of(invalid), "invalid_argument");
    }
}

#[test]
fn search_matches_description_and_category() {
    let fixture = temp_home("finboard-search");
    assert!(fixture.is_ok());
    if let Ok((_dir, home)) = fixture {
        add_expense(&home, "Pizza Hut", 50.0, Some("Food"), None, "2024-01-02");
        add_expense(&home, "Cinema", 30.0, Some("Leisure"), None, "2024-01-03");
        add_expense(&home, "pizza slice", 10.0, Some("Food"), None, "2024-01-04");

        let by_description = data_of(search::run_with_options(SearchOptions {
            term: "PIZZA".to_string(),
            home_override: Some(&home),
        }));
        assert_eq!(by_description["count"], 2);
        assert!(approx(&by_description["total_amount"], 60.0));
        assert_eq!(by_description["rows"][0]["description"], "pizza slice");

        let by_category = data_of(search::run_with_options(SearchOptions {
            term: "leisure".to_string(),
            home_override: Some(&home),
        }));
        assert_eq!(by_category["count"], 1);

        let injection = data_of(search::run_with_options(SearchOptions {
            term: "'; DROP TABLE transactions; --".to_string(),
            home_override: Some(&home),
        }));
        assert_eq!(injection["count"], 0);
        assert_eq!(query_count(&home, "SELECT COUNT(*) FROM transactions"), 3);

        let blank = search::run_with_options(SearchOptions {
            term: "   ".to_string(),
            home_override: Some(&home),
        });
        assert_eq!(error_code_of(blank), "invalid_argument");
    }
}
