mod support;

use std::fs;
use std::path::Path;

use finboard_client::commands::import::{self, ImportOptions};
use finboard_client::contracts::envelope::failure_from_error;
use finboard_client::{ClientResult, SuccessEnvelope};
use support::ledger_testkit::{approx, data_of, error_code_of, query_count, temp_home};

fn run_import(
    home: &Path,
    path: &str,
    dry_run: bool,
    stdin_override: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    import::run_with_options(ImportOptions {
        path: path.to_string(),
        dry_run,
        home_override: Some(home),
        stdin_override: stdin_override.map(str::to_string),
    })
}

#[test]
fn csv_rows_are_imported_with_defaults() {
    let fixture = temp_home("finboard-import");
    assert!(fixture.is_ok());
    if let Ok((dir, home)) = fixture {
        let source = dir.path().join("statement.csv");
        let written = fs::write(
            &source,
            "Date,Category,Description,Amount,Kind,Memo\n\
             2024-03-01,Food,Pizza,45.50,Expense,friday\n\
             2024-03-05,,Salary,3000,Income,\n\
             2024-03-09,,,,,\n",
        );
        assert!(written.is_ok());

        let data = data_of(run_import(&home, &source.display().to_string(), false, None));
        assert_eq!(data["dry_run"], false);
        assert_eq!(data["summary"]["rows_read"], 3);
        assert_eq!(data["summary"]["inserted"], 3);
        assert_eq!(data["ignored_columns"][0], "Memo");
        assert_eq!(data["rows"][1]["category"], "Income");
        assert_eq!(data["rows"][2]["category"], "Other");
        assert_eq!(data["rows"][2]["description"], "Imported CSV");
        assert_eq!(data["rows"][2]["kind"], "Expense");
        assert!(approx(&data["rows"][2]["amount"], 0.0));

        assert_eq!(query_count(&home, "SELECT COUNT(*) FROM transactions"), 3);
        assert_eq!(
            query_count(&home, "SELECT COUNT(*) FROM transactions WHERE kind = 'Income'"),
            1
        );
    }
}

#[test]
fn dry_run_validates_without_writing() {
    let fixture = temp_home("finboard-import-dry");
    assert!(fixture.is_ok());
    if let Ok((_dir, home)) = fixture {
        let data = data_of(run_import(
            &home,
            "-",
            true,
            Some("Descricao,Valor,Tipo\nUber,12,Despesa\nBonus,100,Receita\n"),
        ));
        assert_eq!(data["dry_run"], true);
        assert_eq!(data["source"], "stdin");
        assert_eq!(data["summary"]["rows_valid"], 2);
        assert_eq!(data["summary"]["inserted"], 0);
        assert_eq!(query_count(&home, "SELECT COUNT(*) FROM transactions"), 0);
    }
}

#[test]
fn one_malformed_row_rejects_the_whole_batch() {
    let fixture = temp_home("finboard-import-bad");
    assert!(fixture.is_ok());
    if let Ok((_dir, home)) = fixture {
        let result = run_import(
            &home,
            "-",
            false,
            Some("Date,Description,Amount\n2024-01-01,Pizza,10\n2024-01-02,Uber,twelve\n"),
        );
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "import_validation_failed");
            let envelope = failure_from_error(&error);
            let data = envelope.data.unwrap_or_default();
            assert_eq!(data["issues"][0]["row"], 2);
            assert_eq!(data["issues"][0]["field"], "Amount");
            assert_eq!(data["issues"][0]["received"], "twelve");
        }
        assert_eq!(query_count(&home, "SELECT COUNT(*) FROM transactions"), 0);
    }
}

#[test]
fn unreadable_sources_are_rejected() {
    let fixture = temp_home("finboard-import-missing");
    assert!(fixture.is_ok());
    if let Ok((dir, home)) = fixture {
        let missing = dir.path().join("missing.csv");
        let result = run_import(&home, &missing.display().to_string(), false, None);
        assert_eq!(error_code_of(result), "invalid_argument");

        let wrong_headers = run_import(&home, "-", false, Some("foo,bar\n1,2\n"));
        assert_eq!(error_code_of(wrong_headers), "invalid_argument");
    }
}
