use finboard_client::ClientError;
use serde_json::Value;

const MAX_LISTED_ISSUES: usize = 20;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = import_issue_lines(error.data.as_ref());
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Rows to fix:".to_string());
        lines.extend(issues);
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn import_issue_lines(data: Option<&Value>) -> Vec<String> {
    let Some(issues) = data
        .and_then(|value| value.get("issues"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut lines = issues
        .iter()
        .take(MAX_LISTED_ISSUES)
        .map(|issue| {
            let row = issue.get("row").and_then(Value::as_i64).unwrap_or(0);
            let field = issue.get("field").and_then(Value::as_str).unwrap_or("?");
            let message = issue.get("message").and_then(Value::as_str).unwrap_or("");
            match issue.get("received").and_then(Value::as_str) {
                Some(received) => format!("  row {row}, {field}: {message} (got `{received}`)"),
                None => format!("  row {row}, {field}: {message}"),
            }
        })
        .collect::<Vec<_>>();

    if issues.len() > MAX_LISTED_ISSUES {
        lines.push(format!(
            "  ... and {} more (use --json for the full list)",
            issues.len() - MAX_LISTED_ISSUES
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use finboard_client::ClientError;
    use serde_json::json;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = ClientError::invalid_argument_with_recovery(
            "bad input",
            vec!["run finboard --help".to_string()],
        );

        let rendered = render_error(&error);
        assert!(rendered.starts_with("Something went wrong, but it's easy to fix."));
        assert!(rendered.contains("  Error:    invalid_argument"));
        assert!(rendered.contains("  Details:  bad input"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. run finboard --help"));
        assert!(!rendered.contains("Rows to fix:"));
    }

    #[test]
    fn lists_import_issues_when_present() {
        let error = ClientError::new("import_validation_failed", "Import failed", Vec::new())
            .with_data(json!({
                "issues": [
                    { "row": 2, "field": "amount", "code": "invalid_amount",
                      "message": "must be a number", "received": "abc" },
                    { "row": 4, "field": "date", "code": "invalid_date",
                      "message": "must use YYYY-MM-DD" }
                ]
            }));

        let rendered = render_error(&error);
        assert!(rendered.contains("Rows to fix:"));
        assert!(rendered.contains("  row 2, amount: must be a number (got `abc`)"));
        assert!(rendered.contains("  row 4, date: must use YYYY-MM-DD"));
        assert!(rendered.contains("  1. Retry the command."));
    }
}
