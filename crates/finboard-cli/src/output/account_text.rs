use std::io;

use serde_json::Value;

use super::format::{self, Column};
use super::rows::{get_array, get_f64, get_str};

pub fn render_audit(data: &Value) -> io::Result<String> {
    let entries = get_array(data, "entries");
    if entries.is_empty() {
        return Ok("The audit log is empty.".to_string());
    }

    let cells = entries
        .iter()
        .map(|entry| {
            vec![
                get_str(entry, "timestamp").to_string(),
                get_str(entry, "action").to_string(),
                get_str(entry, "username").to_string(),
            ]
        })
        .collect::<Vec<_>>();

    let mut lines = vec!["Audit log (newest first):".to_string()];
    lines.extend(format::render_table(
        &[
            Column::left("Time"),
            Column::left("Action"),
            Column::left("User"),
        ],
        &cells,
        format::terminal_width(),
        "Entry",
    ));
    Ok(lines.join("\n"))
}

pub fn render_user_create(data: &Value) -> io::Result<String> {
    let username = get_str(data, "username");
    Ok(format!(
        "Account `{username}` created. Run `finboard login {username} --password <pw>` to sign in."
    ))
}

pub fn render_login(data: &Value) -> io::Result<String> {
    let username = get_str(data, "username");
    if data
        .get("recovery_mode")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return Ok(format!(
            "Signed in as `{username}` through recovery mode.\n\
             Recovery mode bypasses stored credentials; turn it off once access is restored."
        ));
    }
    Ok(format!("Signed in as `{username}`."))
}

pub fn render_convert(data: &Value) -> io::Result<String> {
    let conversion = data
        .get("conversion")
        .ok_or_else(|| io::Error::other("convert output requires conversion"))?;
    let amount = get_f64(data, "amount");
    let currency = get_str(data, "currency");

    if get_str(conversion, "status") != "available" {
        return Ok(format!(
            "Exchange rate for {currency} is unavailable right now.\n  Reason: {}",
            get_str(conversion, "reason")
        ));
    }

    let mut lines = vec![format!("{amount:.2} {currency} in {}:", get_str(data, "target"))];
    lines.extend(format::key_value_rows(
        &[
            ("Rate:", format::money(get_f64(conversion, "rate"))),
            ("Total:", format::money(get_f64(conversion, "converted"))),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_classify(data: &Value) -> io::Result<String> {
    let category = get_str(data, "category");
    let reason = match data.get("matched_keyword").and_then(Value::as_str) {
        Some(keyword) => format!("matched keyword `{keyword}`"),
        None => "no keyword matched".to_string(),
    };
    Ok(format!("{category} ({reason})"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_audit, render_classify, render_convert, render_login};

    #[test]
    fn audit_renders_each_entry() {
        let data = json!({ "entries": [
            { "id": 2, "timestamp": "2024-03-02 10:15", "action": "Login", "username": "ana" },
            { "id": 1, "timestamp": "2024-03-01 09:00", "action": "User Created",
              "username": "ana" }
        ] });
        let rendered = render_audit(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("2024-03-02 10:15"));
            assert!(text.contains("User Created"));
        }
    }

    #[test]
    fn recovery_login_is_called_out() {
        let normal = render_login(&json!({ "username": "ana", "recovery_mode": false }));
        assert!(matches!(normal, Ok(ref text) if text == "Signed in as `ana`."));

        let recovery = render_login(&json!({ "username": "admin", "recovery_mode": true }));
        assert!(matches!(recovery, Ok(ref text) if text.contains("recovery mode")));
    }

    #[test]
    fn convert_shows_rate_or_reason() {
        let available = render_convert(&json!({
            "amount": 10.0, "currency": "USD", "target": "BRL",
            "conversion": { "status": "available", "rate": 5.25, "converted": 52.5 }
        }));
        assert!(available.is_ok());
        if let Ok(text) = available {
            assert!(text.starts_with("10.00 USD in BRL:"));
            assert!(text.contains("R$ 52.50"));
        }

        let unavailable = render_convert(&json!({
            "amount": 10.0, "currency": "EUR", "target": "BRL",
            "conversion": { "status": "unavailable", "reason": "timed out" }
        }));
        assert!(matches!(unavailable, Ok(ref text) if text.contains("Reason: timed out")));
    }

    #[test]
    fn classify_names_the_keyword() {
        let matched = render_classify(&json!({ "category": "Food", "matched_keyword": "ifood" }));
        assert!(matches!(matched, Ok(ref text) if text == "Food (matched keyword `ifood`)"));

        let fallback = render_classify(&json!({ "category": "Other", "matched_keyword": null }));
        assert!(matches!(fallback, Ok(ref text) if text == "Other (no keyword matched)"));
    }
}
