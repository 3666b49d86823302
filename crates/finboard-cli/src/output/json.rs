use std::io;

use finboard_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "months" => render_months_json(&success.data),
        "audit" => render_audit_json(&success.data),
        _ => json!({
            "ok": true,
            "version": JSON_VERSION,
            "command": success.command,
            "data": success.data.clone(),
        }),
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let mut payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    if let Some(data) = &error.data {
        payload["error"]["data"] = data.clone();
    }
    serialize_json_pretty(&payload)
}

/// A bare array of `YYYY-MM` strings.
fn render_months_json(data: &Value) -> Value {
    data.get("months")
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

/// A bare array of audit entries, newest first.
fn render_audit_json(data: &Value) -> Value {
    data.get("entries")
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
