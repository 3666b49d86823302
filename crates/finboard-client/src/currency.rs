//! Foreign-currency to BRL conversion against a public quote service.
//!
//! Quote failures never surface as command errors. They degrade to
//! [`Conversion::Unavailable`] so callers can show a notice and carry on.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::CurrencySection;
use crate::{ClientError, ClientResult};

pub const TARGET_CURRENCY: &str = "BRL";
pub const SUGGESTED_CURRENCIES: [&str; 3] = ["USD", "EUR", "BTC"];

pub trait RateSource {
    /// Price of one unit of `currency` in BRL.
    fn fetch_rate(&self, currency: &str) -> ClientResult<f64>;
}

pub struct HttpRateSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpRateSource {
    pub fn from_config(section: &CurrencySection) -> ClientResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(section.timeout_secs))
            .build()
            .map_err(|error| ClientError::currency_unavailable("*", &error.to_string()))?;
        Ok(Self {
            client,
            base_url: section.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn quote_url(&self, currency: &str) -> String {
        format!("{}/last/{currency}-{TARGET_CURRENCY}", self.base_url)
    }
}

impl RateSource for HttpRateSource {
    fn fetch_rate(&self, currency: &str) -> ClientResult<f64> {
        let url = self.quote_url(currency);
        debug!(%url, "requesting exchange rate");
        let payload = self
            .client
            .get(&url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(|response| response.json::<Value>())
            .map_err(|error| ClientError::currency_unavailable(currency, &error.to_string()))?;
        parse_rate_payload(currency, &payload)
            .map_err(|detail| ClientError::currency_unavailable(currency, &detail))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Conversion {
    Available { rate: f64, converted: f64 },
    Unavailable { reason: String },
}

pub fn convert(amount: f64, currency: &str, source: &dyn RateSource) -> Conversion {
    match source.fetch_rate(currency) {
        Ok(rate) => Conversion::Available {
            rate,
            converted: amount * rate,
        },
        Err(error) => {
            warn!(currency, reason = %error.message, "exchange rate unavailable");
            Conversion::Unavailable {
                reason: error.message,
            }
        }
    }
}

/// Accepts three ASCII letters in any case and returns them uppercased.
pub fn normalize_currency_code(value: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(ClientError::invalid_argument_with_recovery(
            &format!("`{trimmed}` is not a currency code."),
            vec![format!(
                "Use a three-letter code such as {}.",
                SUGGESTED_CURRENCIES.join(", ")
            )],
        ));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Reads `{"<CUR>BRL": {"bid": "<decimal>"}}`.
pub fn parse_rate_payload(currency: &str, payload: &Value) -> Result<f64, String> {
    let key = format!("{currency}{TARGET_CURRENCY}");
    let bid = payload
        .get(&key)
        .and_then(|quote| quote.get("bid"))
        .ok_or_else(|| format!("response has no `{key}.bid` field"))?;

    let rate = match bid {
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("`{key}.bid` is not a number"))?,
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| format!("`{key}.bid` is not a number"))?,
        _ => return Err(format!("`{key}.bid` is not a number")),
    };

    if !rate.is_finite() || rate <= 0.0 {
        return Err(format!("`{key}.bid` must be a positive number"));
    }
    Ok(rate)
}
