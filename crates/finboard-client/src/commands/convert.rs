use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{load_setup, validate_amount};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ConvertData;
use crate::currency::{
    Conversion, HttpRateSource, RateSource, TARGET_CURRENCY, convert, normalize_currency_code,
};

const COMMAND: &str = "convert";

#[derive(Default)]
pub struct ConvertOptions<'a> {
    pub amount: f64,
    pub currency: String,
    pub home_override: Option<&'a Path>,
    /// Replaces the HTTP quote service.
    pub rate_source: Option<&'a dyn RateSource>,
}

pub fn run(amount: f64, currency: String) -> ClientResult<SuccessEnvelope> {
    run_with_options(ConvertOptions {
        amount,
        currency,
        ..ConvertOptions::default()
    })
}

/// A failed quote still succeeds, with an `unavailable` conversion.
#[doc(hidden)]
pub fn run_with_options(options: ConvertOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let amount = validate_amount(options.amount, "amount", COMMAND)?;
    let currency = normalize_currency_code(&options.currency)?;

    let conversion = match options.rate_source {
        Some(source) => convert(amount, &currency, source),
        None => {
            let setup = load_setup(options.home_override)?;
            match HttpRateSource::from_config(&setup.config.currency) {
                Ok(source) => convert(amount, &currency, &source),
                Err(error) => Conversion::Unavailable {
                    reason: error.message,
                },
            }
        }
    };

    success(
        COMMAND,
        ConvertData {
            amount,
            currency,
            target: TARGET_CURRENCY.to_string(),
            conversion,
        },
    )
}
