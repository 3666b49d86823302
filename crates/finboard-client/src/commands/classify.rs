use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ClassifyData;
use crate::ledger::classify::{FALLBACK, matching_rule};

/// Shows which category `auto` would pick. Touches no storage.
pub fn run(description: String) -> ClientResult<SuccessEnvelope> {
    let (matched_keyword, category) = match matching_rule(&description) {
        Some((keyword, category)) => (Some(keyword.to_string()), category),
        None => (None, FALLBACK),
    };
    success(
        "classify",
        ClassifyData {
            description,
            category,
            matched_keyword,
        },
    )
}
