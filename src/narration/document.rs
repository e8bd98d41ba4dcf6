//! Narration document shapes and the parser that enforces them.
//!
//! The narrator is told to return bare JSON, but models sometimes wrap it
//! in a markdown fence anyway. Anything that still fails to parse, or that
//! does not match the card layout for the trade kind, is a format error.

use crate::errors::{CompassError, CompassResult};
use crate::trade::TradeKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of acknowledgment statements the user must tick.
pub const ACKNOWLEDGMENT_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub headline: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallOptionNarration {
    pub the_reality: Card,
    pub break_even: Card,
    pub max_loss: Card,
    pub stock_comparison: Card,
    pub notional_and_leverage: Card,
    pub time_risk: Card,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Card>,
    pub acknowledgments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StockBuyNarration {
    pub new_reality: Card,
    pub return_dilution: Card,
    pub structural_change: Card,
    pub downside_scenario: Card,
    pub return_shift_explanation: Card,
    pub acknowledgments: Vec<String>,
}

/// What the narrator produced. `Failure` is the narrator's own refusal
/// shape and replaces the cards entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Narration {
    Failure { error: String },
    CallOption(CallOptionNarration),
    StockBuy(StockBuyNarration),
}

/// Remove a surrounding ``` or ```json fence if present.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse raw narrator text into the document for `kind`.
/// A sensitivity card is dropped when the trade carried no delta.
pub fn parse_narration(kind: TradeKind, has_delta: bool, raw: &str) -> CompassResult<Narration> {
    let value: Value = serde_json::from_str(strip_code_fences(raw))?;

    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Ok(Narration::Failure {
            error: error.to_string(),
        });
    }

    match kind {
        TradeKind::CallOption => {
            let mut doc: CallOptionNarration = serde_json::from_value(value)?;
            check_acknowledgments(&doc.acknowledgments)?;
            if !has_delta && doc.sensitivity.take().is_some() {
                tracing::warn!("dropping sensitivity card narrated without a delta");
            }
            Ok(Narration::CallOption(doc))
        }
        TradeKind::StockBuy => {
            let doc: StockBuyNarration = serde_json::from_value(value)?;
            check_acknowledgments(&doc.acknowledgments)?;
            Ok(Narration::StockBuy(doc))
        }
    }
}

fn check_acknowledgments(acks: &[String]) -> CompassResult<()> {
    if acks.len() != ACKNOWLEDGMENT_COUNT {
        return Err(CompassError::NarrationFormat(format!(
            "expected {ACKNOWLEDGMENT_COUNT} acknowledgments, got {}",
            acks.len()
        )));
    }
    Ok(())
}
