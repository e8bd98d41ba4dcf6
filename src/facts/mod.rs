pub mod call_option;
pub mod stock_buy;

use crate::trade::TradeInput;
use serde::Serialize;

pub use call_option::CallOptionFacts;
pub use stock_buy::StockBuyFacts;

/// Derived numeric facts for one trade. The only numbers narration may use.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Facts {
    CallOption(CallOptionFacts),
    StockBuy(StockBuyFacts),
}

impl Facts {
    #[inline]
    pub fn first_non_finite(&self) -> Option<&'static str> {
        match self {
            Self::CallOption(f) => f.first_non_finite(),
            Self::StockBuy(f) => f.first_non_finite(),
        }
    }
}

/// Map a validated trade to its facts.
///
/// Pure function: no clock, no randomness, no IO. Calling it twice on the
/// same input yields bit-identical output.
#[inline]
pub fn compute(input: &TradeInput) -> Facts {
    match input {
        TradeInput::CallOption(i) => Facts::CallOption(call_option::compute(i)),
        TradeInput::StockBuy(i) => Facts::StockBuy(stock_buy::compute(i)),
    }
}

/// Currency-like values: 2 decimals, half rounds up.
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0 + 0.5).floor() / 100.0
}

/// Percentages and share counts: 1 decimal, half rounds up.
#[inline]
pub fn round1(x: f64) -> f64 {
    (x * 10.0 + 0.5).floor() / 10.0
}
