pub mod demo;
pub mod validate;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Shares controlled by one listed option contract.
pub const SHARES_PER_CONTRACT: f64 = 100.0;

// ── Trade kinds ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    CallOption,
    StockBuy,
}

impl TradeKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "call_option" => Some(Self::CallOption),
            "stock_buy" => Some(Self::StockBuy),
            _ => None,
        }
    }

    /// Fields that must be present (non-null, non-empty) before any computation.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::CallOption => &[
                "ticker",
                "current_price",
                "strike",
                "expiry",
                "contracts",
                "premium",
                "premium_unit",
            ],
            Self::StockBuy => &[
                "ticker",
                "current_price",
                "current_shares",
                "avg_cost",
                "buy_shares",
                "buy_price",
            ],
        }
    }
}

impl std::fmt::Display for TradeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CallOption => write!(f, "call_option"),
            Self::StockBuy => write!(f, "stock_buy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumUnit {
    PerShare,
    PerContract,
}

// ── Inputs ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallOptionInput {
    pub ticker: String,
    pub current_price: f64,
    pub strike: f64,
    pub expiry: NaiveDate,
    #[serde(deserialize_with = "whole_number")]
    pub contracts: u32,
    pub premium: f64,
    pub premium_unit: PremiumUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

/// Accepts `2` and `2.0` alike; rejects fractions, negatives and overflow.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = f64::deserialize(deserializer)?;
    if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n) {
        Ok(n as u32)
    } else {
        Err(serde::de::Error::custom(format!(
            "contracts must be a whole number, got {n}"
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBuyInput {
    pub ticker: String,
    pub current_price: f64,
    pub current_shares: f64,
    pub avg_cost: f64,
    pub buy_shares: f64,
    pub buy_price: f64,
}

/// A validated trade request, discriminated by the JSON `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TradeInput {
    CallOption(CallOptionInput),
    StockBuy(StockBuyInput),
}

impl TradeInput {
    #[inline]
    pub fn kind(&self) -> TradeKind {
        match self {
            Self::CallOption(_) => TradeKind::CallOption,
            Self::StockBuy(_) => TradeKind::StockBuy,
        }
    }

    #[inline]
    pub fn ticker(&self) -> &str {
        match self {
            Self::CallOption(i) => &i.ticker,
            Self::StockBuy(i) => &i.ticker,
        }
    }

    /// Whether the narration may include a sensitivity card.
    #[inline]
    pub fn has_delta(&self) -> bool {
        matches!(self, Self::CallOption(CallOptionInput { delta: Some(_), .. }))
    }
}
