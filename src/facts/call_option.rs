use super::{round1, round2};
use crate::trade::{CallOptionInput, PremiumUnit, SHARES_PER_CONTRACT};
use chrono::NaiveDate;
use serde::Serialize;

/// Facts for a long call purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallOptionFacts {
    pub ticker: String,
    pub current_price: f64,
    pub strike: f64,
    pub expiry: NaiveDate,
    pub contracts: u32,
    pub premium_per_share: f64,
    /// Underlying price at expiry where payoff equals premium paid.
    pub break_even_price: f64,
    /// Move in the underlying needed to reach break-even. Negative when already past it.
    pub break_even_pct: f64,
    pub max_loss_total: f64,
    /// Shares the same cash would buy outright.
    pub stock_shares_equivalent: f64,
    pub notional_controlled: f64,
    pub leverage_ratio: f64,
    pub delta_move_per_dollar: Option<f64>,
    pub share_equivalent: Option<f64>,
}

/// Premium normalized to dollars per underlying share.
#[inline]
pub fn premium_per_share(premium: f64, unit: PremiumUnit) -> f64 {
    match unit {
        PremiumUnit::PerShare => premium,
        PremiumUnit::PerContract => round2(premium / SHARES_PER_CONTRACT),
    }
}

impl CallOptionFacts {
    /// Name of the first derived number that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("premium_per_share", self.premium_per_share),
            ("break_even_price", self.break_even_price),
            ("break_even_pct", self.break_even_pct),
            ("max_loss_total", self.max_loss_total),
            ("stock_shares_equivalent", self.stock_shares_equivalent),
            ("notional_controlled", self.notional_controlled),
            ("leverage_ratio", self.leverage_ratio),
            ("delta_move_per_dollar", self.delta_move_per_dollar.unwrap_or(0.0)),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

/// Compute call-option facts. Input must have passed the validator
/// (current_price > 0, max loss > 0 after rounding).
pub fn compute(input: &CallOptionInput) -> CallOptionFacts {
    let contracts = f64::from(input.contracts);
    let premium_per_share = premium_per_share(input.premium, input.premium_unit);

    let break_even_price = round2(input.strike + premium_per_share);
    let break_even_pct =
        round1((break_even_price - input.current_price) / input.current_price * 100.0);

    let max_loss_total = round2(premium_per_share * SHARES_PER_CONTRACT * contracts);
    let stock_shares_equivalent = round1(max_loss_total / input.current_price);

    let notional_controlled = round2(input.strike * SHARES_PER_CONTRACT * contracts);
    let leverage_ratio = round1(notional_controlled / max_loss_total);

    // Same number, two readings: dollars per $1 move, and shares of exposure
    let delta_exposure = input
        .delta
        .map(|d| round2(d * SHARES_PER_CONTRACT * contracts));

    CallOptionFacts {
        ticker: input.ticker.clone(),
        current_price: input.current_price,
        strike: input.strike,
        expiry: input.expiry,
        contracts: input.contracts,
        premium_per_share,
        break_even_price,
        break_even_pct,
        max_loss_total,
        stock_shares_equivalent,
        notional_controlled,
        leverage_ratio,
        delta_move_per_dollar: delta_exposure,
        share_equivalent: delta_exposure,
    }
}
