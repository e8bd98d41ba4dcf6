use super::{round1, round2};
use crate::trade::StockBuyInput;
use serde::Serialize;

/// Facts for adding shares to an existing position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockBuyFacts {
    pub ticker: String,
    pub current_price: f64,
    pub current_shares: f64,
    pub avg_cost: f64,
    pub buy_shares: f64,
    pub buy_price: f64,
    pub new_total_shares: f64,
    pub new_avg: f64,
    pub total_cost_basis: f64,
    pub old_return_pct: f64,
    pub new_return_pct: f64,
    /// Percentage points of return lost to the higher basis. Negative when
    /// the buy lowers the average.
    pub return_dilution_pp: f64,
    /// Gain or loss versus owning the whole new position at the old average.
    pub pnl_at_old_avg: f64,
}

impl StockBuyFacts {
    /// Name of the first derived number that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("new_total_shares", self.new_total_shares),
            ("new_avg", self.new_avg),
            ("total_cost_basis", self.total_cost_basis),
            ("old_return_pct", self.old_return_pct),
            ("new_return_pct", self.new_return_pct),
            ("return_dilution_pp", self.return_dilution_pp),
            ("pnl_at_old_avg", self.pnl_at_old_avg),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

/// Compute stock-buy facts. Input must have passed the validator
/// (avg_cost > 0, buy_shares > 0, current_price > 0, new average > 0 after rounding).
pub fn compute(input: &StockBuyInput) -> StockBuyFacts {
    let shares = input.current_shares + input.buy_shares;
    let cost = input.current_shares * input.avg_cost + input.buy_shares * input.buy_price;

    let new_total_shares = round1(shares);
    let new_avg = round2(cost / shares);
    let total_cost_basis = round2(cost);

    let old_return_pct = round1((input.current_price - input.avg_cost) / input.avg_cost * 100.0);
    // Uses the rounded average so the narrated numbers agree with each other
    let new_return_pct = round1((input.current_price - new_avg) / new_avg * 100.0);
    let return_dilution_pp = round1(old_return_pct - new_return_pct);

    let pnl_at_old_avg = round2(shares * input.avg_cost - total_cost_basis);

    StockBuyFacts {
        ticker: input.ticker.clone(),
        current_price: input.current_price,
        current_shares: input.current_shares,
        avg_cost: input.avg_cost,
        buy_shares: input.buy_shares,
        buy_price: input.buy_price,
        new_total_shares,
        new_avg,
        total_cost_basis,
        old_return_pct,
        new_return_pct,
        return_dilution_pp,
        pnl_at_old_avg,
    }
}
