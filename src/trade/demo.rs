use serde_json::{json, Value};

/// Built-in walkthrough payloads served to the UI's two modes.
pub fn payload(mode: &str) -> Option<Value> {
    match mode {
        "options" | "call_option" => Some(json!({
            "type": "call_option",
            "ticker": "TSLA",
            "current_price": 250,
            "strike": 250,
            "expiry": "2027-03-21",
            "contracts": 1,
            "premium": 7.50,
            "premium_unit": "per_share",
            "delta": 0.55
        })),
        "averaging_up" | "stock_buy" => Some(json!({
            "type": "stock_buy",
            "ticker": "TSLA",
            "current_price": 200,
            "current_shares": 100,
            "avg_cost": 150,
            "buy_shares": 50,
            "buy_price": 200
        })),
        _ => None,
    }
}
