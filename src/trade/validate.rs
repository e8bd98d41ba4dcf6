//! Input gate in front of the facts engine.
//!
//! Order of checks: trade kind, field presence, typed decoding, numeric
//! domain. The first failure wins and nothing downstream runs.

use super::{CallOptionInput, StockBuyInput, TradeInput, TradeKind, SHARES_PER_CONTRACT};
use crate::errors::{CompassError, CompassResult};
use crate::facts::call_option::premium_per_share;
use crate::facts::{self, round2};
use serde_json::{Map, Value};

/// Read the `type` discriminator.
pub fn parse_kind(body: &Value) -> CompassResult<TradeKind> {
    body.get("type")
        .and_then(Value::as_str)
        .and_then(TradeKind::parse)
        .ok_or(CompassError::InvalidType)
}

/// Report the first required field that is absent, null, or an empty string.
/// Zero and `false` count as present.
pub fn validate_presence(kind: TradeKind, body: &Map<String, Value>) -> CompassResult<()> {
    for &field in kind.required_fields() {
        match body.get(field) {
            None | Some(Value::Null) => return Err(CompassError::MissingField(field)),
            Some(Value::String(s)) if s.is_empty() => {
                return Err(CompassError::MissingField(field));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Full gate: raw request body to a trade the facts engine can consume.
pub fn parse_trade(body: &Value) -> CompassResult<TradeInput> {
    let kind = parse_kind(body)?;
    let map = body.as_object().ok_or(CompassError::InvalidType)?;
    validate_presence(kind, map)?;

    let input: TradeInput = serde_json::from_value(body.clone())
        .map_err(|e| CompassError::InvalidInput(e.to_string()))?;

    check_domain(&input)?;
    Ok(input)
}

/// Reject values that would make an engine formula divide by zero or
/// produce a meaningless result. Inputs that pass yield only finite facts.
pub fn check_domain(input: &TradeInput) -> CompassResult<()> {
    match input {
        TradeInput::CallOption(i) => check_call_option(i)?,
        TradeInput::StockBuy(i) => check_stock_buy(i)?,
    }

    // Magnitude guard: huge finite inputs can still overflow a product or a rounding step
    if let Some(field) = facts::compute(input).first_non_finite() {
        return Err(CompassError::InvalidInput(format!(
            "{field} is out of range for these inputs"
        )));
    }
    Ok(())
}

fn check_call_option(i: &CallOptionInput) -> CompassResult<()> {
    positive("current_price", i.current_price)?;
    positive("strike", i.strike)?;
    positive("premium", i.premium)?;
    if i.contracts == 0 {
        return Err(CompassError::InvalidInput(
            "contracts must be at least 1".into(),
        ));
    }
    if let Some(delta) = i.delta {
        finite("delta", delta)?;
    }
    // leverage_ratio divides by the rounded max loss
    let max_loss_total = round2(
        premium_per_share(i.premium, i.premium_unit) * SHARES_PER_CONTRACT * f64::from(i.contracts),
    );
    if max_loss_total <= 0.0 {
        return Err(CompassError::InvalidInput("premium rounds to zero".into()));
    }
    Ok(())
}

fn check_stock_buy(i: &StockBuyInput) -> CompassResult<()> {
    positive("current_price", i.current_price)?;
    positive("avg_cost", i.avg_cost)?;
    positive("buy_shares", i.buy_shares)?;
    positive("buy_price", i.buy_price)?;
    finite("current_shares", i.current_shares)?;
    if i.current_shares < 0.0 {
        return Err(CompassError::InvalidInput(
            "current_shares cannot be negative".into(),
        ));
    }
    // new_return_pct divides by the rounded new average
    let shares = i.current_shares + i.buy_shares;
    let cost = i.current_shares * i.avg_cost + i.buy_shares * i.buy_price;
    if round2(cost / shares) <= 0.0 {
        return Err(CompassError::InvalidInput(
            "new average cost rounds to zero".into(),
        ));
    }
    Ok(())
}

#[inline]
fn finite(field: &str, value: f64) -> CompassResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CompassError::InvalidInput(format!("{field} must be a finite number")))
    }
}

#[inline]
fn positive(field: &str, value: f64) -> CompassResult<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(CompassError::InvalidInput(format!("{field} must be greater than zero")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call_body() -> Value {
        json!({
            "type": "call_option",
            "ticker": "TSLA",
            "current_price": 250,
            "strike": 250,
            "expiry": "2027-03-21",
            "contracts": 1,
            "premium": 7.50,
            "premium_unit": "per_share",
            "delta": 0.55
        })
    }

    fn stock_body() -> Value {
        json!({
            "type": "stock_buy",
            "ticker": "TSLA",
            "current_price": 200,
            "current_shares": 100,
            "avg_cost": 150,
            "buy_shares": 50,
            "buy_price": 200
        })
    }

    #[test]
    fn test_missing_type() {
        let mut body = call_body();
        body.as_object_mut().unwrap().remove("type");
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidType)));
    }

    #[test]
    fn test_unknown_type() {
        let mut body = call_body();
        body["type"] = json!("put_option");
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidType)));

        body["type"] = json!(1);
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidType)));
    }

    #[test]
    fn test_non_object_body() {
        assert!(matches!(parse_trade(&json!([1, 2])), Err(CompassError::InvalidType)));
        assert!(matches!(parse_trade(&json!("call_option")), Err(CompassError::InvalidType)));
    }

    #[test]
    fn test_each_missing_call_field_named() {
        for &field in TradeKind::CallOption.required_fields() {
            let mut body = call_body();
            body.as_object_mut().unwrap().remove(field);
            match parse_trade(&body) {
                Err(CompassError::MissingField(f)) => assert_eq!(f, field),
                other => panic!("removing {field} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_each_missing_stock_field_named() {
        for &field in TradeKind::StockBuy.required_fields() {
            let mut body = stock_body();
            body.as_object_mut().unwrap().remove(field);
            match parse_trade(&body) {
                Err(CompassError::MissingField(f)) => assert_eq!(f, field),
                other => panic!("removing {field} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_null_and_empty_string_are_missing() {
        let mut body = call_body();
        body["expiry"] = Value::Null;
        assert!(matches!(parse_trade(&body), Err(CompassError::MissingField("expiry"))));

        let mut body = call_body();
        body["ticker"] = json!("");
        assert!(matches!(parse_trade(&body), Err(CompassError::MissingField("ticker"))));
    }

    #[test]
    fn test_first_missing_field_reported() {
        let mut body = stock_body();
        let map = body.as_object_mut().unwrap();
        map.remove("buy_price");
        map.remove("avg_cost");
        assert!(matches!(parse_trade(&body), Err(CompassError::MissingField("avg_cost"))));
    }

    #[test]
    fn test_zero_and_false_are_present() {
        let mut body = stock_body();
        body["current_shares"] = json!(0);
        let map = body.as_object().unwrap();
        assert!(validate_presence(TradeKind::StockBuy, map).is_ok());
        assert!(parse_trade(&body).is_ok(), "zero current_shares is a fresh position");

        let mut body = call_body();
        body["strike"] = json!(false);
        let map = body.as_object().unwrap();
        assert!(validate_presence(TradeKind::CallOption, map).is_ok());
        // false is present but not a number
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));
    }

    #[test]
    fn test_delta_optional() {
        let mut body = call_body();
        body.as_object_mut().unwrap().remove("delta");
        let input = parse_trade(&body).unwrap();
        assert!(!input.has_delta());
    }

    #[test]
    fn test_wrong_types_rejected() {
        let mut body = call_body();
        body["premium_unit"] = json!("per_lot");
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));

        let mut body = call_body();
        body["expiry"] = json!("next friday");
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));

        let mut body = call_body();
        body["contracts"] = json!(1.5);
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_current_price_rejected() {
        let mut body = call_body();
        body["current_price"] = json!(0);
        match parse_trade(&body) {
            Err(CompassError::InvalidInput(msg)) => assert!(msg.contains("current_price"), "{msg}"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }

        let mut body = stock_body();
        body["current_price"] = json!(0);
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_avg_cost_rejected() {
        let mut body = stock_body();
        body["avg_cost"] = json!(0);
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_buy_shares_rejected() {
        let mut body = stock_body();
        body["current_shares"] = json!(0);
        body["buy_shares"] = json!(0);
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));
    }

    #[test]
    fn test_negative_position_rejected() {
        let mut body = stock_body();
        body["current_shares"] = json!(-5);
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));
    }

    #[test]
    fn test_tiny_per_contract_premium_rejected() {
        let mut body = call_body();
        body["premium"] = json!(0.4);
        body["premium_unit"] = json!("per_contract");
        match parse_trade(&body) {
            Err(CompassError::InvalidInput(msg)) => assert!(msg.contains("rounds to zero"), "{msg}"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_tiny_per_share_premium_rejected() {
        let mut body = call_body();
        body["current_price"] = json!(10);
        body["strike"] = json!(10);
        body["premium"] = json!(0.00001);
        match parse_trade(&body) {
            Err(CompassError::InvalidInput(msg)) => assert!(msg.contains("rounds to zero"), "{msg}"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_smallest_accepted_premium_gives_finite_leverage() {
        // 0.0001 per share * 100 = one cent of max loss
        let mut body = call_body();
        body["premium"] = json!(0.0001);
        let input = parse_trade(&body).unwrap();
        assert!(facts::compute(&input).first_non_finite().is_none());
    }

    #[test]
    fn test_sub_penny_average_rejected() {
        let body = json!({
            "type": "stock_buy",
            "ticker": "PENNY",
            "current_price": 0.004,
            "current_shares": 1000,
            "avg_cost": 0.004,
            "buy_shares": 1000,
            "buy_price": 0.004
        });
        match parse_trade(&body) {
            Err(CompassError::InvalidInput(msg)) => assert!(msg.contains("new average"), "{msg}"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_strike_rejected() {
        let mut body = call_body();
        body["strike"] = json!(1e306);
        match parse_trade(&body) {
            Err(CompassError::InvalidInput(msg)) => assert!(msg.contains("out of range"), "{msg}"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_cost_basis_rejected() {
        let mut body = stock_body();
        body["avg_cost"] = json!(1e300);
        body["current_shares"] = json!(1e10);
        match parse_trade(&body) {
            Err(CompassError::InvalidInput(msg)) => assert!(msg.contains("out of range"), "{msg}"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_delta_rejected() {
        let mut body = call_body();
        body["delta"] = json!(1e307);
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));
    }

    #[test]
    fn test_integral_float_contracts_accepted() {
        let mut body = call_body();
        body["contracts"] = json!(2.0);
        let TradeInput::CallOption(input) = parse_trade(&body).unwrap() else {
            panic!("expected call option");
        };
        assert_eq!(input.contracts, 2);

        body["contracts"] = json!(-1);
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_contracts_rejected() {
        let mut body = call_body();
        body["contracts"] = json!(0);
        assert!(matches!(parse_trade(&body), Err(CompassError::InvalidInput(_))));
    }

    #[test]
    fn test_valid_payloads_parse() {
        let call = parse_trade(&call_body()).unwrap();
        assert_eq!(call.kind(), TradeKind::CallOption);
        assert_eq!(call.ticker(), "TSLA");
        assert!(call.has_delta());

        let stock = parse_trade(&stock_body()).unwrap();
        assert_eq!(stock.kind(), TradeKind::StockBuy);
    }
}
