use serde_json::Value;
use std::cmp::Ordering;
use crate::data::types::{Market, Outcome};

#[derive(Debug, thiserror::Error)]
pub enum OutcomeError {
    #[error("Outcome names are not a valid encoded array: {0}")]
    BadNames(String),

    #[error("Outcome prices are not a valid encoded array: {0}")]
    BadPrices(String),

    #[error("Outcome count mismatch: {names} names, {prices} prices")]
    LengthMismatch { names: usize, prices: usize },
}

/// Decode a market's outcomes, most probable first.
/// Any decoding problem yields an empty list for this market only.
pub fn decode_outcomes(market: &Market) -> Vec<Outcome> {
    parse_outcomes(market.outcomes.as_deref(), market.outcome_prices.as_deref())
        .unwrap_or_else(|e| {
            tracing::debug!("Market {} has no usable outcomes: {}", market.id, e);
            Vec::new()
        })
}

/// Pair encoded outcome names with encoded prices. Absent input counts as
/// an empty array. Price entries that are null or not numeric become 0.0.
pub fn parse_outcomes(
    names: Option<&str>,
    prices: Option<&str>,
) -> Result<Vec<Outcome>, OutcomeError> {
    let names = decode_array(names).map_err(OutcomeError::BadNames)?;
    let prices = decode_array(prices).map_err(OutcomeError::BadPrices)?;

    if names.len() != prices.len() {
        return Err(OutcomeError::LengthMismatch {
            names: names.len(),
            prices: prices.len(),
        });
    }

    let mut outcomes: Vec<Outcome> = names
        .iter()
        .zip(prices.iter())
        .map(|(name, price)| Outcome {
            name: outcome_name(name),
            price: outcome_price(price),
        })
        .collect();

    // Prices are finite here. Stable: equal prices (0.0 and -0.0 included)
    // keep feed order
    outcomes.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal));
    Ok(outcomes)
}

fn decode_array(encoded: Option<&str>) -> Result<Vec<Value>, String> {
    let encoded = match encoded {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(Vec::new()),
    };

    match serde_json::from_str::<Value>(encoded) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(format!("expected an array, got {:?}", encoded)),
        Err(e) => Err(e.to_string()),
    }
}

fn outcome_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn outcome_price(value: &Value) -> f64 {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    price.filter(|p| p.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(outcomes: &[Outcome]) -> Vec<&str> {
        outcomes.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn test_binary_market() {
        let outcomes = parse_outcomes(Some(r#"["Yes","No"]"#), Some(r#"["0.73","0.27"]"#)).unwrap();

        assert_eq!(
            outcomes,
            vec![
                Outcome { name: "Yes".to_string(), price: 0.73 },
                Outcome { name: "No".to_string(), price: 0.27 },
            ]
        );
    }

    #[test]
    fn test_sorted_most_probable_first() {
        let outcomes = parse_outcomes(
            Some(r#"["A","B","C"]"#),
            Some(r#"["0.1","0.6","0.3"]"#),
        )
        .unwrap();

        assert_eq!(names(&outcomes), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_keep_feed_order() {
        let outcomes = parse_outcomes(
            Some(r#"["A","B","C","D"]"#),
            Some(r#"["0.25","0.25","0.5","0.25"]"#),
        )
        .unwrap();

        assert_eq!(names(&outcomes), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_signed_zero_prices_tie() {
        let outcomes = parse_outcomes(
            Some(r#"["A","B","C"]"#),
            Some(r#"["-0","0","NaN"]"#),
        )
        .unwrap();

        assert_eq!(names(&outcomes), vec!["A", "B", "C"]);
        assert_eq!(outcomes[2].price, 0.0);
    }

    #[test]
    fn test_bad_price_entries_default_to_zero() {
        let outcomes = parse_outcomes(
            Some(r#"["Yes","No","Maybe"]"#),
            Some(r#"["abc", null, 0.4]"#),
        )
        .unwrap();

        assert_eq!(names(&outcomes), vec!["Maybe", "Yes", "No"]);
        assert_eq!(outcomes[1].price, 0.0);
        assert_eq!(outcomes[2].price, 0.0);
    }

    #[test]
    fn test_absent_input_is_empty() {
        assert!(parse_outcomes(None, None).unwrap().is_empty());
        assert!(parse_outcomes(Some(""), Some("")).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_encoding_fails() {
        assert!(matches!(
            parse_outcomes(Some("[\"Yes\", \"No\""), Some(r#"["0.5","0.5"]"#)),
            Err(OutcomeError::BadNames(_))
        ));
        assert!(matches!(
            parse_outcomes(Some(r#"["Yes"]"#), Some(r#"{"Yes": 1}"#)),
            Err(OutcomeError::BadPrices(_))
        ));
    }

    #[test]
    fn test_length_mismatch_fails() {
        assert!(matches!(
            parse_outcomes(Some(r#"["Yes","No"]"#), Some(r#"["1"]"#)),
            Err(OutcomeError::LengthMismatch { names: 2, prices: 1 })
        ));
    }

    #[test]
    fn test_decode_outcomes_swallows_errors() {
        let market = Market {
            id: "m1".to_string(),
            outcomes: Some("not json".to_string()),
            outcome_prices: Some(r#"["0.5"]"#.to_string()),
            ..Default::default()
        };

        assert!(decode_outcomes(&market).is_empty());
    }
}
