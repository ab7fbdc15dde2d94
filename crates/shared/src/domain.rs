use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ActionError;

/// Top-level key of the dashboard state tree. One key per registered reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SliceKey {
    ClientAccessToken,
    NetworkAccessToken,
    Account,
    App,
    Asset,
    Balance,
    Core,
    Form,
    Mockhsm,
    Routing,
    Testnet,
    Transaction,
    TransactionFeed,
    Unspent,
}

impl SliceKey {
    pub const ALL: [SliceKey; 14] = [
        SliceKey::ClientAccessToken,
        SliceKey::NetworkAccessToken,
        SliceKey::Account,
        SliceKey::App,
        SliceKey::Asset,
        SliceKey::Balance,
        SliceKey::Core,
        SliceKey::Form,
        SliceKey::Mockhsm,
        SliceKey::Routing,
        SliceKey::Testnet,
        SliceKey::Transaction,
        SliceKey::TransactionFeed,
        SliceKey::Unspent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SliceKey::ClientAccessToken => "clientAccessToken",
            SliceKey::NetworkAccessToken => "networkAccessToken",
            SliceKey::Account => "account",
            SliceKey::App => "app",
            SliceKey::Asset => "asset",
            SliceKey::Balance => "balance",
            SliceKey::Core => "core",
            SliceKey::Form => "form",
            SliceKey::Mockhsm => "mockhsm",
            SliceKey::Routing => "routing",
            SliceKey::Testnet => "testnet",
            SliceKey::Transaction => "transaction",
            SliceKey::TransactionFeed => "transactionFeed",
            SliceKey::Unspent => "unspent",
        }
    }
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SliceKey {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SliceKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ActionError::UnknownSlice(s.to_string()))
    }
}

/// Identity of the blockchain the dashboard is configured against.
///
/// `Unset` stands for the literal `0` the dashboard uses when no id is known;
/// every falsy JSON value normalizes to it. Any truthy value is kept as sent,
/// so `"0"` or `42.0` round-trip unchanged into the core slice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BlockchainId {
    #[default]
    Unset,
    Id(Value),
}

impl BlockchainId {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(value) if is_truthy(Some(value)) => Self::Id(value.clone()),
            _ => Self::Unset,
        }
    }

    /// JSON form stored in the core slice: `0` when unset.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Unset => Value::from(0),
            Self::Id(id) => id.clone(),
        }
    }

    /// Loose (`==`) comparison of a stored id against this one.
    ///
    /// Numbers, numeric strings and booleans compare by numeric value, strings
    /// compare exactly, `null` equals nothing but `null`, and objects or arrays
    /// never match.
    pub fn matches(&self, stored: &Value) -> bool {
        loosely_equal(stored, &self.to_value())
    }
}

impl fmt::Display for BlockchainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("0"),
            Self::Id(Value::String(id)) => f.write_str(id),
            Self::Id(other) => write!(f, "{other}"),
        }
    }
}

fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(x), Value::String(y)) => x == y,
        _ => match (loose_number(a), loose_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(string_to_number(s)),
        _ => None,
    }
}

/// Numeric reading of a string; `NaN` when it is not a number literal.
fn string_to_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }
    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    if text
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E'))
    {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// JavaScript-style truthiness of a JSON field. Missing fields are falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn slice_keys_round_trip_through_their_names() {
        for key in SliceKey::ALL {
            assert_eq!(key.as_str().parse::<SliceKey>().expect("parse"), key);
            assert_eq!(
                serde_json::to_value(key).expect("serialize"),
                json!(key.as_str())
            );
        }
        assert!("accessToken".parse::<SliceKey>().is_err());
    }

    #[test]
    fn falsy_blockchain_ids_collapse_to_unset() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert_eq!(BlockchainId::from_value(Some(&value)), BlockchainId::Unset, "{value}");
        }
        assert_eq!(BlockchainId::from_value(None), BlockchainId::Unset);
    }

    #[test]
    fn truthy_ids_are_kept_verbatim() {
        for value in [json!("0"), json!(true), json!(42.0), json!("chain-a")] {
            assert_eq!(BlockchainId::from_value(Some(&value)).to_value(), value);
        }
        assert_eq!(BlockchainId::Unset.to_value(), json!(0));
    }

    #[test]
    fn numeric_ids_match_by_value() {
        let id = BlockchainId::from_value(Some(&json!(42.0)));
        assert!(id.matches(&json!(42)));
        assert!(id.matches(&json!("042")));
        assert!(id.matches(&json!(" 42 ")));
        assert!(!id.matches(&json!("42abc")));
        assert!(BlockchainId::from_value(Some(&json!(true))).matches(&json!(1)));
    }

    #[test]
    fn unset_matches_zero_like_values_but_not_null() {
        let unset = BlockchainId::Unset;
        for stored in [json!(0), json!("0"), json!(""), json!(false), json!("0x0")] {
            assert!(unset.matches(&stored), "{stored}");
        }
        assert!(!unset.matches(&json!(null)));
        assert!(!unset.matches(&json!("chain-a")));
    }

    #[test]
    fn string_ids_compare_exactly() {
        let id = BlockchainId::from_value(Some(&json!("abc")));
        assert!(id.matches(&json!("abc")));
        assert!(!id.matches(&json!("abd")));
        assert!(!BlockchainId::from_value(Some(&json!("042"))).matches(&json!("42")));
    }

    #[test]
    fn truthiness_matches_dashboard_rules() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!("no"))));
        assert!(is_truthy(Some(&json!({}))));
    }
}
