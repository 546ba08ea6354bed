//! Payload decoding helpers

use crate::error::{ScoringError, ScoringResult};
use serde::de::{self, DeserializeOwned, Deserializer, Unexpected, Visitor};
use std::fmt;

/// Decode a record from a request payload, reporting the failing field
pub(crate) fn decode<T>(record: &str, value: &serde_json::Value) -> ScoringResult<T>
where
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize(value.clone())
        .map_err(|e| ScoringError::from_decode(record, e))
}

/// Accepts a JSON boolean or a 0/1 code
struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean or the integer 0 or 1")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(Unexpected::Signed(v), &self)),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
        if v == 0.0 {
            Ok(false)
        } else if v == 1.0 {
            Ok(true)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlagVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "super::flag")]
        value: bool,
    }

    #[test]
    fn test_flag_accepts_bool_and_codes() {
        let a: Holder = serde_json::from_str(r#"{"value": true}"#).unwrap();
        let b: Holder = serde_json::from_str(r#"{"value": 0}"#).unwrap();
        let c: Holder = serde_json::from_str(r#"{"value": 1}"#).unwrap();
        let d: Holder = serde_json::from_str(r#"{"value": 1.0}"#).unwrap();
        let e: Holder = serde_json::from_str(r#"{"value": 0.0}"#).unwrap();
        assert!(a.value);
        assert!(!b.value);
        assert!(c.value);
        assert!(d.value);
        assert!(!e.value);
    }

    #[test]
    fn test_flag_rejects_other_codes() {
        assert!(serde_json::from_str::<Holder>(r#"{"value": 2}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"value": 0.5}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"value": "yes"}"#).is_err());
    }
}
