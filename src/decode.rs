// src/decode.rs
//! JSON decoding for everything the backend sends us.
//!
//! The backend is loose about scalar types, so the wire models route their
//! scalar fields through [`lenient`]. Whatever still fails becomes a
//! [`DecodeError`] that says *how* the payload was wrong, which is what lets
//! the result screen tell "malformed" apart from "absent".

use std::fmt;

use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Not JSON at all.
    Syntax,
    /// Valid JSON with the wrong structure or an uncoercible value.
    Shape,
    /// The document ended early (includes the empty document).
    Truncated,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::Syntax => write!(f, "invalid JSON"),
            DecodeErrorKind::Shape => write!(f, "unexpected shape"),
            DecodeErrorKind::Truncated => write!(f, "truncated JSON"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for DecodeError {}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let kind = match e.classify() {
            Category::Data => DecodeErrorKind::Shape,
            Category::Eof => DecodeErrorKind::Truncated,
            Category::Syntax | Category::Io => DecodeErrorKind::Syntax,
        };
        DecodeError {
            kind,
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}

/// Decodes `text` into `T`, ignoring unknown fields.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    if text.trim().is_empty() {
        return Err(DecodeError {
            kind: DecodeErrorKind::Truncated,
            message: "empty document".to_string(),
            line: 1,
            column: 0,
        });
    }
    serde_json::from_str(text).map_err(DecodeError::from)
}

/// `deserialize_with` helpers that coerce JSON scalars instead of rejecting
/// them: `"0.93"` reads as a number, `"true"` as a boolean, `42` as a string.
/// A `null` reads as the field's default. Anything else still fails.
pub mod lenient {
    use std::collections::BTreeMap;

    use log::debug;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn kind_of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }

    fn coerce_bool(value: &Value) -> Result<Option<bool>, String> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(format!("expected a boolean, found string {s:?}")),
            },
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(Some(false)),
                Some(1) => Ok(Some(true)),
                _ => Err(format!("expected a boolean, found number {n}")),
            },
            other => Err(format!("expected a boolean, found {}", kind_of(other))),
        }
    }

    fn coerce_f64(value: &Value) -> Result<Option<f64>, String> {
        let parsed = match value {
            Value::Null => return Ok(None),
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| format!("number {n} is not representable"))?,
            Value::String(s) => {
                let v = s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("expected a number, found string {s:?}"))?;
                debug!("Coerced string {s:?} to number");
                v
            }
            other => return Err(format!("expected a number, found {}", kind_of(other))),
        };
        if !parsed.is_finite() {
            return Err(format!("expected a finite number, found {value}"));
        }
        Ok(Some(parsed))
    }

    fn coerce_i64(value: &Value) -> Result<Option<i64>, String> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Some(i));
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
                    _ => Err(format!("expected an integer, found number {n}")),
                }
            }
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(|v| {
                    debug!("Coerced string {s:?} to integer");
                    Some(v)
                })
                .map_err(|_| format!("expected an integer, found string {s:?}")),
            other => Err(format!("expected an integer, found {}", kind_of(other))),
        }
    }

    fn coerce_string(value: &Value) -> Result<Option<String>, String> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => {
                debug!("Coerced number {n} to string");
                Ok(Some(n.to_string()))
            }
            Value::Bool(b) => {
                debug!("Coerced boolean {b} to string");
                Ok(Some(b.to_string()))
            }
            other => Err(format!("expected a string, found {}", kind_of(other))),
        }
    }

    pub fn bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(d)?;
        coerce_bool(&value)
            .map(Option::unwrap_or_default)
            .map_err(D::Error::custom)
    }

    pub fn opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        let value = Value::deserialize(d)?;
        coerce_i64(&value).map_err(D::Error::custom)
    }

    pub fn i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        opt_i64(d).map(Option::unwrap_or_default)
    }

    pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(d)?;
        coerce_f64(&value).map_err(D::Error::custom)
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Value::deserialize(d)?;
        coerce_string(&value).map_err(D::Error::custom)
    }

    pub fn string_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        opt_string(d).map(Option::unwrap_or_default)
    }

    /// Required string: coerces scalars but rejects `null`.
    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let value = Value::deserialize(d)?;
        match coerce_string(&value).map_err(D::Error::custom)? {
            Some(s) => Ok(s),
            None => Err(D::Error::custom("expected a string, found null")),
        }
    }

    pub fn opt_f64_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<f64>>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match coerce_f64(item) {
                    Ok(Some(v)) => Ok(v),
                    Ok(None) => Err(format!("element {i}: expected a number, found null")),
                    Err(e) => Err(format!("element {i}: {e}")),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected an array, found {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn opt_f64_map<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<BTreeMap<String, f64>>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::Object(entries) => entries
                .iter()
                .map(|(key, item)| match coerce_f64(item) {
                    Ok(Some(v)) => Ok((key.clone(), v)),
                    Ok(None) => Err(format!("{key:?}: expected a number, found null")),
                    Err(e) => Err(format!("{key:?}: {e}")),
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Some)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected an object, found {}",
                kind_of(&other)
            ))),
        }
    }
}
