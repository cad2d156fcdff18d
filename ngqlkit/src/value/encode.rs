// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Literal encoding of runtime values
//!
//! A declared graph type, when present, governs integer width checks and
//! temporal literal formatting. Without one the value's own shape decides.

use super::Value;
use crate::error::{NgqlError, Result};
use crate::types::GraphType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const CLAUSE: &str = "VALUE";

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.6f";

/// Encode a value as literal text
pub fn encode(declared: Option<&GraphType>, value: &Value) -> Result<String> {
    match value {
        Value::Expr(expr) => Ok(expr.clone()),
        Value::Null => Ok("NULL".to_string()),
        _ => match declared {
            Some(graph_type) => encode_declared(graph_type, value),
            None => encode_native(value),
        },
    }
}

/// Encode a vertex id, or a list of them
///
/// Strings are quoted, integers are bare, expressions pass through.
pub fn encode_vid(value: &Value) -> Result<String> {
    match value {
        Value::String(s) if s.is_empty() => Err(invalid("vid is empty")),
        Value::String(s) => Ok(quote(s)),
        Value::Int(i) => Ok(i.to_string()),
        Value::UInt(u) => {
            if *u > i64::MAX as u64 {
                return Err(invalid(format!("vid {} overflows int64", u)));
            }
            Ok(u.to_string())
        }
        Value::Expr(expr) if expr.trim().is_empty() => Err(invalid("vid is empty")),
        Value::Expr(expr) => Ok(expr.clone()),
        Value::List(items) => {
            if items.is_empty() {
                return Err(invalid("vid list is empty"));
            }
            let mut encoded = Vec::with_capacity(items.len());
            for item in items {
                if matches!(item, Value::List(_)) {
                    return Err(invalid("nested vid lists are not supported"));
                }
                encoded.push(encode_vid(item)?);
            }
            Ok(encoded.join(", "))
        }
        Value::Null => Err(invalid("vid is empty")),
        other => Err(invalid(format!(
            "vid must be a string, an integer or an expression, got {}",
            other.type_name()
        ))),
    }
}

/// Double-quote a string literal, escaping quotes, backslashes and control
/// characters
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn invalid<R: Into<String>>(reason: R) -> NgqlError {
    NgqlError::invalid_clause(CLAUSE, reason)
}

fn mismatch(graph_type: &GraphType, value: &Value) -> NgqlError {
    invalid(format!(
        "cannot encode {} value as {}",
        value.type_name(),
        graph_type
    ))
}

fn encode_declared(graph_type: &GraphType, value: &Value) -> Result<String> {
    match graph_type {
        t if t.is_integer() => encode_integer(t, value),
        t if t.is_floating() => match value {
            Value::Int(i) => format_float(*i as f64),
            Value::UInt(u) => format_float(*u as f64),
            Value::Float(f) => format_float(*f),
            other => Err(mismatch(t, other)),
        },
        GraphType::Bool => match value {
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(mismatch(graph_type, other)),
        },
        t if t.is_string() => match value {
            Value::String(s) => Ok(quote(s)),
            Value::Bytes(b) => Ok(quote(&hex::encode(b))),
            other => Err(mismatch(t, other)),
        },
        GraphType::Timestamp => match value {
            Value::DateTime(dt) => Ok(dt.and_utc().timestamp().to_string()),
            Value::Int(_) | Value::UInt(_) => encode_integer(&GraphType::Int64, value),
            Value::String(s) => Ok(format!("timestamp({})", quote(s))),
            other => Err(mismatch(graph_type, other)),
        },
        GraphType::DateTime => match value {
            Value::DateTime(dt) => Ok(datetime_literal(dt)),
            Value::Date(d) => Ok(datetime_literal(&d.and_time(NaiveTime::default()))),
            Value::String(s) => Ok(format!("datetime({})", quote(s))),
            other => Err(mismatch(graph_type, other)),
        },
        GraphType::Date => match value {
            Value::Date(d) => Ok(date_literal(d)),
            Value::DateTime(dt) => Ok(date_literal(&dt.date())),
            Value::String(s) => Ok(format!("date({})", quote(s))),
            other => Err(mismatch(graph_type, other)),
        },
        GraphType::Time => match value {
            Value::Time(t) => Ok(time_literal(t)),
            Value::DateTime(dt) => Ok(time_literal(&dt.time())),
            Value::String(s) => Ok(format!("time({})", quote(s))),
            other => Err(mismatch(graph_type, other)),
        },
        GraphType::Duration => match value {
            Value::Map(_) => Ok(format!("duration({})", encode_native(value)?)),
            other => Err(mismatch(graph_type, other)),
        },
        GraphType::Geography(_) => match value {
            Value::String(s) => Ok(format!("ST_GeogFromText({})", quote(s))),
            other => Err(mismatch(graph_type, other)),
        },
        other => Err(mismatch(other, value)),
    }
}

fn encode_integer(graph_type: &GraphType, value: &Value) -> Result<String> {
    let (min, max) = graph_type
        .integer_range()
        .ok_or_else(|| mismatch(graph_type, value))?;
    match value {
        Value::Int(i) => {
            if *i < min || *i > max {
                return Err(invalid(format!("{} overflows {}", i, graph_type)));
            }
            Ok(i.to_string())
        }
        Value::UInt(u) => {
            if *u > max as u64 {
                return Err(invalid(format!("{} overflows {}", u, graph_type)));
            }
            Ok(u.to_string())
        }
        other => Err(mismatch(graph_type, other)),
    }
}

fn encode_native(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok("NULL".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::UInt(u) => Ok(u.to_string()),
        Value::Float(f) => format_float(*f),
        Value::String(s) => Ok(quote(s)),
        Value::Bytes(b) => Ok(quote(&hex::encode(b))),
        Value::DateTime(dt) => Ok(datetime_literal(dt)),
        Value::Date(d) => Ok(date_literal(d)),
        Value::Time(t) => Ok(time_literal(t)),
        Value::List(items) => {
            let encoded = items
                .iter()
                .map(|item| encode(None, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", encoded.join(", ")))
        }
        Value::Map(entries) => {
            let mut encoded = Vec::with_capacity(entries.len());
            for (key, item) in entries {
                encoded.push(format!("{}: {}", map_key(key), encode(None, item)?));
            }
            Ok(format!("{{{}}}", encoded.join(", ")))
        }
        Value::Expr(expr) => Ok(expr.clone()),
    }
}

fn format_float(f: f64) -> Result<String> {
    if !f.is_finite() {
        return Err(invalid(format!("unsupported non-finite float {}", f)));
    }
    // Debug formatting keeps a fractional part ("1.0") and uses exponents
    // for large magnitudes ("1e20"), the latter still needs a decimal point
    let text = format!("{:?}", f);
    match text.find('e') {
        Some(pos) if !text[..pos].contains('.') => {
            Ok(format!("{}.0{}", &text[..pos], &text[pos..]))
        }
        _ => Ok(text),
    }
}

fn map_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

fn datetime_literal(dt: &NaiveDateTime) -> String {
    format!("datetime(\"{}\")", dt.format(DATETIME_FORMAT))
}

fn date_literal(d: &NaiveDate) -> String {
    format!("date(\"{}\")", d.format(DATE_FORMAT))
}

fn time_literal(t: &NaiveTime) -> String {
    format!("time(\"{}\")", t.format(TIME_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_native_scalars() {
        assert_eq!(encode(None, &Value::from("Tim \"Duncan\"")).unwrap(), r#""Tim \"Duncan\"""#);
        assert_eq!(encode(None, &Value::from("a\\b\n")).unwrap(), r#""a\\b\n""#);
        assert_eq!(encode(None, &Value::from(true)).unwrap(), "true");
        assert_eq!(encode(None, &Value::from(-42)).unwrap(), "-42");
        assert_eq!(encode(None, &Value::from(1.0)).unwrap(), "1.0");
        assert_eq!(encode(None, &Value::from(0.25)).unwrap(), "0.25");
        assert_eq!(encode(None, &Value::from(1e20)).unwrap(), "1.0e20");
        assert_eq!(encode(None, &Value::Null).unwrap(), "NULL");
        assert_eq!(
            encode(None, &Value::bytes(vec![0xde, 0xad, 0xbe, 0xef])).unwrap(),
            r#""deadbeef""#
        );
    }

    #[test]
    fn test_expr_is_verbatim_even_when_typed() {
        let value = Value::expr(r#""player100"->"team204""#);
        assert_eq!(encode(None, &value).unwrap(), r#""player100"->"team204""#);
        assert_eq!(
            encode(Some(&GraphType::Int8), &Value::expr("now()")).unwrap(),
            "now()"
        );
    }

    #[test]
    fn test_declared_integer_widths() {
        assert_eq!(encode(Some(&GraphType::Int8), &Value::from(127)).unwrap(), "127");
        let err = encode(Some(&GraphType::Int8), &Value::from(128)).unwrap_err();
        assert!(err.is_invalid_clause_params());
        assert!(encode(Some(&GraphType::Int16), &Value::from(-40000)).is_err());
        assert!(encode(Some(&GraphType::Int64), &Value::from(u64::MAX)).is_err());
        assert!(encode(Some(&GraphType::Int), &Value::from("12")).is_err());
    }

    #[test]
    fn test_declared_float_and_bool() {
        assert_eq!(encode(Some(&GraphType::Double), &Value::from(3)).unwrap(), "3.0");
        assert!(encode(Some(&GraphType::Double), &Value::Float(f64::NAN)).is_err());
        assert_eq!(encode(Some(&GraphType::Bool), &Value::from(false)).unwrap(), "false");
        assert!(encode(Some(&GraphType::Bool), &Value::from(0)).is_err());
    }

    #[test]
    fn test_declared_temporal() {
        let dt = datetime("2021-07-05 07:14:37");
        assert_eq!(
            encode(Some(&GraphType::Timestamp), &Value::from(dt)).unwrap(),
            "1625469277"
        );
        assert_eq!(
            encode(Some(&GraphType::DateTime), &Value::from(dt)).unwrap(),
            r#"datetime("2021-07-05T07:14:37.000000")"#
        );
        assert_eq!(
            encode(Some(&GraphType::Date), &Value::from(dt)).unwrap(),
            r#"date("2021-07-05")"#
        );
        assert_eq!(
            encode(Some(&GraphType::Time), &Value::from(dt)).unwrap(),
            r#"time("07:14:37.000000")"#
        );
        assert_eq!(
            encode(Some(&GraphType::Date), &Value::from("2021-07-05")).unwrap(),
            r#"date("2021-07-05")"#
        );
        assert_eq!(
            encode(Some(&GraphType::Timestamp), &Value::from(1625469277)).unwrap(),
            "1625469277"
        );
    }

    #[test]
    fn test_collections() {
        let list = Value::from(vec![Value::from(1), Value::from("a")]);
        assert_eq!(encode(None, &list).unwrap(), r#"[1, "a"]"#);

        let mut map = BTreeMap::new();
        map.insert("years".to_string(), Value::from(1));
        map.insert("two words".to_string(), Value::from(2));
        let map = Value::Map(map);
        assert_eq!(
            encode(None, &map).unwrap(),
            r#"{"two words": 2, years: 1}"#
        );
        assert!(encode(Some(&GraphType::Int), &list).is_err());

        let mut duration = BTreeMap::new();
        duration.insert("hours".to_string(), Value::from(2));
        assert_eq!(
            encode(Some(&GraphType::Duration), &Value::Map(duration)).unwrap(),
            "duration({hours: 2})"
        );
    }

    #[test]
    fn test_vid_encoding() {
        assert_eq!(encode_vid(&Value::from("player100")).unwrap(), r#""player100""#);
        assert_eq!(encode_vid(&Value::from(100)).unwrap(), "100");
        assert_eq!(
            encode_vid(&Value::from(vec!["a", "b"])).unwrap(),
            r#""a", "b""#
        );
        assert_eq!(encode_vid(&Value::expr("$-.id")).unwrap(), "$-.id");
        assert!(encode_vid(&Value::from("")).is_err());
        assert!(encode_vid(&Value::Null).is_err());
        assert!(encode_vid(&Value::from(1.5)).is_err());
        assert!(encode_vid(&Value::List(vec![])).is_err());
    }
}
