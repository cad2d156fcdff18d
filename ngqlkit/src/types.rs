// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph property types and the native-type mapping used by model resolution
//!
//! [`GraphType`] is the declared type of a tag / edge-type property as it
//! appears in DDL. [`NativeType`] describes the Rust type backing a model
//! field and decides the graph type when a field carries no explicit
//! `type:` option.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Property types of the target schema language
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphType {
    Bool,
    /// `int`, the 64-bit alias
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    String,
    FixedString(Option<usize>),
    Timestamp,
    Date,
    Time,
    DateTime,
    Duration,
    /// `geography` with an optional shape restriction such as `point`
    Geography(Option<String>),
}

impl GraphType {
    /// Integer widths, including the `int` alias
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            GraphType::Int | GraphType::Int8 | GraphType::Int16 | GraphType::Int32 | GraphType::Int64
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, GraphType::Float | GraphType::Double)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, GraphType::String | GraphType::FixedString(_))
    }

    /// Only integer and timestamp columns may serve as a TTL column
    pub fn allows_ttl(&self) -> bool {
        self.is_integer() || matches!(self, GraphType::Timestamp)
    }

    /// Inclusive value range for integer widths
    pub fn integer_range(&self) -> Option<(i64, i64)> {
        match self {
            GraphType::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            GraphType::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            GraphType::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            GraphType::Int | GraphType::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Collapse aliases so that two spellings of one type compare equal
    pub fn canonical(&self) -> GraphType {
        match self {
            GraphType::Int => GraphType::Int64,
            other => other.clone(),
        }
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphType::Bool => write!(f, "bool"),
            GraphType::Int => write!(f, "int"),
            GraphType::Int8 => write!(f, "int8"),
            GraphType::Int16 => write!(f, "int16"),
            GraphType::Int32 => write!(f, "int32"),
            GraphType::Int64 => write!(f, "int64"),
            GraphType::Float => write!(f, "float"),
            GraphType::Double => write!(f, "double"),
            GraphType::String => write!(f, "string"),
            GraphType::FixedString(None) => write!(f, "fixed_string"),
            GraphType::FixedString(Some(len)) => write!(f, "fixed_string({})", len),
            GraphType::Timestamp => write!(f, "timestamp"),
            GraphType::Date => write!(f, "date"),
            GraphType::Time => write!(f, "time"),
            GraphType::DateTime => write!(f, "datetime"),
            GraphType::Duration => write!(f, "duration"),
            GraphType::Geography(None) => write!(f, "geography"),
            GraphType::Geography(Some(shape)) => write!(f, "geography({})", shape),
        }
    }
}

impl FromStr for GraphType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let (head, arg) = match normalized.find('(') {
            Some(open) => {
                if !normalized.ends_with(')') {
                    return Err(format!("unbalanced parentheses in type '{}'", s.trim()));
                }
                let arg = normalized[open + 1..normalized.len() - 1].trim().to_string();
                (normalized[..open].trim().to_string(), Some(arg))
            }
            None => (normalized, None),
        };

        let simple = |t: GraphType| -> Result<GraphType, String> {
            match &arg {
                Some(_) => Err(format!("type '{}' takes no argument", head)),
                None => Ok(t),
            }
        };

        match head.as_str() {
            "bool" => simple(GraphType::Bool),
            "int" => simple(GraphType::Int),
            "int8" => simple(GraphType::Int8),
            "int16" => simple(GraphType::Int16),
            "int32" => simple(GraphType::Int32),
            "int64" => simple(GraphType::Int64),
            "float" => simple(GraphType::Float),
            "double" => simple(GraphType::Double),
            "string" => simple(GraphType::String),
            "timestamp" => simple(GraphType::Timestamp),
            "date" => simple(GraphType::Date),
            "time" => simple(GraphType::Time),
            "datetime" => simple(GraphType::DateTime),
            "duration" => simple(GraphType::Duration),
            "fixed_string" => match &arg {
                None => Ok(GraphType::FixedString(None)),
                Some(len) => len
                    .parse::<usize>()
                    .map(|len| GraphType::FixedString(Some(len)))
                    .map_err(|_| format!("invalid fixed_string length '{}'", len)),
            },
            "geography" => match &arg {
                None => Ok(GraphType::Geography(None)),
                Some(shape) if shape.is_empty() => Err("empty geography shape".to_string()),
                Some(shape) => Ok(GraphType::Geography(Some(shape.clone()))),
            },
            "" => Err("empty type name".to_string()),
            other => Err(format!("unknown graph type '{}'", other)),
        }
    }
}

/// Rust-side type of a model field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    Bytes,
    DateTime,
    Date,
    Time,
}

impl NativeType {
    /// Graph type used when the field does not declare one
    pub fn inferred_graph_type(&self) -> GraphType {
        match self {
            NativeType::Bool => GraphType::Bool,
            NativeType::I8 => GraphType::Int8,
            NativeType::I16 | NativeType::U8 => GraphType::Int16,
            NativeType::I32 | NativeType::U16 => GraphType::Int32,
            NativeType::I64 | NativeType::U32 | NativeType::U64 => GraphType::Int,
            NativeType::F32 => GraphType::Float,
            NativeType::F64 => GraphType::Double,
            NativeType::String | NativeType::Bytes => GraphType::String,
            NativeType::DateTime => GraphType::DateTime,
            NativeType::Date => GraphType::Date,
            NativeType::Time => GraphType::Time,
        }
    }
}
