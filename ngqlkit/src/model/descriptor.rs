// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Resolved schema descriptors

use crate::types::GraphType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a schema element is a tag or an edge type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaKind {
    Tag,
    Edge,
}

impl SchemaKind {
    /// DDL keyword (`TAG` / `EDGE`)
    pub fn keyword(&self) -> &'static str {
        match self {
            SchemaKind::Tag => "TAG",
            SchemaKind::Edge => "EDGE",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Positions of the identity fields within the model's field list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    Vertex {
        vid: usize,
    },
    Edge {
        src: usize,
        dst: usize,
        rank: Option<usize>,
    },
}

/// One property of a tag or edge type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub graph_type: GraphType,
    /// Default literal, already in DDL form
    pub default_literal: Option<String>,
    /// Zero means the property is not the TTL column
    pub ttl_seconds: u64,
    /// Index into the model's field list (and `Model::values`)
    pub field_index: usize,
}

impl PropertyDescriptor {
    /// `name type [DEFAULT literal]`, as used by CREATE and ALTER ... ADD/CHANGE
    pub fn definition(&self) -> String {
        match &self.default_literal {
            Some(literal) => format!("{} {} DEFAULT {}", self.name, self.graph_type, literal),
            None => format!("{} {}", self.name, self.graph_type),
        }
    }
}

/// TTL policy of a schema element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlDescriptor {
    pub column: String,
    pub duration: u64,
}

/// Schema shape derived from a model type
///
/// Identity fields never appear in `properties`, property names are unique,
/// and at most one property carries a TTL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    /// Rust type name of the model, for diagnostics
    pub model: String,
    pub kind: SchemaKind,
    pub kind_name: String,
    pub identity: Identity,
    pub properties: Vec<PropertyDescriptor>,
    /// Number of declared fields, i.e. the expected length of `Model::values`
    pub field_count: usize,
}

impl SchemaDescriptor {
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn ttl(&self) -> Option<TtlDescriptor> {
        self.properties
            .iter()
            .find(|p| p.ttl_seconds > 0)
            .map(|p| TtlDescriptor {
                column: p.name.clone(),
                duration: p.ttl_seconds,
            })
    }

    /// Same shape under another tag / edge type name
    pub fn renamed<S: Into<String>>(&self, kind_name: S) -> SchemaDescriptor {
        SchemaDescriptor {
            kind_name: kind_name.into(),
            ..self.clone()
        }
    }
}
