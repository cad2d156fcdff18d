// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Domain models and their resolution into schema descriptors
//!
//! A domain type opts in by implementing [`Model`]: it names the tag or edge
//! type it maps onto, declares its fields (with tag strings, see [`tag`]) and
//! hands out its runtime values in the same order.
//!
//! ```ignore
//! struct Player {
//!     vid: String,
//!     name: String,
//!     age: i64,
//! }
//!
//! impl Model for Player {
//!     fn kind() -> Option<ModelKind> {
//!         Some(ModelKind::Tag("player"))
//!     }
//!
//!     fn fields() -> Vec<FieldDef> {
//!         vec![
//!             FieldDef::new("vid", NativeType::String).tag("vertex_id"),
//!             FieldDef::new("name", NativeType::String),
//!             FieldDef::new("age", NativeType::I64),
//!         ]
//!     }
//!
//!     fn values(&self) -> Vec<Value> {
//!         vec![self.vid.clone().into(), self.name.clone().into(), self.age.into()]
//!     }
//! }
//! ```

pub mod descriptor;
pub mod resolver;
pub mod tag;

pub use descriptor::{Identity, PropertyDescriptor, SchemaDescriptor, SchemaKind, TtlDescriptor};
pub use resolver::{
    build_descriptor, edge_key, instance_values, resolve, update_entries, vertex_id, EdgeKey,
    UpdateEntry,
};
pub use tag::{parse_tag, IdentityRole, TagSettings};

use crate::types::NativeType;
use crate::value::Value;

/// Tag or edge type a model maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Tag(&'static str),
    Edge(&'static str),
}

impl ModelKind {
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Tag(name) | ModelKind::Edge(name) => name,
        }
    }

    pub fn schema_kind(&self) -> SchemaKind {
        match self {
            ModelKind::Tag(_) => SchemaKind::Tag,
            ModelKind::Edge(_) => SchemaKind::Edge,
        }
    }
}

/// One declared field of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field identifier; snake_cased to form the default property name
    pub ident: &'static str,
    pub native: NativeType,
    /// Tag options, see [`tag`]
    pub tag: &'static str,
}

impl FieldDef {
    pub const fn new(ident: &'static str, native: NativeType) -> Self {
        Self {
            ident,
            native,
            tag: "",
        }
    }

    pub const fn tag(self, tag: &'static str) -> Self {
        Self { tag, ..self }
    }
}

/// A domain type that maps onto a tag or an edge type
pub trait Model: 'static {
    /// Tag or edge type this model maps onto
    ///
    /// Models that leave this unimplemented cannot be resolved.
    fn kind() -> Option<ModelKind> {
        None
    }

    /// Declared fields, in declaration order
    fn fields() -> Vec<FieldDef>;

    /// Runtime values, one per entry of [`Model::fields`]
    fn values(&self) -> Vec<Value>;
}
