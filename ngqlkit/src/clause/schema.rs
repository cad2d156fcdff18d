// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema clauses: CREATE, ALTER and DROP of tags and edge types
//!
//! These clauses are usually built by [`crate::migrator`] from a resolved
//! descriptor rather than by hand.

use crate::error::{NgqlError, Result};
use crate::model::{PropertyDescriptor, SchemaKind, TtlDescriptor};
use crate::value::quote;
use serde::{Deserialize, Serialize};

/// One migration action set against a tag or edge type
///
/// ADD and CHANGE names are resolved against the model's descriptor, DROP
/// names are emitted as given.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlterOperate {
    #[serde(default)]
    pub add_props: Vec<String>,
    #[serde(default)]
    pub drop_props: Vec<String>,
    #[serde(default)]
    pub change_props: Vec<String>,
    /// Re-emit the TTL clause
    #[serde(default)]
    pub update_ttl: bool,
}

impl AlterOperate {
    pub fn is_empty(&self) -> bool {
        self.add_props.is_empty()
            && self.drop_props.is_empty()
            && self.change_props.is_empty()
            && !self.update_ttl
    }
}

fn render_ttl(ttl: Option<&TtlDescriptor>, out: &mut String) {
    match ttl {
        Some(ttl) => out.push_str(&format!(
            " TTL_DURATION = {}, TTL_COL = {}",
            ttl.duration,
            quote(&ttl.column)
        )),
        None => out.push_str(" TTL_DURATION = 0, TTL_COL = \"\""),
    }
}

fn definitions(properties: &[PropertyDescriptor]) -> String {
    properties
        .iter()
        .map(PropertyDescriptor::definition)
        .collect::<Vec<_>>()
        .join(", ")
}

fn checked_name<'a>(kind: SchemaKind, verb: &str, name: &'a str) -> Result<&'a str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NgqlError::invalid_clause(
            format!("{}_{}", verb, kind.keyword()),
            format!("{} name is empty", kind.keyword().to_ascii_lowercase()),
        ));
    }
    Ok(name)
}

/// `CREATE TAG|EDGE [IF NOT EXISTS ]name(p type [DEFAULT lit], ...)[ TTL ...];`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSchema {
    pub kind: SchemaKind,
    pub name: String,
    pub if_not_exists: bool,
    pub properties: Vec<PropertyDescriptor>,
    pub ttl: Option<TtlDescriptor>,
}

impl CreateSchema {
    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let name = checked_name(self.kind, "CREATE", &self.name)?;
        out.push_str("CREATE ");
        out.push_str(self.kind.keyword());
        out.push(' ');
        if self.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        out.push_str(&format!("{}({})", name, definitions(&self.properties)));
        if self.ttl.is_some() {
            render_ttl(self.ttl.as_ref(), out);
        }
        Ok(())
    }
}

/// `ALTER TAG|EDGE name ADD (...), DROP (...), CHANGE (...)[ TTL ...];`
#[derive(Debug, Clone, PartialEq)]
pub struct AlterSchema {
    pub kind: SchemaKind,
    pub name: String,
    pub add: Vec<PropertyDescriptor>,
    pub drop: Vec<String>,
    pub change: Vec<PropertyDescriptor>,
    /// `Some(None)` clears the TTL
    pub ttl: Option<Option<TtlDescriptor>>,
}

impl AlterSchema {
    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let name = checked_name(self.kind, "ALTER", &self.name)?;
        let mut segments = Vec::with_capacity(3);
        if !self.add.is_empty() {
            segments.push(format!("ADD ({})", definitions(&self.add)));
        }
        if !self.drop.is_empty() {
            segments.push(format!("DROP ({})", self.drop.join(", ")));
        }
        if !self.change.is_empty() {
            segments.push(format!("CHANGE ({})", definitions(&self.change)));
        }
        if segments.is_empty() && self.ttl.is_none() {
            return Err(NgqlError::invalid_clause(
                format!("ALTER_{}", self.kind.keyword()),
                "nothing to alter",
            ));
        }

        out.push_str(&format!("ALTER {} {}", self.kind.keyword(), name));
        if !segments.is_empty() {
            out.push(' ');
            out.push_str(&segments.join(", "));
        }
        if let Some(ttl) = &self.ttl {
            render_ttl(ttl.as_ref(), out);
        }
        Ok(())
    }
}

/// `DROP TAG|EDGE [IF EXISTS ]name;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropSchema {
    pub kind: SchemaKind,
    pub name: String,
    pub if_exists: bool,
}

impl DropSchema {
    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let name = checked_name(self.kind, "DROP", &self.name)?;
        out.push_str("DROP ");
        out.push_str(self.kind.keyword());
        out.push(' ');
        if self.if_exists {
            out.push_str("IF EXISTS ");
        }
        out.push_str(name);
        Ok(())
    }
}
