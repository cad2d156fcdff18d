// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Migration planner
//!
//! Builds CREATE / ALTER / DROP clauses from a resolved descriptor and, given
//! a snapshot of the live schema, decides the minimal migration. Every
//! function here is pure: the same inputs always produce the same clause.

use crate::clause::{AlterOperate, AlterSchema, Clause, CreateSchema, DropSchema};
use crate::error::{NgqlError, Result};
use crate::model::{PropertyDescriptor, SchemaDescriptor, SchemaKind, TtlDescriptor};
use crate::types::GraphType;
use log::debug;
use serde::{Deserialize, Serialize};

/// CREATE clause for a descriptor, properties in declared order
pub fn create(descriptor: &SchemaDescriptor, if_not_exists: bool) -> Clause {
    let create = CreateSchema {
        kind: descriptor.kind,
        name: descriptor.kind_name.clone(),
        if_not_exists,
        properties: descriptor.properties.clone(),
        ttl: descriptor.ttl(),
    };
    match descriptor.kind {
        SchemaKind::Tag => Clause::CreateTag(create),
        SchemaKind::Edge => Clause::CreateEdge(create),
    }
}

pub fn drop(kind: SchemaKind, name: &str, if_exists: bool) -> Clause {
    let drop = DropSchema {
        kind,
        name: name.to_string(),
        if_exists,
    };
    match kind {
        SchemaKind::Tag => Clause::DropTag(drop),
        SchemaKind::Edge => Clause::DropEdge(drop),
    }
}

/// ALTER clause for a descriptor
///
/// ADD and CHANGE names must be properties of the descriptor. With
/// `update_ttl` the descriptor's TTL is re-emitted, or cleared when it has
/// none.
pub fn alter(descriptor: &SchemaDescriptor, operate: &AlterOperate) -> Result<Clause> {
    let clause_name = format!("ALTER_{}", descriptor.kind.keyword());
    if operate.is_empty() {
        return Err(NgqlError::invalid_clause(&clause_name, "nothing to alter"));
    }

    let lookup = |names: &[String], action: &str| -> Result<Vec<PropertyDescriptor>> {
        names
            .iter()
            .map(|name| {
                descriptor.property(name).cloned().ok_or_else(|| {
                    NgqlError::invalid_clause(
                        &clause_name,
                        format!(
                            "cannot {} `{}`, {} {} has no such property",
                            action,
                            name,
                            descriptor.kind.keyword().to_ascii_lowercase(),
                            descriptor.kind_name
                        ),
                    )
                })
            })
            .collect()
    };
    let add = lookup(&operate.add_props, "add")?;
    let change = lookup(&operate.change_props, "change")?;

    let ttl = descriptor.ttl();
    if let Some(ttl) = &ttl {
        if operate.drop_props.iter().any(|name| name == &ttl.column) {
            return Err(NgqlError::invalid_clause(
                &clause_name,
                format!("cannot drop TTL column `{}`", ttl.column),
            ));
        }
    }

    let alter = AlterSchema {
        kind: descriptor.kind,
        name: descriptor.kind_name.clone(),
        add,
        drop: operate.drop_props.clone(),
        change,
        ttl: operate.update_ttl.then_some(ttl),
    };
    Ok(match descriptor.kind {
        SchemaKind::Tag => Clause::AlterTag(alter),
        SchemaKind::Edge => Clause::AlterEdge(alter),
    })
}

/// One property of a live tag or edge type, as reported by the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveProperty {
    pub name: String,
    /// Type as spelled by the database, e.g. `int64` or `fixed_string(20)`
    pub graph_type: String,
    #[serde(default)]
    pub default: Option<String>,
}

/// TTL settings of a live schema
///
/// The database reports a schema without TTL as an empty column with a zero
/// duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveTtl {
    pub column: String,
    pub duration: u64,
}

impl LiveTtl {
    pub fn is_set(&self) -> bool {
        self.duration > 0 && !self.column.is_empty()
    }
}

/// Snapshot of an existing tag or edge type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LiveSchema {
    #[serde(default)]
    pub properties: Vec<LiveProperty>,
    #[serde(default)]
    pub ttl: Option<LiveTtl>,
}

impl LiveSchema {
    pub fn property(&self, name: &str) -> Option<&LiveProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Differences between a descriptor and a live schema
///
/// Adds and changes follow the descriptor's order, drops follow the live
/// schema's order.
pub fn diff(descriptor: &SchemaDescriptor, live: &LiveSchema) -> AlterOperate {
    let mut operate = AlterOperate::default();
    for prop in &descriptor.properties {
        match live.property(&prop.name) {
            None => operate.add_props.push(prop.name.clone()),
            Some(existing) => {
                if !same_type(&prop.graph_type, &existing.graph_type)
                    || !same_default(prop.default_literal.as_deref(), existing.default.as_deref())
                {
                    operate.change_props.push(prop.name.clone());
                }
            }
        }
    }
    for existing in &live.properties {
        if descriptor.property(&existing.name).is_none() {
            operate.drop_props.push(existing.name.clone());
        }
    }

    let declared = descriptor.ttl();
    let current = live.ttl.as_ref().filter(|ttl| ttl.is_set()).map(|ttl| TtlDescriptor {
        column: ttl.column.clone(),
        duration: ttl.duration,
    });
    operate.update_ttl = declared != current;
    operate
}

/// Minimal migration bringing a live schema in line with a descriptor
///
/// A missing live schema yields `CREATE ... IF NOT EXISTS`; an up-to-date one
/// yields `None`.
pub fn plan_migration(
    descriptor: &SchemaDescriptor,
    live: Option<&LiveSchema>,
) -> Result<Option<Clause>> {
    let live = match live {
        None => {
            debug!(
                "{} {} does not exist, planning create",
                descriptor.kind, descriptor.kind_name
            );
            return Ok(Some(create(descriptor, true)));
        }
        Some(live) => live,
    };

    let operate = diff(descriptor, live);
    if operate.is_empty() {
        debug!("{} {} is up to date", descriptor.kind, descriptor.kind_name);
        return Ok(None);
    }
    debug!(
        "{} {} needs alter: add {:?}, drop {:?}, change {:?}, update ttl {}",
        descriptor.kind,
        descriptor.kind_name,
        operate.add_props,
        operate.drop_props,
        operate.change_props,
        operate.update_ttl
    );
    alter(descriptor, &operate).map(Some)
}

fn same_type(declared: &GraphType, live: &str) -> bool {
    match live.parse::<GraphType>() {
        Ok(live) => match (declared, &live) {
            (GraphType::FixedString(None), GraphType::FixedString(_)) => true,
            (GraphType::Geography(None), GraphType::Geography(_)) => true,
            _ => declared.canonical() == live.canonical(),
        },
        Err(_) => declared.to_string().eq_ignore_ascii_case(live.trim()),
    }
}

fn same_default(declared: Option<&str>, live: Option<&str>) -> bool {
    let live = live.map(str::trim).filter(|d| !d.is_empty());
    declared.map(str::trim) == live
}
