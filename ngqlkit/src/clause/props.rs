// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Property payloads shared by the vertex and edge mutation clauses

use crate::error::{NgqlError, Result};
use crate::model::resolver::select_entries;
use crate::model::{instance_values, Model, SchemaDescriptor, UpdateEntry};
use crate::types::GraphType;
use crate::value::{encode, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One column of an INSERT property list
#[derive(Debug, Clone, PartialEq)]
pub struct PropColumn {
    pub name: String,
    /// Declared type used to encode the column's values
    pub graph_type: Option<GraphType>,
}

impl PropColumn {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            graph_type: None,
        }
    }

    pub fn typed<S: Into<String>>(name: S, graph_type: GraphType) -> Self {
        Self {
            name: name.into(),
            graph_type: Some(graph_type),
        }
    }

    pub(crate) fn from_descriptor(descriptor: &SchemaDescriptor) -> Vec<PropColumn> {
        descriptor
            .properties
            .iter()
            .map(|p| PropColumn::typed(p.name.clone(), p.graph_type.clone()))
            .collect()
    }
}

/// `name1, name2`
pub(crate) fn column_list(columns: &[PropColumn]) -> String {
    columns
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `(v1, v2)`, each value encoded with its column's type
pub(crate) fn value_tuple(columns: &[PropColumn], values: &[Value]) -> Result<String> {
    if columns.len() != values.len() {
        return Err(NgqlError::invalid_clause(
            "VALUE",
            format!(
                "{} values given for {} properties",
                values.len(),
                columns.len()
            ),
        ));
    }
    let encoded = columns
        .iter()
        .zip(values)
        .map(|(column, value)| encode(column.graph_type.as_ref(), value))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("({})", encoded.join(", ")))
}

/// A resolved model instance: its descriptor plus its field values
///
/// Only built through [`ModelInstance::of`], which checks that there is one
/// value per declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    pub(crate) descriptor: Arc<SchemaDescriptor>,
    pub(crate) values: Vec<Value>,
}

impl ModelInstance {
    pub fn of<M: Model>(model: &M) -> Result<Self> {
        let (descriptor, values) = instance_values(model)?;
        Ok(Self { descriptor, values })
    }

    pub fn descriptor(&self) -> &Arc<SchemaDescriptor> {
        &self.descriptor
    }

    /// Field values in declaration order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Property values in descriptor order
    pub fn property_values(&self) -> Vec<Value> {
        self.descriptor
            .properties
            .iter()
            .map(|p| self.values[p.field_index].clone())
            .collect()
    }

    pub(crate) fn field(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

/// Payload of an UPDATE / UPSERT
#[derive(Debug, Clone, PartialEq)]
pub enum PropsUpdate {
    /// Emitted sorted by property name
    NamedMap(BTreeMap<String, Value>),
    /// Emitted in field order, zero values skipped unless named
    StructLike(ModelInstance),
}

impl PropsUpdate {
    pub fn model<M: Model>(model: &M) -> Result<Self> {
        Ok(PropsUpdate::StructLike(ModelInstance::of(model)?))
    }

    /// Tag or edge type name carried by the payload itself
    pub fn kind_name(&self) -> Option<&str> {
        match self {
            PropsUpdate::NamedMap(_) => None,
            PropsUpdate::StructLike(instance) => Some(instance.descriptor.kind_name.as_str()),
        }
    }

    /// Assignments to emit, filtered by `only` when non-empty
    pub fn entries(&self, only: &[String]) -> Vec<UpdateEntry> {
        match self {
            PropsUpdate::NamedMap(map) => map
                .iter()
                .filter(|(name, _)| only.is_empty() || only.iter().any(|o| o == *name))
                .map(|(name, value)| UpdateEntry {
                    name: name.clone(),
                    graph_type: None,
                    value: value.clone(),
                })
                .collect(),
            PropsUpdate::StructLike(instance) => {
                select_entries(&instance.descriptor, &instance.values, only)
            }
        }
    }
}

impl<V: Into<Value>> std::convert::From<BTreeMap<String, V>> for PropsUpdate {
    fn from(map: BTreeMap<String, V>) -> Self {
        PropsUpdate::NamedMap(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> std::convert::From<[(K, V); N]>
    for PropsUpdate
{
    fn from(pairs: [(K, V); N]) -> Self {
        PropsUpdate::NamedMap(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Options of an UPDATE / UPSERT
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateOptions {
    /// Overrides the payload's tag or edge type name
    pub kind_name: Option<String>,
    /// Restricts the update to these properties
    pub prop_names: Vec<String>,
}

impl UpdateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind_name<S: Into<String>>(mut self, name: S) -> Self {
        self.kind_name = Some(name.into());
        self
    }

    pub fn prop_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prop_names = names.into_iter().map(Into::into).collect();
        self
    }
}

/// `ON <kind_name>` target and `SET` list of an update, validated
pub(crate) fn update_target(
    update: &PropsUpdate,
    options: &UpdateOptions,
) -> Result<(String, String)> {
    let kind_name = options
        .kind_name
        .as_deref()
        .or_else(|| update.kind_name())
        .map(str::trim)
        .unwrap_or_default();
    if kind_name.is_empty() {
        return Err(NgqlError::invalid_clause(
            "UPDATE",
            "tag or edge type name is empty",
        ));
    }

    let entries = update.entries(&options.prop_names);
    if entries.is_empty() {
        return Err(NgqlError::invalid_clause(
            "UPDATE",
            "the values to update are empty",
        ));
    }
    let mut assignments = Vec::with_capacity(entries.len());
    for entry in &entries {
        assignments.push(format!(
            "{} = {}",
            entry.name,
            encode(entry.graph_type.as_ref(), &entry.value)?
        ));
    }
    Ok((kind_name.to_string(), assignments.join(", ")))
}
