// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Model resolution and the process-wide descriptor cache
//!
//! Descriptors are computed once per model type and shared as
//! `Arc<SchemaDescriptor>`. Concurrent first resolutions of one type may both
//! compute a descriptor; the first insert wins and every caller receives an
//! equivalent value.

use super::descriptor::{Identity, PropertyDescriptor, SchemaDescriptor, SchemaKind};
use super::tag::{parse_tag, IdentityRole};
use super::{Model, ModelKind};
use crate::error::{NgqlError, Result};
use crate::types::GraphType;
use crate::value::{encode_vid, quote, Value};
use log::debug;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Descriptor cache keyed by model type
static DESCRIPTORS: Lazy<RwLock<HashMap<TypeId, Arc<SchemaDescriptor>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Resolve a model type into its (cached) schema descriptor
pub fn resolve<T: Model>() -> Result<Arc<SchemaDescriptor>> {
    let key = TypeId::of::<T>();
    let cached = DESCRIPTORS.read().get(&key).cloned();
    if let Some(descriptor) = cached {
        return Ok(descriptor);
    }

    let descriptor = Arc::new(build_descriptor::<T>()?);
    let mut cache = DESCRIPTORS.write();
    let entry = cache.entry(key).or_insert_with(|| {
        debug!(
            "Cached schema descriptor for {} ({} {} with {} properties)",
            descriptor.model,
            descriptor.kind,
            descriptor.kind_name,
            descriptor.properties.len()
        );
        descriptor
    });
    Ok(Arc::clone(entry))
}

/// Build a model's descriptor without touching the cache
pub fn build_descriptor<T: Model>() -> Result<SchemaDescriptor> {
    let model = model_name::<T>();
    let kind = T::kind().ok_or_else(|| {
        NgqlError::invalid_model(&model, "no tag or edge type name, implement Model::kind")
    })?;
    if kind.name().trim().is_empty() {
        return Err(NgqlError::invalid_model(&model, "tag or edge type name is empty"));
    }

    let fields = T::fields();
    let mut properties: Vec<PropertyDescriptor> = Vec::new();
    let mut roles: HashMap<IdentityRole, usize> = HashMap::new();

    for (index, field) in fields.iter().enumerate() {
        let settings = parse_tag(field.tag).map_err(|reason| {
            NgqlError::invalid_model(&model, format!("field `{}`: {}", field.ident, reason))
        })?;

        if let Some(role) = settings.role {
            if role.is_edge_role() != matches!(kind, ModelKind::Edge(_)) {
                return Err(NgqlError::invalid_model(
                    &model,
                    format!(
                        "field `{}`: `{}` is not valid on a {} model",
                        field.ident,
                        role,
                        kind.schema_kind().keyword().to_ascii_lowercase()
                    ),
                ));
            }
            if roles.insert(role, index).is_some() {
                return Err(NgqlError::invalid_model(
                    &model,
                    format!("more than one field tagged `{}`", role),
                ));
            }
        }
        if settings.is_excluded() {
            continue;
        }

        let name = settings
            .prop
            .clone()
            .unwrap_or_else(|| to_snake_case(field.ident));
        if properties.iter().any(|p| p.name == name) {
            return Err(NgqlError::invalid_model(
                &model,
                format!("duplicate property name `{}`", name),
            ));
        }

        let graph_type = settings
            .graph_type
            .clone()
            .unwrap_or_else(|| field.native.inferred_graph_type());
        if settings.ttl > 0 && !graph_type.allows_ttl() {
            return Err(NgqlError::invalid_model(
                &model,
                format!(
                    "TTL column `{}` must be an integer or timestamp, not {}",
                    name, graph_type
                ),
            ));
        }
        let default_literal = settings
            .default
            .as_deref()
            .map(|literal| default_literal(&graph_type, literal));

        properties.push(PropertyDescriptor {
            name,
            graph_type,
            default_literal,
            ttl_seconds: settings.ttl,
            field_index: index,
        });
    }

    let ttl_columns: Vec<&str> = properties
        .iter()
        .filter(|p| p.ttl_seconds > 0)
        .map(|p| p.name.as_str())
        .collect();
    if ttl_columns.len() > 1 {
        return Err(NgqlError::invalid_model(
            &model,
            format!("only one TTL column is allowed, found {}", ttl_columns.join(", ")),
        ));
    }

    let required = |role: IdentityRole| -> Result<usize> {
        roles.get(&role).copied().ok_or_else(|| {
            NgqlError::invalid_model(&model, format!("missing a field tagged `{}`", role))
        })
    };
    let identity = match kind {
        ModelKind::Tag(_) => Identity::Vertex {
            vid: required(IdentityRole::VertexId)?,
        },
        ModelKind::Edge(_) => Identity::Edge {
            src: required(IdentityRole::EdgeSrcId)?,
            dst: required(IdentityRole::EdgeDstId)?,
            rank: roles.get(&IdentityRole::EdgeRank).copied(),
        },
    };

    Ok(SchemaDescriptor {
        model,
        kind: kind.schema_kind(),
        kind_name: kind.name().to_string(),
        identity,
        properties,
        field_count: fields.len(),
    })
}

/// Resolve a model instance: its descriptor plus its checked field values
pub fn instance_values<M: Model>(model: &M) -> Result<(Arc<SchemaDescriptor>, Vec<Value>)> {
    let descriptor = resolve::<M>()?;
    let values = model.values();
    if values.len() != descriptor.field_count {
        return Err(NgqlError::invalid_model(
            &descriptor.model,
            format!(
                "values() returned {} values for {} declared fields",
                values.len(),
                descriptor.field_count
            ),
        ));
    }
    Ok((descriptor, values))
}

/// Vertex id of a tag model instance
pub fn vertex_id<M: Model>(model: &M) -> Result<Value> {
    let (descriptor, values) = instance_values(model)?;
    match descriptor.identity {
        Identity::Vertex { vid } => Ok(values[vid].clone()),
        Identity::Edge { .. } => Err(NgqlError::invalid_model(
            &descriptor.model,
            "an edge model has no vertex id",
        )),
    }
}

/// Source, destination and optional rank of an edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeKey {
    pub src: Value,
    pub dst: Value,
    pub rank: Option<Value>,
}

impl EdgeKey {
    pub fn new<S: Into<Value>, D: Into<Value>>(src: S, dst: D) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            rank: None,
        }
    }

    pub fn with_rank<R: Into<Value>>(mut self, rank: R) -> Self {
        self.rank = Some(rank.into());
        self
    }

    /// `src->dst[@rank]`
    pub fn encode(&self) -> Result<String> {
        let mut text = format!("{}->{}", encode_vid(&self.src)?, encode_vid(&self.dst)?);
        match &self.rank {
            None => {}
            Some(Value::Int(rank)) => text.push_str(&format!("@{}", rank)),
            Some(Value::UInt(rank)) if *rank <= i64::MAX as u64 => {
                text.push_str(&format!("@{}", rank))
            }
            Some(Value::Expr(expr)) => text.push_str(&format!("@{}", expr)),
            Some(other) => {
                return Err(NgqlError::invalid_clause(
                    "VALUE",
                    format!("edge rank must be an int64, got {}", other.type_name()),
                ))
            }
        }
        Ok(text)
    }
}

/// Source, destination and rank of an edge model instance
pub fn edge_key<M: Model>(model: &M) -> Result<EdgeKey> {
    let (descriptor, values) = instance_values(model)?;
    match descriptor.identity {
        Identity::Edge { src, dst, rank } => Ok(EdgeKey {
            src: values[src].clone(),
            dst: values[dst].clone(),
            rank: rank.map(|index| values[index].clone()),
        }),
        Identity::Vertex { .. } => Err(NgqlError::invalid_model(
            &descriptor.model,
            "a tag model has no edge endpoints",
        )),
    }
}

/// One `SET` assignment of an update statement
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEntry {
    pub name: String,
    /// Declared type when the entry comes from a model field
    pub graph_type: Option<GraphType>,
    pub value: Value,
}

/// Partial update view of a model instance
///
/// With an empty `only` list every non-zero property is included in field
/// order; otherwise exactly the named properties are, zero-valued or not.
pub fn update_entries<M: Model>(model: &M, only: &[String]) -> Result<Vec<UpdateEntry>> {
    let (descriptor, values) = instance_values(model)?;
    Ok(select_entries(&descriptor, &values, only))
}

pub(crate) fn select_entries(
    descriptor: &SchemaDescriptor,
    values: &[Value],
    only: &[String],
) -> Vec<UpdateEntry> {
    descriptor
        .properties
        .iter()
        .filter_map(|prop| {
            let value = &values[prop.field_index];
            let wanted = if only.is_empty() {
                !value.is_zero()
            } else {
                only.iter().any(|name| name == &prop.name)
            };
            wanted.then(|| UpdateEntry {
                name: prop.name.clone(),
                graph_type: Some(prop.graph_type.clone()),
                value: value.clone(),
            })
        })
        .collect()
}

/// Short type name, e.g. `Player` rather than `my_crate::models::Player`
fn model_name<T: 'static>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// Default literal as emitted in DDL
///
/// String-typed properties get their (optionally pre-quoted) literal
/// re-quoted with double quotes, everything else passes through.
fn default_literal(graph_type: &GraphType, literal: &str) -> String {
    if !graph_type.is_string() {
        return literal.to_string();
    }
    let bytes = literal.as_bytes();
    let unquoted = if bytes.len() >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &literal[1..literal.len() - 1]
    } else {
        literal
    };
    quote(unquoted)
}

/// `CreateTime` -> `create_time`, `VID` -> `vid`, `HTTPServer` -> `http_server`
pub(crate) fn to_snake_case(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
                if prev != '_'
                    && (prev.is_lowercase()
                        || prev.is_ascii_digit()
                        || (prev.is_uppercase() && next_is_lower))
                {
                    out.push('_');
                }
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
