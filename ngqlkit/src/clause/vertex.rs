// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Vertex mutations

use super::props::{
    column_list, update_target, value_tuple, ModelInstance, PropColumn, PropsUpdate,
    UpdateOptions,
};
use crate::error::{NgqlError, Result};
use crate::model::{Identity, Model};
use crate::value::{encode_vid, Value};

/// One `vid:(v1, v2)` entry of an INSERT VERTEX
#[derive(Debug, Clone, PartialEq)]
pub struct VertexRow {
    pub vid: Value,
    pub values: Vec<Value>,
}

/// `INSERT VERTEX [IF NOT EXISTS ]tag(p1, p2) VALUES vid:(v1, v2), ...`
#[derive(Debug, Clone, PartialEq)]
pub struct InsertVertex {
    pub if_not_exists: bool,
    pub tag_name: String,
    pub props: Vec<PropColumn>,
    pub rows: Vec<VertexRow>,
}

impl InsertVertex {
    /// Insert model instances, all under the model's tag
    pub fn from_models<M: Model>(models: &[M], if_not_exists: bool) -> Result<Self> {
        let mut insert: Option<InsertVertex> = None;
        for model in models {
            let instance = ModelInstance::of(model)?;
            let vid = match instance.descriptor.identity {
                Identity::Vertex { vid } => instance.field(vid).clone(),
                Identity::Edge { .. } => {
                    return Err(NgqlError::invalid_model(
                        &instance.descriptor.model,
                        "an edge model cannot be inserted as a vertex",
                    ))
                }
            };
            let row = VertexRow {
                vid,
                values: instance.property_values(),
            };
            insert
                .get_or_insert_with(|| InsertVertex {
                    if_not_exists,
                    tag_name: instance.descriptor.kind_name.clone(),
                    props: PropColumn::from_descriptor(&instance.descriptor),
                    rows: Vec::new(),
                })
                .rows
                .push(row);
        }
        insert.ok_or_else(|| NgqlError::invalid_clause("INSERT_VERTEX", "no vertices to insert"))
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let tag_name = self.tag_name.trim();
        if tag_name.is_empty() {
            return Err(NgqlError::invalid_clause("INSERT_VERTEX", "tag name is empty"));
        }
        if self.rows.is_empty() {
            return Err(NgqlError::invalid_clause("INSERT_VERTEX", "no vertices to insert"));
        }
        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            if matches!(row.vid, Value::List(_)) {
                return Err(NgqlError::invalid_clause(
                    "INSERT_VERTEX",
                    "a vertex id cannot be a list",
                ));
            }
            rows.push(format!(
                "{}:{}",
                encode_vid(&row.vid)?,
                value_tuple(&self.props, &row.values)?
            ));
        }

        out.push_str("INSERT VERTEX ");
        if self.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        out.push_str(&format!(
            "{}({}) VALUES {}",
            tag_name,
            column_list(&self.props),
            rows.join(", ")
        ));
        Ok(())
    }
}

/// `UPDATE VERTEX ON tag vid SET ...` or its UPSERT form
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateVertex {
    pub upsert: bool,
    pub vid: Value,
    pub update: PropsUpdate,
    pub options: UpdateOptions,
}

impl UpdateVertex {
    pub fn new<V: Into<Value>>(vid: V, update: PropsUpdate, options: UpdateOptions) -> Self {
        Self {
            upsert: false,
            vid: vid.into(),
            update,
            options,
        }
    }

    pub fn upsert<V: Into<Value>>(vid: V, update: PropsUpdate, options: UpdateOptions) -> Self {
        Self {
            upsert: true,
            ..Self::new(vid, update, options)
        }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        if matches!(self.vid, Value::List(_)) {
            return Err(NgqlError::invalid_clause(
                "UPDATE_VERTEX",
                "only one vertex can be updated at a time",
            ));
        }
        let vid = encode_vid(&self.vid)?;
        let (tag_name, set) = update_target(&self.update, &self.options)?;
        out.push_str(if self.upsert {
            "UPSERT VERTEX ON "
        } else {
            "UPDATE VERTEX ON "
        });
        out.push_str(&format!("{} {} SET {}", tag_name, vid, set));
        Ok(())
    }
}

/// `DELETE VERTEX vids[ WITH EDGE]`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteVertex {
    pub vids: Value,
    pub with_edge: bool,
}

impl DeleteVertex {
    pub fn new<V: Into<Value>>(vids: V, with_edge: bool) -> Self {
        Self {
            vids: vids.into(),
            with_edge,
        }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let vids = encode_vid(&self.vids)?;
        out.push_str("DELETE VERTEX ");
        out.push_str(&vids);
        if self.with_edge {
            out.push_str(" WITH EDGE");
        }
        Ok(())
    }
}
