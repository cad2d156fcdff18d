// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Edge mutations

use super::props::{
    column_list, update_target, value_tuple, ModelInstance, PropColumn, PropsUpdate,
    UpdateOptions,
};
use crate::error::{NgqlError, Result};
use crate::model::{EdgeKey, Identity, Model};
use crate::value::Value;

fn instance_key(instance: &ModelInstance) -> Result<EdgeKey> {
    match instance.descriptor.identity {
        Identity::Edge { src, dst, rank } => Ok(EdgeKey {
            src: instance.field(src).clone(),
            dst: instance.field(dst).clone(),
            rank: rank.map(|index| instance.field(index).clone()),
        }),
        Identity::Vertex { .. } => Err(NgqlError::invalid_model(
            &instance.descriptor.model,
            "a tag model has no edge endpoints",
        )),
    }
}

/// One `src->dst[@rank]:(v1, v2)` entry of an INSERT EDGE
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub key: EdgeKey,
    pub values: Vec<Value>,
}

/// `INSERT EDGE [IF NOT EXISTS ]et(p1) VALUES src->dst[@rank]:(v1), ...`
#[derive(Debug, Clone, PartialEq)]
pub struct InsertEdge {
    pub if_not_exists: bool,
    pub edge_type: String,
    pub props: Vec<PropColumn>,
    pub rows: Vec<EdgeRow>,
}

impl InsertEdge {
    /// Insert model instances, all under the model's edge type
    pub fn from_models<M: Model>(models: &[M], if_not_exists: bool) -> Result<Self> {
        let mut insert: Option<InsertEdge> = None;
        for model in models {
            let instance = ModelInstance::of(model)?;
            let row = EdgeRow {
                key: instance_key(&instance)?,
                values: instance.property_values(),
            };
            insert
                .get_or_insert_with(|| InsertEdge {
                    if_not_exists,
                    edge_type: instance.descriptor.kind_name.clone(),
                    props: PropColumn::from_descriptor(&instance.descriptor),
                    rows: Vec::new(),
                })
                .rows
                .push(row);
        }
        insert.ok_or_else(|| NgqlError::invalid_clause("INSERT_EDGE", "no edges to insert"))
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let edge_type = self.edge_type.trim();
        if edge_type.is_empty() {
            return Err(NgqlError::invalid_clause("INSERT_EDGE", "edge type name is empty"));
        }
        if self.rows.is_empty() {
            return Err(NgqlError::invalid_clause("INSERT_EDGE", "no edges to insert"));
        }
        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            rows.push(format!(
                "{}:{}",
                row.key.encode()?,
                value_tuple(&self.props, &row.values)?
            ));
        }

        out.push_str("INSERT EDGE ");
        if self.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        out.push_str(&format!(
            "{}({}) VALUES {}",
            edge_type,
            column_list(&self.props),
            rows.join(", ")
        ));
        Ok(())
    }
}

/// `UPDATE EDGE ON et src->dst[@rank] SET ...` or its UPSERT form
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEdge {
    pub upsert: bool,
    pub key: EdgeKey,
    pub update: PropsUpdate,
    pub options: UpdateOptions,
}

impl UpdateEdge {
    pub fn new(key: EdgeKey, update: PropsUpdate, options: UpdateOptions) -> Self {
        Self {
            upsert: false,
            key,
            update,
            options,
        }
    }

    pub fn upsert(key: EdgeKey, update: PropsUpdate, options: UpdateOptions) -> Self {
        Self {
            upsert: true,
            ..Self::new(key, update, options)
        }
    }

    /// Update an edge model instance in place, keyed by its own endpoints
    pub fn from_model<M: Model>(model: &M, options: UpdateOptions) -> Result<Self> {
        let instance = ModelInstance::of(model)?;
        let key = instance_key(&instance)?;
        Ok(Self::new(key, PropsUpdate::StructLike(instance), options))
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let key = self.key.encode()?;
        let (edge_type, set) = update_target(&self.update, &self.options)?;
        out.push_str(if self.upsert {
            "UPSERT EDGE ON "
        } else {
            "UPDATE EDGE ON "
        });
        out.push_str(&format!("{} {} SET {}", edge_type, key, set));
        Ok(())
    }
}

/// `DELETE EDGE et src->dst[@rank], ...`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteEdge {
    pub edge_type: String,
    pub keys: Vec<EdgeKey>,
}

impl DeleteEdge {
    pub fn new<S: Into<String>>(edge_type: S, keys: Vec<EdgeKey>) -> Self {
        Self {
            edge_type: edge_type.into(),
            keys,
        }
    }

    /// Delete edge model instances; `edge_type` overrides the model's name
    pub fn from_models<M: Model>(edge_type: Option<&str>, models: &[M]) -> Result<Self> {
        let mut name = edge_type.map(str::to_string);
        let mut keys = Vec::with_capacity(models.len());
        for model in models {
            let instance = ModelInstance::of(model)?;
            keys.push(instance_key(&instance)?);
            if name.is_none() {
                name = Some(instance.descriptor.kind_name.clone());
            }
        }
        Ok(Self {
            edge_type: name.unwrap_or_default(),
            keys,
        })
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let edge_type = self.edge_type.trim();
        if edge_type.is_empty() {
            return Err(NgqlError::invalid_clause("DELETE_EDGE", "edge type name is empty"));
        }
        if self.keys.is_empty() {
            return Err(NgqlError::invalid_clause("DELETE_EDGE", "no edges to delete"));
        }
        let keys = self
            .keys
            .iter()
            .map(EdgeKey::encode)
            .collect::<Result<Vec<_>>>()?;
        out.push_str(&format!("DELETE EDGE {} {}", edge_type, keys.join(", ")));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDef, ModelKind};
    use crate::types::NativeType;

    struct Serve {
        src: String,
        dst: String,
        rank: i64,
        start_year: i64,
        end_year: i64,
    }

    impl Model for Serve {
        fn kind() -> Option<ModelKind> {
            Some(ModelKind::Edge("serve"))
        }

        fn fields() -> Vec<FieldDef> {
            vec![
                FieldDef::new("src", NativeType::String).tag("edge_src_id"),
                FieldDef::new("dst", NativeType::String).tag("edge_dst_id"),
                FieldDef::new("rank", NativeType::I64).tag("edge_rank"),
                FieldDef::new("start_year", NativeType::I64),
                FieldDef::new("end_year", NativeType::I64),
            ]
        }

        fn values(&self) -> Vec<Value> {
            vec![
                self.src.clone().into(),
                self.dst.clone().into(),
                self.rank.into(),
                self.start_year.into(),
                self.end_year.into(),
            ]
        }
    }

    fn serve(src: &str, dst: &str, rank: i64, start: i64, end: i64) -> Serve {
        Serve {
            src: src.to_string(),
            dst: dst.to_string(),
            rank,
            start_year: start,
            end_year: end,
        }
    }

    fn render(f: impl FnOnce(&mut String) -> Result<()>) -> Result<String> {
        let mut out = String::new();
        f(&mut out)?;
        Ok(out)
    }

    #[test]
    fn test_insert_edges() {
        let insert = InsertEdge::from_models(
            &[
                serve("player100", "team204", 0, 1997, 2016),
                serve("player101", "team204", 1, 1999, 2018),
            ],
            false,
        )
        .unwrap();
        assert_eq!(
            render(|o| insert.render(o)).unwrap(),
            r#"INSERT EDGE serve(start_year, end_year) VALUES "player100"->"team204"@0:(1997, 2016), "player101"->"team204"@1:(1999, 2018)"#
        );
    }

    #[test]
    fn test_update_edge_from_model() {
        let update = UpdateEdge::from_model(
            &serve("player100", "team204", 0, 0, 2017),
            UpdateOptions::new(),
        )
        .unwrap();
        assert_eq!(
            render(|o| update.render(o)).unwrap(),
            r#"UPDATE EDGE ON serve "player100"->"team204"@0 SET end_year = 2017"#
        );
    }

    #[test]
    fn test_upsert_edge_with_map() {
        let upsert = UpdateEdge::upsert(
            EdgeKey::new("a", "b"),
            PropsUpdate::from([("degree", Value::expr("degree + 1"))]),
            UpdateOptions::new().kind_name("follow"),
        );
        assert_eq!(
            render(|o| upsert.render(o)).unwrap(),
            r#"UPSERT EDGE ON follow "a"->"b" SET degree = degree + 1"#
        );
    }

    #[test]
    fn test_delete_edges() {
        let delete = DeleteEdge::from_models(
            None,
            &[
                serve("player100", "team204", 0, 0, 0),
                serve("player101", "team204", 1, 0, 0),
            ],
        )
        .unwrap();
        assert_eq!(
            render(|o| delete.render(o)).unwrap(),
            r#"DELETE EDGE serve "player100"->"team204"@0, "player101"->"team204"@1"#
        );

        let delete = DeleteEdge::new("follow", vec![]);
        assert!(render(|o| delete.render(o)).is_err());

        let delete = DeleteEdge::from_models::<Serve>(None, &[]).unwrap();
        assert!(render(|o| delete.render(o)).is_err());
    }
}
