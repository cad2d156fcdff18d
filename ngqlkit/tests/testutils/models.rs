//! Sample models
//!
//! Tag models: Player, NoProperty, PlayerWithDefault, Woman, WomanTyped, T3,
//! MissingValues.
//! Edge models: Follow, EdgeNoProperty, FollowWithDefault, E1, E2, Serve.

use chrono::NaiveDateTime;
use ngqlkit::{FieldDef, Model, ModelKind, NativeType, Value};

#[derive(Debug, Clone, Default)]
pub struct Player {
    pub vid: String,
    pub name: String,
    pub age: i64,
}

impl Model for Player {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Tag("player"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("VID", NativeType::String).tag("vertex_id"),
            FieldDef::new("Name", NativeType::String),
            FieldDef::new("Age", NativeType::I64),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![self.vid.clone().into(), self.name.clone().into(), self.age.into()]
    }
}

impl Player {
    pub fn new(vid: &str, name: &str, age: i64) -> Self {
        Self {
            vid: vid.to_string(),
            name: name.to_string(),
            age,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoProperty {
    pub vid: String,
}

impl Model for NoProperty {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Tag("no_property"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![FieldDef::new("VID", NativeType::String).tag("vertex_id")]
    }

    fn values(&self) -> Vec<Value> {
        vec![self.vid.clone().into()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayerWithDefault {
    pub vid: String,
    pub name: String,
    pub age: i64,
}

impl Model for PlayerWithDefault {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Tag("player_with_default"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("VID", NativeType::String).tag("vertex_id"),
            FieldDef::new("Name", NativeType::String).tag("prop:name;type:string;default:''"),
            FieldDef::new("Age", NativeType::I64).tag("prop:age;type:int;default:20"),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![self.vid.clone().into(), self.name.clone().into(), self.age.into()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Woman {
    pub vid: String,
    pub name: String,
    pub age: i64,
    pub married: bool,
    pub salary: f64,
    pub create_time: NaiveDateTime,
}

impl Model for Woman {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Tag("woman"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("VID", NativeType::String).tag("vertex_id"),
            FieldDef::new("Name", NativeType::String),
            FieldDef::new("Age", NativeType::I64),
            FieldDef::new("Married", NativeType::Bool),
            FieldDef::new("Salary", NativeType::F64),
            FieldDef::new("CreateTime", NativeType::DateTime).tag("type:timestamp;ttl:100"),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.vid.clone().into(),
            self.name.clone().into(),
            self.age.into(),
            self.married.into(),
            self.salary.into(),
            self.create_time.into(),
        ]
    }
}

/// Same tag as [`Woman`], with explicit types and defaults
#[derive(Debug, Clone, Default)]
pub struct WomanTyped {
    pub vid: String,
    pub name: String,
    pub age: i32,
    pub create_time: NaiveDateTime,
}

impl Model for WomanTyped {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Tag("woman"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("VID", NativeType::String).tag("vertex_id"),
            FieldDef::new("Name", NativeType::String)
                .tag("prop:name;type:fixed_string;default:hayson"),
            FieldDef::new("Age", NativeType::I32).tag("prop:age;type:int32;default:20"),
            FieldDef::new("CreateTime", NativeType::DateTime).tag("default:datetime(1625469277)"),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.vid.clone().into(),
            self.name.clone().into(),
            self.age.into(),
            self.create_time.into(),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct T3 {
    pub vid: i64,
    pub p1: i64,
    pub p2: String,
    pub internal: String,
}

impl Model for T3 {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Tag("t3"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("VID", NativeType::I64).tag("vertex_id"),
            FieldDef::new("P1", NativeType::I64),
            FieldDef::new("P2", NativeType::String),
            FieldDef::new("internal", NativeType::String).tag("ignore"),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.vid.into(),
            self.p1.into(),
            self.p2.clone().into(),
            self.internal.clone().into(),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Follow {
    pub src: String,
    pub dst: String,
    pub degree: i64,
}

impl Model for Follow {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Edge("follow"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("SrcID", NativeType::String).tag("edge_src_id"),
            FieldDef::new("DstID", NativeType::String).tag("edge_dst_id"),
            FieldDef::new("Degree", NativeType::I64),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![self.src.clone().into(), self.dst.clone().into(), self.degree.into()]
    }
}

impl Follow {
    pub fn new(src: &str, dst: &str, degree: i64) -> Self {
        Self {
            src: src.to_string(),
            dst: dst.to_string(),
            degree,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EdgeNoProperty {
    pub src: String,
    pub dst: String,
}

impl Model for EdgeNoProperty {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Edge("no_property"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("SrcID", NativeType::String).tag("edge_src_id"),
            FieldDef::new("DstID", NativeType::String).tag("edge_dst_id"),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![self.src.clone().into(), self.dst.clone().into()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct FollowWithDefault {
    pub src: String,
    pub dst: String,
    pub degree: i64,
}

impl Model for FollowWithDefault {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Edge("follow_with_default"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("SrcID", NativeType::String).tag("edge_src_id"),
            FieldDef::new("DstID", NativeType::String).tag("edge_dst_id"),
            FieldDef::new("Degree", NativeType::I64).tag("default:20"),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![self.src.clone().into(), self.dst.clone().into(), self.degree.into()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct E1 {
    pub src: String,
    pub dst: String,
    pub p1: String,
    pub p2: i64,
    pub p3: String,
}

impl Model for E1 {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Edge("e1"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("SrcID", NativeType::String).tag("edge_src_id"),
            FieldDef::new("DstID", NativeType::String).tag("edge_dst_id"),
            FieldDef::new("P1", NativeType::String),
            FieldDef::new("P2", NativeType::I64).tag("ttl:100"),
            FieldDef::new("P3", NativeType::String).tag("prop:p3;type:timestamp"),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.src.clone().into(),
            self.dst.clone().into(),
            self.p1.clone().into(),
            self.p2.into(),
            self.p3.clone().into(),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct E2 {
    pub src: String,
    pub dst: String,
    pub name: String,
    pub age: i64,
}

impl Model for E2 {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Edge("e2"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("SrcID", NativeType::String).tag("edge_src_id"),
            FieldDef::new("DstID", NativeType::String).tag("edge_dst_id"),
            FieldDef::new("Name", NativeType::String),
            FieldDef::new("Age", NativeType::I64),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.src.clone().into(),
            self.dst.clone().into(),
            self.name.clone().into(),
            self.age.into(),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Serve {
    pub src: String,
    pub dst: String,
    pub rank: i64,
    pub start_year: i64,
    pub end_year: i64,
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

impl Serve {
    pub fn new(src: &str, dst: &str, rank: i64, start_year: i64, end_year: i64) -> Self {
        Self {
            src: src.to_string(),
            dst: dst.to_string(),
            rank,
            start_year,
            end_year,
        }
    }
}

/// A model that never names its tag
#[derive(Debug, Clone, Default)]
pub struct Unnamed {
    pub vid: String,
}

impl Model for Unnamed {
    fn fields() -> Vec<FieldDef> {
        vec![FieldDef::new("VID", NativeType::String).tag("vertex_id")]
    }

    fn values(&self) -> Vec<Value> {
        vec![self.vid.clone().into()]
    }
}

/// A tag model whose `values` skips its last field
#[derive(Debug, Clone, Default)]
pub struct MissingValues {
    pub vid: String,
    pub name: String,
    pub age: i64,
}

impl Model for MissingValues {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Tag("player"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("VID", NativeType::String).tag("vertex_id"),
            FieldDef::new("Name", NativeType::String),
            FieldDef::new("Age", NativeType::I64),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![self.vid.clone().into(), self.name.clone().into()]
    }
}
