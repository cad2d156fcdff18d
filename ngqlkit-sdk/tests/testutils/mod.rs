//! Test utilities for ngqlkit-sdk integration tests
//!
//! - MockExecutor: records statements and replays canned results
//! - MockIntrospector: serves live schemas from a map
//! - Player / Serve: sample models

#![allow(dead_code)]

use ngqlkit_sdk::{
    BoxError, Executor, FieldDef, LiveSchema, Model, ModelKind, NativeType, ResultSet,
    SchemaIntrospector, SchemaKind, Value,
};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
struct MockState {
    executed: Vec<String>,
    responses: VecDeque<Result<ResultSet, String>>,
}

/// Executor that records every statement
///
/// Queued responses are returned in order; once they run out every
/// statement succeeds with an empty result set. Clones share state.
#[derive(Clone, Default)]
pub struct MockExecutor {
    state: Arc<Mutex<MockState>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, result: ResultSet) {
        self.state.lock().responses.push_back(Ok(result));
    }

    pub fn fail(&self, message: &str) {
        self.state.lock().responses.push_back(Err(message.to_string()));
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.lock().executed.clone()
    }

    pub fn last(&self) -> Option<String> {
        self.state.lock().executed.last().cloned()
    }
}

impl Executor for MockExecutor {
    fn execute(&self, statement: &str) -> Result<ResultSet, BoxError> {
        let mut state = self.state.lock();
        state.executed.push(statement.to_string());
        match state.responses.pop_front() {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(message.into()),
            None => Ok(ResultSet::empty()),
        }
    }
}

/// Introspector backed by a map of `(kind, name)` to live schema
#[derive(Default)]
pub struct MockIntrospector {
    schemas: HashMap<(SchemaKind, String), LiveSchema>,
    broken: bool,
}

impl MockIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: SchemaKind, name: &str, schema: LiveSchema) -> Self {
        self.schemas.insert((kind, name.to_string()), schema);
        self
    }

    /// Every describe call fails
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }
}

impl SchemaIntrospector for MockIntrospector {
    fn describe(&self, kind: SchemaKind, name: &str) -> Result<Option<LiveSchema>, BoxError> {
        if self.broken {
            return Err("meta service unavailable".into());
        }
        Ok(self.schemas.get(&(kind, name.to_string())).cloned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct Player {
    #[serde(default)]
    pub vid: String,
    pub name: String,
    pub age: i64,
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

impl Model for Player {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Tag("player"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("vid", NativeType::String).tag("vertex_id"),
            FieldDef::new("name", NativeType::String),
            FieldDef::new("age", NativeType::I64),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![self.vid.clone().into(), self.name.clone().into(), self.age.into()]
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

impl Serve {
    pub fn new(src: &str, dst: &str, start_year: i64, end_year: i64) -> Self {
        Self {
            src: src.to_string(),
            dst: dst.to_string(),
            rank: 0,
            start_year,
            end_year,
        }
    }
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
