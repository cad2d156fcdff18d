//! Typed statement chains
//!
//! A [`Chain`] is an immutable list of steps. Every builder call returns a
//! new chain that shares its predecessor, so a chain can be branched freely:
//!
//! ```ignore
//! let base = db.chain::<Team>().go().from("player100");
//! let teams = base.clone().over(["serve"]).yield_("$$ AS t");
//! let friends = base.over(["follow"]).yield_("$$ AS t");
//! ```
//!
//! Nothing is compiled until a terminal method (`ngql`, `exec`, `find`, ...)
//! runs; compile errors surface there.

use crate::connection::Db;
use crate::error::Result;
use crate::result::ResultSet;
use ngqlkit::clause::{
    self, Clause, Connective, DeleteEdge, DeleteVertex, Direction, EdgeTypes, Fetch, FetchMulti,
    GetSubgraph, Go, GroupBy, InsertEdge, InsertVertex, Limit, Lookup, OrderBy, Over, Predicate,
    Sample, UpdateEdge, UpdateVertex, Yield,
};
use ngqlkit::{EdgeKey, Model, PropsUpdate, Statement, Step, UpdateOptions, Value};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

#[derive(Debug)]
struct Node {
    step: Step,
    prev: Option<Arc<Node>>,
}

/// Statement chain whose results decode into `T`
pub struct Chain<'db, T> {
    db: &'db Db,
    head: Option<Arc<Node>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Chain<'_, T> {
    fn clone(&self) -> Self {
        Chain {
            db: self.db,
            head: self.head.clone(),
            _marker: PhantomData,
        }
    }
}

impl<'db, T> Chain<'db, T> {
    pub(crate) fn new(db: &'db Db) -> Self {
        Chain {
            db,
            head: None,
            _marker: PhantomData,
        }
    }

    /// Append one step
    pub fn step<S: Into<Step>>(&self, step: S) -> Self {
        Chain {
            db: self.db,
            head: Some(Arc::new(Node {
                step: step.into(),
                prev: self.head.clone(),
            })),
            _marker: PhantomData,
        }
    }

    fn clause(&self, clause: Clause) -> Self {
        self.step(clause)
    }

    /// Replay the steps, oldest first, into a fresh statement
    pub fn statement(&self) -> Statement {
        let mut steps = Vec::new();
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            steps.push(node.step.clone());
            cursor = node.prev.as_deref();
        }
        steps
            .into_iter()
            .rev()
            .fold(Statement::new(), |statement, step| statement.apply(step))
    }

    pub fn raw<S: Into<String>>(&self, text: S) -> Self {
        self.clause(Clause::Raw(text.into()))
    }

    pub fn pipe(&self) -> Self {
        self.step(Step::Pipe)
    }

    pub fn go(&self) -> Self {
        self.clause(Clause::Go(Go::new()))
    }

    pub fn go_steps(&self, steps: u32) -> Self {
        self.clause(Clause::Go(Go::steps(steps)))
    }

    pub fn go_range(&self, from: u32, to: u32) -> Self {
        self.clause(Clause::Go(Go::range(from, to)))
    }

    pub fn from<V: Into<Value>>(&self, vids: V) -> Self {
        self.clause(Clause::From(clause::From::new(vids)))
    }

    pub fn over<I, S>(&self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::Over(Over::new(edge_types)))
    }

    pub fn over_reversely<I, S>(&self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::Over(Over::new(edge_types).direction(Direction::Reversely)))
    }

    pub fn over_bidirect<I, S>(&self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::Over(Over::new(edge_types).direction(Direction::Bidirect)))
    }

    pub fn where_<S: Into<String>>(&self, expr: S, args: Vec<Value>) -> Self {
        self.clause(Clause::Where(Predicate::new(Connective::And, expr, args)))
    }

    pub fn or<S: Into<String>>(&self, expr: S, args: Vec<Value>) -> Self {
        self.clause(Clause::Where(Predicate::new(Connective::Or, expr, args)))
    }

    pub fn xor<S: Into<String>>(&self, expr: S, args: Vec<Value>) -> Self {
        self.clause(Clause::Where(Predicate::new(Connective::Xor, expr, args)))
    }

    pub fn not<S: Into<String>>(&self, expr: S, args: Vec<Value>) -> Self {
        self.clause(Clause::Where(Predicate::new(Connective::Not, expr, args)))
    }

    pub fn when<S: Into<String>>(&self, expr: S, args: Vec<Value>) -> Self {
        self.clause(Clause::When(Predicate::new(Connective::And, expr, args)))
    }

    pub fn sample<I: IntoIterator<Item = u64>>(&self, counts: I) -> Self {
        self.clause(Clause::Sample(Sample::new(counts)))
    }

    pub fn fetch<S: Into<String>, V: Into<Value>>(&self, name: S, vids: V) -> Self {
        self.clause(Clause::Fetch(Fetch::new(name, vids)))
    }

    pub fn fetch_multi<I, S, V>(&self, names: I, vids: V) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        V: Into<Value>,
    {
        self.clause(Clause::FetchMulti(FetchMulti::new(names, vids)))
    }

    pub fn lookup<S: Into<String>>(&self, name: S) -> Self {
        self.clause(Clause::Lookup(Lookup::new(name)))
    }

    pub fn group_by<S: Into<String>>(&self, expr: S) -> Self {
        self.clause(Clause::GroupBy(GroupBy::new(expr)))
    }

    pub fn yield_<S: Into<String>>(&self, expr: S) -> Self {
        self.clause(Clause::Yield(Yield::new(expr)))
    }

    pub fn yield_distinct<S: Into<String>>(&self, expr: S) -> Self {
        self.clause(Clause::Yield(Yield::distinct(expr)))
    }

    pub fn order_by<S: Into<String>>(&self, expr: S) -> Self {
        self.clause(Clause::OrderBy(OrderBy::new(expr)))
    }

    pub fn limit(&self, count: u64) -> Self {
        self.clause(Clause::Limit(Limit::new(count)))
    }

    pub fn limit_offset(&self, offset: u64, count: u64) -> Self {
        self.clause(Clause::Limit(Limit::with_offset(offset, count)))
    }

    pub fn get_subgraph(&self, step_count: i64) -> Self {
        self.clause(Clause::GetSubgraph(GetSubgraph::new(step_count)))
    }

    pub fn get_subgraph_with_prop(&self, step_count: i64) -> Self {
        self.clause(Clause::GetSubgraph(GetSubgraph::new(step_count).with_prop()))
    }

    pub fn in_<I, S>(&self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::In(EdgeTypes::new(edge_types)))
    }

    pub fn out<I, S>(&self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::Out(EdgeTypes::new(edge_types)))
    }

    pub fn both<I, S>(&self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::Both(EdgeTypes::new(edge_types)))
    }

    pub fn insert_vertex<M: Model>(&self, vertices: &[M], if_not_exists: bool) -> Self {
        self.step(InsertVertex::from_models(vertices, if_not_exists).map(Clause::InsertVertex))
    }

    pub fn update_vertex<V: Into<Value>>(
        &self,
        vid: V,
        update: PropsUpdate,
        options: UpdateOptions,
    ) -> Self {
        self.clause(Clause::UpdateVertex(UpdateVertex::new(vid, update, options)))
    }

    pub fn update_vertex_model<V: Into<Value>, M: Model>(
        &self,
        vid: V,
        model: &M,
        options: UpdateOptions,
    ) -> Self {
        let vid = vid.into();
        self.step(
            PropsUpdate::model(model)
                .map(|update| Clause::UpdateVertex(UpdateVertex::new(vid, update, options))),
        )
    }

    pub fn upsert_vertex<V: Into<Value>>(
        &self,
        vid: V,
        update: PropsUpdate,
        options: UpdateOptions,
    ) -> Self {
        self.clause(Clause::UpdateVertex(UpdateVertex::upsert(vid, update, options)))
    }

    pub fn upsert_vertex_model<V: Into<Value>, M: Model>(
        &self,
        vid: V,
        model: &M,
        options: UpdateOptions,
    ) -> Self {
        let vid = vid.into();
        self.step(
            PropsUpdate::model(model)
                .map(|update| Clause::UpdateVertex(UpdateVertex::upsert(vid, update, options))),
        )
    }

    pub fn delete_vertex<V: Into<Value>>(&self, vids: V, with_edge: bool) -> Self {
        self.clause(Clause::DeleteVertex(DeleteVertex::new(vids, with_edge)))
    }

    pub fn insert_edge<M: Model>(&self, edges: &[M], if_not_exists: bool) -> Self {
        self.step(InsertEdge::from_models(edges, if_not_exists).map(Clause::InsertEdge))
    }

    pub fn update_edge(&self, key: EdgeKey, update: PropsUpdate, options: UpdateOptions) -> Self {
        self.clause(Clause::UpdateEdge(UpdateEdge::new(key, update, options)))
    }

    pub fn update_edge_model<M: Model>(&self, edge: &M, options: UpdateOptions) -> Self {
        self.step(UpdateEdge::from_model(edge, options).map(Clause::UpdateEdge))
    }

    pub fn upsert_edge(&self, key: EdgeKey, update: PropsUpdate, options: UpdateOptions) -> Self {
        self.clause(Clause::UpdateEdge(UpdateEdge::upsert(key, update, options)))
    }

    pub fn upsert_edge_model<M: Model>(&self, edge: &M, options: UpdateOptions) -> Self {
        self.step(UpdateEdge::from_model(edge, options).map(|mut update| {
            update.upsert = true;
            Clause::UpdateEdge(update)
        }))
    }

    /// Delete edge model instances
    pub fn delete_edge<M: Model>(&self, edges: &[M]) -> Self {
        self.step(DeleteEdge::from_models(None, edges).map(Clause::DeleteEdge))
    }

    /// Delete edge model instances under another edge type name
    pub fn delete_edge_as<M: Model>(&self, edge_type: &str, edges: &[M]) -> Self {
        self.step(DeleteEdge::from_models(Some(edge_type), edges).map(Clause::DeleteEdge))
    }

    pub fn delete_edge_keys<S: Into<String>>(&self, edge_type: S, keys: Vec<EdgeKey>) -> Self {
        self.clause(Clause::DeleteEdge(DeleteEdge::new(edge_type, keys)))
    }

    /// Compile the chain without executing it
    pub fn ngql(&self) -> Result<String> {
        Ok(self.statement().build()?)
    }

    /// Compile and execute, returning the undecoded result set
    pub fn raw_result(&self) -> Result<ResultSet> {
        let ngql = self.ngql()?;
        self.db.execute(&ngql)
    }

    /// Compile and execute, discarding the result
    pub fn exec(&self) -> Result<()> {
        self.raw_result().map(|_| ())
    }
}

impl<T: DeserializeOwned> Chain<'_, T> {
    /// Every row, decoded as an object keyed by column name
    pub fn find(&self) -> Result<Vec<T>> {
        self.raw_result()?.decode_rows()
    }

    /// One column of every row
    pub fn find_col(&self, column: &str) -> Result<Vec<T>> {
        self.raw_result()?.decode_column(column)
    }

    /// The first row; [`Error::RecordNotFound`](crate::Error::RecordNotFound)
    /// when there is none
    pub fn take(&self) -> Result<T> {
        self.raw_result()?.first()
    }

    /// One column of the first row
    pub fn take_col(&self, column: &str) -> Result<T> {
        self.raw_result()?.first_column(column)
    }
}
