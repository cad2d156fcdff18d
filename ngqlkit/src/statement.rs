// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement assembly
//!
//! A [`Statement`] accumulates clauses in call order and renders them in the
//! order the query language requires. It is a list of pipe-delimited
//! segments; inside a segment each clause kind occurs once (a repeated call
//! merges into the existing clause) except raw fragments, which are kept as
//! given.
//!
//! Clauses render by grammar rank:
//!
//! | rank | clauses                                                     |
//! |------|-------------------------------------------------------------|
//! | 0    | GO, FETCH, LOOKUP, GET SUBGRAPH, mutations, schema clauses  |
//! | 1    | FROM                                                        |
//! | 2    | OVER                                                        |
//! | 3    | IN, OUT, BOTH                                               |
//! | 4    | WHERE, WHEN                                                 |
//! | 5    | GROUP BY                                                    |
//! | 6    | YIELD                                                       |
//! | 7    | SAMPLE                                                      |
//! | 8    | ORDER BY                                                    |
//! | 9    | LIMIT                                                       |
//!
//! A raw fragment takes the rank of the highest clause before it. A new
//! clause ranked below the highest one already in the segment opens a new
//! segment, so `yield_("a").group_by("b")` renders as `YIELD a | GROUP BY b`.

use crate::clause::{
    AlterOperate, Clause, ClauseKind, Connective, DeleteEdge, DeleteVertex, Direction, EdgeTypes,
    Fetch, FetchMulti, GetSubgraph, Go, GroupBy, InsertEdge, InsertVertex, Limit, Lookup, OrderBy,
    Over, Predicate, PropsUpdate, Sample, UpdateEdge, UpdateOptions, UpdateVertex, Yield,
};
use crate::error::{NgqlError, Result};
use crate::migrator;
use crate::model::{resolve, EdgeKey, Model, SchemaKind};
use crate::value::Value;
use log::trace;

/// One step of a statement under construction
///
/// A deferred error is recorded instead of a clause when building the
/// clause failed (typically model resolution); `build` reports the first one.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Clause(Clause),
    Pipe,
    Error(NgqlError),
}

impl std::convert::From<Clause> for Step {
    fn from(clause: Clause) -> Self {
        Step::Clause(clause)
    }
}

impl std::convert::From<Result<Clause>> for Step {
    fn from(result: Result<Clause>) -> Self {
        match result {
            Ok(clause) => Step::Clause(clause),
            Err(err) => Step::Error(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Segment {
    clauses: Vec<Clause>,
}

impl Segment {
    fn max_rank(&self) -> Option<u8> {
        self.clauses.iter().filter_map(|c| c.kind().rank()).max()
    }

    /// Clauses in render order: stable by rank, raw fragments ranked by what
    /// precedes them
    fn ordered(&self) -> Vec<&Clause> {
        let mut current = 0u8;
        let mut ranked: Vec<(u8, &Clause)> = self
            .clauses
            .iter()
            .map(|clause| {
                if let Some(rank) = clause.kind().rank() {
                    current = current.max(rank);
                    (rank, clause)
                } else {
                    (current, clause)
                }
            })
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, clause)| clause).collect()
    }

    fn validate(&self, first: bool) -> Result<()> {
        if self.clauses.is_empty() {
            return Err(NgqlError::invalid_clause("PIPE", "empty statement segment"));
        }

        let kinds: Vec<ClauseKind> = self.clauses.iter().map(Clause::kind).collect();
        let entries: Vec<ClauseKind> = kinds.iter().copied().filter(ClauseKind::is_entry).collect();
        if entries.len() > 1 {
            return Err(NgqlError::invalid_clause(
                entries[1].name(),
                format!("cannot share a statement segment with {}", entries[0]),
            ));
        }
        if first && entries.is_empty() && !kinds.contains(&ClauseKind::Raw) {
            return Err(NgqlError::invalid_clause(
                kinds[0].name(),
                "statement has no entry clause",
            ));
        }
        if let Some(mutation) = entries.iter().find(|k| k.is_mutation()) {
            if let Some(conflict) = kinds
                .iter()
                .find(|k| k.is_traversal() || **k == ClauseKind::Where)
            {
                return Err(NgqlError::invalid_clause(
                    conflict.name(),
                    format!("cannot be combined with {}", mutation),
                ));
            }
        }
        // WHEN is the condition of UPDATE / UPSERT and nothing else
        if kinds.contains(&ClauseKind::When)
            && !entries
                .iter()
                .any(|k| matches!(k, ClauseKind::UpdateVertex | ClauseKind::UpdateEdge))
        {
            return Err(NgqlError::invalid_clause(
                "WHEN",
                "only valid after UPDATE or UPSERT",
            ));
        }
        Ok(())
    }

    fn render(&self, out: &mut String) -> Result<()> {
        for (i, clause) in self.ordered().into_iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            clause.render(out)?;
        }
        Ok(())
    }
}

/// A statement under construction
///
/// Every builder method consumes and returns the statement; clone it to
/// branch.
///
/// # Examples
///
/// ```ignore
/// let ngql = Statement::new()
///     .go_steps(2)
///     .from("player100")
///     .over(["follow"])
///     .where_("properties($$).age > ?", args![30])
///     .yield_("dst(edge) AS id")
///     .build()?;
///
/// assert_eq!(
///     ngql,
///     r#"GO 2 STEPS FROM "player100" OVER follow WHERE properties($$).age > 30 YIELD dst(edge) AS id"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statement {
    segments: Vec<Segment>,
    error: Option<NgqlError>,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one step
    pub fn apply(mut self, step: Step) -> Self {
        match step {
            Step::Clause(clause) => self.push_clause(clause),
            Step::Pipe => {
                if self.segments.is_empty() {
                    self.segments.push(Segment::default());
                }
                self.segments.push(Segment::default());
            }
            Step::Error(err) => {
                if self.error.is_none() {
                    self.error = Some(err);
                }
            }
        }
        self
    }

    /// Add any clause
    pub fn clause(self, clause: Clause) -> Self {
        self.apply(Step::Clause(clause))
    }

    fn push_clause(&mut self, clause: Clause) {
        let kind = clause.kind();
        if self.segments.is_empty() {
            self.segments.push(Segment::default());
        }
        let needs_new_segment = {
            let segment = self.current();
            if kind != ClauseKind::Raw {
                if let Some(existing) = segment.clauses.iter_mut().find(|c| c.kind() == kind) {
                    existing.merge(clause);
                    return;
                }
            }
            match (kind.rank(), segment.max_rank()) {
                (Some(rank), Some(max)) => rank < max,
                _ => false,
            }
        };
        if needs_new_segment {
            trace!("{} opens a new segment", kind);
            self.segments.push(Segment::default());
        }
        self.current().clauses.push(clause);
    }

    fn current(&mut self) -> &mut Segment {
        if self.segments.is_empty() {
            self.segments.push(Segment::default());
        }
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }

    /// Raw fragment, spliced verbatim where it is called
    pub fn raw<S: Into<String>>(self, text: S) -> Self {
        self.clause(Clause::Raw(text.into()))
    }

    /// Close the current segment; following clauses read its output via `$-`
    pub fn pipe(self) -> Self {
        self.apply(Step::Pipe)
    }

    pub fn go(self) -> Self {
        self.clause(Clause::Go(Go::new()))
    }

    pub fn go_steps(self, steps: u32) -> Self {
        self.clause(Clause::Go(Go::steps(steps)))
    }

    /// `GO m TO n STEPS`
    pub fn go_range(self, from: u32, to: u32) -> Self {
        self.clause(Clause::Go(Go::range(from, to)))
    }

    /// Start vertices: a vid, a list of vids or an expression such as `$-.id`
    pub fn from<V: Into<Value>>(self, vids: V) -> Self {
        self.clause(Clause::From(crate::clause::From::new(vids)))
    }

    pub fn over<I, S>(self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::Over(Over::new(edge_types)))
    }

    pub fn over_reversely<I, S>(self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::Over(Over::new(edge_types).direction(Direction::Reversely)))
    }

    pub fn over_bidirect<I, S>(self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::Over(Over::new(edge_types).direction(Direction::Bidirect)))
    }

    /// Filter predicate; later calls attach with AND
    ///
    /// `?` placeholders outside string literals are replaced by `args`.
    pub fn where_<S: Into<String>>(self, expr: S, args: Vec<Value>) -> Self {
        self.predicate(Connective::And, expr, args)
    }

    pub fn or<S: Into<String>>(self, expr: S, args: Vec<Value>) -> Self {
        self.predicate(Connective::Or, expr, args)
    }

    pub fn xor<S: Into<String>>(self, expr: S, args: Vec<Value>) -> Self {
        self.predicate(Connective::Xor, expr, args)
    }

    /// `AND NOT expr`, or `NOT expr` as the first term
    pub fn not<S: Into<String>>(self, expr: S, args: Vec<Value>) -> Self {
        self.predicate(Connective::Not, expr, args)
    }

    fn predicate<S: Into<String>>(self, connective: Connective, expr: S, args: Vec<Value>) -> Self {
        self.clause(Clause::Where(Predicate::new(connective, expr, args)))
    }

    /// Condition of an UPDATE / UPSERT; later calls attach with AND
    pub fn when<S: Into<String>>(self, expr: S, args: Vec<Value>) -> Self {
        self.clause(Clause::When(Predicate::new(Connective::And, expr, args)))
    }

    /// `SAMPLE [n1, n2, ...]`
    pub fn sample<I: IntoIterator<Item = u64>>(self, counts: I) -> Self {
        self.clause(Clause::Sample(Sample::new(counts)))
    }

    /// `FETCH PROP ON name vids`
    pub fn fetch<S: Into<String>, V: Into<Value>>(self, name: S, vids: V) -> Self {
        self.clause(Clause::Fetch(Fetch::new(name, vids)))
    }

    /// `FETCH PROP ON n1, n2 vids`; names accumulate across calls
    pub fn fetch_multi<I, S, V>(self, names: I, vids: V) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        V: Into<Value>,
    {
        self.clause(Clause::FetchMulti(FetchMulti::new(names, vids)))
    }

    pub fn lookup<S: Into<String>>(self, name: S) -> Self {
        self.clause(Clause::Lookup(Lookup::new(name)))
    }

    pub fn group_by<S: Into<String>>(self, expr: S) -> Self {
        self.clause(Clause::GroupBy(GroupBy::new(expr)))
    }

    pub fn yield_<S: Into<String>>(self, expr: S) -> Self {
        self.clause(Clause::Yield(Yield::new(expr)))
    }

    pub fn yield_distinct<S: Into<String>>(self, expr: S) -> Self {
        self.clause(Clause::Yield(Yield::distinct(expr)))
    }

    pub fn order_by<S: Into<String>>(self, expr: S) -> Self {
        self.clause(Clause::OrderBy(OrderBy::new(expr)))
    }

    pub fn limit(self, count: u64) -> Self {
        self.clause(Clause::Limit(Limit::new(count)))
    }

    pub fn limit_offset(self, offset: u64, count: u64) -> Self {
        self.clause(Clause::Limit(Limit::with_offset(offset, count)))
    }

    pub fn in_<I, S>(self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::In(EdgeTypes::new(edge_types)))
    }

    pub fn out<I, S>(self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::Out(EdgeTypes::new(edge_types)))
    }

    pub fn both<I, S>(self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause(Clause::Both(EdgeTypes::new(edge_types)))
    }

    /// `GET SUBGRAPH n STEPS`; non-positive counts render as 1
    pub fn get_subgraph(self, step_count: i64) -> Self {
        self.clause(Clause::GetSubgraph(GetSubgraph::new(step_count)))
    }

    pub fn get_subgraph_with_prop(self, step_count: i64) -> Self {
        self.clause(Clause::GetSubgraph(GetSubgraph::new(step_count).with_prop()))
    }

    /// Insert tag model instances
    pub fn insert_vertex<M: Model>(self, vertices: &[M], if_not_exists: bool) -> Self {
        self.apply(InsertVertex::from_models(vertices, if_not_exists).map(Clause::InsertVertex).into())
    }

    pub fn update_vertex<V: Into<Value>>(
        self,
        vid: V,
        update: PropsUpdate,
        options: UpdateOptions,
    ) -> Self {
        self.clause(Clause::UpdateVertex(UpdateVertex::new(vid, update, options)))
    }

    /// Update a vertex from a tag model instance; zero-valued properties are
    /// skipped unless named in `options`
    pub fn update_vertex_model<V: Into<Value>, M: Model>(
        self,
        vid: V,
        model: &M,
        options: UpdateOptions,
    ) -> Self {
        let vid = vid.into();
        let clause = PropsUpdate::model(model)
            .map(|update| Clause::UpdateVertex(UpdateVertex::new(vid, update, options)));
        self.apply(clause.into())
    }

    pub fn upsert_vertex<V: Into<Value>>(
        self,
        vid: V,
        update: PropsUpdate,
        options: UpdateOptions,
    ) -> Self {
        self.clause(Clause::UpdateVertex(UpdateVertex::upsert(vid, update, options)))
    }

    pub fn upsert_vertex_model<V: Into<Value>, M: Model>(
        self,
        vid: V,
        model: &M,
        options: UpdateOptions,
    ) -> Self {
        let vid = vid.into();
        let clause = PropsUpdate::model(model)
            .map(|update| Clause::UpdateVertex(UpdateVertex::upsert(vid, update, options)));
        self.apply(clause.into())
    }

    pub fn delete_vertex<V: Into<Value>>(self, vids: V, with_edge: bool) -> Self {
        self.clause(Clause::DeleteVertex(DeleteVertex::new(vids, with_edge)))
    }

    /// Insert edge model instances
    pub fn insert_edge<M: Model>(self, edges: &[M], if_not_exists: bool) -> Self {
        self.apply(InsertEdge::from_models(edges, if_not_exists).map(Clause::InsertEdge).into())
    }

    pub fn update_edge(self, key: EdgeKey, update: PropsUpdate, options: UpdateOptions) -> Self {
        self.clause(Clause::UpdateEdge(UpdateEdge::new(key, update, options)))
    }

    /// Update an edge model instance, keyed by its own endpoints
    pub fn update_edge_model<M: Model>(self, edge: &M, options: UpdateOptions) -> Self {
        self.apply(UpdateEdge::from_model(edge, options).map(Clause::UpdateEdge).into())
    }

    pub fn upsert_edge(self, key: EdgeKey, update: PropsUpdate, options: UpdateOptions) -> Self {
        self.clause(Clause::UpdateEdge(UpdateEdge::upsert(key, update, options)))
    }

    pub fn upsert_edge_model<M: Model>(self, edge: &M, options: UpdateOptions) -> Self {
        let clause = UpdateEdge::from_model(edge, options).map(|mut update| {
            update.upsert = true;
            Clause::UpdateEdge(update)
        });
        self.apply(clause.into())
    }

    /// Delete edge model instances
    pub fn delete_edge<M: Model>(self, edges: &[M]) -> Self {
        self.apply(DeleteEdge::from_models(None, edges).map(Clause::DeleteEdge).into())
    }

    /// Delete edge model instances under another edge type name
    pub fn delete_edge_as<M: Model>(self, edge_type: &str, edges: &[M]) -> Self {
        self.apply(
            DeleteEdge::from_models(Some(edge_type), edges)
                .map(Clause::DeleteEdge)
                .into(),
        )
    }

    pub fn delete_edge_keys<S: Into<String>>(self, edge_type: S, keys: Vec<EdgeKey>) -> Self {
        self.clause(Clause::DeleteEdge(DeleteEdge::new(edge_type, keys)))
    }

    /// `CREATE TAG` from a tag model
    pub fn create_tag<M: Model>(self, if_not_exists: bool) -> Self {
        self.apply(schema_clause::<M>(SchemaKind::Tag, |d| Ok(migrator::create(d, if_not_exists))))
    }

    /// `CREATE EDGE` from an edge model
    pub fn create_edge<M: Model>(self, if_not_exists: bool) -> Self {
        self.apply(schema_clause::<M>(SchemaKind::Edge, |d| Ok(migrator::create(d, if_not_exists))))
    }

    pub fn alter_tag<M: Model>(self, operate: &AlterOperate) -> Self {
        self.apply(schema_clause::<M>(SchemaKind::Tag, |d| migrator::alter(d, operate)))
    }

    /// `ALTER TAG` of a model's shape under another tag name
    pub fn alter_tag_as<M: Model>(self, tag_name: &str, operate: &AlterOperate) -> Self {
        self.apply(schema_clause::<M>(SchemaKind::Tag, |d| {
            migrator::alter(&d.renamed(tag_name), operate)
        }))
    }

    pub fn alter_edge<M: Model>(self, operate: &AlterOperate) -> Self {
        self.apply(schema_clause::<M>(SchemaKind::Edge, |d| migrator::alter(d, operate)))
    }

    pub fn alter_edge_as<M: Model>(self, edge_type: &str, operate: &AlterOperate) -> Self {
        self.apply(schema_clause::<M>(SchemaKind::Edge, |d| {
            migrator::alter(&d.renamed(edge_type), operate)
        }))
    }

    pub fn drop_tag(self, name: &str, if_exists: bool) -> Self {
        self.clause(migrator::drop(SchemaKind::Tag, name, if_exists))
    }

    pub fn drop_edge(self, name: &str, if_exists: bool) -> Self {
        self.clause(migrator::drop(SchemaKind::Edge, name, if_exists))
    }

    /// Render the statement
    ///
    /// Deferred errors are reported first, then structural validation runs,
    /// then every clause renders. No partial text is ever returned.
    pub fn build(&self) -> Result<String> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.segments.is_empty() {
            return Err(NgqlError::invalid_clause("STATEMENT", "statement is empty"));
        }
        for (i, segment) in self.segments.iter().enumerate() {
            segment.validate(i == 0)?;
        }

        let schema = self
            .segments
            .iter()
            .flat_map(|s| s.clauses.iter())
            .map(Clause::kind)
            .find(ClauseKind::is_schema);
        if let Some(kind) = schema {
            if self.segments.len() > 1 || self.segments[0].clauses.len() > 1 {
                return Err(NgqlError::invalid_clause(
                    kind.name(),
                    "schema clauses must stand alone",
                ));
            }
        }

        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push_str(" | ");
            }
            segment.render(&mut out)?;
        }
        if schema.is_some() {
            out.push(';');
        }
        trace!("Built statement: {}", out);
        Ok(out)
    }
}

/// Resolve `M`, check that it is a model of `kind`, then build its clause
fn schema_clause<M: Model>(
    kind: SchemaKind,
    build: impl FnOnce(&crate::model::SchemaDescriptor) -> Result<Clause>,
) -> Step {
    let result = resolve::<M>().and_then(|descriptor| {
        if descriptor.kind != kind {
            return Err(NgqlError::invalid_model(
                &descriptor.model,
                format!(
                    "is a {} model, expected a {} model",
                    descriptor.kind.keyword().to_ascii_lowercase(),
                    kind.keyword().to_ascii_lowercase()
                ),
            ));
        }
        build(&descriptor)
    });
    result.into()
}
