// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Clause model
//!
//! Every statement fragment is one [`Clause`] variant. A clause knows its
//! [`ClauseKind`], how to absorb a later occurrence of the same kind and how
//! to render itself. The [`crate::statement::Statement`] decides where in the
//! statement each clause lands.
//!
//! Merge behaviour by kind:
//!
//! - `In`, `Out`, `Both`, `Over` and `FetchMulti` accumulate their lists
//! - `Where` and `When` append a term joined by its connective
//! - `Raw` never merges, every fragment is kept in call order
//! - everything else is replaced by the latest call

pub mod edge;
pub mod fetch;
pub mod filter;
pub mod projection;
pub mod props;
pub mod schema;
pub mod traversal;
pub mod vertex;

pub use edge::{DeleteEdge, EdgeRow, InsertEdge, UpdateEdge};
pub use fetch::{Fetch, FetchMulti, Lookup};
pub use filter::{Connective, Predicate, Term};
pub use projection::{GroupBy, Limit, OrderBy, Yield};
pub use props::{ModelInstance, PropColumn, PropsUpdate, UpdateOptions};
pub use schema::{AlterOperate, AlterSchema, CreateSchema, DropSchema};
pub use traversal::{Direction, EdgeTypes, From, GetSubgraph, Go, GoSteps, Over, Sample};
pub use vertex::{DeleteVertex, InsertVertex, UpdateVertex, VertexRow};

use crate::error::Result;
use std::fmt;

/// Discriminant of a [`Clause`], also used as its name in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Go,
    From,
    Over,
    Where,
    When,
    Sample,
    Fetch,
    FetchMulti,
    Lookup,
    GroupBy,
    Yield,
    OrderBy,
    Limit,
    In,
    Out,
    Both,
    GetSubgraph,
    InsertVertex,
    UpdateVertex,
    DeleteVertex,
    InsertEdge,
    UpdateEdge,
    DeleteEdge,
    CreateTag,
    AlterTag,
    DropTag,
    CreateEdge,
    AlterEdge,
    DropEdge,
    Raw,
}

impl ClauseKind {
    pub fn name(&self) -> &'static str {
        match self {
            ClauseKind::Go => "GO",
            ClauseKind::From => "FROM",
            ClauseKind::Over => "OVER",
            ClauseKind::Where => "WHERE",
            ClauseKind::When => "WHEN",
            ClauseKind::Sample => "SAMPLE",
            ClauseKind::Fetch => "FETCH",
            ClauseKind::FetchMulti => "FETCH_MULTI",
            ClauseKind::Lookup => "LOOKUP",
            ClauseKind::GroupBy => "GROUP_BY",
            ClauseKind::Yield => "YIELD",
            ClauseKind::OrderBy => "ORDER_BY",
            ClauseKind::Limit => "LIMIT",
            ClauseKind::In => "IN",
            ClauseKind::Out => "OUT",
            ClauseKind::Both => "BOTH",
            ClauseKind::GetSubgraph => "GET_SUBGRAPH",
            ClauseKind::InsertVertex => "INSERT_VERTEX",
            ClauseKind::UpdateVertex => "UPDATE_VERTEX",
            ClauseKind::DeleteVertex => "DELETE_VERTEX",
            ClauseKind::InsertEdge => "INSERT_EDGE",
            ClauseKind::UpdateEdge => "UPDATE_EDGE",
            ClauseKind::DeleteEdge => "DELETE_EDGE",
            ClauseKind::CreateTag => "CREATE_TAG",
            ClauseKind::AlterTag => "ALTER_TAG",
            ClauseKind::DropTag => "DROP_TAG",
            ClauseKind::CreateEdge => "CREATE_EDGE",
            ClauseKind::AlterEdge => "ALTER_EDGE",
            ClauseKind::DropEdge => "DROP_EDGE",
            ClauseKind::Raw => "RAW",
        }
    }

    /// Grammar position inside a segment; `None` for `Raw`, which takes the
    /// position of whatever precedes it
    pub fn rank(&self) -> Option<u8> {
        let rank = match self {
            ClauseKind::Raw => return None,
            ClauseKind::From => 1,
            ClauseKind::Over => 2,
            ClauseKind::In | ClauseKind::Out | ClauseKind::Both => 3,
            ClauseKind::Where | ClauseKind::When => 4,
            ClauseKind::GroupBy => 5,
            ClauseKind::Yield => 6,
            ClauseKind::Sample => 7,
            ClauseKind::OrderBy => 8,
            ClauseKind::Limit => 9,
            _ => 0,
        };
        Some(rank)
    }

    /// Clauses that start a segment
    pub fn is_entry(&self) -> bool {
        self.rank() == Some(0)
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ClauseKind::InsertVertex
                | ClauseKind::UpdateVertex
                | ClauseKind::DeleteVertex
                | ClauseKind::InsertEdge
                | ClauseKind::UpdateEdge
                | ClauseKind::DeleteEdge
        )
    }

    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            ClauseKind::CreateTag
                | ClauseKind::AlterTag
                | ClauseKind::DropTag
                | ClauseKind::CreateEdge
                | ClauseKind::AlterEdge
                | ClauseKind::DropEdge
        )
    }

    /// Clauses that only make sense in a traversal and never next to a
    /// mutation
    pub fn is_traversal(&self) -> bool {
        matches!(
            self,
            ClauseKind::From
                | ClauseKind::Over
                | ClauseKind::In
                | ClauseKind::Out
                | ClauseKind::Both
                | ClauseKind::GroupBy
                | ClauseKind::Sample
                | ClauseKind::OrderBy
                | ClauseKind::Limit
        )
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One statement fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Go(Go),
    From(From),
    Over(Over),
    Where(Predicate),
    When(Predicate),
    Sample(Sample),
    Fetch(Fetch),
    FetchMulti(FetchMulti),
    Lookup(Lookup),
    GroupBy(GroupBy),
    Yield(Yield),
    OrderBy(OrderBy),
    Limit(Limit),
    In(EdgeTypes),
    Out(EdgeTypes),
    Both(EdgeTypes),
    GetSubgraph(GetSubgraph),
    InsertVertex(InsertVertex),
    UpdateVertex(UpdateVertex),
    DeleteVertex(DeleteVertex),
    InsertEdge(InsertEdge),
    UpdateEdge(UpdateEdge),
    DeleteEdge(DeleteEdge),
    CreateTag(CreateSchema),
    AlterTag(AlterSchema),
    DropTag(DropSchema),
    CreateEdge(CreateSchema),
    AlterEdge(AlterSchema),
    DropEdge(DropSchema),
    Raw(String),
}

impl Clause {
    pub fn kind(&self) -> ClauseKind {
        match self {
            Clause::Go(_) => ClauseKind::Go,
            Clause::From(_) => ClauseKind::From,
            Clause::Over(_) => ClauseKind::Over,
            Clause::Where(_) => ClauseKind::Where,
            Clause::When(_) => ClauseKind::When,
            Clause::Sample(_) => ClauseKind::Sample,
            Clause::Fetch(_) => ClauseKind::Fetch,
            Clause::FetchMulti(_) => ClauseKind::FetchMulti,
            Clause::Lookup(_) => ClauseKind::Lookup,
            Clause::GroupBy(_) => ClauseKind::GroupBy,
            Clause::Yield(_) => ClauseKind::Yield,
            Clause::OrderBy(_) => ClauseKind::OrderBy,
            Clause::Limit(_) => ClauseKind::Limit,
            Clause::In(_) => ClauseKind::In,
            Clause::Out(_) => ClauseKind::Out,
            Clause::Both(_) => ClauseKind::Both,
            Clause::GetSubgraph(_) => ClauseKind::GetSubgraph,
            Clause::InsertVertex(_) => ClauseKind::InsertVertex,
            Clause::UpdateVertex(_) => ClauseKind::UpdateVertex,
            Clause::DeleteVertex(_) => ClauseKind::DeleteVertex,
            Clause::InsertEdge(_) => ClauseKind::InsertEdge,
            Clause::UpdateEdge(_) => ClauseKind::UpdateEdge,
            Clause::DeleteEdge(_) => ClauseKind::DeleteEdge,
            Clause::CreateTag(_) => ClauseKind::CreateTag,
            Clause::AlterTag(_) => ClauseKind::AlterTag,
            Clause::DropTag(_) => ClauseKind::DropTag,
            Clause::CreateEdge(_) => ClauseKind::CreateEdge,
            Clause::AlterEdge(_) => ClauseKind::AlterEdge,
            Clause::DropEdge(_) => ClauseKind::DropEdge,
            Clause::Raw(_) => ClauseKind::Raw,
        }
    }

    /// Absorb a later clause of the same kind
    ///
    /// Accumulating kinds extend their list, everything else is replaced.
    /// Callers never merge clauses of different kinds.
    pub fn merge(&mut self, next: Clause) {
        debug_assert_eq!(self.kind(), next.kind());
        match (self, next) {
            (Clause::In(current), Clause::In(next))
            | (Clause::Out(current), Clause::Out(next))
            | (Clause::Both(current), Clause::Both(next)) => current.extend(next),
            (Clause::Over(current), Clause::Over(next)) => current.merge(next),
            (Clause::FetchMulti(current), Clause::FetchMulti(next)) => current.merge(next),
            (Clause::Where(current), Clause::Where(next))
            | (Clause::When(current), Clause::When(next)) => current.extend(next),
            (slot, next) => *slot = next,
        }
    }

    /// Append the clause text to `out`
    pub fn render(&self, out: &mut String) -> Result<()> {
        let kind = self.kind();
        let rendered = match self {
            Clause::Go(go) => go.render(out),
            Clause::From(from) => from.render(out),
            Clause::Over(over) => over.render(out),
            Clause::Where(predicate) => predicate.render("WHERE", out),
            Clause::When(predicate) => predicate.render("WHEN", out),
            Clause::Sample(sample) => sample.render(out),
            Clause::Fetch(fetch) => fetch.render(out),
            Clause::FetchMulti(fetch) => fetch.render(out),
            Clause::Lookup(lookup) => lookup.render(out),
            Clause::GroupBy(group_by) => group_by.render(out),
            Clause::Yield(yield_) => yield_.render(out),
            Clause::OrderBy(order_by) => order_by.render(out),
            Clause::Limit(limit) => limit.render(out),
            Clause::In(edges) => edges.render("IN", out),
            Clause::Out(edges) => edges.render("OUT", out),
            Clause::Both(edges) => edges.render("BOTH", out),
            Clause::GetSubgraph(subgraph) => subgraph.render(out),
            Clause::InsertVertex(insert) => insert.render(out),
            Clause::UpdateVertex(update) => update.render(out),
            Clause::DeleteVertex(delete) => delete.render(out),
            Clause::InsertEdge(insert) => insert.render(out),
            Clause::UpdateEdge(update) => update.render(out),
            Clause::DeleteEdge(delete) => delete.render(out),
            Clause::CreateTag(create) | Clause::CreateEdge(create) => create.render(out),
            Clause::AlterTag(alter) | Clause::AlterEdge(alter) => alter.render(out),
            Clause::DropTag(drop) | Clause::DropEdge(drop) => drop.render(out),
            Clause::Raw(text) => {
                out.push_str(text);
                Ok(())
            }
        };
        rendered.map_err(|err| err.in_clause(kind.name()))
    }

    /// Render into a fresh string
    pub fn to_ngql(&self) -> Result<String> {
        let mut out = String::new();
        self.render(&mut out)?;
        Ok(out)
    }
}
