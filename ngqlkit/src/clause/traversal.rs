// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Traversal clauses: GO, FROM, OVER, IN/OUT/BOTH, SAMPLE and GET SUBGRAPH

use crate::error::{NgqlError, Result};
use crate::value::{encode_vid, Value};

/// Step range of a GO clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoSteps {
    /// `GO`
    #[default]
    Default,
    /// `GO n STEPS`
    Exact(u32),
    /// `GO m TO n STEPS`
    Range(u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Go {
    pub steps: GoSteps,
}

impl Go {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(n: u32) -> Self {
        Self {
            steps: GoSteps::Exact(n),
        }
    }

    pub fn range(m: u32, n: u32) -> Self {
        Self {
            steps: GoSteps::Range(m, n),
        }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        match self.steps {
            GoSteps::Default => out.push_str("GO"),
            GoSteps::Exact(n) => out.push_str(&format!("GO {} STEPS", n)),
            GoSteps::Range(m, n) => {
                if m > n {
                    return Err(NgqlError::invalid_clause(
                        "GO",
                        format!("step range {} TO {} is reversed", m, n),
                    ));
                }
                out.push_str(&format!("GO {} TO {} STEPS", m, n));
            }
        }
        Ok(())
    }
}

/// Start vertices of a traversal
#[derive(Debug, Clone, PartialEq)]
pub struct From {
    pub vids: Value,
}

impl From {
    pub fn new<V: Into<Value>>(vids: V) -> Self {
        Self { vids: vids.into() }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let vids = encode_vid(&self.vids)?;
        out.push_str("FROM ");
        out.push_str(&vids);
        Ok(())
    }
}

/// Traversal direction of an OVER clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reversely,
    Bidirect,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Over {
    pub edge_types: Vec<String>,
    pub direction: Direction,
}

impl Over {
    pub fn new<I, S>(edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            edge_types: edge_types.into_iter().map(Into::into).collect(),
            direction: Direction::Forward,
        }
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Later edge types are appended; a later non-forward direction wins
    pub(crate) fn merge(&mut self, next: Over) {
        self.edge_types.extend(next.edge_types);
        if next.direction != Direction::Forward {
            self.direction = next.direction;
        }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let edge_types = non_empty(&self.edge_types);
        if edge_types.is_empty() {
            return Err(NgqlError::invalid_clause("OVER", "edge type list is empty"));
        }
        out.push_str("OVER ");
        out.push_str(&edge_types.join(", "));
        match self.direction {
            Direction::Forward => {}
            Direction::Reversely => out.push_str(" REVERSELY"),
            Direction::Bidirect => out.push_str(" BIDIRECT"),
        }
        Ok(())
    }
}

/// Edge type list shared by IN, OUT and BOTH
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeTypes {
    pub edge_types: Vec<String>,
}

impl EdgeTypes {
    pub fn new<I, S>(edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            edge_types: edge_types.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn extend(&mut self, next: EdgeTypes) {
        self.edge_types.extend(next.edge_types);
    }

    /// Empty entries are dropped; nothing left is an error
    pub(crate) fn render(&self, keyword: &str, out: &mut String) -> Result<()> {
        let edge_types = non_empty(&self.edge_types);
        if edge_types.is_empty() {
            return Err(NgqlError::invalid_clause(keyword, "edge type list is empty"));
        }
        out.push_str(keyword);
        out.push(' ');
        out.push_str(&edge_types.join(", "));
        Ok(())
    }
}

/// `SAMPLE [n1, n2, ...]`, one count per traversal step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sample {
    pub counts: Vec<u64>,
}

impl Sample {
    pub fn new<I: IntoIterator<Item = u64>>(counts: I) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        if self.counts.is_empty() {
            return Err(NgqlError::invalid_clause("SAMPLE", "sample list is empty"));
        }
        let counts: Vec<String> = self.counts.iter().map(u64::to_string).collect();
        out.push_str(&format!("SAMPLE [{}]", counts.join(", ")));
        Ok(())
    }
}

/// `GET SUBGRAPH [WITH PROP ]n STEPS`
///
/// A non-positive step count is rendered as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetSubgraph {
    pub with_prop: bool,
    pub step_count: i64,
}

impl GetSubgraph {
    pub fn new(step_count: i64) -> Self {
        Self {
            with_prop: false,
            step_count,
        }
    }

    pub fn with_prop(mut self) -> Self {
        self.with_prop = true;
        self
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        out.push_str("GET SUBGRAPH ");
        if self.with_prop {
            out.push_str("WITH PROP ");
        }
        let steps = if self.step_count <= 0 { 1 } else { self.step_count };
        out.push_str(&format!("{} STEPS", steps));
        Ok(())
    }
}

/// Kept entries are emitted exactly as given
fn non_empty(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(String::as_str)
        .filter(|item| !item.is_empty())
        .collect()
}
