// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! GROUP BY, YIELD, ORDER BY and LIMIT

use crate::error::{NgqlError, Result};

fn non_empty<'a>(clause: &str, expr: &'a str) -> Result<&'a str> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(NgqlError::invalid_clause(clause, "expression is empty"));
    }
    Ok(expr)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBy {
    pub expr: String,
}

impl GroupBy {
    pub fn new<S: Into<String>>(expr: S) -> Self {
        Self { expr: expr.into() }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let expr = non_empty("GROUP_BY", &self.expr)?;
        out.push_str("GROUP BY ");
        out.push_str(expr);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Yield {
    pub expr: String,
    pub distinct: bool,
}

impl Yield {
    pub fn new<S: Into<String>>(expr: S) -> Self {
        Self {
            expr: expr.into(),
            distinct: false,
        }
    }

    pub fn distinct<S: Into<String>>(expr: S) -> Self {
        Self {
            expr: expr.into(),
            distinct: true,
        }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let expr = non_empty("YIELD", &self.expr)?;
        out.push_str("YIELD ");
        if self.distinct {
            out.push_str("DISTINCT ");
        }
        out.push_str(expr);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub expr: String,
}

impl OrderBy {
    pub fn new<S: Into<String>>(expr: S) -> Self {
        Self { expr: expr.into() }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let expr = non_empty("ORDER_BY", &self.expr)?;
        out.push_str("ORDER BY ");
        out.push_str(expr);
        Ok(())
    }
}

/// `LIMIT n` or `LIMIT offset, n`; the count is never clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: Option<u64>,
    pub count: u64,
}

impl Limit {
    pub fn new(count: u64) -> Self {
        Self {
            offset: None,
            count,
        }
    }

    pub fn with_offset(offset: u64, count: u64) -> Self {
        Self {
            offset: Some(offset),
            count,
        }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        match self.offset {
            Some(offset) => out.push_str(&format!("LIMIT {}, {}", offset, self.count)),
            None => out.push_str(&format!("LIMIT {}", self.count)),
        }
        Ok(())
    }
}
