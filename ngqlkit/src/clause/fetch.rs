// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! FETCH and LOOKUP entry clauses

use crate::error::{NgqlError, Result};
use crate::value::{encode_vid, Value};

/// `FETCH PROP ON <name> <vids>`
///
/// `vids` may also be an [`crate::Expr`] holding edge keys such as
/// `"a"->"b"@0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetch {
    pub name: String,
    pub vids: Value,
}

impl Fetch {
    pub fn new<S: Into<String>, V: Into<Value>>(name: S, vids: V) -> Self {
        Self {
            name: name.into(),
            vids: vids.into(),
        }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(NgqlError::invalid_clause("FETCH", "tag or edge type name is empty"));
        }
        let vids = encode_vid(&self.vids)?;
        out.push_str(&format!("FETCH PROP ON {} {}", name, vids));
        Ok(())
    }
}

/// `FETCH PROP ON n1, n2 <vids>`
#[derive(Debug, Clone, PartialEq)]
pub struct FetchMulti {
    pub names: Vec<String>,
    pub vids: Value,
}

impl FetchMulti {
    pub fn new<I, S, V>(names: I, vids: V) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        V: Into<Value>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            vids: vids.into(),
        }
    }

    /// Names accumulate, the latest vids win
    pub(crate) fn merge(&mut self, next: FetchMulti) {
        self.names.extend(next.names);
        self.vids = next.vids;
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let names: Vec<&str> = self
            .names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Err(NgqlError::invalid_clause("FETCH_MULTI", "tag name list is empty"));
        }
        let vids = encode_vid(&self.vids)?;
        out.push_str(&format!("FETCH PROP ON {} {}", names.join(", "), vids));
        Ok(())
    }
}

/// `LOOKUP ON <name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub name: String,
}

impl Lookup {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    pub(crate) fn render(&self, out: &mut String) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(NgqlError::invalid_clause("LOOKUP", "tag or edge type name is empty"));
        }
        out.push_str("LOOKUP ON ");
        out.push_str(name);
        Ok(())
    }
}
