// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Field tag mini-grammar
//!
//! A tag is a `;`-separated list of options, each either a bare flag or a
//! `key:value` pair split on the first `:` (values may contain further
//! colons, e.g. `default:datetime("2021-01-01T00:00:00")`). Keys are
//! case-insensitive. Empty segments are ignored.
//!
//! | option        | form     | meaning                                  |
//! |---------------|----------|------------------------------------------|
//! | `vertex_id`   | flag     | field holds the vertex id                |
//! | `edge_src_id` | flag     | field holds the edge source vertex id    |
//! | `edge_dst_id` | flag     | field holds the edge destination id      |
//! | `edge_rank`   | flag     | field holds the edge rank                |
//! | `ignore`      | flag     | field is not a property                  |
//! | `prop`        | value    | property name, overrides the field ident |
//! | `type`        | value    | declared graph type                      |
//! | `default`     | value    | default literal for DDL                  |
//! | `ttl`         | value    | TTL duration in seconds                  |

use crate::types::GraphType;
use std::fmt;

/// Identity role a field can play instead of being a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityRole {
    VertexId,
    EdgeSrcId,
    EdgeDstId,
    EdgeRank,
}

impl IdentityRole {
    pub fn option_name(&self) -> &'static str {
        match self {
            IdentityRole::VertexId => "vertex_id",
            IdentityRole::EdgeSrcId => "edge_src_id",
            IdentityRole::EdgeDstId => "edge_dst_id",
            IdentityRole::EdgeRank => "edge_rank",
        }
    }

    pub fn is_edge_role(&self) -> bool {
        !matches!(self, IdentityRole::VertexId)
    }
}

impl fmt::Display for IdentityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option_name())
    }
}

/// Parsed options of one field tag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSettings {
    pub role: Option<IdentityRole>,
    pub prop: Option<String>,
    pub graph_type: Option<GraphType>,
    pub default: Option<String>,
    /// Zero means no TTL
    pub ttl: u64,
    pub ignore: bool,
}

impl TagSettings {
    /// Whether the field is excluded from the property list
    pub fn is_excluded(&self) -> bool {
        self.ignore || self.role.is_some()
    }
}

/// Parse a field tag
pub fn parse_tag(tag: &str) -> Result<TagSettings, String> {
    let mut settings = TagSettings::default();
    let mut seen: Vec<String> = Vec::new();

    for segment in tag.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (key, value) = match segment.split_once(':') {
            Some((key, value)) => (key.trim().to_ascii_lowercase(), Some(value.trim())),
            None => (segment.to_ascii_lowercase(), None),
        };
        if key.is_empty() {
            return Err(format!("option without a key in '{}'", segment));
        }
        if seen.contains(&key) {
            return Err(format!("option '{}' given more than once", key));
        }
        seen.push(key.clone());

        match key.as_str() {
            "vertex_id" | "edge_src_id" | "edge_dst_id" | "edge_rank" => {
                if value.is_some() {
                    return Err(format!("flag '{}' does not take a value", key));
                }
                let role = match key.as_str() {
                    "vertex_id" => IdentityRole::VertexId,
                    "edge_src_id" => IdentityRole::EdgeSrcId,
                    "edge_dst_id" => IdentityRole::EdgeDstId,
                    _ => IdentityRole::EdgeRank,
                };
                if let Some(existing) = settings.role {
                    return Err(format!(
                        "conflicting identity roles '{}' and '{}'",
                        existing, role
                    ));
                }
                settings.role = Some(role);
            }
            "ignore" => {
                if value.is_some() {
                    return Err("flag 'ignore' does not take a value".to_string());
                }
                settings.ignore = true;
            }
            "prop" => {
                let name = required(&key, value)?;
                if name.is_empty() {
                    return Err("option 'prop' needs a non-empty name".to_string());
                }
                settings.prop = Some(name.to_string());
            }
            "type" => {
                let type_name = required(&key, value)?;
                settings.graph_type = Some(type_name.parse::<GraphType>()?);
            }
            "default" => {
                settings.default = Some(required(&key, value)?.to_string());
            }
            "ttl" => {
                let seconds = required(&key, value)?;
                settings.ttl = seconds
                    .parse::<u64>()
                    .map_err(|_| format!("ttl must be a non-negative integer, got '{}'", seconds))?;
            }
            other => return Err(format!("unknown option '{}'", other)),
        }
    }

    Ok(settings)
}

fn required<'a>(key: &str, value: Option<&'a str>) -> Result<&'a str, String> {
    value.ok_or_else(|| format!("option '{}' requires a value", key))
}
