// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the statement compiler

use thiserror::Error;

/// Compiler errors
///
/// Both variants describe programmer or model mistakes. They are never
/// retried and are surfaced synchronously from `resolve`, `alter` and
/// `Statement::build`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NgqlError {
    /// A domain model could not be resolved into a schema descriptor
    #[error("invalid model `{model}`: {reason}")]
    InvalidModel { model: String, reason: String },

    /// A clause's own precondition failed while building or rendering it
    #[error("invalid clause params in {clause}: {reason}")]
    InvalidClauseParams { clause: String, reason: String },
}

impl NgqlError {
    pub fn invalid_model<M: Into<String>, R: Into<String>>(model: M, reason: R) -> Self {
        NgqlError::InvalidModel {
            model: model.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_clause<C: Into<String>, R: Into<String>>(clause: C, reason: R) -> Self {
        NgqlError::InvalidClauseParams {
            clause: clause.into(),
            reason: reason.into(),
        }
    }

    /// True for [`NgqlError::InvalidModel`]
    pub fn is_invalid_model(&self) -> bool {
        matches!(self, NgqlError::InvalidModel { .. })
    }

    /// True for [`NgqlError::InvalidClauseParams`]
    pub fn is_invalid_clause_params(&self) -> bool {
        matches!(self, NgqlError::InvalidClauseParams { .. })
    }

    /// Re-attribute a clause error to another clause kind, keeping the reason.
    ///
    /// Used when a shared helper (value encoding, vid rendering) fails on
    /// behalf of a specific clause.
    pub(crate) fn in_clause(self, clause: &str) -> Self {
        match self {
            NgqlError::InvalidClauseParams { reason, .. } => NgqlError::InvalidClauseParams {
                clause: clause.to_string(),
                reason,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, NgqlError>;
