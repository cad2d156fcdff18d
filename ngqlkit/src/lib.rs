// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! ngqlkit - an nGQL statement compiler
//!
//! ngqlkit turns domain models and chained builder calls into statements of
//! the NebulaGraph query language. It never talks to a database; executing
//! the generated text is the caller's business (see the `ngqlkit-sdk` crate).
//!
//! # Features
//!
//! - **Model mapping**: domain types describe their tag or edge type through
//!   the [`Model`] trait and a small field tag grammar
//! - **Value encoding**: runtime values become nGQL literals, checked against
//!   declared property types
//! - **Clause merging**: repeated calls merge the way nGQL expects (edge
//!   lists accumulate, predicates chain, everything else is replaced)
//! - **Statement assembly**: clauses render in grammar order, pipes included
//! - **Migrations**: CREATE / ALTER / DROP from a model, plus a live-schema
//!   diff for automatic migration
//!
//! # Usage
//!
//! ```ignore
//! use ngqlkit::{args, Statement};
//!
//! let ngql = Statement::new()
//!     .go()
//!     .from("player100")
//!     .over(["follow"])
//!     .where_("properties($$).age > ?", args![30])
//!     .yield_("dst(edge) AS id")
//!     .build()?;
//! ```

pub mod clause;
pub mod error;
pub mod migrator;
pub mod model;
pub mod statement;
pub mod types;
pub mod value;

pub use clause::{AlterOperate, Clause, ClauseKind, ModelInstance, PropsUpdate, UpdateOptions};
pub use error::{NgqlError, Result};
pub use migrator::{plan_migration, LiveProperty, LiveSchema, LiveTtl};
pub use model::{
    resolve, EdgeKey, FieldDef, Model, ModelKind, SchemaDescriptor, SchemaKind,
};
pub use statement::{Statement, Step};
pub use types::{GraphType, NativeType};
pub use value::{Expr, Value};

/// ngqlkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
