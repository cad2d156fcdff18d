//! ngqlkit SDK - typed statement chains over a pluggable executor
//!
//! This crate puts a caller-facing surface on top of the `ngqlkit` statement
//! compiler: a [`Db`] handle that runs statements through your own
//! [`Executor`], immutable [`Chain`]s that decode results into serde types,
//! and a [`Migrator`] that keeps tags and edge types in line with your models.
//!
//! # Quick Start
//!
//! ```ignore
//! use ngqlkit_sdk::{Config, Db, Error};
//!
//! # fn main() -> Result<(), Error> {
//! let db = Db::open(session, Config::new("basketball"))?;
//!
//! db.migrator(&introspector).auto_migrate_tag::<Player>()?;
//!
//! let names: Vec<String> = db
//!     .chain::<String>()
//!     .go()
//!     .from("player100")
//!     .over(["follow"])
//!     .yield_("properties($$).name AS name")
//!     .find_col("name")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Application Code (Your Rust App)      │
//! └─────────────────────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  ngqlkit SDK (this crate)               │
//! │  - Db (executor handle)                 │
//! │  - Chain (typed statement chains)       │
//! │  - Migrator (automatic migration)       │
//! │  - ResultSet (row decoding)             │
//! └─────────────────────────────────────────┘
//!          │                     │
//!          ▼                     ▼
//! ┌──────────────────┐  ┌────────────────────┐
//! │ ngqlkit (core)   │  │ Executor /         │
//! │ statement        │  │ SchemaIntrospector │
//! │ compiler         │  │ (your client)      │
//! └──────────────────┘  └────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`connection`] - Executor boundary and the `Db` handle
//! - [`chain`] - Typed statement chains
//! - [`migrator`] - Schema introspection and automatic migration
//! - [`result`] - Result sets and decoding
//! - [`config`] - SDK configuration
//! - [`error`] - Error types and handling

// Re-export core types for convenience
pub use ngqlkit::{
    args, AlterOperate, EdgeKey, FieldDef, LiveProperty, LiveSchema, LiveTtl, Model, ModelKind,
    NativeType, NgqlError, PropsUpdate, SchemaKind, Statement, UpdateOptions, Value,
};

pub mod chain;
pub mod config;
pub mod connection;
pub mod error;
pub mod migrator;
pub mod result;

pub use chain::Chain;
pub use config::Config;
pub use connection::{Db, Executor};
pub use error::{BoxError, Error, Result};
pub use migrator::{Migrator, SchemaIntrospector};
pub use result::ResultSet;
