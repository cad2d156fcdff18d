//! Database handle over a caller-supplied executor
//!
//! ngqlkit never opens network sessions itself. The caller wraps whatever
//! client it uses in an [`Executor`] and hands it to [`Db::open`].

use crate::chain::Chain;
use crate::config::Config;
use crate::error::{BoxError, Error, Result};
use crate::migrator::{Migrator, SchemaIntrospector};
use crate::result::ResultSet;
use log::{debug, info, warn};
use std::sync::Arc;

/// Runs statement text against a database
///
/// # Examples
///
/// ```ignore
/// struct NebulaSession { /* client handle */ }
///
/// impl Executor for NebulaSession {
///     fn execute(&self, statement: &str) -> Result<ResultSet, BoxError> {
///         let response = self.client.execute(statement)?;
///         Ok(to_result_set(response))
///     }
/// }
/// ```
pub trait Executor: Send + Sync {
    fn execute(&self, statement: &str) -> std::result::Result<ResultSet, BoxError>;
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn execute(&self, statement: &str) -> std::result::Result<ResultSet, BoxError> {
        (**self).execute(statement)
    }
}

/// Entry point of the SDK
///
/// Cloning a `Db` is cheap; clones share the executor.
#[derive(Clone)]
pub struct Db {
    executor: Arc<dyn Executor>,
    config: Config,
}

impl Db {
    /// Wrap an executor, selecting `config.space_name` when one is set
    ///
    /// # Arguments
    ///
    /// * `executor` - Runs the generated statements
    /// * `config` - SDK configuration
    pub fn open<E: Executor + 'static>(executor: E, config: Config) -> Result<Self> {
        let db = Db {
            executor: Arc::new(executor),
            config,
        };
        let space = db.config.space_name.trim();
        if !space.is_empty() {
            db.execute(&format!("USE {}", space))?;
            info!("Using graph space {}", space);
        }
        Ok(db)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute statement text as is
    pub fn execute(&self, statement: &str) -> Result<ResultSet> {
        if self.config.log_statements {
            info!("Executing: {}", statement);
        } else {
            debug!("Executing: {}", statement);
        }
        self.executor.execute(statement).map_err(|e| {
            warn!("Statement failed: {}: {}", statement, e);
            Error::Execution(e.to_string())
        })
    }

    /// Start a chain whose results decode into `T`
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let names: Vec<String> = db
    ///     .chain::<String>()
    ///     .go()
    ///     .from("player100")
    ///     .over(["follow"])
    ///     .yield_("properties($$).name AS name")
    ///     .find_col("name")?;
    /// ```
    pub fn chain<T>(&self) -> Chain<'_, T> {
        Chain::new(self)
    }

    /// Schema migrator reading live schemas through `introspector`
    pub fn migrator<I: SchemaIntrospector>(&self, introspector: I) -> Migrator<'_, I> {
        Migrator::new(self, introspector)
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db").field("config", &self.config).finish()
    }
}
