//! Schema migration against a live database
//!
//! [`Migrator`] reads the current shape of a tag or edge type through a
//! caller-supplied [`SchemaIntrospector`], plans the minimal DDL with
//! [`ngqlkit::plan_migration`] and executes it.

use crate::connection::Db;
use crate::error::{BoxError, Error, Result};
use log::{info, warn};
use ngqlkit::{
    plan_migration, resolve, AlterOperate, LiveSchema, Model, NgqlError, SchemaDescriptor,
    SchemaKind, Statement,
};

/// Reads the live definition of a tag or edge type
///
/// Returns `Ok(None)` when the schema element does not exist. A NebulaGraph
/// implementation typically runs `DESCRIBE TAG name` / `SHOW CREATE TAG name`
/// and maps the output into a [`LiveSchema`].
pub trait SchemaIntrospector {
    fn describe(
        &self,
        kind: SchemaKind,
        name: &str,
    ) -> std::result::Result<Option<LiveSchema>, BoxError>;
}

impl<I: SchemaIntrospector + ?Sized> SchemaIntrospector for &I {
    fn describe(
        &self,
        kind: SchemaKind,
        name: &str,
    ) -> std::result::Result<Option<LiveSchema>, BoxError> {
        (**self).describe(kind, name)
    }
}

pub struct Migrator<'db, I> {
    db: &'db Db,
    introspector: I,
}

impl<'db, I: SchemaIntrospector> Migrator<'db, I> {
    pub(crate) fn new(db: &'db Db, introspector: I) -> Self {
        Migrator { db, introspector }
    }

    /// Statement that brings the live schema in line with `M`, if any
    ///
    /// Live properties the model no longer declares are only dropped when
    /// `Config::auto_migrate_drop_columns` is set.
    pub fn plan<M: Model>(&self) -> Result<Option<String>> {
        let descriptor = resolve::<M>()?;
        let live = self
            .introspector
            .describe(descriptor.kind, &descriptor.kind_name)
            .map_err(|e| {
                warn!(
                    "Failed to describe {} {}: {}",
                    descriptor.kind, descriptor.kind_name, e
                );
                Error::Introspection(e.to_string())
            })?;
        let live = live.map(|live| self.retain_columns(&descriptor, live));
        match plan_migration(&descriptor, live.as_ref())? {
            Some(clause) => Ok(Some(Statement::new().clause(clause).build()?)),
            None => Ok(None),
        }
    }

    /// Create or alter the schema of `M`; returns whether anything ran
    pub fn auto_migrate<M: Model>(&self) -> Result<bool> {
        let descriptor = resolve::<M>()?;
        match self.plan::<M>()? {
            Some(ngql) => {
                info!(
                    "Migrating {} {}: {}",
                    descriptor.kind, descriptor.kind_name, ngql
                );
                self.db.execute(&ngql)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Auto-migrate a tag model, rejecting edge models
    pub fn auto_migrate_tag<M: Model>(&self) -> Result<bool> {
        expect_kind::<M>(SchemaKind::Tag)?;
        self.auto_migrate::<M>()
    }

    /// Auto-migrate an edge model, rejecting tag models
    pub fn auto_migrate_edge<M: Model>(&self) -> Result<bool> {
        expect_kind::<M>(SchemaKind::Edge)?;
        self.auto_migrate::<M>()
    }

    pub fn create_tag<M: Model>(&self, if_not_exists: bool) -> Result<()> {
        self.run(Statement::new().create_tag::<M>(if_not_exists))
    }

    pub fn create_edge<M: Model>(&self, if_not_exists: bool) -> Result<()> {
        self.run(Statement::new().create_edge::<M>(if_not_exists))
    }

    pub fn alter_tag<M: Model>(&self, operate: &AlterOperate) -> Result<()> {
        self.run(Statement::new().alter_tag::<M>(operate))
    }

    pub fn alter_edge<M: Model>(&self, operate: &AlterOperate) -> Result<()> {
        self.run(Statement::new().alter_edge::<M>(operate))
    }

    pub fn drop_tag(&self, name: &str, if_exists: bool) -> Result<()> {
        self.run(Statement::new().drop_tag(name, if_exists))
    }

    pub fn drop_edge(&self, name: &str, if_exists: bool) -> Result<()> {
        self.run(Statement::new().drop_edge(name, if_exists))
    }

    fn run(&self, statement: Statement) -> Result<()> {
        let ngql = statement.build()?;
        self.db.execute(&ngql)?;
        Ok(())
    }

    /// Hide live properties the model does not declare unless drops are on
    fn retain_columns(&self, descriptor: &SchemaDescriptor, mut live: LiveSchema) -> LiveSchema {
        if !self.db.config().auto_migrate_drop_columns {
            live.properties.retain(|p| descriptor.property(&p.name).is_some());
        }
        live
    }
}

fn expect_kind<M: Model>(kind: SchemaKind) -> Result<()> {
    let descriptor = resolve::<M>()?;
    if descriptor.kind != kind {
        return Err(NgqlError::invalid_model(
            &descriptor.model,
            format!("is not a {} model", kind.keyword().to_ascii_lowercase()),
        )
        .into());
    }
    Ok(())
}
