//! Basic usage example for the ngqlkit SDK
//!
//! This example demonstrates the core features of the SDK without a running
//! database: an executor that prints every statement stands in for a real
//! NebulaGraph session.
//! - Defining models
//! - Automatic migration
//! - Inserting, querying, updating and deleting
//!
//! Run with: cargo run --example basic_usage

use ngqlkit_sdk::{
    args, BoxError, Config, Db, Error, Executor, FieldDef, LiveSchema, Model, ModelKind,
    NativeType, ResultSet, SchemaIntrospector, SchemaKind, UpdateOptions, Value,
};

#[derive(Debug, Default, serde::Deserialize)]
struct Player {
    #[serde(default)]
    vid: String,
    name: String,
    age: i64,
}

impl Model for Player {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Tag("player"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("vid", NativeType::String).tag("vertex_id"),
            FieldDef::new("name", NativeType::String),
            FieldDef::new("age", NativeType::I64),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![self.vid.clone().into(), self.name.clone().into(), self.age.into()]
    }
}

#[derive(Debug, Default)]
struct Serve {
    src: String,
    dst: String,
    start_year: i64,
    end_year: i64,
}

impl Model for Serve {
    fn kind() -> Option<ModelKind> {
        Some(ModelKind::Edge("serve"))
    }

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("src", NativeType::String).tag("edge_src_id"),
            FieldDef::new("dst", NativeType::String).tag("edge_dst_id"),
            FieldDef::new("start_year", NativeType::I64),
            FieldDef::new("end_year", NativeType::I64),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.src.clone().into(),
            self.dst.clone().into(),
            self.start_year.into(),
            self.end_year.into(),
        ]
    }
}

/// Prints statements and answers every query with one canned player row
struct PrintingExecutor;

impl Executor for PrintingExecutor {
    fn execute(&self, statement: &str) -> Result<ResultSet, BoxError> {
        println!("   > {}", statement);
        Ok(ResultSet::new(
            vec!["v".to_string()],
            vec![vec![serde_json::json!({"name": "Kobe Bryant", "age": 33})]],
        ))
    }
}

/// Pretends no schema exists yet
struct EmptySpace;

impl SchemaIntrospector for EmptySpace {
    fn describe(&self, _kind: SchemaKind, _name: &str) -> Result<Option<LiveSchema>, BoxError> {
        Ok(None)
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    println!("=== ngqlkit SDK Basic Usage Example ===\n");

    // 1. Open a handle
    println!("1. Opening database handle...");
    let db = Db::open(PrintingExecutor, Config::new("test"))?;
    println!("   ✓ Using space 'test'\n");

    // 2. Migrate schemas
    println!("2. Migrating schemas...");
    let migrator = db.migrator(EmptySpace);
    migrator.auto_migrate_tag::<Player>()?;
    migrator.auto_migrate_edge::<Serve>()?;
    println!("   ✓ Tags and edge types up to date\n");

    // 3. Insert data
    println!("3. Inserting data...");
    let player = Player {
        vid: "player1001".to_string(),
        name: "Kobe Bryant".to_string(),
        age: 33,
    };
    db.chain::<()>().insert_vertex(&[player], false).exec()?;
    let serve = Serve {
        src: "player1001".to_string(),
        dst: "team1001".to_string(),
        start_year: 1996,
        end_year: 2012,
    };
    db.chain::<()>().insert_edge(&[serve], false).exec()?;
    println!();

    // 4. Query with typed results
    println!("4. Querying...");
    let player: Player = db
        .chain::<Player>()
        .fetch("player", "player1001")
        .yield_("properties(vertex) AS v")
        .take_col("v")?;
    println!("   ✓ Fetched {:?}", player);

    let ngql = db
        .chain::<()>()
        .go()
        .from("player1001")
        .over(["*"])
        .where_("properties($$).age > ?", args![30])
        .yield_("type(edge) AS t")
        .group_by("$-.t")
        .yield_("$-.t AS e, count(*) AS cnt")
        .ngql()?;
    println!("   ✓ Compiled without executing: {}\n", ngql);

    // 5. Update and delete
    println!("5. Updating and deleting...");
    let update = Player {
        age: 23,
        ..Default::default()
    };
    db.chain::<()>()
        .update_vertex_model("player1001", &update, UpdateOptions::new())
        .exec()?;
    db.chain::<()>().delete_vertex("player1001", true).exec()?;
    println!();

    println!("=== Example completed successfully ===");
    Ok(())
}
