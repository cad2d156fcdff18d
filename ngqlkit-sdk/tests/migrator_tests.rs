//! Automatic migration tests against mock executor and introspector

#[path = "testutils/mod.rs"]
mod testutils;

use ngqlkit_sdk::{
    AlterOperate, Config, Db, Error, LiveProperty, LiveSchema, LiveTtl, SchemaKind,
};
use testutils::{init_logger, MockExecutor, MockIntrospector, Player, Serve};

fn live(props: &[(&str, &str)]) -> LiveSchema {
    LiveSchema {
        properties: props
            .iter()
            .map(|(name, graph_type)| LiveProperty {
                name: name.to_string(),
                graph_type: graph_type.to_string(),
                default: None,
            })
            .collect(),
        ttl: None,
    }
}

fn open(config: Config) -> (Db, MockExecutor) {
    init_logger();
    let executor = MockExecutor::new();
    let db = Db::open(executor.clone(), config).unwrap();
    (db, executor)
}

#[test]
fn test_missing_schema_is_created() {
    let (db, executor) = open(Config::default());
    let migrator = db.migrator(MockIntrospector::new());
    assert!(migrator.auto_migrate_tag::<Player>().unwrap());
    assert!(migrator.auto_migrate_edge::<Serve>().unwrap());
    assert_eq!(
        executor.executed(),
        vec![
            "CREATE TAG IF NOT EXISTS player(name string, age int);",
            "CREATE EDGE IF NOT EXISTS serve(start_year int, end_year int);",
        ]
    );
}

#[test]
fn test_up_to_date_schema_is_left_alone() {
    let (db, executor) = open(Config::default());
    let introspector = MockIntrospector::new()
        .with(SchemaKind::Tag, "player", live(&[("name", "string"), ("age", "int64")]));
    let migrator = db.migrator(&introspector);
    assert_eq!(migrator.plan::<Player>().unwrap(), None);
    assert!(!migrator.auto_migrate::<Player>().unwrap());
    assert!(executor.executed().is_empty());
}

#[test]
fn test_auto_migrate_is_idempotent_without_ttl() {
    let (db, executor) = open(Config::default());
    let mut current = live(&[("name", "string"), ("age", "int")]);
    current.ttl = Some(LiveTtl {
        column: String::new(),
        duration: 0,
    });
    let introspector = MockIntrospector::new().with(SchemaKind::Tag, "player", current);
    let migrator = db.migrator(&introspector);
    for _ in 0..2 {
        assert_eq!(migrator.plan::<Player>().unwrap(), None);
        assert!(!migrator.auto_migrate::<Player>().unwrap());
    }
    assert!(executor.executed().is_empty());
}

#[test]
fn test_extra_columns_are_kept_by_default() {
    let introspector = MockIntrospector::new().with(
        SchemaKind::Tag,
        "player",
        live(&[("name", "fixed_string(32)"), ("nickname", "string")]),
    );

    let (db, _executor) = open(Config::default());
    assert_eq!(
        db.migrator(&introspector).plan::<Player>().unwrap().unwrap(),
        "ALTER TAG player ADD (age int), CHANGE (name string);"
    );

    let config = Config {
        auto_migrate_drop_columns: true,
        ..Config::default()
    };
    let (db, executor) = open(config);
    assert!(db.migrator(&introspector).auto_migrate::<Player>().unwrap());
    assert_eq!(
        executor.last().unwrap(),
        "ALTER TAG player ADD (age int), DROP (nickname), CHANGE (name string);"
    );
}

#[test]
fn test_only_dropped_columns_means_nothing_to_do() {
    let introspector = MockIntrospector::new().with(
        SchemaKind::Tag,
        "player",
        live(&[("name", "string"), ("age", "int"), ("nickname", "string")]),
    );
    let (db, executor) = open(Config::default());
    assert!(!db.migrator(&introspector).auto_migrate::<Player>().unwrap());
    assert!(executor.executed().is_empty());
}

#[test]
fn test_wrong_kind_is_rejected() {
    let (db, executor) = open(Config::default());
    let migrator = db.migrator(MockIntrospector::new());
    let err = migrator.auto_migrate_tag::<Serve>().unwrap_err();
    assert!(matches!(err, Error::Compile(ref e) if e.is_invalid_model()));
    assert!(migrator.auto_migrate_edge::<Player>().is_err());
    assert!(executor.executed().is_empty());
}

#[test]
fn test_introspection_failure() {
    let (db, executor) = open(Config::default());
    let err = db
        .migrator(MockIntrospector::broken())
        .auto_migrate::<Player>()
        .unwrap_err();
    assert!(matches!(err, Error::Introspection(ref m) if m.contains("unavailable")));
    assert!(executor.executed().is_empty());
}

#[test]
fn test_explicit_ddl() {
    let (db, executor) = open(Config::default());
    let migrator = db.migrator(MockIntrospector::new());
    migrator.create_tag::<Player>(false).unwrap();
    migrator
        .alter_edge::<Serve>(&AlterOperate {
            change_props: vec!["end_year".to_string()],
            ..Default::default()
        })
        .unwrap();
    migrator.drop_edge("serve", true).unwrap();
    migrator.drop_tag("player", false).unwrap();
    assert_eq!(
        executor.executed(),
        vec![
            "CREATE TAG player(name string, age int);",
            "ALTER EDGE serve CHANGE (end_year int);",
            "DROP EDGE IF EXISTS serve;",
            "DROP TAG player;",
        ]
    );

    let err = migrator.alter_tag::<Player>(&AlterOperate::default()).unwrap_err();
    assert!(matches!(err, Error::Compile(_)));
}
