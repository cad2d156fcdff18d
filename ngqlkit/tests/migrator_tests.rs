//! Schema statement tests: CREATE / ALTER / DROP of tags and edge types,
//! and live-schema migration planning

#[path = "testutils/mod.rs"]
mod testutils;

use ngqlkit::migrator::{create, diff};
use ngqlkit::{
    plan_migration, resolve, AlterOperate, GraphType, LiveProperty, LiveSchema, LiveTtl,
    Statement,
};
use testutils::init_logger;
use testutils::models::*;

fn operate(add: &[&str], drop: &[&str], change: &[&str], update_ttl: bool) -> AlterOperate {
    let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    AlterOperate {
        add_props: names(add),
        drop_props: names(drop),
        change_props: names(change),
        update_ttl,
    }
}

#[test]
fn test_create_tags() {
    init_logger();
    let cases = vec![
        (
            Statement::new().create_tag::<Player>(true),
            "CREATE TAG IF NOT EXISTS player(name string, age int);",
        ),
        (
            Statement::new().create_tag::<NoProperty>(true),
            "CREATE TAG IF NOT EXISTS no_property();",
        ),
        (
            Statement::new().create_tag::<PlayerWithDefault>(true),
            r#"CREATE TAG IF NOT EXISTS player_with_default(name string DEFAULT "", age int DEFAULT 20);"#,
        ),
        (
            Statement::new().create_tag::<Woman>(true),
            r#"CREATE TAG IF NOT EXISTS woman(name string, age int, married bool, salary double, create_time timestamp) TTL_DURATION = 100, TTL_COL = "create_time";"#,
        ),
        (
            Statement::new().create_tag::<WomanTyped>(false),
            r#"CREATE TAG woman(name fixed_string DEFAULT "hayson", age int32 DEFAULT 20, create_time datetime DEFAULT datetime(1625469277));"#,
        ),
    ];
    for (i, (statement, want)) in cases.into_iter().enumerate() {
        assert_eq!(statement.build().unwrap(), want, "case #{}", i);
    }
}

#[test]
fn test_create_is_idempotent() {
    let statement = Statement::new().create_tag::<Woman>(true);
    assert_eq!(statement.build().unwrap(), statement.build().unwrap());
    assert_eq!(
        Statement::new().create_tag::<Woman>(true).build().unwrap(),
        statement.build().unwrap()
    );
}

#[test]
fn test_drop_tag() {
    assert_eq!(
        Statement::new().drop_tag("test", false).build().unwrap(),
        "DROP TAG test;"
    );
    assert_eq!(
        Statement::new().drop_tag("test", true).build().unwrap(),
        "DROP TAG IF EXISTS test;"
    );
}

#[test]
fn test_alter_tags() {
    let cases = vec![
        (
            Statement::new().alter_tag::<Player>(&operate(&["name", "age"], &[], &[], false)),
            "ALTER TAG player ADD (name string, age int);",
        ),
        (
            Statement::new().alter_tag::<NoProperty>(&operate(&[], &["name", "age"], &[], false)),
            "ALTER TAG no_property DROP (name, age);",
        ),
        (
            Statement::new()
                .alter_tag::<PlayerWithDefault>(&operate(&[], &[], &["name", "age"], false)),
            r#"ALTER TAG player_with_default CHANGE (name string DEFAULT "", age int DEFAULT 20);"#,
        ),
        (
            Statement::new().alter_tag::<Woman>(&operate(
                &["name", "age"],
                &["salary"],
                &["create_time"],
                true,
            )),
            r#"ALTER TAG woman ADD (name string, age int), DROP (salary), CHANGE (create_time timestamp) TTL_DURATION = 100, TTL_COL = "create_time";"#,
        ),
        (
            Statement::new().alter_tag::<T3>(&operate(&["p1"], &[], &[], false)),
            "ALTER TAG t3 ADD (p1 int);",
        ),
        (
            Statement::new().alter_tag_as::<T3>("t4", &operate(&["p2"], &[], &[], false)),
            "ALTER TAG t4 ADD (p2 string);",
        ),
    ];
    for (i, (statement, want)) in cases.into_iter().enumerate() {
        assert_eq!(statement.build().unwrap(), want, "case #{}", i);
    }
}

#[test]
fn test_alter_tag_errors() {
    let err = Statement::new()
        .alter_tag::<Player>(&operate(&["height"], &[], &[], false))
        .build()
        .unwrap_err();
    assert!(err.is_invalid_clause_params());

    let err = Statement::new()
        .alter_tag::<Woman>(&operate(&[], &["create_time"], &[], true))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("TTL column"));

    let err = Statement::new()
        .alter_tag::<Player>(&AlterOperate::default())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("nothing to alter"));

    let err = Statement::new()
        .alter_tag::<Follow>(&operate(&["degree"], &[], &[], false))
        .build()
        .unwrap_err();
    assert!(err.is_invalid_model());

    let err = Statement::new().create_tag::<Unnamed>(true).build().unwrap_err();
    assert!(err.is_invalid_model());
}

#[test]
fn test_create_edges() {
    let cases = vec![
        (
            Statement::new().create_edge::<Follow>(true),
            "CREATE EDGE IF NOT EXISTS follow(degree int);",
        ),
        (
            Statement::new().create_edge::<EdgeNoProperty>(true),
            "CREATE EDGE IF NOT EXISTS no_property();",
        ),
        (
            Statement::new().create_edge::<FollowWithDefault>(true),
            "CREATE EDGE IF NOT EXISTS follow_with_default(degree int DEFAULT 20);",
        ),
        (
            Statement::new().create_edge::<E1>(true),
            r#"CREATE EDGE IF NOT EXISTS e1(p1 string, p2 int, p3 timestamp) TTL_DURATION = 100, TTL_COL = "p2";"#,
        ),
    ];
    for (i, (statement, want)) in cases.into_iter().enumerate() {
        assert_eq!(statement.build().unwrap(), want, "case #{}", i);
    }
}

#[test]
fn test_drop_edge() {
    assert_eq!(
        Statement::new().drop_edge("e1", false).build().unwrap(),
        "DROP EDGE e1;"
    );
    assert_eq!(
        Statement::new().drop_edge("e1", true).build().unwrap(),
        "DROP EDGE IF EXISTS e1;"
    );
}

#[test]
fn test_alter_edges() {
    let cases = vec![
        (
            Statement::new().alter_edge::<E2>(&operate(&["name", "age"], &[], &[], false)),
            "ALTER EDGE e2 ADD (name string, age int);",
        ),
        (
            Statement::new()
                .alter_edge::<EdgeNoProperty>(&operate(&[], &["name", "age"], &[], false)),
            "ALTER EDGE no_property DROP (name, age);",
        ),
        (
            Statement::new()
                .alter_edge::<FollowWithDefault>(&operate(&[], &[], &["degree"], false)),
            "ALTER EDGE follow_with_default CHANGE (degree int DEFAULT 20);",
        ),
        (
            Statement::new().alter_edge::<E1>(&operate(&["p1"], &[], &["p3"], true)),
            r#"ALTER EDGE e1 ADD (p1 string), CHANGE (p3 timestamp) TTL_DURATION = 100, TTL_COL = "p2";"#,
        ),
    ];
    for (i, (statement, want)) in cases.into_iter().enumerate() {
        assert_eq!(statement.build().unwrap(), want, "case #{}", i);
    }
}

#[test]
fn test_create_reproduces_descriptor_triples() {
    let descriptor = resolve::<WomanTyped>().unwrap();
    let ngql = Statement::new()
        .clause(create(&descriptor, false))
        .build()
        .unwrap();
    let open = ngql.find('(').unwrap();
    let close = ngql.rfind(')').unwrap();
    let parsed: Vec<(String, GraphType, Option<String>)> = ngql[open + 1..close]
        .split(", ")
        .map(|definition| {
            let mut parts = definition.splitn(2, " DEFAULT ");
            let head = parts.next().unwrap();
            let default = parts.next().map(str::to_string);
            let (name, graph_type) = head.split_once(' ').unwrap();
            (name.to_string(), graph_type.parse().unwrap(), default)
        })
        .collect();
    let declared: Vec<(String, GraphType, Option<String>)> = descriptor
        .properties
        .iter()
        .map(|p| (p.name.clone(), p.graph_type.clone(), p.default_literal.clone()))
        .collect();
    assert_eq!(parsed, declared);
}

fn live_woman() -> LiveSchema {
    let prop = |name: &str, graph_type: &str| LiveProperty {
        name: name.to_string(),
        graph_type: graph_type.to_string(),
        default: None,
    };
    LiveSchema {
        properties: vec![
            prop("name", "string"),
            prop("age", "int64"),
            prop("married", "bool"),
            prop("salary", "double"),
            prop("create_time", "timestamp"),
        ],
        ttl: Some(LiveTtl {
            column: "create_time".to_string(),
            duration: 100,
        }),
    }
}

#[test]
fn test_plan_migration() {
    init_logger();
    let descriptor = resolve::<Woman>().unwrap();

    let clause = plan_migration(&descriptor, None).unwrap().unwrap();
    assert_eq!(
        Statement::new().clause(clause).build().unwrap(),
        Statement::new().create_tag::<Woman>(true).build().unwrap()
    );

    let up_to_date = live_woman();
    assert!(diff(&descriptor, &up_to_date).is_empty());
    assert!(plan_migration(&descriptor, Some(&up_to_date)).unwrap().is_none());

    let mut stale = live_woman();
    stale.properties.retain(|p| p.name != "married");
    stale.properties.push(LiveProperty {
        name: "nickname".to_string(),
        graph_type: "string".to_string(),
        default: None,
    });
    stale.properties[1].graph_type = "int32".to_string();
    stale.ttl = Some(LiveTtl {
        column: "create_time".to_string(),
        duration: 60,
    });
    let clause = plan_migration(&descriptor, Some(&stale)).unwrap().unwrap();
    assert_eq!(
        Statement::new().clause(clause).build().unwrap(),
        r#"ALTER TAG woman ADD (married bool), DROP (nickname), CHANGE (age int) TTL_DURATION = 100, TTL_COL = "create_time";"#
    );
}

#[test]
fn test_equivalent_live_schema_converges() {
    init_logger();
    let unset_ttl = Some(LiveTtl {
        column: String::new(),
        duration: 0,
    });
    let property = |name: &str, graph_type: &str, default: Option<&str>| LiveProperty {
        name: name.to_string(),
        graph_type: graph_type.to_string(),
        default: default.map(str::to_string),
    };

    let player = LiveSchema {
        properties: vec![property("name", "string", None), property("age", "int64", None)],
        ttl: unset_ttl.clone(),
    };
    let descriptor = resolve::<Player>().unwrap();
    assert!(diff(&descriptor, &player).is_empty());
    assert!(plan_migration(&descriptor, Some(&player)).unwrap().is_none());

    let with_default = LiveSchema {
        properties: vec![
            property("name", "string", Some(r#""""#)),
            property("age", "int64", Some(" 20 ")),
        ],
        ttl: unset_ttl,
    };
    let descriptor = resolve::<PlayerWithDefault>().unwrap();
    assert!(plan_migration(&descriptor, Some(&with_default)).unwrap().is_none());

    let mut woman = live_woman();
    let descriptor = resolve::<Woman>().unwrap();
    assert!(plan_migration(&descriptor, Some(&woman)).unwrap().is_none());
    woman.ttl = Some(LiveTtl {
        column: String::new(),
        duration: 0,
    });
    assert_eq!(
        Statement::new()
            .clause(plan_migration(&descriptor, Some(&woman)).unwrap().unwrap())
            .build()
            .unwrap(),
        r#"ALTER TAG woman TTL_DURATION = 100, TTL_COL = "create_time";"#
    );
}

#[test]
fn test_live_schema_from_json() {
    let live: LiveSchema = serde_json::from_str(
        r#"{"properties": [{"name": "degree", "graph_type": "int64"}]}"#,
    )
    .unwrap();
    let descriptor = resolve::<Follow>().unwrap();
    assert!(plan_migration(&descriptor, Some(&live)).unwrap().is_none());
}
