use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

/// Defaults with the environment layer described by `pairs` applied.
fn settings_from(pairs: &[(&str, &str)]) -> CoreResult<ClickHouseSettings> {
    let env = ClickHouseOverrides::from_lookup(lookup_from(pairs))?;
    Ok(ClickHouseSettings::default().overlay(env))
}

#[test]
fn test_insert_quorum_parse() {
    assert_eq!("auto".parse::<InsertQuorum>().unwrap(), InsertQuorum::Auto);
    assert_eq!("AUTO".parse::<InsertQuorum>().unwrap(), InsertQuorum::Auto);
    assert_eq!(
        "2".parse::<InsertQuorum>().unwrap(),
        InsertQuorum::Replicas(2)
    );
    assert!(matches!(
        "majority".parse::<InsertQuorum>(),
        Err(CoreError::InvalidInsertQuorum { .. })
    ));
    assert!("-1".parse::<InsertQuorum>().is_err());
}

#[test]
fn test_insert_quorum_display() {
    assert_eq!(InsertQuorum::Auto.to_string(), "auto");
    assert_eq!(InsertQuorum::Replicas(3).to_string(), "3");
    assert_eq!(InsertQuorum::default(), InsertQuorum::Auto);
}

#[test]
fn test_insert_quorum_yaml_forms() {
    let q: InsertQuorum = serde_yaml::from_str("auto").unwrap();
    assert_eq!(q, InsertQuorum::Auto);
    let q: InsertQuorum = serde_yaml::from_str("2").unwrap();
    assert_eq!(q, InsertQuorum::Replicas(2));
    let q: InsertQuorum = serde_yaml::from_str("\"3\"").unwrap();
    assert_eq!(q, InsertQuorum::Replicas(3));
    assert!(serde_yaml::from_str::<InsertQuorum>("sometimes").is_err());
}

#[test]
fn test_from_lookup_empty_environment() {
    let settings = settings_from(&[]).unwrap();
    assert_eq!(settings, ClickHouseSettings::default());
    assert_eq!(settings.insert_quorum, InsertQuorum::Auto);
}

#[test]
fn test_from_lookup_reads_all_variables() {
    let settings = settings_from(&[
        (ENV_CLUSTER, "prod"),
        (ENV_ZOOKEEPER_PATH, "/ch/tables/{shard}/db/t"),
        (ENV_REPLICA_NAME, "{replica}"),
        (ENV_INSERT_QUORUM, "2"),
    ])
    .unwrap();
    assert_eq!(settings.cluster.as_deref(), Some("prod"));
    assert_eq!(
        settings.zookeeper_path.as_deref(),
        Some("/ch/tables/{shard}/db/t")
    );
    assert_eq!(settings.replica.as_deref(), Some("{replica}"));
    assert_eq!(settings.insert_quorum, InsertQuorum::Replicas(2));
}

#[test]
fn test_from_lookup_treats_empty_as_unset() {
    let settings = settings_from(&[(ENV_CLUSTER, ""), (ENV_INSERT_QUORUM, "")]).unwrap();
    assert_eq!(settings.cluster, None);
    assert_eq!(settings.insert_quorum, InsertQuorum::Auto);
}

#[test]
fn test_from_lookup_rejects_bad_quorum() {
    let result = ClickHouseOverrides::from_lookup(lookup_from(&[(ENV_INSERT_QUORUM, "all")]));
    assert!(result.is_err());
}

#[test]
fn test_overlay_prefers_set_values() {
    let base = ClickHouseSettings {
        cluster: Some("staging".to_string()),
        zookeeper_path: Some("/zk/a".to_string()),
        replica: None,
        insert_quorum: InsertQuorum::Replicas(2),
    };
    let top = ClickHouseOverrides {
        cluster: Some("prod".to_string()),
        zookeeper_path: Some(String::new()),
        replica: Some("r1".to_string()),
        insert_quorum: None,
    };
    let merged = base.overlay(top);
    assert_eq!(merged.cluster.as_deref(), Some("prod"));
    assert_eq!(merged.zookeeper_path.as_deref(), Some("/zk/a"));
    assert_eq!(merged.replica.as_deref(), Some("r1"));
    assert_eq!(merged.insert_quorum, InsertQuorum::Replicas(2));
}

#[test]
fn test_env_auto_quorum_overrides_file_count() {
    let file = ClickHouseSettings {
        cluster: Some("prod".to_string()),
        insert_quorum: InsertQuorum::Replicas(2),
        ..Default::default()
    };
    let env =
        ClickHouseOverrides::from_lookup(lookup_from(&[(ENV_INSERT_QUORUM, "auto")])).unwrap();
    assert_eq!(env.insert_quorum, Some(InsertQuorum::Auto));

    let merged = file.overlay(env);
    assert_eq!(merged.insert_quorum, InsertQuorum::Auto);
    assert_eq!(merged.cluster.as_deref(), Some("prod"));
}

#[test]
fn test_unset_env_quorum_keeps_file_count() {
    let file = ClickHouseSettings {
        insert_quorum: InsertQuorum::Replicas(2),
        ..Default::default()
    };
    let env =
        ClickHouseOverrides::from_lookup(lookup_from(&[(ENV_INSERT_QUORUM, " ")])).unwrap();
    assert_eq!(env, ClickHouseOverrides::default());
    assert_eq!(file.overlay(env).insert_quorum, InsertQuorum::Replicas(2));
}

#[test]
fn test_normalized_drops_blank_strings() {
    let settings = ClickHouseSettings {
        cluster: Some("  ".to_string()),
        zookeeper_path: Some(String::new()),
        replica: Some("r".to_string()),
        insert_quorum: InsertQuorum::Auto,
    }
    .normalized();
    assert_eq!(settings.cluster, None);
    assert_eq!(settings.zookeeper_path, None);
    assert_eq!(settings.replica.as_deref(), Some("r"));
}
