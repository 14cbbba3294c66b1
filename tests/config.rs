use ferrous_wire::{
    ConfigSource, ConfigValue, Constructor, Container, ContainerOptions, DiError,
    EnvironmentConfigSource, Injectable, TypeInfo,
};
use serial_test::serial;
use std::env;
use std::sync::Arc;

fn clear(prefix: &str) {
    env::remove_var(format!("{}_MAX_DEPTH", prefix));
    env::remove_var(format!("{}_DETECT_CYCLES", prefix));
}

#[test]
#[serial]
fn test_from_env_defaults_when_unset() {
    clear("WIRE");
    let options = ContainerOptions::from_env().unwrap();
    assert_eq!(options, ContainerOptions::default());
    assert_eq!(options.max_depth, 256);
    assert!(options.detect_cycles);
}

#[test]
#[serial]
fn test_from_env_reads_prefixed_variables() {
    env::set_var("WIRE_MAX_DEPTH", "32");
    env::set_var("WIRE_DETECT_CYCLES", "false");
    let options = ContainerOptions::from_env();
    clear("WIRE");

    let options = options.unwrap();
    assert_eq!(options.max_depth, 32);
    assert!(!options.detect_cycles);
}

#[test]
#[serial]
fn test_from_env_with_custom_prefix() {
    env::set_var("GAME_DI_MAX_DEPTH", "4");
    env::set_var("GAME_DI_DETECT_CYCLES", "1");
    let options = ContainerOptions::from_env_with_prefix("game_di");
    clear("GAME_DI");

    let options = options.unwrap();
    assert_eq!(options.max_depth, 4);
    assert!(options.detect_cycles);
}

#[test]
#[serial]
fn test_from_env_rejects_malformed_values() {
    env::set_var("WIRE_MAX_DEPTH", "deep");
    let depth = ContainerOptions::from_env();
    env::set_var("WIRE_MAX_DEPTH", "-3");
    let negative = ContainerOptions::from_env();
    env::remove_var("WIRE_MAX_DEPTH");
    env::set_var("WIRE_DETECT_CYCLES", "maybe");
    let cycles = ContainerOptions::from_env();
    clear("WIRE");

    assert!(matches!(depth, Err(DiError::Config(_))));
    assert!(matches!(negative, Err(DiError::Config(_))));
    assert!(matches!(cycles, Err(DiError::Config(_))));
}

#[test]
#[serial]
fn test_environment_source_lookup() {
    env::set_var("WIRE_MAX_DEPTH", "12");
    let source = EnvironmentConfigSource::with_prefix("wire");
    let value = source.get("max_depth");
    clear("WIRE");

    assert_eq!(value, Some(ConfigValue::Integer(12)));
    assert_eq!(source.get("max_depth"), None);
}

#[test]
fn test_config_value_conversions() {
    assert_eq!(ConfigValue::parse("0").as_bool().unwrap(), false);
    assert_eq!(ConfigValue::parse("1").as_bool().unwrap(), true);
    assert_eq!(ConfigValue::parse("False").as_bool().unwrap(), false);
    assert!(ConfigValue::parse("2").as_bool().is_err());
    assert_eq!(ConfigValue::parse("-7").as_i64().unwrap(), -7);
    assert!(ConfigValue::Boolean(true).as_i64().is_err());
}

#[test]
fn test_options_limit_resolution_depth() {
    struct Level1 {
        _next: Arc<Level2>,
    }
    struct Level2 {
        _next: Arc<Level3>,
    }
    #[derive(Default)]
    struct Level3;

    impl Injectable for Level1 {
        fn type_info() -> TypeInfo {
            TypeInfo::builder::<Self>()
                .constructor(Constructor::public(|next: Arc<Level2>| Level1 { _next: next }))
                .build()
        }
    }
    impl Injectable for Level2 {
        fn type_info() -> TypeInfo {
            TypeInfo::builder::<Self>()
                .constructor(Constructor::public(|next: Arc<Level3>| Level2 { _next: next }))
                .build()
        }
    }
    impl Injectable for Level3 {
        fn type_info() -> TypeInfo {
            TypeInfo::builder::<Self>()
                .constructor(Constructor::public(Level3::default))
                .build()
        }
    }

    let mut shallow = Container::with_options(ContainerOptions::default().with_max_depth(2));
    shallow.bind_self::<Level1>().unwrap();
    shallow.bind_self::<Level2>().unwrap();
    shallow.bind_self::<Level3>().unwrap();
    assert!(matches!(shallow.resolve::<Level1>(), Err(DiError::DepthExceeded(2))));
    assert!(shallow.resolve::<Level2>().is_ok());

    let mut deep = Container::with_options(ContainerOptions::default().with_max_depth(3));
    deep.bind_self::<Level1>().unwrap();
    deep.bind_self::<Level2>().unwrap();
    deep.bind_self::<Level3>().unwrap();
    assert!(deep.resolve::<Level1>().is_ok());
}

#[cfg(feature = "config")]
#[test]
fn test_json_round_trip_and_defaults() {
    let options = ContainerOptions::from_json_str(r#"{"max_depth": 16}"#).unwrap();
    assert_eq!(options.max_depth, 16);
    assert!(options.detect_cycles);

    let json = options.to_json_string().unwrap();
    assert_eq!(ContainerOptions::from_json_str(&json).unwrap(), options);

    assert!(matches!(
        ContainerOptions::from_json_str(r#"{"max_depth": 0}"#),
        Err(DiError::Config(_))
    ));
    assert!(matches!(
        ContainerOptions::from_json_str("not json"),
        Err(DiError::Config(_))
    ));
}

#[cfg(feature = "config")]
#[test]
fn test_options_embed_in_application_settings() {
    #[derive(serde::Deserialize)]
    struct Settings {
        name: String,
        #[serde(default)]
        container: ContainerOptions,
    }

    let settings: Settings = serde_json::from_str(
        r#"{"name": "arena", "container": {"detect_cycles": false}}"#,
    )
    .unwrap();
    assert_eq!(settings.name, "arena");
    assert_eq!(settings.container.max_depth, 256);
    assert!(!settings.container.detect_cycles);

    let bare: Settings = serde_json::from_str(r#"{"name": "lobby"}"#).unwrap();
    assert_eq!(bare.container, ContainerOptions::default());

    let container = Container::with_options(settings.container);
    assert!(!container.options().detect_cycles);
}
