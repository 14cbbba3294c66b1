/// Unit tests for TypeKey and BindingKey

use ferrous_wire::{key_of_type, BindingKey, TypeKey};
use std::any::TypeId;
use std::collections::HashSet;

trait Plugin: Send + Sync {}

#[test]
fn test_type_key_identity() {
    let key = TypeKey::of::<String>();
    assert_eq!(key.type_id(), TypeId::of::<String>());
    assert_eq!(key.name(), "alloc::string::String");
    assert_eq!(key, TypeKey::of::<String>());
    assert_ne!(key, TypeKey::of::<&'static str>());
}

#[test]
fn test_type_key_trait_object() {
    let key = TypeKey::of::<dyn Plugin>();
    assert!(key.name().starts_with("dyn "));
    assert!(key.name().ends_with("Plugin"));
    assert!(!key.is_leaf());
}

#[test]
fn test_leaf_types() {
    assert!(TypeKey::of::<u32>().is_leaf());
    assert!(TypeKey::of::<bool>().is_leaf());
    assert!(TypeKey::of::<f64>().is_leaf());
    assert!(TypeKey::of::<String>().is_leaf());
    assert!(TypeKey::of::<str>().is_leaf());
    assert!(!TypeKey::of::<Vec<u8>>().is_leaf());
    assert!(!TypeKey::of::<Option<u32>>().is_leaf());
}

#[test]
fn test_binding_key_display() {
    assert_eq!(BindingKey::of::<u16>(None).to_string(), "u16");
    assert_eq!(BindingKey::of::<u16>(Some("port")).to_string(), "u16#port");
    assert_eq!(BindingKey::of::<u16>(Some("port")).display_name(), "u16");
}

#[test]
fn test_binding_key_qualifier() {
    let default = key_of_type::<u16>();
    let named = BindingKey::new(TypeKey::of::<u16>(), Some("port"));

    assert_eq!(default.qualifier(), None);
    assert_eq!(named.qualifier(), Some("port"));
    assert_eq!(default.type_key(), named.type_key());
    assert_ne!(default, named);
}

#[test]
fn test_binding_keys_hash_by_type_and_id() {
    let mut set = HashSet::new();
    set.insert(BindingKey::of::<u16>(None));
    set.insert(BindingKey::of::<u16>(Some("a")));
    set.insert(BindingKey::of::<u16>(Some("b")));
    set.insert(BindingKey::of::<u32>(Some("a")));
    set.insert(BindingKey::of::<u16>(Some("a")));

    assert_eq!(set.len(), 4);
    assert!(set.contains(&BindingKey::of::<u32>(Some("a"))));
}

#[test]
fn test_empty_id_is_still_qualified() {
    assert_ne!(BindingKey::of::<u16>(Some("")), BindingKey::of::<u16>(None));
}
