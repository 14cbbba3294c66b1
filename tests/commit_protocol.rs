use ferrous_wire::{
    BindingKey, Constructor, Container, DiError, DiObserver, Injectable, Lifetime, TypeInfo,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Service;

impl Injectable for Service {
    fn type_info() -> TypeInfo {
        TypeInfo::builder::<Self>()
            .constructor(Constructor::public(Service::default))
            .build()
    }
}

/// Records committed keys in order.
#[derive(Default)]
struct CommitLog {
    commits: Mutex<Vec<(String, Lifetime)>>,
}

impl DiObserver for CommitLog {
    fn resolving(&self, _key: &BindingKey) {}

    fn resolved(&self, _key: &BindingKey, _duration: Duration) {}

    fn binding_committed(&self, key: &BindingKey, lifetime: Lifetime) {
        self.commits.lock().unwrap().push((key.to_string(), lifetime));
    }
}

#[test]
fn test_declaration_is_staged_until_next_operation() {
    let log = Arc::new(CommitLog::default());
    let mut container = Container::new();
    container.add_observer(log.clone());

    container.bind_self::<Service>().unwrap();
    assert!(log.commits.lock().unwrap().is_empty());
    assert_eq!(container.len(), 0);

    assert!(container.is_bound::<Service>(None).unwrap());
    assert_eq!(container.len(), 1);
    let commits = log.commits.lock().unwrap();
    assert_eq!(commits.len(), 1);
    assert!(commits[0].0.ends_with("Service"));
    assert_eq!(commits[0].1, Lifetime::Transient);
}

#[test]
fn test_duplicate_surfaces_on_next_bind() {
    let mut container = Container::new();
    container.bind_self::<Service>().unwrap();
    container.bind_self::<Service>().unwrap().as_cached();

    match container.bind::<u8>() {
        Err(DiError::DuplicateBinding(key)) => assert!(key.ends_with("Service")),
        Err(other) => panic!("expected DuplicateBinding, got {}", other),
        Ok(_) => panic!("expected DuplicateBinding"),
    }

    // The failed record was consumed and the first binding stays.
    assert_eq!(container.len(), 1);
    assert!(!container.is_bound::<u8>(None).unwrap());
    let descriptors = container.descriptors().unwrap();
    assert_eq!(descriptors[0].lifetime, Lifetime::Transient);
}

#[test]
fn test_duplicate_surfaces_on_resolve() {
    let mut container = Container::new();
    container.bind_self::<Service>().unwrap().with_id("a");
    container.bind_self::<Service>().unwrap().with_id("a");

    assert!(matches!(
        container.resolve_named::<Service>("a"),
        Err(DiError::DuplicateBinding(_))
    ));
    assert!(container.resolve_named::<Service>("a").is_ok());
}

#[test]
fn test_distinct_ids_are_not_duplicates() {
    let mut container = Container::new();
    container.bind_self::<Service>().unwrap();
    container.bind_self::<Service>().unwrap().with_id("a");
    container.bind_self::<Service>().unwrap().with_id("b");

    assert_eq!(container.descriptors().unwrap().len(), 3);
}

#[test]
fn test_absent_instance_discards_declaration() {
    let mut container = Container::new();
    let result = container
        .bind::<Service>()
        .unwrap()
        .with_id("fixed")
        .as_instance(None::<Arc<Service>>);

    assert!(matches!(result, Err(DiError::InvalidArgument(_))));
    drop(result);
    assert!(!container.is_bound::<Service>(Some("fixed")).unwrap());
    assert!(container.is_empty());
}

#[test]
fn test_absent_instance_keeps_previous_declaration() {
    let mut container = Container::new();
    container.bind_self::<Service>().unwrap().as_cached();
    let _ = container.bind::<Service>().unwrap().with_id("x").as_instance(None::<Arc<Service>>);

    assert!(container.is_bound::<Service>(None).unwrap());
    assert!(!container.is_bound::<Service>(Some("x")).unwrap());
}

#[test]
fn test_lifetimes_follow_declaration() {
    let mut container = Container::new();
    container.bind_self::<Service>().unwrap();
    container.bind_self::<Service>().unwrap().with_id("cached").as_cached();
    container
        .bind::<Service>()
        .unwrap()
        .with_id("fixed")
        .as_cached()
        .as_instance(Arc::new(Service))
        .unwrap();

    let lifetimes: Vec<Lifetime> = container
        .descriptors()
        .unwrap()
        .into_iter()
        .map(|d| d.lifetime)
        .collect();
    assert_eq!(
        lifetimes,
        vec![Lifetime::Transient, Lifetime::Singleton, Lifetime::Instance]
    );
}

#[test]
fn test_resolving_type_defaults_to_binding_type() {
    let mut container = Container::new();
    container.bind::<Service>().unwrap();

    let resolving = container.resolving_type::<Service>(None).unwrap();
    assert_eq!(resolving, Some(ferrous_wire::TypeKey::of::<Service>()));
    assert_eq!(container.resolving_type::<u8>(None).unwrap(), None);
}

#[test]
fn test_bind_without_target_is_unresolvable() {
    let mut container = Container::new();
    container.bind::<Service>().unwrap();
    container.bind_self::<Service>().unwrap().with_id("self");

    assert!(matches!(
        container.resolve::<Service>(),
        Err(DiError::Unresolvable(_))
    ));
    assert!(container.resolve_named::<Service>("self").is_ok());
}
