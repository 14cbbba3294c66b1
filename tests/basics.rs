use ferrous_wire::{implements, Constructor, Container, DiError, Injectable, TypeInfo};
use std::sync::Arc;

trait Foo: Send + Sync {
    fn name(&self) -> &'static str;
}

#[derive(Default)]
struct FooImpl;

impl Foo for FooImpl {
    fn name(&self) -> &'static str {
        "impl"
    }
}

impl Injectable for FooImpl {
    fn type_info() -> TypeInfo {
        TypeInfo::builder::<Self>()
            .constructor(Constructor::public(FooImpl::default))
            .build()
    }
}

implements!(FooImpl => dyn Foo);

struct Consumer {
    foo: Arc<FooImpl>,
}

impl Injectable for Consumer {
    fn type_info() -> TypeInfo {
        TypeInfo::builder::<Self>()
            .constructor(Constructor::public(|foo: Arc<FooImpl>| Consumer { foo }))
            .build()
    }
}

#[test]
fn test_resolve_bound_abstraction() {
    let mut container = Container::new();
    container.bind::<dyn Foo>().unwrap().to::<FooImpl>();

    let resolved = container.resolve::<dyn Foo>().unwrap();
    assert_eq!(resolved.name(), "impl");
}

#[test]
fn test_transient_creates_new_instances() {
    let mut container = Container::new();
    container.bind::<dyn Foo>().unwrap().to::<FooImpl>();

    let a = container.resolve::<dyn Foo>().unwrap();
    let b = container.resolve::<dyn Foo>().unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn test_cached_binding_returns_same_instance() {
    let mut container = Container::new();
    container.bind::<dyn Foo>().unwrap().to::<FooImpl>().as_cached();

    let a = container.resolve::<dyn Foo>().unwrap();
    let b = container.resolve::<dyn Foo>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_named_singletons_are_independent() {
    let mut container = Container::new();
    container.bind::<dyn Foo>().unwrap().to::<FooImpl>().with_id("a").as_cached();
    container.bind::<dyn Foo>().unwrap().to::<FooImpl>().with_id("b").as_cached();

    let a1 = container.resolve_named::<dyn Foo>("a").unwrap();
    let a2 = container.resolve_named::<dyn Foo>("a").unwrap();
    let b1 = container.resolve_named::<dyn Foo>("b").unwrap();
    let b2 = container.resolve_named::<dyn Foo>("b").unwrap();

    assert!(Arc::ptr_eq(&a1, &a2));
    assert!(Arc::ptr_eq(&b1, &b2));
    assert!(!Arc::ptr_eq(&a1, &b1));
}

#[test]
fn test_fixed_instance_is_returned_as_is() {
    let fixed: Arc<dyn Foo> = Arc::new(FooImpl);

    let mut container = Container::new();
    container.bind::<dyn Foo>().unwrap().as_instance(fixed.clone()).unwrap();

    for _ in 0..3 {
        let resolved = container.resolve::<dyn Foo>().unwrap();
        assert!(Arc::ptr_eq(&fixed, &resolved));
    }
}

#[test]
fn test_fixed_instance_wins_over_concrete_type() {
    let fixed = Arc::new(FooImpl);

    let mut container = Container::new();
    container
        .bind::<FooImpl>()
        .unwrap()
        .to_self()
        .as_instance(fixed.clone())
        .unwrap();

    let resolved = container.resolve::<FooImpl>().unwrap();
    assert!(Arc::ptr_eq(&fixed, &resolved));
}

#[test]
fn test_constructor_dependencies_are_resolved() {
    let mut container = Container::new();
    container.bind_self::<FooImpl>().unwrap().as_cached();
    container.bind_self::<Consumer>().unwrap();

    let consumer = container.resolve::<Consumer>().unwrap();
    let foo = container.resolve::<FooImpl>().unwrap();
    assert!(Arc::ptr_eq(&consumer.foo, &foo));
}

#[test]
fn test_resolve_unbound_type_fails() {
    let mut container = Container::new();
    match container.resolve::<FooImpl>() {
        Err(DiError::NotFound(name)) => assert!(name.contains("FooImpl")),
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_named_and_default_bindings_do_not_mix() {
    let mut container = Container::new();
    container.bind::<dyn Foo>().unwrap().to::<FooImpl>().with_id("only");

    assert!(container.resolve_named::<dyn Foo>("only").is_ok());
    assert!(matches!(
        container.resolve::<dyn Foo>(),
        Err(DiError::NotFound(_))
    ));
    assert!(matches!(
        container.resolve_named::<dyn Foo>("other"),
        Err(DiError::NotFound(_))
    ));
}

#[test]
fn test_binding_without_target_fails_late() {
    let mut container = Container::new();
    container.bind::<dyn Foo>().unwrap();

    assert!(container.is_bound::<dyn Foo>(None).unwrap());
    assert!(matches!(
        container.resolve::<dyn Foo>(),
        Err(DiError::Unresolvable(_))
    ));
}

#[test]
fn test_resolve_with_optional_id() {
    let mut container = Container::new();
    container.bind::<u8>().unwrap().as_instance(Arc::new(1u8)).unwrap();
    container.bind::<u8>().unwrap().with_id("two").as_instance(Arc::new(2u8)).unwrap();

    assert_eq!(*container.resolve_with_id::<u8>(None).unwrap(), 1);
    assert_eq!(*container.resolve_with_id::<u8>(Some("two")).unwrap(), 2);
    assert_eq!(container.len(), 2);
}

#[test]
fn test_resolved_values_cross_threads() {
    let mut container = Container::new();
    container.bind::<dyn Foo>().unwrap().to::<FooImpl>().as_cached();
    let shared = container.resolve::<dyn Foo>().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let foo = shared.clone();
            std::thread::spawn(move || foo.name())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "impl");
    }
}
