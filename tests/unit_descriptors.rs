/// Unit tests for BindingDescriptor and container validation

use ferrous_wire::{
    Constructor, Container, Field, Injectable, Lifetime, Property, Rejection, TypeInfo, TypeKey,
    ValidationError, ValidationWarning,
};
use std::sync::Arc;

#[derive(Default)]
struct Clock;

impl Injectable for Clock {
    fn type_info() -> TypeInfo {
        TypeInfo::builder::<Self>()
            .constructor(Constructor::public(Clock::default))
            .build()
    }
}

struct Scheduler {
    _clock: Arc<Clock>,
    journal: Option<Arc<Journal>>,
}

struct Journal;

impl Injectable for Scheduler {
    fn type_info() -> TypeInfo {
        TypeInfo::builder::<Self>()
            .constructor(Constructor::public(|clock: Arc<Clock>| Scheduler {
                _clock: clock,
                journal: None,
            }))
            .field(Field::new("journal", |s: &mut Self, j: Arc<Journal>| s.journal = Some(j)))
            .build()
    }
}

fn find<'a>(
    descriptors: &'a [ferrous_wire::BindingDescriptor],
    name: &str,
) -> &'a ferrous_wire::BindingDescriptor {
    descriptors
        .iter()
        .find(|d| d.type_name().ends_with(name))
        .unwrap()
}

#[test]
fn test_descriptor_of_unnamed_binding() {
    let mut container = Container::new();
    container.bind_self::<Clock>().unwrap();

    let descriptors = container.descriptors().unwrap();
    let clock = find(&descriptors, "Clock");
    assert_eq!(clock.service_name(), None);
    assert!(!clock.is_named());
    assert_eq!(clock.resolving, TypeKey::of::<Clock>());
    assert_eq!(clock.lifetime, Lifetime::Transient);
    assert!(clock.has_target);
    assert!(!clock.has_instance);
}

#[test]
fn test_descriptor_of_named_instance() {
    let mut container = Container::new();
    container
        .bind::<u16>()
        .unwrap()
        .with_id("database_port")
        .as_instance(Arc::new(5432u16))
        .unwrap();

    let descriptors = container.descriptors().unwrap();
    assert_eq!(descriptors.len(), 1);
    let port = &descriptors[0];
    assert_eq!(port.service_name(), Some("database_port"));
    assert!(port.is_named());
    assert_eq!(port.type_name(), "u16");
    assert_eq!(port.lifetime, Lifetime::Instance);
    assert!(!port.has_target);
    assert!(port.has_instance);
}

#[test]
fn test_descriptor_tracks_memoized_plans() {
    let mut container = Container::new();
    container.bind_self::<Clock>().unwrap();
    container.bind::<Journal>().unwrap().as_instance(Arc::new(Journal)).unwrap();
    container.bind_self::<Scheduler>().unwrap().as_cached();

    let before = container.descriptors().unwrap();
    let scheduler = find(&before, "Scheduler");
    assert!(!scheduler.has_constructor_plan);
    assert!(!scheduler.has_member_plan);
    assert!(!scheduler.has_instance);

    let resolved = container.resolve::<Scheduler>().unwrap();
    assert!(resolved.journal.is_some());

    let after = container.descriptors().unwrap();
    let scheduler = find(&after, "Scheduler");
    assert!(scheduler.has_constructor_plan);
    assert!(scheduler.has_member_plan);
    assert!(scheduler.has_instance);
}

#[test]
fn test_validate_accepts_complete_graph() {
    let mut container = Container::new();
    container.bind_self::<Clock>().unwrap().as_cached();
    container.bind::<Journal>().unwrap().as_instance(Arc::new(Journal)).unwrap();
    container.bind_self::<Scheduler>().unwrap();

    let report = container.validate().unwrap();
    assert!(report.is_valid(), "{}", report.format_issues());
    assert!(!report.has_warnings());
    assert_eq!(report.checked, 3);
    assert!(report.format_issues().is_empty());
}

#[test]
fn test_validate_reports_missing_dependencies() {
    let mut container = Container::new();
    container.bind_self::<Scheduler>().unwrap();

    let report = container.validate().unwrap();
    assert_eq!(report.errors.len(), 2);

    match &report.errors[0] {
        ValidationError::Unresolvable { candidates, .. } => {
            assert_eq!(candidates.len(), 1);
            assert!(matches!(
                candidates[0].reason,
                Rejection::MissingBinding { index: 0, .. }
            ));
        }
        other => panic!("unexpected error {:?}", other),
    }
    match &report.errors[1] {
        ValidationError::MissingMemberDependency { member, dependency, .. } => {
            assert_eq!(*member, "journal");
            assert!(dependency.ends_with("Journal"));
        }
        other => panic!("unexpected error {:?}", other),
    }

    let issues = report.format_issues();
    assert!(issues.contains("Validation Errors:"));
    assert!(issues.contains("parameter 0 has no binding"));
    assert!(issues.contains("member 'journal'"));
}

#[test]
fn test_validate_reports_target_less_binding() {
    let mut container = Container::new();
    container.bind::<Clock>().unwrap();

    let report = container.validate().unwrap();
    assert!(!report.is_valid());
    assert!(report.format_issues().contains("no constructor candidates"));
}

#[test]
fn test_validate_reports_computed_property() {
    #[derive(Default)]
    struct Panel;
    impl Injectable for Panel {
        fn type_info() -> TypeInfo {
            TypeInfo::builder::<Self>()
                .constructor(Constructor::public(Panel::default))
                .property(Property::computed::<Clock>("clock"))
                .build()
        }
    }

    let mut container = Container::new();
    container.bind_self::<Panel>().unwrap();

    let report = container.validate().unwrap();
    assert!(matches!(
        report.errors.as_slice(),
        [ValidationError::MemberMetadata { .. }]
    ));
}

#[test]
fn test_validate_warns_singleton_over_transient() {
    let mut container = Container::new();
    container.bind_self::<Clock>().unwrap();
    container.bind::<Journal>().unwrap().as_instance(Arc::new(Journal)).unwrap();
    container.bind_self::<Scheduler>().unwrap().as_cached();

    let report = container.validate().unwrap();
    assert!(report.is_valid());
    assert!(report.has_warnings());
    match &report.warnings[0] {
        ValidationWarning::SingletonDependsOnTransient { singleton, transient } => {
            assert!(singleton.ends_with("Scheduler"));
            assert!(transient.ends_with("Clock"));
        }
    }
    assert!(report.format_issues().contains("Validation Warnings:"));
}

#[test]
fn test_validate_skips_instance_bindings() {
    let mut container = Container::new();
    container.bind::<Journal>().unwrap().as_instance(Arc::new(Journal)).unwrap();

    let report = container.validate().unwrap();
    assert!(report.is_valid());
    assert_eq!(report.checked, 1);
}

#[test]
fn test_large_registry_keeps_registration_order() {
    let mut container = Container::new();
    let ids: Vec<String> = (0..40).map(|i| format!("s{}", (i * 7) % 40)).collect();
    for id in &ids {
        container.bind_self::<Scheduler>().unwrap().with_id(id);
    }

    let listed: Vec<String> = container
        .descriptors()
        .unwrap()
        .iter()
        .map(|d| d.service_name().unwrap().to_owned())
        .collect();
    assert_eq!(listed, ids);

    // Clock is unbound, so every binding reports, in the same order.
    let report = container.validate().unwrap();
    assert_eq!(report.checked, 40);
    let reported: Vec<String> = report
        .errors
        .iter()
        .filter_map(|e| match e {
            ValidationError::Unresolvable { binding, .. } => {
                binding.rsplit('#').next().map(str::to_owned)
            }
            _ => None,
        })
        .collect();
    assert_eq!(reported, ids);
}
