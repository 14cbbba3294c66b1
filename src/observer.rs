//! Diagnostic observers for binding, resolution and injection events.
//!
//! Observers are the container's logging hook: nothing is printed unless an
//! observer is registered with [`Container::add_observer`](crate::Container::add_observer).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::{BindingKey, TypeKey};
use crate::lifetime::Lifetime;

/// Observer trait for container events.
///
/// Calls are made synchronously from inside `bind`/`resolve`/`inject`; keep
/// implementations cheap. Nested resolutions notify once per binding, so a
/// failing dependency is reported for every binding on the failing chain.
///
/// # Examples
///
/// ```
/// use ferrous_wire::{BindingKey, Container, DiObserver};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// struct TracingObserver {
///     trace_id: String,
/// }
///
/// impl DiObserver for TracingObserver {
///     fn resolving(&self, key: &BindingKey) {
///         println!("[{}] Resolving: {}", self.trace_id, key);
///     }
///
///     fn resolved(&self, key: &BindingKey, duration: Duration) {
///         println!("[{}] Resolved: {} in {:?}", self.trace_id, key, duration);
///     }
/// }
///
/// let mut container = Container::new();
/// container.add_observer(Arc::new(TracingObserver { trace_id: "boot".to_string() }));
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before a binding is resolved.
    fn resolving(&self, key: &BindingKey);

    /// Called after a binding resolved successfully.
    ///
    /// `duration` spans the whole resolution, nested dependencies included.
    fn resolved(&self, key: &BindingKey, duration: Duration);

    /// Called when resolving a binding failed.
    fn resolution_failed(&self, key: &BindingKey, error: &DiError) {
        let _ = (key, error);
    }

    /// Called when a staged binding is committed to the registry.
    fn binding_committed(&self, key: &BindingKey, lifetime: Lifetime) {
        let _ = (key, lifetime);
    }

    /// Called after members of an instance were injected.
    ///
    /// Not called for types without injectable members.
    fn injected(&self, ty: TypeKey, members: usize) {
        let _ = (ty, members);
    }
}

/// Registered observers.
#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn resolving(&self, key: &BindingKey) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, key: &BindingKey, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, duration);
        }
    }

    #[inline]
    pub(crate) fn resolution_failed(&self, key: &BindingKey, error: &DiError) {
        for observer in &self.observers {
            observer.resolution_failed(key, error);
        }
    }

    #[inline]
    pub(crate) fn binding_committed(&self, key: &BindingKey, lifetime: Lifetime) {
        for observer in &self.observers {
            observer.binding_committed(key, lifetime);
        }
    }

    #[inline]
    pub(crate) fn injected(&self, ty: TypeKey, members: usize) {
        for observer in &self.observers {
            observer.injected(ty, members);
        }
    }
}

/// Built-in observer that logs events to stdout, failures to stderr.
///
/// ```
/// use ferrous_wire::{Container, LoggingObserver};
/// use std::sync::Arc;
///
/// let mut container = Container::new();
/// container.add_observer(Arc::new(LoggingObserver::with_prefix("[app]")));
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self {
            prefix: "[ferrous-wire]".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, key: &BindingKey) {
        println!("{} Resolving: {}", self.prefix, key);
    }

    fn resolved(&self, key: &BindingKey, duration: Duration) {
        println!("{} Resolved: {} in {:?}", self.prefix, key, duration);
    }

    fn resolution_failed(&self, key: &BindingKey, error: &DiError) {
        eprintln!("{} FAILED {}: {}", self.prefix, key, error);
    }

    fn binding_committed(&self, key: &BindingKey, lifetime: Lifetime) {
        println!("{} Bound: {} ({:?})", self.prefix, key, lifetime);
    }

    fn injected(&self, ty: TypeKey, members: usize) {
        println!("{} Injected {} member(s) into {}", self.prefix, members, ty);
    }
}

/// Observer that counts events.
///
/// ```
/// use ferrous_wire::{Container, MetricsObserver};
/// use std::sync::Arc;
///
/// let metrics = Arc::new(MetricsObserver::new());
/// let mut container = Container::new();
/// container.add_observer(metrics.clone());
///
/// container.bind::<u32>().unwrap().as_instance(Arc::new(7u32)).unwrap();
/// assert_eq!(*container.resolve::<u32>().unwrap(), 7);
///
/// assert_eq!(metrics.commit_count(), 1);
/// assert_eq!(metrics.resolution_count(), 1);
/// assert_eq!(metrics.failure_count(), 0);
/// ```
#[derive(Default)]
pub struct MetricsObserver {
    resolution_count: AtomicU64,
    failure_count: AtomicU64,
    commit_count: AtomicU64,
    injection_count: AtomicU64,
    total_resolution_time: AtomicU64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful resolutions observed.
    pub fn resolution_count(&self) -> u64 {
        self.resolution_count.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn commit_count(&self) -> u64 {
        self.commit_count.load(Ordering::Relaxed)
    }

    /// Instances that had at least one member injected.
    pub fn injection_count(&self) -> u64 {
        self.injection_count.load(Ordering::Relaxed)
    }

    pub fn total_resolution_time(&self) -> Duration {
        Duration::from_nanos(self.total_resolution_time.load(Ordering::Relaxed))
    }

    pub fn average_resolution_time(&self) -> Option<Duration> {
        let count = self.resolution_count();
        if count == 0 {
            return None;
        }
        let total_ns = self.total_resolution_time.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total_ns / count))
    }
}

impl DiObserver for MetricsObserver {
    fn resolving(&self, _key: &BindingKey) {}

    fn resolved(&self, _key: &BindingKey, duration: Duration) {
        self.resolution_count.fetch_add(1, Ordering::Relaxed);
        self.total_resolution_time
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    fn resolution_failed(&self, _key: &BindingKey, _error: &DiError) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    fn binding_committed(&self, _key: &BindingKey, _lifetime: Lifetime) {
        self.commit_count.fetch_add(1, Ordering::Relaxed);
    }

    fn injected(&self, _ty: TypeKey, _members: usize) {
        self.injection_count.fetch_add(1, Ordering::Relaxed);
    }
}
