//! # ferrous-wire
//!
//! Descriptor-driven dependency injection: bind abstractions to concrete
//! types, then let the container pick a constructor, resolve its parameters
//! and inject marked fields, properties and methods.
//!
//! ## Features
//!
//! - **Constructor selection**: marked constructors first, then public ones;
//!   candidates whose parameters cannot be resolved are skipped
//! - **Member injection**: fields, properties and methods, each optionally
//!   qualified with an id
//! - **Qualified bindings**: several bindings of one type, told apart by id
//! - **Singletons and fixed instances** next to transient bindings
//! - **Host-owned instances**: inject into objects the container did not build
//! - **Circular dependency detection** with the full dependency path
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_wire::{Container, Constructor, Injectable, TypeInfo};
//! use std::sync::Arc;
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! impl Injectable for UserService {
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::builder::<Self>()
//!             .constructor(Constructor::public(|db: Arc<Database>| UserService { db }))
//!             .build()
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.bind::<Database>().unwrap().as_instance(Arc::new(Database {
//!     connection_string: "postgres://localhost".to_string(),
//! })).unwrap();
//! container.bind_self::<UserService>().unwrap();
//!
//! let user_service = container.resolve::<UserService>().unwrap();
//! assert_eq!(user_service.db.connection_string, "postgres://localhost");
//! ```
//!
//! ## Lifetimes
//!
//! - **Transient**: constructed on every resolution (the default)
//! - **Singleton**: `as_cached()`, constructed and injected once
//! - **Instance**: `as_instance(value)`, never constructed or injected
//!
//! ## Member Injection
//!
//! ```rust
//! use ferrous_wire::{Container, Constructor, Field, Injectable, Method, Property, TypeInfo};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str) -> String;
//! }
//!
//! struct Console(&'static str);
//! impl Logger for Console {
//!     fn log(&self, message: &str) -> String { format!("{}{}", self.0, message) }
//! }
//!
//! #[derive(Default)]
//! struct Service {
//!     logger: Option<Arc<dyn Logger>>,
//!     audit: Option<Arc<dyn Logger>>,
//!     started: bool,
//! }
//!
//! impl Service {
//!     fn start(&mut self, logger: Arc<dyn Logger>) {
//!         self.started = logger.log("start").ends_with("start");
//!     }
//! }
//!
//! impl Injectable for Service {
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::builder::<Self>()
//!             .constructor(Constructor::public(Service::default))
//!             .field(Field::new("logger", |s: &mut Self, l: Arc<dyn Logger>| s.logger = Some(l)))
//!             .property(
//!                 Property::new("audit", |s: &mut Self, l: Arc<dyn Logger>| s.audit = Some(l))
//!                     .with_id("audit"),
//!             )
//!             .method(Method::new("start", Service::start))
//!             .build()
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.bind::<dyn Logger>().unwrap()
//!     .as_instance(Arc::new(Console("> ")) as Arc<dyn Logger>).unwrap();
//! container.bind::<dyn Logger>().unwrap().with_id("audit")
//!     .as_instance(Arc::new(Console("audit: ")) as Arc<dyn Logger>).unwrap();
//! container.bind_self::<Service>().unwrap();
//!
//! let service = container.resolve::<Service>().unwrap();
//! assert_eq!(service.logger.as_ref().unwrap().log("x"), "> x");
//! assert_eq!(service.audit.as_ref().unwrap().log("x"), "audit: x");
//! assert!(service.started);
//! ```
//!
//! ## Threading
//!
//! A [`Container`] is driven through `&mut self` from one logical thread and
//! performs no locking. Resolved values are `Arc`s and are free to cross
//! threads.

pub mod binding;
pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod reflect;
pub mod traits;
pub mod validation;

mod internal;
mod metadata;
mod registration;

// Re-export core types
pub use binding::BindingBuilder;
pub use config::{ConfigSource, ConfigValue, ContainerOptions, EnvironmentConfigSource};
pub use container::Container;
pub use descriptors::BindingDescriptor;
pub use error::{DiError, DiResult};
pub use key::{key_of_type, BindingKey, TypeKey};
pub use lifetime::Lifetime;
pub use observer::{DiObserver, LoggingObserver, MetricsObserver};
pub use reflect::{
    Arguments, Constructor, ConstructorInfo, Field, InjectMarker, Method, MethodInfo, ParamInfo,
    Property, PropertyInfo, SlotInfo, TypeInfo, TypeInfoBuilder, Visibility,
};
pub use traits::{Component, ComponentHost, Injectable, Upcast};
pub use validation::{CandidateRejection, Rejection, ValidationError, ValidationReport, ValidationWarning};
