//! Error types for the dependency injection container.

use std::fmt;

/// Dependency injection errors
///
/// Every error is raised synchronously by the `bind`/`resolve`/`inject` call
/// that triggered it. None of them leaves the registry in a partially updated
/// state: memoized metadata is only written after a fully successful
/// computation, and singleton instances are only stored after construction and
/// injection both succeeded.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{Container, DiError};
///
/// struct Unregistered;
///
/// let mut container = Container::new();
/// match container.resolve::<Unregistered>() {
///     Err(DiError::NotFound(key)) => assert!(key.contains("Unregistered")),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use ferrous_wire::DiError;
///
/// let duplicate = DiError::DuplicateBinding("app::Clock#utc".to_string());
/// let circular = DiError::Circular(vec!["A".into(), "B".into(), "A".into()]);
///
/// assert_eq!(duplicate.to_string(), "Binding already exists: app::Clock#utc");
/// assert_eq!(circular.to_string(), "Circular dependency: A -> B -> A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// A second binding was committed for an existing `(type, id)` key
    DuplicateBinding(String),
    /// No binding registered for the requested `(type, id)` key
    NotFound(String),
    /// No eligible constructor exists for the resolving type
    Unresolvable(&'static str),
    /// An injectable property has no backing storage to assign into
    MetadataAccess {
        /// Declaring type
        ty: &'static str,
        /// Property name
        member: &'static str,
    },
    /// An argument supplied to the binding API was absent or malformed
    InvalidArgument(&'static str),
    /// Type downcast failed
    TypeMismatch(&'static str),
    /// Circular dependency detected (includes path)
    Circular(Vec<String>),
    /// Maximum recursion depth exceeded
    DepthExceeded(usize),
    /// Container options could not be loaded
    Config(String),
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::DuplicateBinding(key) => write!(f, "Binding already exists: {}", key),
            DiError::NotFound(key) => write!(f, "No binding for: {}", key),
            DiError::Unresolvable(name) => write!(
                f,
                "Unable to create an object of type {}: no eligible constructor",
                name
            ),
            DiError::MetadataAccess { ty, member } => {
                write!(f, "Property {}::{} has no backing storage", ty, member)
            }
            DiError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            DiError::Circular(path) => {
                write!(f, "Circular dependency: {}", path.join(" -> "))
            }
            DiError::DepthExceeded(depth) => write!(f, "Max depth {} exceeded", depth),
            DiError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for DI operations
///
/// A convenience alias for `Result<T, DiError>` used throughout ferrous-wire.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{DiResult, DiError};
///
/// fn lookup(found: bool) -> DiResult<u32> {
///     if found { Ok(7) } else { Err(DiError::NotFound("u32".to_string())) }
/// }
///
/// assert_eq!(lookup(true).unwrap(), 7);
/// assert!(lookup(false).is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
