//! Up-front validation of a container's bindings.
//!
//! Resolution fails late by design: a binding that can never be constructed
//! is accepted and only reported when it is resolved. [`Container::validate`]
//! runs the same checks eagerly, without constructing anything, so
//! configuration errors can be caught at startup or in a test.

use std::fmt;

use crate::container::Container;
use crate::error::{DiError, DiResult};
use crate::key::BindingKey;
use crate::lifetime::Lifetime;

/// Why a constructor candidate was not selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Private constructor without the injectable marker
    PrivateUnmarked,
    /// The constructor is marked for a different binding id
    QualifierMismatch { expected: String, found: String },
    /// A parameter is a primitive or string type
    LeafParameter { index: usize, ty: &'static str },
    /// No binding exists for a parameter
    MissingBinding { index: usize, dependency: String },
    /// A parameter resolves back into the binding being built
    SelfReference { index: usize, dependency: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::PrivateUnmarked => f.write_str("private and not marked injectable"),
            Rejection::QualifierMismatch { expected, found } => {
                write!(f, "marked for id '{}', binding id is '{}'", found, expected)
            }
            Rejection::LeafParameter { index, ty } => {
                write!(f, "parameter {} has non-injectable type {}", index, ty)
            }
            Rejection::MissingBinding { index, dependency } => {
                write!(f, "parameter {} has no binding: {}", index, dependency)
            }
            Rejection::SelfReference { index, dependency } => {
                write!(f, "parameter {} refers back to {}", index, dependency)
            }
        }
    }
}

/// A rejected constructor, by declaration index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRejection {
    pub constructor: usize,
    pub reason: Rejection,
}

/// A validation error: resolving the binding would fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No eligible constructor
    Unresolvable {
        binding: String,
        resolving: &'static str,
        candidates: Vec<CandidateRejection>,
    },
    /// A member of the resolving type cannot be planned
    MemberMetadata { binding: String, error: DiError },
    /// A member dependency has no binding
    MissingMemberDependency {
        binding: String,
        member: &'static str,
        dependency: String,
    },
}

/// A validation warning: resolving works but is likely not what was meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// A singleton holds on to one instance of a transient dependency forever
    SingletonDependsOnTransient { singleton: String, transient: String },
}

/// Result of [`Container::validate`].
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    /// Number of bindings inspected
    pub checked: usize,
}

impl ValidationReport {
    /// Returns true if validation passed without errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Formats errors and warnings for display.
    pub fn format_issues(&self) -> String {
        let mut output = String::new();

        if !self.errors.is_empty() {
            output.push_str("Validation Errors:\n");
            for error in &self.errors {
                output.push_str(&format!("  - {}\n", format_error(error)));
            }
        }

        if !self.warnings.is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str("Validation Warnings:\n");
            for warning in &self.warnings {
                output.push_str(&format!("  - {}\n", format_warning(warning)));
            }
        }

        output
    }
}

fn format_error(error: &ValidationError) -> String {
    match error {
        ValidationError::Unresolvable {
            binding,
            resolving,
            candidates,
        } => {
            let mut message = format!("Binding '{}' cannot construct {}", binding, resolving);
            if candidates.is_empty() {
                message.push_str(": no constructor candidates");
            }
            for candidate in candidates {
                message.push_str(&format!(
                    "\n      constructor #{}: {}",
                    candidate.constructor, candidate.reason
                ));
            }
            message
        }
        ValidationError::MemberMetadata { binding, error } => {
            format!("Binding '{}': {}", binding, error)
        }
        ValidationError::MissingMemberDependency {
            binding,
            member,
            dependency,
        } => format!(
            "Binding '{}' member '{}' depends on unregistered '{}'",
            binding, member, dependency
        ),
    }
}

fn format_warning(warning: &ValidationWarning) -> String {
    match warning {
        ValidationWarning::SingletonDependsOnTransient {
            singleton,
            transient,
        } => format!(
            "Singleton '{}' depends on transient '{}' - will always hold the same instance",
            singleton, transient
        ),
    }
}

impl Container {
    /// Checks every binding without constructing anything.
    ///
    /// Successful constructor and member plans are memoized exactly as a
    /// resolution would memoize them.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_wire::{Container, Constructor, Injectable, TypeInfo};
    /// use std::sync::Arc;
    ///
    /// struct Engine;
    /// struct Car { engine: Arc<Engine> }
    ///
    /// impl Injectable for Car {
    ///     fn type_info() -> TypeInfo {
    ///         TypeInfo::builder::<Self>()
    ///             .constructor(Constructor::public(|engine: Arc<Engine>| Car { engine }))
    ///             .build()
    ///     }
    /// }
    ///
    /// let mut container = Container::new();
    /// container.bind_self::<Car>().unwrap();
    ///
    /// let report = container.validate().unwrap();
    /// assert!(!report.is_valid());
    /// assert!(report.format_issues().contains("parameter 0 has no binding"));
    /// ```
    pub fn validate(&mut self) -> DiResult<ValidationReport> {
        self.commit_staged()?;

        let mut report = ValidationReport::default();
        for key in self.bindings.keys() {
            report.checked += 1;
            self.validate_binding(&key, &mut report);
        }
        Ok(report)
    }

    fn validate_binding(&mut self, key: &BindingKey, report: &mut ValidationReport) {
        let Some((lifetime, resolving, has_instance)) = self
            .bindings
            .get(key)
            .map(|e| (e.lifetime, e.resolving.name(), e.instance.is_some()))
        else {
            return;
        };
        if has_instance {
            return;
        }

        let mut dependencies = Vec::new();
        match self.constructor_plan(key) {
            Ok(plan) => dependencies.extend(plan.params.iter().cloned()),
            Err(candidates) => report.errors.push(ValidationError::Unresolvable {
                binding: key.to_string(),
                resolving,
                candidates,
            }),
        }

        match self.binding_members(key) {
            Ok(members) => {
                for (member, dependency) in members.dependencies() {
                    if !self.bindings.contains_key(dependency) {
                        report.errors.push(ValidationError::MissingMemberDependency {
                            binding: key.to_string(),
                            member,
                            dependency: dependency.to_string(),
                        });
                    } else {
                        dependencies.push(dependency.clone());
                    }
                }
            }
            Err(error) => report.errors.push(ValidationError::MemberMetadata {
                binding: key.to_string(),
                error,
            }),
        }

        if lifetime == Lifetime::Singleton {
            for dependency in dependencies {
                let transient = self
                    .bindings
                    .get(&dependency)
                    .map_or(false, |e| e.lifetime == Lifetime::Transient);
                if transient {
                    report.warnings.push(ValidationWarning::SingletonDependsOnTransient {
                        singleton: key.to_string(),
                        transient: dependency.to_string(),
                    });
                }
            }
        }
    }
}
