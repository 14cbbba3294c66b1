//! Constructor selection and construction.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::BindingKey;
use crate::metadata::ConstructorPlan;
use crate::reflect::{Arguments, AnyBox, ConstructorInfo, TypeInfo, Visibility};
use crate::registration::{BindingEntry, Registry};
use crate::validation::{CandidateRejection, Rejection};

use super::Container;

/// Picks the first eligible constructor: marked candidates first, then
/// unmarked public ones, each group in declaration order.
pub(crate) fn select_constructor(
    info: &TypeInfo,
    binding: &BindingKey,
    resolving: &BindingKey,
    bindings: &Registry<BindingEntry>,
) -> Result<ConstructorPlan, Vec<CandidateRejection>> {
    let constructors = info.constructors().iter().enumerate();
    let marked = constructors.clone().filter(|(_, c)| c.marker().is_some());
    let unmarked = constructors.filter(|(_, c)| c.marker().is_none());

    let mut rejections = Vec::new();
    for (index, constructor) in marked.chain(unmarked) {
        match check_candidate(constructor, binding, resolving, bindings) {
            Ok(()) => return Ok(ConstructorPlan::new(constructor)),
            Err(reason) => rejections.push(CandidateRejection {
                constructor: index,
                reason,
            }),
        }
    }
    Err(rejections)
}

fn check_candidate(
    constructor: &ConstructorInfo,
    binding: &BindingKey,
    resolving: &BindingKey,
    bindings: &Registry<BindingEntry>,
) -> Result<(), Rejection> {
    match constructor.marker() {
        None if constructor.visibility() == Visibility::Private => {
            return Err(Rejection::PrivateUnmarked);
        }
        Some(marker) => {
            if let (Some(expected), Some(found)) = (binding.qualifier(), marker.id.as_deref()) {
                if expected != found {
                    return Err(Rejection::QualifierMismatch {
                        expected: expected.to_owned(),
                        found: found.to_owned(),
                    });
                }
            }
        }
        None => {}
    }

    for (index, param) in constructor.params().iter().enumerate() {
        if param.ty.is_leaf() {
            return Err(Rejection::LeafParameter {
                index,
                ty: param.ty.name(),
            });
        }
        let key = param.binding_key();
        if !bindings.contains_key(&key) {
            return Err(Rejection::MissingBinding {
                index,
                dependency: key.to_string(),
            });
        }
        if &key == binding || &key == resolving {
            return Err(Rejection::SelfReference {
                index,
                dependency: key.to_string(),
            });
        }
    }
    Ok(())
}

impl Container {
    /// The memoized constructor plan of a binding, computed on first use.
    ///
    /// A failed selection is not memoized, so bindings added later can make
    /// the binding resolvable.
    pub(crate) fn constructor_plan(
        &self,
        key: &BindingKey,
    ) -> Result<Arc<ConstructorPlan>, Vec<CandidateRejection>> {
        let (info, binding, resolving) = {
            let Some(entry) = self.bindings.get(key) else {
                return Err(Vec::new());
            };
            if let Some(plan) = entry.metadata.constructor.get() {
                return Ok(plan.clone());
            }
            let Some(info) = entry.type_info() else {
                return Err(Vec::new());
            };
            (info, entry.key.clone(), entry.resolving_key())
        };

        let plan = Arc::new(select_constructor(&info, &binding, &resolving, &self.bindings)?);
        if let Some(entry) = self.bindings.get(key) {
            let _ = entry.metadata.constructor.set(plan.clone());
        }
        Ok(plan)
    }

    /// Resolves the plan's parameters and invokes the constructor.
    pub(crate) fn construct(&mut self, key: &BindingKey, resolving: &'static str) -> DiResult<AnyBox> {
        let plan = self
            .constructor_plan(key)
            .map_err(|_| DiError::Unresolvable(resolving))?;

        let mut values = Vec::with_capacity(plan.params.len());
        for param in &plan.params {
            values.push(self.resolve_key(param)?);
        }
        (plan.constructor.invoke)(&mut Arguments::new(values))
    }
}
