//! Memoized plans derived from a [`TypeInfo`](crate::TypeInfo).
//!
//! A plan is what the container actually executes: the selected constructor
//! with its resolved parameter keys, and the member targets with the keys
//! their values resolve through.

use crate::error::{DiError, DiResult};
use crate::key::BindingKey;
use crate::reflect::{ConstructorInfo, MethodInfo, SlotInfo, TypeInfo};

/// The constructor chosen for a binding.
pub(crate) struct ConstructorPlan {
    pub(crate) constructor: ConstructorInfo,
    pub(crate) params: Vec<BindingKey>,
}

impl ConstructorPlan {
    pub(crate) fn new(constructor: &ConstructorInfo) -> Self {
        Self {
            params: constructor.params.iter().map(|p| p.binding_key()).collect(),
            constructor: constructor.clone(),
        }
    }
}

/// Injection targets of one type, in pass order: fields, properties, methods.
#[derive(Default)]
pub(crate) struct MemberPlan {
    pub(crate) fields: Vec<(SlotInfo, BindingKey)>,
    pub(crate) properties: Vec<(SlotInfo, BindingKey)>,
    pub(crate) methods: Vec<(MethodInfo, Vec<BindingKey>)>,
}

impl MemberPlan {
    /// Builds the plan, failing on a property without backing storage.
    pub(crate) fn from_info(info: &TypeInfo) -> DiResult<Self> {
        let fields = info
            .fields()
            .iter()
            .map(|f| (f.clone(), f.binding_key()))
            .collect();

        let mut properties = Vec::with_capacity(info.properties().len());
        for property in info.properties() {
            if !property.has_storage() {
                return Err(DiError::MetadataAccess {
                    ty: info.type_key().name(),
                    member: property.name(),
                });
            }
            properties.push((property.slot.clone(), property.binding_key()));
        }

        let methods = info
            .methods()
            .iter()
            .map(|m| {
                let params = m.effective_params().iter().map(|p| p.binding_key()).collect();
                (m.clone(), params)
            })
            .collect();

        Ok(Self {
            fields,
            properties,
            methods,
        })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.properties.is_empty() && self.methods.is_empty()
    }

    /// Number of injection targets.
    pub(crate) fn len(&self) -> usize {
        self.fields.len() + self.properties.len() + self.methods.len()
    }

    /// Every key a member injection resolves, with the member it belongs to.
    pub(crate) fn dependencies(&self) -> Vec<(&'static str, &BindingKey)> {
        let slots = self
            .fields
            .iter()
            .chain(self.properties.iter())
            .map(|(slot, key)| (slot.name(), key));
        let params = self
            .methods
            .iter()
            .flat_map(|(method, keys)| keys.iter().map(move |key| (method.name(), key)));
        slots.chain(params).collect()
    }
}
