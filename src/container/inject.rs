//! Field, property and method injection.

use std::any::Any;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::BindingKey;
use crate::metadata::MemberPlan;
use crate::reflect::Arguments;
use crate::registration::InjectionEntry;
use crate::traits::{Component, ComponentHost, Injectable};

use super::Container;

impl Container {
    /// The memoized member plan of a binding's resolving type.
    ///
    /// A binding without a concrete type has nothing to inject.
    pub(crate) fn binding_members(&self, key: &BindingKey) -> DiResult<Arc<MemberPlan>> {
        let Some(entry) = self.bindings.get(key) else {
            return Ok(Arc::default());
        };
        if let Some(plan) = entry.metadata.members.get() {
            return Ok(plan.clone());
        }
        let Some(info) = entry.type_info() else {
            return Ok(Arc::default());
        };

        let plan = Arc::new(MemberPlan::from_info(&info)?);
        let _ = entry.metadata.members.set(plan.clone());
        Ok(plan)
    }

    /// Resolves every member dependency and assigns it into `target`.
    ///
    /// Passes run in order: fields, then properties, then methods.
    pub(crate) fn apply_members(&mut self, plan: &MemberPlan, target: &mut dyn Any) -> DiResult<()> {
        for (slot, key) in plan.fields.iter().chain(plan.properties.iter()) {
            let value = self.resolve_key(key)?;
            (slot.set)(&mut *target, &value)?;
        }

        for (method, keys) in &plan.methods {
            let mut values = Vec::with_capacity(keys.len());
            for key in keys {
                values.push(self.resolve_key(key)?);
            }
            (method.invoke)(&mut *target, &mut Arguments::new(values))?;
        }
        Ok(())
    }

    /// Injects marked members of an instance the container did not construct.
    ///
    /// `id` partitions the memoized metadata: it is computed once per
    /// `(type, id)` pair. Types without injectable members are skipped
    /// without rescanning.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_wire::{Container, Field, Injectable, TypeInfo};
    /// use std::sync::Arc;
    ///
    /// struct Audio;
    ///
    /// #[derive(Default)]
    /// struct Player { audio: Option<Arc<Audio>> }
    ///
    /// impl Injectable for Player {
    ///     fn type_info() -> TypeInfo {
    ///         TypeInfo::builder::<Self>()
    ///             .field(Field::new("audio", |p: &mut Self, a: Arc<Audio>| p.audio = Some(a)))
    ///             .build()
    ///     }
    /// }
    ///
    /// let mut container = Container::new();
    /// container.bind::<Audio>().unwrap().as_instance(Arc::new(Audio)).unwrap();
    ///
    /// let mut player = Player::default();
    /// container.inject_into_instance(&mut player, None).unwrap();
    /// assert!(player.audio.is_some());
    /// ```
    pub fn inject_into_instance<T: Injectable>(&mut self, instance: &mut T, id: Option<&str>) -> DiResult<()> {
        self.inject_into_component(instance, id)
    }

    /// Injects into a type-erased component.
    pub fn inject_into_component(
        &mut self,
        component: &mut (dyn Component + 'static),
        id: Option<&str>,
    ) -> DiResult<()> {
        self.commit_staged()?;

        let ty = component.component_type();
        let key = BindingKey::new(ty, id);
        let members = match self.injections.get(&key) {
            Some(entry) => entry.members.clone(),
            None => {
                let plan = Arc::new(MemberPlan::from_info(&component.component_info())?);
                self.injections.try_insert(
                    key,
                    InjectionEntry {
                        members: plan.clone(),
                    },
                )?;
                plan
            }
        };
        if members.is_empty() {
            return Ok(());
        }

        self.apply_members(&members, component.as_any_mut())?;
        self.observers.injected(ty, members.len());
        Ok(())
    }

    /// Injects into every component attached to `host`.
    ///
    /// Stops at the first component that fails.
    pub fn inject_into_container<H>(&mut self, host: &mut H, id: Option<&str>) -> DiResult<()>
    where
        H: ComponentHost + ?Sized,
    {
        for component in host.components_mut() {
            self.inject_into_component(component, id)?;
        }
        Ok(())
    }
}
