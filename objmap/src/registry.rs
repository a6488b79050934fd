//! Registry of mappers keyed by (source type, target type).
//!
//! Bindings are kept in registration order and lookup returns the first exact
//! match, so with the default [`DuplicatePolicy::Shadow`] a later binding for
//! an already bound pair is never returned. The registry is an ordinary value:
//! build one at start-up and pass it to whatever needs to map.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{DuplicatePolicy, MappingConfig};
use crate::error::{MapError, RegistryError};
use crate::mapper::{Mapper, MapperDefinition};
use crate::naming::parse_mapper_name;
use crate::type_key::{TypeKey, TypeTable};

/// One registered mapper and the type pair it is found under.
pub struct Binding {
    mapper: Arc<dyn Any + Send + Sync>,
    mapper_name: String,
    source: TypeKey,
    target: TypeKey,
}

impl Binding {
    pub fn mapper_name(&self) -> &str {
        &self.mapper_name
    }

    pub fn source_type(&self) -> TypeKey {
        self.source
    }

    pub fn target_type(&self) -> TypeKey {
        self.target
    }

    /// The bound mapper, if it maps `S` to `T`.
    pub fn mapper<S: 'static, T: 'static>(&self) -> Option<Arc<Mapper<S, T>>> {
        Arc::clone(&self.mapper).downcast::<Mapper<S, T>>().ok()
    }

    fn matches(&self, source: TypeKey, target: TypeKey) -> bool {
        self.source == source && self.target == target
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("mapper", &self.mapper_name)
            .field("source", &self.source)
            .field("target", &self.target)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct MapperRegistry {
    bindings: Vec<Binding>,
    types: TypeTable,
    config: MappingConfig,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MappingConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Names available to mapper-name inference.
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Make `T` resolvable by its short type name during inference.
    pub fn register_type<T: ?Sized + 'static>(&mut self) -> &mut Self {
        self.types.insert::<T>();
        self
    }

    /// Make `T` resolvable as `name`, e.g. for types whose short names clash.
    pub fn register_type_as<T: ?Sized + 'static>(&mut self, name: &'static str) -> &mut Self {
        self.types.insert_as(name, TypeKey::named::<T>(name));
        self
    }

    /// Register `mapper` under an explicit or inferred type pair.
    ///
    /// With both `source` and `target` given the binding uses them as is.
    /// Otherwise both are inferred from the mapper's name (see
    /// [`parse_mapper_name`]) and resolved through [`types`](Self::types);
    /// passing only one of them counts as passing neither.
    ///
    /// The resulting pair must be the mapper's own `S` and `T`.
    pub fn register<S: 'static, T: 'static>(
        &mut self,
        mapper: Mapper<S, T>,
        source: Option<TypeKey>,
        target: Option<TypeKey>,
    ) -> Result<&mut Self, RegistryError> {
        let (source, target) = match (source, target) {
            (Some(source), Some(target)) => (source, target),
            _ => self.infer_types(mapper.name())?,
        };

        if source != mapper.source_type() || target != mapper.target_type() {
            return Err(RegistryError::BindingMismatch {
                mapper: mapper.name().to_string(),
                mapper_source: mapper.source_type(),
                mapper_target: mapper.target_type(),
                source_type: source,
                target_type: target,
            });
        }

        if let Some(existing) = self.bindings.iter().find(|b| b.matches(source, target)) {
            match self.config.duplicates {
                DuplicatePolicy::Reject => {
                    return Err(RegistryError::DuplicateBinding {
                        existing: existing.mapper_name.clone(),
                        source_type: source,
                        target_type: target,
                    });
                }
                DuplicatePolicy::Shadow => warn!(
                    mapper = %mapper.name(),
                    existing = %existing.mapper_name,
                    %source,
                    %target,
                    "mapper shadowed by an earlier registration"
                ),
            }
        }

        debug!(mapper = %mapper.name(), %source, %target, "registered mapper");
        self.bindings.push(Binding {
            mapper_name: mapper.name().to_string(),
            mapper: Arc::new(mapper),
            source,
            target,
        });
        Ok(self)
    }

    /// Build a [`MapperDefinition`] and register it under its inferred types.
    pub fn register_definition<D: MapperDefinition>(&mut self) -> Result<&mut Self, MapError> {
        let mapper = D::mapper()?;
        Ok(self.register(mapper, None, None)?)
    }

    /// First binding registered for exactly `source` → `target`.
    pub fn find_binding(
        &self,
        source: TypeKey,
        target: TypeKey,
    ) -> Result<&Binding, RegistryError> {
        let binding = self
            .bindings
            .iter()
            .find(|b| b.matches(source, target))
            .ok_or(RegistryError::MapperNotFound {
                source_type: source,
                target_type: target,
            })?;
        debug!(mapper = %binding.mapper_name, %source, %target, "found mapper");
        Ok(binding)
    }

    pub fn find<S: 'static, T: 'static>(&self) -> Result<Arc<Mapper<S, T>>, RegistryError> {
        let (source, target) = (TypeKey::of::<S>(), TypeKey::of::<T>());
        self.find_binding(source, target)?
            .mapper::<S, T>()
            .ok_or(RegistryError::MapperNotFound {
                source_type: source,
                target_type: target,
            })
    }

    /// Registered bindings in registration order.
    pub fn mappers(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drop every binding. Registered type names and config are kept.
    pub fn reset(&mut self) {
        debug!(dropped = self.bindings.len(), "resetting mapper registry");
        self.bindings.clear();
    }

    /// Look up the `S` → `T` mapper and map onto a copy of `to`.
    pub fn map<S: 'static, T: Clone + 'static>(&self, from: &S, to: &T) -> Result<T, MapError> {
        Ok(self.find::<S, T>()?.map(from, to)?)
    }

    /// Look up the `S` → `T` mapper and map into `T::default()`.
    pub fn map_new<S: 'static, T: Default + 'static>(&self, from: &S) -> Result<T, MapError> {
        Ok(self.find::<S, T>()?.map_new(from)?)
    }

    /// Look up the `S` → `T` mapper and map directly into `to`.
    pub fn map_in_place<'t, S: 'static, T: 'static>(
        &self,
        from: &S,
        to: &'t mut T,
    ) -> Result<&'t mut T, MapError> {
        Ok(self.find::<S, T>()?.map_in_place(from, to)?)
    }

    fn infer_types(&self, mapper_name: &str) -> Result<(TypeKey, TypeKey), RegistryError> {
        let parsed = parse_mapper_name(mapper_name, &self.config.naming)?;
        let resolve = |name: &str| {
            let unknown = || RegistryError::UnknownType {
                name: name.to_string(),
            };
            self.types.get(name).ok_or_else(unknown)
        };
        Ok((resolve(parsed.source)?, resolve(parsed.target)?))
    }
}
