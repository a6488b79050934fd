//! Error types for attribute access, mapper definition and registry lookup.

use crate::type_key::TypeKey;

/// Failure reading or writing a named attribute during rule execution.
///
/// Mappers never wrap or translate these; they reach the caller exactly as the
/// [`Attributes`](crate::Attributes) implementation produced them.
#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    #[error("undefined attribute `{attribute}` for {type_name}")]
    Missing {
        type_name: String,
        attribute: String,
    },

    #[error("attribute `{attribute}` of {type_name} is read-only")]
    ReadOnly {
        type_name: String,
        attribute: String,
    },

    /// The value could not be converted to or from the field's type.
    #[error("invalid value for `{attribute}` of {type_name}: {source}")]
    Invalid {
        type_name: String,
        attribute: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AttributeError {
    pub fn missing(type_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::Missing {
            type_name: type_name.into(),
            attribute: attribute.into(),
        }
    }

    pub fn read_only(type_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::ReadOnly {
            type_name: type_name.into(),
            attribute: attribute.into(),
        }
    }
}

/// Errors raised while declaring a mapper's rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("mapper {mapper}: `{attribute}` is not a valid attribute name")]
    InvalidAttributeName { mapper: String, attribute: String },

    #[error("mapper {mapper}: `{rule}` is not a valid rule name")]
    InvalidRuleName { mapper: String, rule: String },

    #[error("mapper {mapper}: rule `{rule}` is declared more than once")]
    DuplicateRule { mapper: String, rule: String },
}

/// Errors raised by [`MapperRegistry`](crate::MapperRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The mapper name does not follow the `<Source><separator><Target><suffix>` format.
    #[error("mapper name must be on format [Foo]{separator}[Bar]{suffix}")]
    InvalidMapperName {
        name: String,
        separator: String,
        suffix: String,
    },

    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    #[error("no mapper found ({source_type} → {target_type})")]
    MapperNotFound {
        source_type: TypeKey,
        target_type: TypeKey,
    },

    #[error(
        "mapper {mapper} maps {mapper_source} → {mapper_target} but was registered for {source_type} → {target_type}"
    )]
    BindingMismatch {
        mapper: String,
        mapper_source: TypeKey,
        mapper_target: TypeKey,
        source_type: TypeKey,
        target_type: TypeKey,
    },

    #[error("mapper {existing} is already registered for {source_type} → {target_type}")]
    DuplicateBinding {
        existing: String,
        source_type: TypeKey,
        target_type: TypeKey,
    },
}

/// Any failure of a one-call mapping: definition, lookup or attribute access.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),
}
