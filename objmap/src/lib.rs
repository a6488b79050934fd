//! Rule-based object-to-object mapping.
//!
//! A [`Mapper`] holds an ordered list of per-attribute rules that copy or
//! transform data from a source value into a target value. A
//! [`MapperRegistry`] binds mappers to (source type, target type) pairs so the
//! right rules can be found from the types alone:
//!
//! - **[`mapper`]**: rule declaration ([`MapperBuilder`], [`MapperDefinition`])
//!   and execution (`map`, `map_new`, `map_in_place`).
//! - **[`registry`]**: registration, explicit or inferred from names like
//!   `FooToBarMapper` via [`naming`], and first-match lookup.
//! - **[`attributes`]**: the name-based get/set capability behind one-to-one
//!   rules.
//!
//! ```
//! use objmap::{MapperBuilder, MapperDefinition, MapperRegistry};
//!
//! #[derive(Debug, Default)]
//! struct Foo { id: u64, foo_name: String }
//! #[derive(Debug, Default, PartialEq)]
//! struct Bar { id: u64, name: String }
//!
//! objmap::impl_attributes!(Foo { id, foo_name });
//! objmap::impl_attributes!(Bar { id, name });
//!
//! struct FooToBarMapper;
//!
//! impl MapperDefinition for FooToBarMapper {
//!     type Source = Foo;
//!     type Target = Bar;
//!
//!     fn define(builder: MapperBuilder<Foo, Bar>) -> MapperBuilder<Foo, Bar> {
//!         builder.one_to_one("id").rule("name", |foo, bar| {
//!             bar.name = foo.foo_name.clone();
//!             Ok(())
//!         })
//!     }
//! }
//!
//! let mut registry = MapperRegistry::new();
//! registry.register_type::<Foo>().register_type::<Bar>();
//! registry.register_definition::<FooToBarMapper>()?;
//!
//! let foo = Foo { id: 1, foo_name: "Foo".to_string() };
//! let bar: Bar = registry.map_new(&foo)?;
//! assert_eq!(bar, Bar { id: 1, name: "Foo".to_string() });
//! # Ok::<(), objmap::MapError>(())
//! ```

pub mod attributes;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod naming;
pub mod registry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod type_key;

pub use attributes::Attributes;
pub use config::{DuplicatePolicy, MappingConfig, NamingConfig};
pub use error::{AttributeError, DefinitionError, MapError, RegistryError};
pub use mapper::{Mapper, MapperBuilder, MapperDefinition};
pub use registry::{Binding, MapperRegistry};
pub use serde_json::Value;
pub use type_key::{TypeKey, TypeTable};
