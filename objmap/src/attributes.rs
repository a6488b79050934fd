//! Named attribute access over `serde_json::Value`.
//!
//! One-to-one rules only need to read an attribute off the source and write it
//! to the target under the same name. [`Attributes`] is that capability; most
//! types get it from [`impl_attributes!`](crate::impl_attributes) rather than
//! by hand.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AttributeError;

/// Read and write attributes by name.
pub trait Attributes {
    fn get_attr(&self, name: &str) -> Result<Value, AttributeError>;

    fn set_attr(&mut self, name: &str, value: Value) -> Result<(), AttributeError>;
}

/// Free-form records: every key is readable if present and always writable.
impl Attributes for Map<String, Value> {
    fn get_attr(&self, name: &str) -> Result<Value, AttributeError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| AttributeError::missing("Map", name))
    }

    fn set_attr(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        self.insert(name.to_string(), value);
        Ok(())
    }
}

#[doc(hidden)]
pub fn read_field<T: Serialize>(
    type_name: &str,
    attribute: &str,
    field: &T,
) -> Result<Value, AttributeError> {
    serde_json::to_value(field).map_err(|source| AttributeError::Invalid {
        type_name: type_name.to_string(),
        attribute: attribute.to_string(),
        source,
    })
}

#[doc(hidden)]
pub fn write_field<T: DeserializeOwned>(
    type_name: &str,
    attribute: &str,
    value: Value,
) -> Result<T, AttributeError> {
    serde_json::from_value(value).map_err(|source| AttributeError::Invalid {
        type_name: type_name.to_string(),
        attribute: attribute.to_string(),
        source,
    })
}

/// Implement [`Attributes`] for a struct by listing its fields.
///
/// Listed fields must be `Serialize + DeserializeOwned`. Fields in the optional
/// `readonly` group can be read but writing them fails with
/// [`AttributeError::ReadOnly`]. Unlisted names fail with
/// [`AttributeError::Missing`].
///
/// ```
/// #[derive(Default)]
/// struct Bar {
///     id: u64,
///     name: String,
///     created_at: String,
/// }
///
/// objmap::impl_attributes!(Bar { id, name } readonly { created_at });
/// ```
#[macro_export]
macro_rules! impl_attributes {
    ($ty:ty { $($field:ident),* $(,)? } readonly { $($ro:ident),* $(,)? }) => {
        impl $crate::Attributes for $ty {
            fn get_attr(
                &self,
                name: &str,
            ) -> ::std::result::Result<$crate::Value, $crate::AttributeError> {
                match name {
                    $(stringify!($field) => {
                        $crate::attributes::read_field(stringify!($ty), name, &self.$field)
                    })*
                    $(stringify!($ro) => {
                        $crate::attributes::read_field(stringify!($ty), name, &self.$ro)
                    })*
                    _ => ::std::result::Result::Err($crate::AttributeError::missing(
                        stringify!($ty),
                        name,
                    )),
                }
            }

            fn set_attr(
                &mut self,
                name: &str,
                value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::AttributeError> {
                match name {
                    $(stringify!($field) => {
                        self.$field =
                            $crate::attributes::write_field(stringify!($ty), name, value)?;
                        ::std::result::Result::Ok(())
                    })*
                    $(stringify!($ro) => ::std::result::Result::Err(
                        $crate::AttributeError::read_only(stringify!($ty), name),
                    ),)*
                    _ => ::std::result::Result::Err($crate::AttributeError::missing(
                        stringify!($ty),
                        name,
                    )),
                }
            }
        }
    };
    ($ty:ty { $($field:ident),* $(,)? }) => {
        $crate::impl_attributes!($ty { $($field),* } readonly {});
    };
}
