//! Mappers: ordered per-attribute rules applied from a source to a target.
//!
//! A [`Mapper`] is built once through [`MapperBuilder`] and applied many
//! times. Rules run in declaration order and must not depend on each other.
//! Type-level mappers implement [`MapperDefinition`] instead of building by
//! hand.

mod builder;
mod definition;

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::error::AttributeError;
use crate::type_key::TypeKey;

pub use builder::MapperBuilder;
pub use definition::MapperDefinition;

type RuleFn<S, T> = dyn Fn(&S, &mut T) -> Result<(), AttributeError> + Send + Sync;

/// A single named rule.
pub(crate) struct Rule<S, T> {
    name: String,
    apply: Box<RuleFn<S, T>>,
}

/// Rule set converting `S` values into `T` values.
pub struct Mapper<S, T> {
    name: String,
    rules: Vec<Rule<S, T>>,
    // `fn` pointer keeps `Mapper` Send + Sync whatever `S` and `T` are.
    _types: PhantomData<fn(&S, &mut T)>,
}

impl<S: 'static, T: 'static> Mapper<S, T> {
    pub fn builder(name: impl Into<String>) -> MapperBuilder<S, T> {
        MapperBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_type(&self) -> TypeKey {
        TypeKey::of::<S>()
    }

    pub fn target_type(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    /// Rule names in execution order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `from` and `to`, stopping at the first error.
    ///
    /// Writes made by rules before the failing one stay in `to`.
    pub fn apply(&self, from: &S, to: &mut T) -> Result<(), AttributeError> {
        for rule in &self.rules {
            trace!(mapper = %self.name, rule = %rule.name, "applying rule");
            (rule.apply)(from, to)?;
        }
        Ok(())
    }

    /// Map onto a copy of `to`; the instance passed in is left untouched.
    pub fn map(&self, from: &S, to: &T) -> Result<T, AttributeError>
    where
        T: Clone,
    {
        let mut target = to.clone();
        self.apply(from, &mut target)?;
        Ok(target)
    }

    /// Map into a blank `T::default()`.
    pub fn map_new(&self, from: &S) -> Result<T, AttributeError>
    where
        T: Default,
    {
        let mut target = T::default();
        self.apply(from, &mut target)?;
        Ok(target)
    }

    /// Map directly into `to` and hand the same reference back.
    pub fn map_in_place<'t>(&self, from: &S, to: &'t mut T) -> Result<&'t mut T, AttributeError> {
        self.apply(from, to)?;
        Ok(to)
    }
}

impl<S, T> fmt::Debug for Mapper<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("name", &self.name)
            .field(
                "rules",
                &self.rules.iter().map(|rule| &rule.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Bar, Foo, foo_to_bar_mapper};

    #[test]
    fn map_new_builds_blank_target() {
        let mapper = foo_to_bar_mapper();
        let foo = Foo::new(1, "Foo");

        let bar = mapper.map_new(&foo).expect("map");
        assert_eq!(bar, Bar::new(1, "Foo"));
        assert_eq!(foo, Foo::new(1, "Foo"));
    }

    #[test]
    fn map_leaves_given_target_untouched() {
        let mapper = foo_to_bar_mapper();
        let foo = Foo::new(1, "Foo");
        let bar = Bar::new(2, "");

        let mapped = mapper.map(&foo, &bar).expect("map");
        assert_eq!(mapped, Bar::new(1, "Foo"));
        assert_eq!(bar, Bar::new(2, ""));
    }

    #[test]
    fn map_in_place_returns_the_same_instance() {
        let mapper = foo_to_bar_mapper();
        let foo = Foo::new(3, "three");
        let mut bar = Bar::new(2, "");
        let expected: *const Bar = &bar;

        let returned = mapper.map_in_place(&foo, &mut bar).expect("map");
        assert!(std::ptr::eq(returned, expected));
        assert_eq!(bar, Bar::new(3, "three"));
    }

    #[test]
    fn type_and_blank_instance_targets_agree() {
        let mapper = foo_to_bar_mapper();
        let foo = Foo::new(9, "nine");
        assert_eq!(
            mapper.map_new(&foo).expect("new"),
            mapper.map(&foo, &Bar::default()).expect("instance")
        );
    }

    #[test]
    fn rules_run_in_declaration_order() {
        let mapper = Mapper::<Foo, Vec<String>>::builder("Trace")
            .rule("first", |_, out: &mut Vec<String>| {
                out.push("first".to_string());
                Ok(())
            })
            .rule("second", |_, out: &mut Vec<String>| {
                out.push("second".to_string());
                Ok(())
            })
            .build()
            .expect("build");

        let out = mapper.map_new(&Foo::default()).expect("map");
        assert_eq!(out, ["first", "second"]);
        assert_eq!(mapper.rule_names().collect::<Vec<_>>(), ["first", "second"]);
    }

    #[test]
    fn failing_rule_keeps_earlier_writes() {
        let mapper = Mapper::<Foo, Bar>::builder("Partial")
            .one_to_one("id")
            .one_to_one("foo_name")
            .build()
            .expect("build");
        let mut bar = Bar::default();

        let err = mapper
            .map_in_place(&Foo::new(5, "five"), &mut bar)
            .unwrap_err();
        assert_eq!(err.to_string(), "undefined attribute `foo_name` for Bar");
        assert_eq!(bar.id, 5);
    }

    #[test]
    fn debug_lists_rule_names() {
        let rendered = format!("{:?}", foo_to_bar_mapper());
        assert!(rendered.contains("FooToBarMapper"));
        assert!(rendered.contains("\"id\""));
        assert!(rendered.contains("\"name\""));
    }
}
