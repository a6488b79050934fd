use std::collections::HashSet;
use std::marker::PhantomData;

use crate::attributes::Attributes;
use crate::error::{AttributeError, DefinitionError};
use crate::naming::is_identifier;

use super::{Mapper, Rule};

/// Accumulates rule declarations for a [`Mapper`].
///
/// Declaration errors do not interrupt chaining; the first one is reported by
/// [`build`](Self::build).
pub struct MapperBuilder<S, T> {
    name: String,
    rules: Vec<Rule<S, T>>,
    seen: HashSet<String>,
    error: Option<DefinitionError>,
}

impl<S: 'static, T: 'static> MapperBuilder<S, T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            seen: HashSet::new(),
            error: None,
        }
    }

    /// Copy attribute `attr` from the source to the same-named target attribute.
    ///
    /// The rule is named after the attribute. Only the name is checked here;
    /// whether either side actually has the attribute shows up at mapping time.
    pub fn one_to_one(self, attr: &str) -> Self
    where
        S: Attributes,
        T: Attributes,
    {
        if !is_identifier(attr) {
            let err = DefinitionError::InvalidAttributeName {
                mapper: self.name.clone(),
                attribute: attr.to_string(),
            };
            return self.fail(err);
        }
        let attribute = attr.to_string();
        self.push(attr, move |from: &S, to: &mut T| {
            to.set_attr(&attribute, from.get_attr(&attribute)?)
        })
    }

    /// Add a custom rule under `name`.
    pub fn rule<F>(self, name: &str, apply: F) -> Self
    where
        F: Fn(&S, &mut T) -> Result<(), AttributeError> + Send + Sync + 'static,
    {
        if !is_identifier(name) {
            let err = DefinitionError::InvalidRuleName {
                mapper: self.name.clone(),
                rule: name.to_string(),
            };
            return self.fail(err);
        }
        self.push(name, apply)
    }

    pub fn build(self) -> Result<Mapper<S, T>, DefinitionError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(Mapper {
            name: self.name,
            rules: self.rules,
            _types: PhantomData,
        })
    }

    fn push<F>(mut self, name: &str, apply: F) -> Self
    where
        F: Fn(&S, &mut T) -> Result<(), AttributeError> + Send + Sync + 'static,
    {
        if !self.seen.insert(name.to_string()) {
            let err = DefinitionError::DuplicateRule {
                mapper: self.name.clone(),
                rule: name.to_string(),
            };
            return self.fail(err);
        }
        self.rules.push(Rule {
            name: name.to_string(),
            apply: Box::new(apply),
        });
        self
    }

    fn fail(mut self, err: DefinitionError) -> Self {
        self.error.get_or_insert(err);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Bar, Foo};

    #[test]
    fn rejects_invalid_attribute_names() {
        let err = Mapper::<Foo, Bar>::builder("FooToBarMapper")
            .one_to_one("foo-name")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::InvalidAttributeName {
                mapper: "FooToBarMapper".to_string(),
                attribute: "foo-name".to_string(),
            }
        );
    }

    #[test]
    fn rejects_duplicate_rule_names_across_forms() {
        let err = Mapper::<Foo, Bar>::builder("FooToBarMapper")
            .one_to_one("id")
            .rule("id", |_, _| Ok(()))
            .build()
            .unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateRule { ref rule, .. } if rule == "id"));
    }

    #[test]
    fn reports_first_error_only() {
        let err = Mapper::<Foo, Bar>::builder("M")
            .rule("", |_, _| Ok(()))
            .one_to_one("1d")
            .build()
            .unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidRuleName { .. }));
    }

    #[test]
    fn empty_builder_yields_empty_mapper() {
        let mapper = Mapper::<Foo, Bar>::builder("Noop").build().expect("build");
        assert!(mapper.is_empty());
        assert_eq!(
            mapper.map_new(&Foo::new(1, "x")).expect("map"),
            Bar::default()
        );
    }
}
