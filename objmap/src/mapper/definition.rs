use crate::error::{DefinitionError, MapError};
use crate::type_key::short_type_name;

use super::{Mapper, MapperBuilder};

/// A mapper declared as a type.
///
/// The implementing type names the mapper, which lets the registry infer the
/// source and target from names like `FooToBarMapper`. Its rules come from
/// [`define`](Self::define). The associated functions build a fresh mapper per
/// call and delegate to it; mappers carry no state of their own, so this is
/// equivalent to reusing one.
///
/// ```
/// use objmap::{Mapper, MapperBuilder, MapperDefinition};
///
/// #[derive(Default)]
/// struct Celsius(f64);
/// #[derive(Default, Debug, PartialEq)]
/// struct Fahrenheit(f64);
///
/// struct CelsiusToFahrenheitMapper;
///
/// impl MapperDefinition for CelsiusToFahrenheitMapper {
///     type Source = Celsius;
///     type Target = Fahrenheit;
///
///     fn define(builder: MapperBuilder<Celsius, Fahrenheit>) -> MapperBuilder<Celsius, Fahrenheit> {
///         builder.rule("degrees", |c, f| {
///             f.0 = c.0 * 9.0 / 5.0 + 32.0;
///             Ok(())
///         })
///     }
/// }
///
/// let f = CelsiusToFahrenheitMapper::map_new(&Celsius(100.0)).unwrap();
/// assert_eq!(f, Fahrenheit(212.0));
/// ```
pub trait MapperDefinition: 'static {
    type Source: 'static;
    type Target: 'static;

    fn define(
        builder: MapperBuilder<Self::Source, Self::Target>,
    ) -> MapperBuilder<Self::Source, Self::Target>;

    fn name() -> String {
        short_type_name::<Self>().to_string()
    }

    fn mapper() -> Result<Mapper<Self::Source, Self::Target>, DefinitionError> {
        Self::define(Mapper::builder(Self::name())).build()
    }

    fn map(from: &Self::Source, to: &Self::Target) -> Result<Self::Target, MapError>
    where
        Self::Target: Clone,
    {
        Ok(Self::mapper()?.map(from, to)?)
    }

    fn map_new(from: &Self::Source) -> Result<Self::Target, MapError>
    where
        Self::Target: Default,
    {
        Ok(Self::mapper()?.map_new(from)?)
    }

    fn map_in_place<'t>(
        from: &Self::Source,
        to: &'t mut Self::Target,
    ) -> Result<&'t mut Self::Target, MapError> {
        Ok(Self::mapper()?.map_in_place(from, to)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Bar, Foo, FooToBarMapper};

    #[test]
    fn name_defaults_to_the_type_name() {
        assert_eq!(FooToBarMapper::name(), "FooToBarMapper");
        assert_eq!(
            FooToBarMapper::mapper().expect("build").name(),
            "FooToBarMapper"
        );
    }

    #[test]
    fn static_forms_delegate_to_a_built_mapper() {
        let foo = Foo::new(1, "Foo");
        assert_eq!(
            FooToBarMapper::map_new(&foo).expect("new"),
            Bar::new(1, "Foo")
        );
        assert_eq!(
            FooToBarMapper::map(&foo, &Bar::new(4, "old")).expect("map"),
            Bar::new(1, "Foo")
        );

        let mut bar = Bar::new(4, "old");
        FooToBarMapper::map_in_place(&foo, &mut bar).expect("in place");
        assert_eq!(bar, Bar::new(1, "Foo"));
    }

    struct BrokenMapper;

    impl MapperDefinition for BrokenMapper {
        type Source = Foo;
        type Target = Bar;

        fn define(builder: MapperBuilder<Foo, Bar>) -> MapperBuilder<Foo, Bar> {
            builder.one_to_one("not an attr")
        }
    }

    #[test]
    fn definition_errors_surface_from_static_forms() {
        let err = BrokenMapper::map_new(&Foo::default()).unwrap_err();
        assert!(matches!(
            err,
            MapError::Definition(DefinitionError::InvalidAttributeName { .. })
        ));
    }
}
