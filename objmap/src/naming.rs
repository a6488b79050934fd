//! Mapper naming convention: `<Source><separator><Target><suffix>`.
//!
//! With the default convention `FooToBarMapper` names a mapper from `Foo` to
//! `Bar`. Parsing is purely textual; resolving the names to types is the
//! registry's job.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::NamingConfig;
use crate::error::RegistryError;

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// True if `name` is a plain (non-raw, ASCII) Rust-style identifier.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// Source and target type names parsed from a mapper name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperName<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

/// Split a mapper name into its source and target type names.
///
/// The suffix must end the name. The separator only counts where it starts a
/// new camel-case word of the target, i.e. it is not at the very start and is
/// followed by an uppercase ASCII letter, so `TodoToTokenMapper` splits into
/// `Todo` and `Token`. Exactly one such separator must exist; names such as
/// `FooToBarToBazMapper` are ambiguous and rejected.
pub fn parse_mapper_name<'a>(
    name: &'a str,
    naming: &NamingConfig,
) -> Result<MapperName<'a>, RegistryError> {
    let invalid = || RegistryError::InvalidMapperName {
        name: name.to_string(),
        separator: naming.separator.clone(),
        suffix: naming.suffix.clone(),
    };

    let stem = name
        .strip_suffix(naming.suffix.as_str())
        .ok_or_else(invalid)?;
    let separator = naming.separator.as_str();

    let mut splits = stem.match_indices(separator).filter(|(idx, _)| {
        *idx > 0
            && stem[idx + separator.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase())
    });

    let (idx, _) = splits.next().ok_or_else(invalid)?;
    if splits.next().is_some() {
        return Err(invalid());
    }

    let source = &stem[..idx];
    let target = &stem[idx + separator.len()..];
    if !is_identifier(source) || !is_identifier(target) {
        return Err(invalid());
    }

    Ok(MapperName { source, target })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> Result<MapperName<'_>, RegistryError> {
        parse_mapper_name(name, &NamingConfig::default())
    }

    #[test]
    fn splits_conventional_name() {
        assert_eq!(
            parse("FooToBarMapper").expect("parse"),
            MapperName {
                source: "Foo",
                target: "Bar"
            }
        );
    }

    #[test]
    fn ignores_separator_inside_words() {
        let parsed = parse("TodoToTokenMapper").expect("parse");
        assert_eq!(parsed.source, "Todo");
        assert_eq!(parsed.target, "Token");

        let parsed = parse("UserAccountToTopicMapper").expect("parse");
        assert_eq!(parsed.source, "UserAccount");
        assert_eq!(parsed.target, "Topic");
    }

    #[test]
    fn rejects_names_without_the_pattern() {
        for name in [
            "CustomMapper",
            "FooToBar",
            "Mapper",
            "ToBarMapper",
            "FooToMapper",
            "FooTobarMapper",
            "FooToBarToBazMapper",
            "Foo-ToBarMapper",
        ] {
            let err = parse(name).unwrap_err();
            assert_eq!(
                err.to_string(),
                "mapper name must be on format [Foo]To[Bar]Mapper",
                "{name}"
            );
        }
    }

    #[test]
    fn custom_convention() {
        let naming = NamingConfig {
            separator: "Into".to_string(),
            suffix: "Converter".to_string(),
        };
        let parsed = parse_mapper_name("FooIntoBarConverter", &naming).expect("parse");
        assert_eq!(parsed.source, "Foo");
        assert_eq!(parsed.target, "Bar");

        let err = parse_mapper_name("FooToBarMapper", &naming).unwrap_err();
        assert_eq!(
            err.to_string(),
            "mapper name must be on format [Foo]Into[Bar]Converter"
        );
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("foo_name"));
        assert!(is_identifier("_id"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("foo-name"));
        assert!(!is_identifier(""));
    }
}
