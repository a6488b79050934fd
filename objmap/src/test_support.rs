//! Test-only fixture types and mappers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::mapper::{Mapper, MapperBuilder, MapperDefinition};
use crate::registry::MapperRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Foo {
    pub id: u64,
    pub foo_name: String,
}

impl Foo {
    pub fn new(id: u64, foo_name: &str) -> Self {
        Self {
            id,
            foo_name: foo_name.to_string(),
        }
    }
}

crate::impl_attributes!(Foo { id, foo_name });

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bar {
    pub id: u64,
    pub name: String,
}

impl Bar {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

crate::impl_attributes!(Bar { id, name });

/// `id` one-to-one, `name` taken from `foo_name`.
pub struct FooToBarMapper;

impl MapperDefinition for FooToBarMapper {
    type Source = Foo;
    type Target = Bar;

    fn define(builder: MapperBuilder<Foo, Bar>) -> MapperBuilder<Foo, Bar> {
        builder.one_to_one("id").rule("name", |foo, bar| {
            bar.name = foo.foo_name.clone();
            Ok(())
        })
    }
}

/// The [`FooToBarMapper`] rules as a built mapper.
pub fn foo_to_bar_mapper() -> Mapper<Foo, Bar> {
    match FooToBarMapper::mapper() {
        Ok(mapper) => mapper,
        Err(err) => panic!("fixture mapper must build: {err}"),
    }
}

/// Empty registry that can resolve `Foo` and `Bar` by name.
pub fn registry_with_fixtures() -> MapperRegistry {
    let mut registry = MapperRegistry::new();
    registry.register_type::<Foo>().register_type::<Bar>();
    registry
}

/// Write `contents` to `objmap.toml` in a fresh temp dir.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn temp_config(contents: &str) -> Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("objmap.toml");
    std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}
