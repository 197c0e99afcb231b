//! Dependency entries in the host project's `package.json`.
//!
//! Modules bring their own runtime dependencies into the host project. Merging
//! only ever touches the `dependencies` table: every other key, including
//! `devDependencies`, is carried through unchanged. Names in an exclusion list are
//! never written, which is how a module keeps its build-time helpers (such as
//! this crate's own npm wrapper) out of the host project.

mod installer;

pub use installer::DependencyInstaller;

use anyhow::Result;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

use crate::utils::{read_json_file, serialize_with_key_at, take_key, write_json_file};

const DEPENDENCIES_KEY: &str = "dependencies";

/// The host `package.json`.
///
/// `dependencies` is written back at the position it was read from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct PackageManifest {
    /// Runtime dependencies: package name to version spec.
    pub dependencies: Option<Map<String, Value>>,

    /// Every other key, preserved verbatim.
    pub other: Map<String, Value>,

    dependencies_at: Option<usize>,
}

impl PartialEq for PackageManifest {
    fn eq(&self, other: &Self) -> bool {
        self.dependencies == other.dependencies && self.other == other.other
    }
}

impl TryFrom<Map<String, Value>> for PackageManifest {
    type Error = serde_json::Error;

    fn try_from(mut other: Map<String, Value>) -> Result<Self, Self::Error> {
        let (dependencies_at, dependencies) = match take_key(&mut other, DEPENDENCIES_KEY) {
            Some((index, value)) => (Some(index), serde_json::from_value(value)?),
            None => (None, None),
        };
        Ok(Self {
            dependencies,
            other,
            dependencies_at,
        })
    }
}

impl Serialize for PackageManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_with_key_at(
            serializer,
            &self.other,
            DEPENDENCIES_KEY,
            self.dependencies.as_ref(),
            self.dependencies_at,
        )
    }
}

impl PackageManifest {
    /// Read and parse `package.json`.
    pub async fn load(path: &Path) -> Result<Self> {
        read_json_file(path).await
    }

    /// Write `package.json` as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_file(path, self)
    }

    /// Runtime dependency table; empty when absent.
    #[must_use]
    pub fn dependencies(&self) -> &Map<String, Value> {
        static EMPTY: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);
        self.dependencies.as_ref().unwrap_or(&EMPTY)
    }

    /// Copy every `incoming` entry not named in `excluded` into `dependencies`,
    /// overwriting existing versions. Returns how many entries were written.
    pub fn merge_dependencies<S: AsRef<str>>(
        &mut self,
        incoming: &Map<String, Value>,
        excluded: &[S],
    ) -> usize {
        let mut written = 0;
        for (name, version) in incoming {
            if is_excluded(name, excluded) {
                tracing::debug!("not adding excluded dependency {name}");
                continue;
            }
            self.dependencies
                .get_or_insert_with(Map::new)
                .insert(name.clone(), version.clone());
            written += 1;
        }
        written
    }

    /// Delete `name` from `dependencies`. Returns whether it was present.
    pub fn remove_dependency(&mut self, name: &str) -> bool {
        self.dependencies.as_mut().is_some_and(|deps| deps.shift_remove(name).is_some())
    }
}

fn is_excluded<S: AsRef<str>>(name: &str, excluded: &[S]) -> bool {
    excluded.iter().any(|ex| ex.as_ref() == name)
}

/// Value-returning form of [`PackageManifest::merge_dependencies`].
#[must_use]
pub fn merge<S: AsRef<str>>(
    mut manifest: PackageManifest,
    incoming: &Map<String, Value>,
    excluded: &[S],
) -> PackageManifest {
    manifest.merge_dependencies(incoming, excluded);
    manifest
}

/// Value-returning form of [`PackageManifest::remove_dependency`].
#[must_use]
pub fn remove_one(mut manifest: PackageManifest, name: &str) -> PackageManifest {
    manifest.remove_dependency(name);
    manifest
}

/// Names from `incoming` minus `excluded`, in `incoming` order.
#[must_use]
pub fn to_install_list<S: AsRef<str>>(incoming: &Map<String, Value>, excluded: &[S]) -> Vec<String> {
    incoming.keys().filter(|name| !is_excluded(name, excluded)).cloned().collect()
}
