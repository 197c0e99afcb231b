//! The project module manifest (`.cartridgerc`)
//!
//! The manifest records one [`ModuleEntry`] per installed Cartridge module. It is
//! created by the scaffolding tool and only ever mutated here, through a
//! read-modify-write cycle:
//!
//! ```text
//! load -> upsert / remove -> save -> re-render README
//! ```
//!
//! # Invariants
//!
//! - At most one entry per `name`. [`Manifest::upsert_module`] replaces an existing
//!   entry at its original index instead of appending a second one.
//! - Removal deletes every entry with the name, healing accidental duplicates.
//! - Top-level keys other than `modules` are opaque and survive a load/save cycle.
//!
//! # Format
//!
//! ```json
//! {
//!   "name": "my-site",
//!   "modules": [
//!     {
//!       "name": "cartridge-sass",
//!       "version": "2.1.0",
//!       "site": "https://example.com/sass",
//!       "task": "cartridge-sass/task.js"
//!     }
//!   ]
//! }
//! ```

mod manifest_io;
mod manifest_mutations;


pub use manifest_mutations::{remove, upsert};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::config::PackageConfig;
use crate::utils::{serialize_with_key_at, take_key};

const MODULES_KEY: &str = "modules";

/// One installed module.
///
/// Keys other than the four below are kept, so entries written by other tools
/// survive when a different module is added or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Package name, unique within the manifest
    pub name: String,
    /// Installed version
    #[serde(default)]
    pub version: String,
    /// Homepage. An explicit `null` is kept as `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub site: Option<Value>,
    /// `<name>/<main entry path>`
    #[serde(default)]
    pub task: String,
    /// Any other per-entry key, preserved verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl ModuleEntry {
    /// Build an entry from its parts.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        site: Option<String>,
        task: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            site: site.map(Value::String),
            task: task.into(),
            other: Map::new(),
        }
    }

    /// The entry a module registers for itself.
    #[must_use]
    pub fn from_package(package: &PackageConfig) -> Self {
        Self::new(package.name.clone(), package.version.clone(), package.homepage.clone(), package.task())
    }

    /// Homepage when it is a string.
    #[must_use]
    pub fn site_url(&self) -> Option<&str> {
        self.site.as_ref().and_then(Value::as_str)
    }
}

/// The `.cartridgerc` document.
///
/// `modules` is written back at the position it was read from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Manifest {
    /// Installed modules in registration order. Absent until the first install.
    pub modules: Option<Vec<ModuleEntry>>,

    /// Every other top-level key, preserved verbatim.
    pub other: Map<String, Value>,

    modules_at: Option<usize>,
}

impl Manifest {
    /// Registered modules; empty when the `modules` key is absent.
    #[must_use]
    pub fn modules(&self) -> &[ModuleEntry] {
        self.modules.as_deref().unwrap_or_default()
    }

    /// Look up a module by name.
    #[must_use]
    pub fn get_module(&self, name: &str) -> Option<&ModuleEntry> {
        self.modules().iter().find(|entry| entry.name == name)
    }
}

impl PartialEq for Manifest {
    fn eq(&self, other: &Self) -> bool {
        self.modules == other.modules && self.other == other.other
    }
}

impl TryFrom<Map<String, Value>> for Manifest {
    type Error = serde_json::Error;

    fn try_from(mut other: Map<String, Value>) -> Result<Self, Self::Error> {
        let (modules_at, modules) = match take_key(&mut other, MODULES_KEY) {
            Some((index, value)) => (Some(index), serde_json::from_value(value)?),
            None => (None, None),
        };
        Ok(Self {
            modules,
            other,
            modules_at,
        })
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_with_key_at(serializer, &self.other, MODULES_KEY, self.modules.as_ref(), self.modules_at)
    }
}
