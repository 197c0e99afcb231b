//! Pure mutations of the module list.

use super::{Manifest, ModuleEntry};

impl Manifest {
    /// Insert `entry`, or replace the existing entry with the same name in place.
    ///
    /// Initializes `modules` when absent. Returns the index the entry now occupies.
    pub fn upsert_module(&mut self, entry: ModuleEntry) -> usize {
        let modules = self.modules.get_or_insert_with(Vec::new);

        match modules.iter().position(|existing| existing.name == entry.name) {
            Some(index) => {
                modules[index] = entry;
                index
            }
            None => {
                modules.push(entry);
                modules.len() - 1
            }
        }
    }

    /// Remove every entry named `name`. Returns how many were removed.
    pub fn remove_module(&mut self, name: &str) -> usize {
        let Some(modules) = self.modules.as_mut() else {
            return 0;
        };

        let before = modules.len();
        modules.retain(|entry| entry.name != name);
        before - modules.len()
    }
}

/// Value-returning form of [`Manifest::upsert_module`].
#[must_use]
pub fn upsert(mut manifest: Manifest, entry: ModuleEntry) -> Manifest {
    manifest.upsert_module(entry);
    manifest
}

/// Value-returning form of [`Manifest::remove_module`].
#[must_use]
pub fn remove(mut manifest: Manifest, name: &str) -> Manifest {
    manifest.remove_module(name);
    manifest
}
