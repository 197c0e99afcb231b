//! Invocation configuration: where the host project lives and which module is running.
//!
//! - [`ProjectPaths`] resolves the fixed document locations of a Cartridge project
//! - [`PackageConfig`] is the running module's own `package.json`
//!
//! The development bypass reads `NODE_ENV`; see [`crate::guard`].

pub mod package;
pub mod paths;

pub use package::PackageConfig;
pub use paths::ProjectPaths;
