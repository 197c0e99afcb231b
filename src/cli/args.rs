//! Value parsers shared by several subcommands.

use anyhow::Result;
use clap::Args;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::config::PackageConfig;
use crate::core::ModuleError;
use crate::staging::CopyRequest;
use crate::utils::read_json_file;

/// `<src>[:<dest-dir>]`, with `src` relative to the module directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySpec {
    /// File or directory inside the module
    pub source: PathBuf,
    /// Project-relative destination directory
    pub dest_dir: Option<PathBuf>,
}

impl CopySpec {
    /// Resolve `source` against the module directory.
    pub fn to_request(&self, module_dir: &Path) -> CopyRequest {
        CopyRequest {
            source: module_dir.join(&self.source),
            dest_dir: self.dest_dir.clone(),
        }
    }
}

/// Parse `<src>[:<dest-dir>]`.
///
/// On Windows a single letter before the colon is a drive, not a split point.
pub fn parse_copy_spec(value: &str) -> Result<CopySpec, String> {
    let (source, dest_dir) = match value.rsplit_once(':') {
        Some((source, _)) if cfg!(windows) && source.len() == 1 => (value, None),
        Some((source, dest)) => (source, (!dest.is_empty()).then_some(dest)),
        None => (value, None),
    };

    if source.is_empty() {
        return Err(format!("missing source in '{value}'"));
    }

    Ok(CopySpec {
        source: PathBuf::from(source),
        dest_dir: dest_dir.map(PathBuf::from),
    })
}

/// Parse `key=value`.
pub fn parse_key_value(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, val)) if !key.is_empty() => Ok((key.to_string(), val.to_string())),
        _ => Err(format!("expected key=value, got '{value}'")),
    }
}

/// Where the dependencies to merge or install come from.
#[derive(Args, Debug, Clone, Default)]
pub struct DependencyArgs {
    /// JSON file holding a name-to-version object. Defaults to the module's own
    /// `dependencies`.
    #[arg(long, value_name = "JSON")]
    pub from: Option<PathBuf>,

    /// Dependency names never written to the host project.
    #[arg(long = "exclude", value_name = "NAME")]
    pub excluded: Vec<String>,
}

impl DependencyArgs {
    /// The incoming name-to-version map.
    pub async fn incoming(&self, package: &PackageConfig) -> Result<Map<String, Value>> {
        let Some(path) = &self.from else {
            return Ok(package.dependencies.clone());
        };

        match read_json_file::<Value>(path).await? {
            Value::Object(map) => Ok(map),
            _ => Err(ModuleError::InvalidConfigShape {
                file: path.display().to_string(),
                key: "<root>".to_string(),
            }
            .into()),
        }
    }
}
