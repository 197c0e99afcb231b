//! Resolution of project-relative paths supplied by module scripts.

use anyhow::Result;
use std::path::{Component, Path, PathBuf};

use crate::core::ModuleError;

/// Validates that a path doesn't contain parent directory references (`..`).
pub fn validate_no_traversal(path: &Path) -> Result<()> {
    if path.components().any(|component| matches!(component, Component::ParentDir)) {
        return Err(ModuleError::IoError {
            operation: "resolve".to_string(),
            path: path.display().to_string(),
            reason: "path contains parent directory reference (..)".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Joins `relative` onto `project_root`.
///
/// A leading `/` (or drive prefix) is treated as relative to the project, so
/// `/_config/a.json` and `_config/a.json` resolve to the same file. `..` is
/// rejected so a module cannot reach outside the project.
pub fn project_path(project_root: &Path, relative: &Path) -> Result<PathBuf> {
    validate_no_traversal(relative)?;

    let mut resolved = project_root.to_path_buf();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            resolved.push(part);
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_no_traversal() {
        assert!(validate_no_traversal(Path::new("_config/app.json")).is_ok());
        assert!(validate_no_traversal(Path::new("./_source")).is_ok());
        assert!(validate_no_traversal(Path::new("../outside")).is_err());
        assert!(validate_no_traversal(Path::new("a/../../b")).is_err());
    }

    #[test]
    fn test_project_path_joins() {
        let root = Path::new("/project");
        assert_eq!(project_path(root, Path::new("_config")).unwrap(), PathBuf::from("/project/_config"));
        assert_eq!(
            project_path(root, Path::new("./_source/styles")).unwrap(),
            PathBuf::from("/project/_source/styles")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_project_path_leading_slash_stays_inside() {
        let root = Path::new("/project");
        assert_eq!(project_path(root, Path::new("/_config/a.json")).unwrap(), PathBuf::from("/project/_config/a.json"));
    }

    #[test]
    fn test_project_path_rejects_escape() {
        assert!(project_path(Path::new("/project"), Path::new("../etc")).is_err());
    }
}
