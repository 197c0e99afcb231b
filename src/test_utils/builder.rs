//! Builder for throwaway host projects.
//!
//! The layout mirrors what the Cartridge scaffolding produces:
//!
//! ```text
//! <temp>/project/
//!   .cartridgerc
//!   package.json
//!   readme.md
//!   _cartridge/modules.tpl
//!   _config/project.json
//!   node_modules/<module>/package.json
//! ```

use anyhow::Result;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::ProjectPaths;
use crate::constants::{PACKAGE_FILE_NAME, README_END_MARKER, README_START_MARKER};

/// Module name used when none is given.
pub const DEFAULT_MODULE_NAME: &str = "cartridge-test-module";

/// Template rendering one bullet per module.
pub const DEFAULT_TEMPLATE: &str =
    "{% for module in modules %}* [{{ module.name }}]({{ module.site | default(value=\"\") }}) {{ module.version }}\n{% endfor %}";

/// A README with an empty module region.
pub fn default_readme() -> String {
    format!("# Test site\n\n## Modules\n\n{README_START_MARKER}\n{README_END_MARKER}\n\n## License\n\nMIT\n")
}

/// Fluent setup for a [`TestProject`].
pub struct TestProjectBuilder {
    rc: Option<String>,
    readme: Option<String>,
    template: Option<String>,
    project_config: Option<String>,
    package: Option<String>,
    module_package: Value,
    files: Vec<(String, String)>,
    module_files: Vec<(String, String)>,
}

impl Default for TestProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProjectBuilder {
    /// Every document present with minimal content.
    pub fn new() -> Self {
        Self {
            rc: Some("{}\n".to_string()),
            readme: Some(default_readme()),
            template: Some(DEFAULT_TEMPLATE.to_string()),
            project_config: Some("{}\n".to_string()),
            package: Some(
                serde_json::to_string_pretty(&json!({
                    "name": "test-site",
                    "version": "0.0.1",
                    "dependencies": {},
                    "devDependencies": {"gulp": "^4.0.0"}
                }))
                .unwrap_or_default(),
            ),
            module_package: json!({
                "name": DEFAULT_MODULE_NAME,
                "version": "1.0.0",
                "homepage": "https://example.com/cartridge-test-module",
                "main": "index.js",
                "dependencies": {}
            }),
            files: Vec::new(),
            module_files: Vec::new(),
        }
    }

    /// Set the `.cartridgerc` content.
    pub fn with_rc(mut self, content: impl Into<String>) -> Self {
        self.rc = Some(content.into());
        self
    }

    /// Leave `.cartridgerc` out, as in a project Cartridge never set up.
    pub fn without_rc(mut self) -> Self {
        self.rc = None;
        self
    }

    /// Set the README content.
    pub fn with_readme(mut self, content: impl Into<String>) -> Self {
        self.readme = Some(content.into());
        self
    }

    /// Set the `_cartridge/modules.tpl` content.
    pub fn with_template(mut self, content: impl Into<String>) -> Self {
        self.template = Some(content.into());
        self
    }

    /// Set the `_config/project.json` content.
    pub fn with_project_config(mut self, content: impl Into<String>) -> Self {
        self.project_config = Some(content.into());
        self
    }

    /// Set the host `package.json` content.
    pub fn with_package(mut self, content: impl Into<String>) -> Self {
        self.package = Some(content.into());
        self
    }

    /// Replace the module's `package.json`.
    pub fn with_module_package(mut self, package: Value) -> Self {
        self.module_package = package;
        self
    }

    /// Add a file relative to the project root.
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Add a file relative to the module directory.
    pub fn with_module_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.module_files.push((path.into(), content.into()));
        self
    }

    /// Write everything to a fresh temporary directory.
    pub fn build(self) -> Result<TestProject> {
        super::init_test_logging(None);
        let temp_dir = TempDir::new()?;
        let paths = ProjectPaths::new(temp_dir.path().join("project"));
        let module_name = self.module_package["name"].as_str().unwrap_or(DEFAULT_MODULE_NAME).to_string();
        let module_dir = paths.installed_package(&module_name);
        std::fs::create_dir_all(&module_dir)?;

        let documents = [
            (&self.rc, paths.rc.clone()),
            (&self.readme, paths.readme.clone()),
            (&self.template, paths.modules_template()),
            (&self.project_config, paths.project_config()),
            (&self.package, paths.package.clone()),
        ];
        for (content, path) in documents {
            if let Some(content) = content {
                write_file(&path, content)?;
            }
        }

        write_file(
            &module_dir.join(PACKAGE_FILE_NAME),
            &serde_json::to_string_pretty(&self.module_package)?,
        )?;

        for (relative, content) in &self.files {
            write_file(&paths.project.join(relative), content)?;
        }
        for (relative, content) in &self.module_files {
            write_file(&module_dir.join(relative), content)?;
        }

        Ok(TestProject {
            _temp_dir: temp_dir,
            paths,
            module_dir,
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// A host project on disk; removed when dropped.
pub struct TestProject {
    _temp_dir: TempDir,
    /// Locations inside the project
    pub paths: ProjectPaths,
    /// `node_modules/<module>`
    pub module_dir: PathBuf,
}

impl TestProject {
    /// Project root.
    pub fn root(&self) -> &Path {
        &self.paths.project
    }

    /// Whether a project-relative path exists.
    pub fn exists(&self, relative: &str) -> bool {
        self.root().join(relative).exists()
    }

    /// Read a project-relative file.
    pub fn read(&self, relative: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.root().join(relative))?)
    }

    /// Read and parse a project-relative JSON file.
    pub fn read_json(&self, relative: &str) -> Result<Value> {
        Ok(serde_json::from_str(&self.read(relative)?)?)
    }

    /// Write a project-relative file.
    pub fn write(&self, relative: &str, content: &str) -> Result<()> {
        write_file(&self.root().join(relative), content)
    }
}
