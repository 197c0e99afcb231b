//! Common helpers for cartridge-module integration tests

// Not every helper is used by every test binary
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub use cartridge_module_utils::test_utils::{TestProject, TestProjectBuilder};

/// The binary, run from `module_dir` the way npm runs lifecycle scripts.
///
/// `NODE_ENV` is cleared and colors are off so output can be compared.
pub fn cartridge_module(module_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cartridge-module").unwrap();
    cmd.current_dir(module_dir).env_remove("NODE_ENV").env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

/// A project whose module ships a config file and a source directory.
pub fn project_with_module_files() -> TestProject {
    TestProjectBuilder::new()
        .with_module_file("_config/task.test.js", "module.exports = { task: 'test' };\n")
        .with_module_file("_source/test/main.scss", "body { margin: 0; }\n")
        .with_module_file("_source/test/partials/_vars.scss", "$brand: #000;\n")
        .build()
        .unwrap()
}

/// Run `postinstall` with the files from [`project_with_module_files`].
pub fn postinstall(project: &TestProject) -> assert_cmd::assert::Assert {
    cartridge_module(&project.module_dir)
        .args([
            "postinstall",
            "--config",
            "_config/task.test.js",
            "--copy",
            "_source/test:_source",
            "--src",
            "test=_source/test/",
            "--dest",
            "test=public/_client/test/",
        ])
        .assert()
}
