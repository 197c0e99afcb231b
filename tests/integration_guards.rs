//! The `.cartridgerc` precondition and the development bypass.

mod common;

use common::{TestProjectBuilder, cartridge_module};
use predicates::prelude::*;

#[test]
fn test_ensure_ready_without_manifest() {
    let project = TestProjectBuilder::new().without_rc().build().unwrap();

    let assert = cartridge_module(&project.module_dir).arg("ensure-ready").assert().code(1).stdout("");

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    let lines: Vec<&str> = stderr.lines().filter(|line| !line.trim().is_empty()).collect();
    assert_eq!(lines.len(), 1, "expected one error line, got: {stderr}");
    assert!(lines[0].contains("Cartridge is not set up in this directory"));
}

#[test]
fn test_ensure_ready_with_manifest_is_silent() {
    let project = TestProjectBuilder::new().build().unwrap();

    cartridge_module(&project.module_dir).arg("ensure-ready").assert().success().stdout("").stderr("");
}

#[test]
fn test_bypass_in_development() {
    let project = TestProjectBuilder::new().build().unwrap();

    cartridge_module(&project.module_dir)
        .arg("bypass-dev")
        .env("NODE_ENV", "development")
        .assert()
        .success()
        .stdout("NODE_ENV is set to development\nSkipping postinstall.js for cartridge-test-module\n\n");
}

#[test]
fn test_no_bypass_outside_development() {
    let project = TestProjectBuilder::new().build().unwrap();

    cartridge_module(&project.module_dir)
        .arg("bypass-dev")
        .env("NODE_ENV", "production")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_postinstall_in_development_touches_nothing() {
    let project = TestProjectBuilder::new().build().unwrap();
    let rc_before = project.read(".cartridgerc").unwrap();
    let readme_before = project.read("readme.md").unwrap();

    cartridge_module(&project.module_dir)
        .arg("postinstall")
        .env("NODE_ENV", "development")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping postinstall.js for cartridge-test-module"))
        .stdout(predicate::str::contains("Finished").not());

    assert_eq!(project.read(".cartridgerc").unwrap(), rc_before);
    assert_eq!(project.read("readme.md").unwrap(), readme_before);
}

#[test]
fn test_postinstall_without_manifest_fails_first() {
    let project = TestProjectBuilder::new().without_rc().build().unwrap();

    cartridge_module(&project.module_dir)
        .arg("postinstall")
        .env("NODE_ENV", "development")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Cartridge is not set up"));

    assert!(!project.exists(".cartridgerc"));
}

#[test]
fn test_quiet_suppresses_step_lines() {
    let project = TestProjectBuilder::new().build().unwrap();

    cartridge_module(&project.module_dir).args(["--quiet", "add-to-rc"]).assert().success().stdout("");
    assert!(project.read_json(".cartridgerc").unwrap()["modules"].is_array());
}
