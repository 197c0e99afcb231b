//! End-to-end postinstall / postuninstall runs against a scaffolded project.

mod common;

use common::{TestProjectBuilder, cartridge_module, postinstall, project_with_module_files};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_postinstall_registers_and_stages_module() {
    let project = project_with_module_files();

    postinstall(&project)
        .success()
        .stdout(predicate::str::contains("Adding cartridge-test-module to .cartridgerc"))
        .stdout(predicate::str::contains("Finished: adding cartridge-test-module to .cartridgerc"))
        .stdout(predicate::str::contains("Finished: modifying project config for cartridge-test-module"))
        .stdout(predicate::str::contains("Finished: Copying task.test.js for cartridge-test-module"))
        .stdout(predicate::str::contains("Finished: Copying test for cartridge-test-module"))
        .stdout(predicate::str::ends_with("Finished: post install of cartridge-test-module\n"));

    let rc = project.read_json(".cartridgerc").unwrap();
    assert_eq!(
        rc["modules"],
        json!([{
            "name": "cartridge-test-module",
            "version": "1.0.0",
            "site": "https://example.com/cartridge-test-module",
            "task": "cartridge-test-module/index.js"
        }])
    );

    let readme = project.read("readme.md").unwrap();
    assert!(readme.contains(
        "[//]: <> (Modules start)\n* [cartridge-test-module](https://example.com/cartridge-test-module) 1.0.0\n[//]: <> (Modules end)"
    ));

    let config = project.read_json("_config/project.json").unwrap();
    assert_eq!(config["paths"]["src"]["test"], json!("_source/test/"));
    assert_eq!(config["paths"]["dest"]["test"], json!("public/_client/test/"));

    assert!(project.exists("_config/task.test.js"));
    assert_eq!(project.read("_source/test/partials/_vars.scss").unwrap(), "$brand: #000;\n");
}

#[test]
fn test_postinstall_twice_is_idempotent() {
    let project = project_with_module_files();

    postinstall(&project).success();
    let readme_once = project.read("readme.md").unwrap();
    project.write("_config/task.test.js", "// edited\n").unwrap();

    postinstall(&project)
        .success()
        .stdout(predicate::str::contains("Skipping: Copying task.test.js file as it already exists"))
        .stdout(predicate::str::contains("Skipping: Copying test file as it already exists"));

    let rc = project.read_json(".cartridgerc").unwrap();
    assert_eq!(rc["modules"].as_array().unwrap().len(), 1);
    assert_eq!(project.read("readme.md").unwrap(), readme_once);
    assert_eq!(project.read("_config/task.test.js").unwrap(), "// edited\n");
}

#[test]
fn test_postuninstall_reverses_postinstall() {
    let project = project_with_module_files();
    postinstall(&project).success();

    cartridge_module(&project.module_dir)
        .args(["postuninstall", "--config", "_config/task.test.js", "--remove", "_source/test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished: Removing cartridge-test-module from .cartridgerc"))
        .stdout(predicate::str::contains("Finished: Removed cartridge-test-module config files"))
        .stdout(predicate::str::contains("Finished: Removing test for cartridge-test-module"))
        .stdout(predicate::str::ends_with("Finished: post uninstall of cartridge-test-module\n"));

    let rc = project.read_json(".cartridgerc").unwrap();
    assert_eq!(rc["modules"], json!([]));
    assert!(!project.exists("_config/task.test.js"));
    assert!(!project.exists("_source/test"));

    let readme = project.read("readme.md").unwrap();
    assert!(readme.contains("[//]: <> (Modules start)\n[//]: <> (Modules end)"));
}

#[test]
fn test_opaque_manifest_keys_survive() {
    let project = TestProjectBuilder::new()
        .with_rc(r#"{"cartridgeVersion": "1.2.0", "settings": {"theme": "dark"}}"#)
        .build()
        .unwrap();

    cartridge_module(&project.module_dir).arg("add-to-rc").assert().success();

    let rc = project.read_json(".cartridgerc").unwrap();
    assert_eq!(rc["cartridgeVersion"], json!("1.2.0"));
    assert_eq!(rc["settings"], json!({"theme": "dark"}));
    assert_eq!(rc["modules"].as_array().unwrap().len(), 1);
}

#[test]
fn test_module_dir_with_parent_components() {
    let project = TestProjectBuilder::new().with_module_file("lib/index.js", "").build().unwrap();

    cartridge_module(&project.module_dir.join("lib"))
        .args(["--module-dir", "..", "add-to-rc"])
        .assert()
        .success();

    let rc = project.read_json(".cartridgerc").unwrap();
    assert_eq!(rc["modules"][0]["name"], json!("cartridge-test-module"));
}

#[test]
fn test_remove_refuses_project_root() {
    let project = TestProjectBuilder::new().build().unwrap();

    for target in [".", "/"] {
        cartridge_module(&project.module_dir)
            .args(["remove", target])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("removeFromProject error"));
    }

    assert!(project.exists(".cartridgerc"));
    assert!(project.exists("package.json"));
}

#[test]
fn test_missing_markers_reports_label_and_error() {
    let project = TestProjectBuilder::new().with_readme("# Site without a module list\n").build().unwrap();

    cartridge_module(&project.module_dir)
        .arg("add-to-rc")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("addToRc error"))
        .stderr(predicate::str::contains("Module markers not found"));

    assert_eq!(project.read("readme.md").unwrap(), "# Site without a module list\n");
}

#[test]
fn test_malformed_manifest_fails() {
    let project = TestProjectBuilder::new().with_rc("{ not json").build().unwrap();

    cartridge_module(&project.module_dir)
        .arg("remove-from-rc")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("removeFromRc error"))
        .stderr(predicate::str::contains("Invalid JSON"));

    assert_eq!(project.read(".cartridgerc").unwrap(), "{ not json");
}

#[test]
fn test_template_error_fails() {
    let project = TestProjectBuilder::new().with_template("{% for module in modules %}").build().unwrap();

    cartridge_module(&project.module_dir)
        .arg("add-to-rc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to render module template"));
}

#[test]
fn test_set_paths_requires_project_config() {
    let project = TestProjectBuilder::new().build().unwrap();
    std::fs::remove_file(project.paths.project_config()).unwrap();

    cartridge_module(&project.module_dir)
        .args(["set-paths", "--src", "a=b"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("modifyProjectConfig error"))
        .stderr(predicate::str::contains("File not found"));
}
