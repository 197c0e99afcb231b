//! Tests for argument parsing, configuration building, and command execution.

#[cfg(test)]
mod cli_tests {
    use crate::cli::{Cli, Commands, CopySpec, SetPathsArgs, parse_copy_spec, parse_key_value};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["cartridge-module", "--help"]);
        assert!(cli.is_err()); // --help causes a special error

        assert!(Cli::try_parse_from(["cartridge-module", "add-to-rc"]).is_ok());
        assert!(Cli::try_parse_from(["cartridge-module", "postinstall"]).is_ok());
        assert!(Cli::try_parse_from(["cartridge-module", "unknown"]).is_err());
    }

    #[test]
    fn test_cli_requires_arguments() {
        assert!(Cli::try_parse_from(["cartridge-module", "add-config"]).is_err());
        assert!(Cli::try_parse_from(["cartridge-module", "copy"]).is_err());
        assert!(Cli::try_parse_from(["cartridge-module", "remove"]).is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "cartridge-module",
            "add-to-rc",
            "--module-dir",
            "node_modules/foo",
            "--project-root",
            "/site",
        ])
        .unwrap();
        assert_eq!(cli.module_dir, PathBuf::from("node_modules/foo"));
        assert_eq!(cli.project_root, Some(PathBuf::from("/site")));

        let cli = Cli::try_parse_from(["cartridge-module", "ensure-ready"]).unwrap();
        assert_eq!(cli.module_dir, PathBuf::from("."));
        assert!(cli.project_root.is_none());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["cartridge-module", "-v", "-q", "ensure-ready"]).is_err());
    }

    #[test]
    fn test_build_config() {
        let cli = Cli::try_parse_from(["cartridge-module", "--verbose", "add-to-rc"]).unwrap();
        let config = cli.build_config();
        assert_eq!(config.log_level, "debug");
        assert!(!config.quiet);

        let cli = Cli::try_parse_from(["cartridge-module", "--quiet", "add-to-rc"]).unwrap();
        let config = cli.build_config();
        assert_eq!(config.log_level, "error");
        assert!(config.quiet);

        let cli = Cli::try_parse_from(["cartridge-module", "add-to-rc"]).unwrap();
        assert_eq!(cli.build_config().log_level, "warn");
    }

    #[test]
    fn test_parse_copy_spec() {
        assert_eq!(
            parse_copy_spec("_source/styles:_source").unwrap(),
            CopySpec {
                source: PathBuf::from("_source/styles"),
                dest_dir: Some(PathBuf::from("_source")),
            }
        );
        assert_eq!(
            parse_copy_spec("gulpfile.js").unwrap(),
            CopySpec {
                source: PathBuf::from("gulpfile.js"),
                dest_dir: None,
            }
        );
        assert_eq!(parse_copy_spec("gulpfile.js:").unwrap().dest_dir, None);
        assert!(parse_copy_spec(":dest").is_err());
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("sass=_source/styles/").unwrap(),
            ("sass".to_string(), "_source/styles/".to_string())
        );
        assert_eq!(parse_key_value("empty=").unwrap(), ("empty".to_string(), String::new()));
        assert!(parse_key_value("no-separator").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn test_set_paths_parsing() {
        let cli = Cli::try_parse_from([
            "cartridge-module",
            "set-paths",
            "--src",
            "sass=_source/styles/",
            "--dest",
            "sass=public/styles/",
            "--src",
            "js=_source/scripts/",
        ])
        .unwrap();

        match cli.command {
            Commands::SetPaths(args) => {
                assert_eq!(args.src.len(), 2);
                assert_eq!(args.dest, vec![("sass".to_string(), "public/styles/".to_string())]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_set_paths_apply() {
        let args = SetPathsArgs {
            src: vec![("sass".to_string(), "_source/styles/".to_string())],
            dest: vec![("sass".to_string(), "public/styles/".to_string())],
        };
        assert!(!args.is_empty());
        assert!(SetPathsArgs::default().is_empty());

        let config = crate::project_config::ProjectConfig::default().ensure_shape("project.json").unwrap();
        let config = args.apply(config);

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            serde_json::json!({"paths": {"src": {"sass": "_source/styles/"}, "dest": {"sass": "public/styles/"}}})
        );
    }

    #[test]
    fn test_postinstall_parsing() {
        let cli = Cli::try_parse_from([
            "cartridge-module",
            "postinstall",
            "--config",
            "_config/task.sass.js",
            "--copy",
            "_source/styles:_source",
            "--src",
            "sass=_source/styles/",
        ])
        .unwrap();

        match cli.command {
            Commands::Postinstall(cmd) => {
                assert_eq!(cmd.configs, vec![PathBuf::from("_config/task.sass.js")]);
                assert_eq!(cmd.copies.len(), 1);
                assert_eq!(cmd.paths.src.len(), 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

#[cfg(test)]
mod execution_tests {
    use crate::cli::Cli;
    use crate::core::Flow;
    use crate::test_utils::{RecordingReporter, TestProjectBuilder};
    use clap::Parser;
    use serde_json::json;
    use std::sync::Arc;

    fn parse(module_dir: &std::path::Path, args: &[&str]) -> Cli {
        let module_dir = module_dir.display().to_string();
        let mut argv = vec!["cartridge-module", "--module-dir", module_dir.as_str()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    async fn test_execute_add_to_rc() {
        let project = TestProjectBuilder::new().build().unwrap();
        let reporter = Arc::new(RecordingReporter::new());

        let flow = parse(&project.module_dir, &["add-to-rc"]).execute_with_reporter(reporter.clone()).await.unwrap();

        assert_eq!(flow, Flow::Continue);
        let rc = project.read_json(".cartridgerc").unwrap();
        assert_eq!(rc["modules"][0]["name"], json!("cartridge-test-module"));
        assert_eq!(rc["modules"][0]["task"], json!("cartridge-test-module/index.js"));
    }

    #[tokio::test]
    async fn test_execute_copy_and_remove() {
        let project = TestProjectBuilder::new().with_module_file("_source/app.js", "app").build().unwrap();
        let reporter = Arc::new(RecordingReporter::new());

        parse(&project.module_dir, &["copy", "_source/app.js:_source/scripts"])
            .execute_with_reporter(reporter.clone())
            .await
            .unwrap();
        assert_eq!(project.read("_source/scripts/app.js").unwrap(), "app");

        parse(&project.module_dir, &["remove", "_source/scripts"])
            .execute_with_reporter(reporter.clone())
            .await
            .unwrap();
        assert!(!project.exists("_source/scripts"));
    }

    #[tokio::test]
    async fn test_execute_add_dependencies_from_module() {
        let project = TestProjectBuilder::new()
            .with_module_package(json!({
                "name": "cartridge-sass",
                "version": "2.0.0",
                "dependencies": {"gulp-sass": "^5.0.0", "cartridge-module-utils": "^0.4.0"}
            }))
            .build()
            .unwrap();
        let reporter = Arc::new(RecordingReporter::new());

        parse(&project.module_dir, &["add-dependencies", "--exclude", "cartridge-module-utils"])
            .execute_with_reporter(reporter.clone())
            .await
            .unwrap();

        let package = project.read_json("package.json").unwrap();
        assert_eq!(package["dependencies"], json!({"gulp-sass": "^5.0.0"}));
        assert_eq!(reporter.info_lines(), vec!["Finished: modifying package.json for cartridge-sass".to_string()]);
    }

    #[tokio::test]
    async fn test_execute_with_project_root_override() {
        let project = TestProjectBuilder::new().build().unwrap();
        let elsewhere = TestProjectBuilder::new().build().unwrap();
        let reporter = Arc::new(RecordingReporter::new());
        let root = elsewhere.root().display().to_string();

        parse(&project.module_dir, &["--project-root", root.as_str(), "add-to-rc"])
            .execute_with_reporter(reporter)
            .await
            .unwrap();

        assert!(elsewhere.read_json(".cartridgerc").unwrap()["modules"].is_array());
        assert!(project.read_json(".cartridgerc").unwrap().get("modules").is_none());
    }

    #[tokio::test]
    async fn test_execute_missing_module_package() {
        let temp = tempfile::tempdir().unwrap();
        let reporter = Arc::new(RecordingReporter::new());

        let result = parse(temp.path(), &["add-to-rc"]).execute_with_reporter(reporter).await;
        assert!(result.is_err());
    }
}
