//! End-to-end tests for the `bunny` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `bunny -C <dir>` with the user's global config hidden.
fn bunny(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bunny").unwrap();
    cmd.env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env_remove("RUST_LOG")
        .arg("-C")
        .arg(dir);
    cmd
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("make-type"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_writes_model_scaffold() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["generate", "--yes", "--model", "Post", "--fields", "title:string,body:text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app/Models/Post.php"));

    let model = temp.path().join("app/Models/Post.php");
    assert!(model.exists());
    let source = fs::read_to_string(model).unwrap();
    assert!(source.contains("class Post"));
    assert!(source.contains("title"));
    assert!(temp.path().join("database/factories/PostFactory.php").exists());
    assert!(temp.path().join("database/seeders/PostSeeder.php").exists());
}

#[test]
fn generate_twice_refuses_without_force() {
    let temp = TempDir::new().unwrap();
    let args = ["generate", "--yes", "--model", "Post", "--fields", "title:string"];

    bunny(temp.path()).args(args).assert().success();
    bunny(temp.path())
        .args(args)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    bunny(temp.path()).args(args).arg("--force").assert().success();
}

#[test]
fn generate_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["generate", "--dry-run", "--model", "Post", "--fields", "title:string"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app/Models/Post.php"));

    assert!(!temp.path().join("app").exists());
}

#[test]
fn generate_dry_run_json_lists_files() {
    let temp = TempDir::new().unwrap();
    let out = bunny(temp.path())
        .args(["--output-format", "json", "generate", "--dry-run", "--model", "Post"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(value.to_string().contains("app/Models/Post.php"));
}

#[test]
fn generate_without_model_fails_non_interactively() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["generate", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--model"));
}

#[test]
fn types_lists_builtin_types() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["types", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("portfolio"))
        .stdout(predicate::str::contains("restaurant"))
        .stdout(predicate::str::contains("real-estate"));
}

#[test]
fn types_json_is_parseable() {
    let temp = TempDir::new().unwrap();
    let out = bunny(temp.path())
        .args(["types", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().any(|r| r["id"] == "portfolio" && r["default"] == true));
}

#[test]
fn install_then_uninstall_restaurant() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["install", "restaurant", "--force"])
        .assert()
        .success();

    assert!(temp.path().join("config/bunny/restaurant.toml").exists());
    assert!(temp.path().join("storage/bunny/seeds/restaurant.json").exists());

    bunny(temp.path())
        .args(["uninstall", "restaurant", "--force"])
        .assert()
        .success();

    assert!(!temp.path().join("config/bunny/restaurant.toml").exists());
    // Seeds survive uninstall.
    assert!(temp.path().join("storage/bunny/seeds/restaurant.json").exists());
}

#[test]
fn uninstall_all_removes_package_directories() {
    let temp = TempDir::new().unwrap();
    for type_id in ["restaurant", "portfolio"] {
        bunny(temp.path())
            .args(["install", type_id, "--force"])
            .assert()
            .success();
    }
    assert!(temp.path().join("resources/views/vendor/bunny/portfolio").exists());

    bunny(temp.path())
        .args(["uninstall", "--all", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Every website type uninstalled"));

    assert!(!temp.path().join("config/bunny").exists());
    assert!(!temp.path().join("resources/views/vendor/bunny").exists());
    assert!(!temp.path().join("database/migrations/vendor/bunny").exists());
    assert!(temp.path().join("storage/bunny/seeds/portfolio.json").exists());
}

#[test]
fn configure_sets_installed_type_settings() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["install", "portfolio", "--force"])
        .assert()
        .success();

    bunny(temp.path())
        .args(["configure", "portfolio", "--set", "enable_cache=false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("portfolio settings saved"));

    let config = fs::read_to_string(temp.path().join("config/bunny/portfolio.toml")).unwrap();
    assert!(config.contains("enable_cache = false"));
    assert!(config.contains("enable_seo = true"));
    assert!(config.contains("features = ["));

    let output = bunny(temp.path())
        .args(["--output-format", "json", "configure", "portfolio"])
        .args(["--set", "enable_seo=off"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["settings"]["enable_seo"], false);
    assert_eq!(report["settings"]["enable_cache"], false);
}

#[test]
fn install_accepts_underscored_ids() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["install", "real_estate", "--force"])
        .assert()
        .success();

    assert!(temp.path().join("config/bunny/real-estate.toml").exists());
}

#[test]
fn init_writes_default_config() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path()).arg("init").assert().success();

    let written = fs::read_to_string(temp.path().join("bunny.toml")).unwrap();
    assert!(written.contains("default_type = \"portfolio\""));

    // Second run leaves the file alone.
    fs::write(temp.path().join("bunny.toml"), "default_type = \"blog\"\n").unwrap();
    bunny(temp.path()).arg("init").assert().success();
    let kept = fs::read_to_string(temp.path().join("bunny.toml")).unwrap();
    assert_eq!(kept, "default_type = \"blog\"\n");
}

#[test]
fn config_get_reads_project_file() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["config", "get", "default_type"])
        .assert()
        .success()
        .stdout("portfolio\n");

    fs::write(temp.path().join("bunny.toml"), "default_type = \"blog\"\n").unwrap();
    bunny(temp.path())
        .args(["config", "get", "default_type"])
        .assert()
        .success()
        .stdout("blog\n");
}

#[test]
fn env_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bunny.toml"), "default_type = \"blog\"\n").unwrap();

    bunny(temp.path())
        .env("BUNNY_DEFAULT_TYPE", "restaurant")
        .env("BUNNY_CACHE__TTL", "60")
        .args(["config", "get", "default_type"])
        .assert()
        .success()
        .stdout("restaurant\n");

    bunny(temp.path())
        .env("BUNNY_CACHE__TTL", "60")
        .args(["config", "get", "cache.ttl"])
        .assert()
        .success()
        .stdout("60\n");
}

#[test]
fn stubs_lists_markers() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["stubs", "--markers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("common/model"))
        .stdout(predicate::str::contains("modelName"));
}

#[test]
fn project_stub_overrides_builtin() {
    let temp = TempDir::new().unwrap();
    let stubs = temp.path().join("stubs");
    fs::create_dir_all(stubs.join("common")).unwrap();
    fs::write(stubs.join("common/model.stub"), "<?php // custom {{ modelName }}\n").unwrap();
    fs::write(
        temp.path().join("bunny.toml"),
        "[stubs]\npath = \"stubs\"\n",
    )
    .unwrap();

    bunny(temp.path())
        .args(["generate", "--yes", "--model", "Post"])
        .assert()
        .success();

    let model = fs::read_to_string(temp.path().join("app/Models/Post.php")).unwrap();
    assert_eq!(model, "<?php // custom Post\n");
}

#[test]
fn make_type_creates_package_files() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["make-type", "pet-shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[custom_types.pet-shop]"));

    assert!(temp.path().join("config/bunny/pet-shop.toml").exists());
}

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    bunny(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bunny"));
}

#[test]
fn log_file_receives_entries() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("bunny.toml"),
        "[logging]\nfile = \"logs/bunny.log\"\n",
    )
    .unwrap();

    bunny(temp.path())
        .args(["-vv", "types", "--format", "list"])
        .assert()
        .success();

    assert!(temp.path().join("logs/bunny.log").exists());
}
