//! Integration tests for the CLI templates subcommand

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_templates_list_command() {
    let mut cmd = Command::cargo_bin("relsite").unwrap();

    cmd.arg("templates")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("release"))
        .stdout(predicate::str::contains("site"))
        .stdout(predicate::str::contains("GitHub Pages"));
}

#[test]
fn test_templates_export_command() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("relsite").unwrap();

    cmd.arg("templates")
        .arg("export")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 template bundle(s)"));

    // Verify files were actually exported
    assert!(temp_dir.path().join("site/manifest.yml").exists());
    assert!(temp_dir.path().join("site/ru/index.html.tera").exists());
    assert!(
        temp_dir
            .path()
            .join("release/version_index.html.tera")
            .exists()
    );
}

#[test]
fn test_templates_info_command() {
    let mut cmd = Command::cargo_bin("relsite").unwrap();

    cmd.arg("templates")
        .arg("info")
        .arg("site")
        .assert()
        .success()
        .stdout(predicate::str::contains("Template: site"))
        .stdout(predicate::str::contains("Template files:"))
        .stdout(predicate::str::contains("- ru/index.html.tera -> ru/index.html"))
        .stdout(predicate::str::contains("- en/index.html.tera -> en/index.html"))
        .stdout(predicate::str::contains("- index.html.tera -> index.html"))
        .stdout(predicate::str::contains(
            "- deploy_on_release.yml.tera -> .github/workflows/deploy_on_release.yml",
        ))
        .stdout(predicate::str::contains(
            "- README_DEPLOY.md.tera -> README_DEPLOY.md",
        ))
        .stdout(predicate::str::contains(
            "- set_github_pages.py.tera -> set_github_pages.py (executable)",
        ));
}

#[test]
fn test_templates_info_nonexistent() {
    let mut cmd = Command::cargo_bin("relsite").unwrap();

    cmd.arg("templates")
        .arg("info")
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template not found"));
}

#[test]
fn test_exported_templates_drive_scaffold() {
    let templates = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();

    Command::cargo_bin("relsite")
        .unwrap()
        .args(["templates", "export"])
        .arg(templates.path())
        .assert()
        .success();

    let root_page = templates.path().join("site/index.html.tera");
    let customized = std::fs::read_to_string(&root_page)
        .unwrap()
        .replace("All versions:", "Every release:");
    std::fs::write(&root_page, customized).unwrap();

    Command::cargo_bin("relsite")
        .unwrap()
        .arg("scaffold")
        .arg("--output-dir")
        .arg(site.path())
        .arg("--template-dir")
        .arg(templates.path())
        .assert()
        .success();

    let index = std::fs::read_to_string(site.path().join("index.html")).unwrap();
    assert!(index.contains("Every release:"));
    assert!(!index.contains("All versions:"));
}
