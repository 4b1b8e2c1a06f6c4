#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;
mod common;
use common::{PRODUCTION_JS, TestProject};

fn ecodeploy() -> Command {
    let mut cmd = Command::cargo_bin("ecodeploy").unwrap();
    cmd.env_remove("ECODEPLOY_CONFIG_PATH");
    cmd
}

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    ecodeploy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("deploy"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    ecodeploy()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ecodeploy"));
}

/// 不正なコマンドでエラーになることを確認
#[test]
fn test_invalid_command() {
    ecodeploy().arg("invalid-command").assert().failure();
}

/// 自動検出したディスクリプタを検証できることを確認
#[test]
fn test_validate_discovered_descriptor() {
    let project = TestProject::new();
    project.write_ecosystem_js(PRODUCTION_JS);

    ecodeploy()
        .current_dir(project.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("TradingDiscordBot"))
        .stdout(predicate::str::contains("deployment@192.46.229.57"));
}

/// ディスクリプタが無いディレクトリでは失敗することを確認
#[test]
fn test_validate_without_descriptor() {
    let project = TestProject::new();

    // グローバル設定（~/.config/ecodeploy）を参照させない
    ecodeploy()
        .current_dir(project.path())
        .env("HOME", project.path())
        .env("XDG_CONFIG_HOME", project.path().join(".config"))
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ECODEPLOY_CONFIG_PATH"));
}

/// 複数ファイルはそれぞれ独立に検証され、1つでも不正なら失敗することを確認
#[test]
fn test_validate_multiple_files() {
    let project = TestProject::new();
    let good = project.write("good.json", r#"{ "apps": [{ "name": "Bot", "script": "" }] }"#);
    let bad = project.write(
        "bad.json",
        r#"{ "deploy": { "production": { "user": "u", "host": "h", "ref": "r", "repo": "x", "path": "" } } }"#,
    );

    ecodeploy()
        .arg("validate")
        .arg(&good)
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Bot"))
        .stderr(predicate::str::contains("production"))
        .stderr(predicate::str::contains("1/2"));
}

/// RUST_LOG=debug で解決したディスクリプタのパスが stderr に出ることを確認
#[test]
fn test_debug_log_shows_resolved_path() {
    let project = TestProject::new();
    project.write_ecosystem_js(PRODUCTION_JS);

    ecodeploy()
        .current_dir(project.path())
        .env("RUST_LOG", "ecodeploy=debug")
        .arg("plan")
        .assert()
        .success()
        .stderr(predicate::str::contains("Resolved descriptor path"))
        .stderr(predicate::str::contains("ecosystem.config.js"));
}

/// 起動プランをJSONで出力できることを確認
#[test]
fn test_plan_json() {
    let project = TestProject::new();
    let file = project.write(
        "ecosystem.json",
        r#"{ "apps": [{ "name": "web", "script": "./web" }, { "name": "Bot", "script": "" }] }"#,
    );

    let output = ecodeploy()
        .arg("--file")
        .arg(&file)
        .arg("plan")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        plan,
        serde_json::json!([
            { "application": "web", "command": "./web" },
            { "application": "Bot", "command": null }
        ])
    );
}

/// 環境変数でディスクリプタを指定できることを確認
#[test]
fn test_env_from_config_path_env() {
    let project = TestProject::new();
    let file = project.write_ecosystem_js(PRODUCTION_JS);

    ecodeploy()
        .env("ECODEPLOY_CONFIG_PATH", &file)
        .current_dir(std::env::temp_dir())
        .arg("env")
        .arg("production")
        .assert()
        .success()
        .stdout(predicate::str::contains("origin/production"))
        .stdout(predicate::str::contains("/home/deployment/trading-bot"));
}

/// 存在しない環境を指定すると利用可能な環境が案内されることを確認
#[test]
fn test_env_unknown_environment() {
    let project = TestProject::new();
    project.write_ecosystem_js(PRODUCTION_JS);

    ecodeploy()
        .current_dir(project.path())
        .arg("env")
        .arg("staging")
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"))
        .stderr(predicate::str::contains("production"));
}

/// deploy は手順を表示するだけで実行しないことを確認
#[test]
fn test_deploy_renders_steps() {
    let project = TestProject::new();
    project.write_ecosystem_js(PRODUCTION_JS);

    ecodeploy()
        .current_dir(project.path())
        .arg("deploy")
        .arg("production")
        .assert()
        .success()
        .stdout(predicate::str::contains("ssh deployment@192.46.229.57"))
        .stdout(predicate::str::contains("diesel migration run"))
        .stdout(predicate::str::contains("【Step 6/6】"));
}

/// --shell で単一のシェルコマンドを出力することを確認
#[test]
fn test_deploy_shell() {
    let project = TestProject::new();
    project.write_ecosystem_js(PRODUCTION_JS);

    ecodeploy()
        .current_dir(project.path())
        .arg("deploy")
        .arg("production")
        .arg("--shell")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ssh deployment@192.46.229.57 'set -e"));
}

/// サブシェル内の && はひとつのステップとして扱われることを確認
#[test]
fn test_deploy_keeps_grouped_post_deploy() {
    let project = TestProject::new();
    let file = project.write(
        "ecosystem.json",
        r#"{ "deploy": { "production": {
            "user": "deployment", "host": "1.2.3.4", "ref": "origin/master",
            "repo": "git@github.com:org/repo.git", "path": "/srv/app",
            "post-deploy": "(cargo build --release && diesel migration run) || exit 1"
        } } }"#,
    );

    ecodeploy()
        .arg("--file")
        .arg(&file)
        .arg("deploy")
        .arg("production")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "$ (cargo build --release && diesel migration run) || exit 1",
        ))
        .stdout(predicate::str::contains("【Step 4/4】"));
}

/// --json と --shell の同時指定はエラーになることを確認
#[test]
fn test_deploy_conflict_json_and_shell() {
    ecodeploy()
        .arg("deploy")
        .arg("production")
        .arg("--json")
        .arg("--shell")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
