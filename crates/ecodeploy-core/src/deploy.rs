//! デプロイ手順のレンダリング
//!
//! リモートデプロイエージェント（pm2 deploy 相当）が実行する手順をデータとして生成する。
//! SSH 接続・git 操作・コマンド実行は一切行わない。

use crate::model::DeploymentEnvironment;
use serde::Serialize;

/// チェックアウト先（deploy_path 配下）
pub const SOURCE_DIR: &str = "source";

/// 手順の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// SSH 接続
    Connect,
    /// clone または fetch
    Fetch,
    /// ref のチェックアウト
    Checkout,
    /// post-deploy の1セグメント
    PostDeploy,
}

/// デプロイ手順の1ステップ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployStep {
    pub kind: StepKind,
    /// リモートで実行するシェルコマンド（Connect はローカル側）
    pub command: String,
    /// 実行ディレクトリ（None はログインディレクトリ）
    pub workdir: Option<String>,
}

/// 環境1つ分のデプロイ手順
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployScript {
    pub environment: String,
    pub ssh_target: String,
    pub source_dir: String,
    pub steps: Vec<DeployStep>,
}

impl DeployScript {
    /// リモートで実行するスクリプト（Connect を除く）
    pub fn remote_script(&self) -> String {
        let mut lines = vec!["set -e".to_string()];
        let mut cwd: Option<&str> = None;

        for step in self.steps.iter().filter(|s| s.kind != StepKind::Connect) {
            if let Some(dir) = step.workdir.as_deref()
                && cwd != Some(dir)
            {
                lines.push(format!("cd {}", shell_quote(dir)));
                cwd = Some(dir);
            }
            lines.push(step.command.clone());
        }

        lines.join("\n")
    }

    /// ローカルから実行できる単一のシェルコマンド
    pub fn to_shell(&self) -> String {
        format!(
            "ssh {} {}",
            shell_quote(&self.ssh_target),
            shell_quote(&self.remote_script())
        )
    }

    pub fn post_deploy_steps(&self) -> impl Iterator<Item = &DeployStep> {
        self.steps.iter().filter(|s| s.kind == StepKind::PostDeploy)
    }
}

/// 環境からデプロイ手順を生成
///
/// 1. `ssh user@host`
/// 2. `<path>/source` に clone（既にあれば fetch）
/// 3. `git checkout --force <ref>`
/// 4. post-deploy を `&&` ごとに1ステップとして `<path>/source` で実行
pub fn render_deploy_script(env: &DeploymentEnvironment) -> DeployScript {
    let source_dir = format!("{}/{}", env.deploy_path().trim_end_matches('/'), SOURCE_DIR);
    let quoted_dir = shell_quote(&source_dir);
    let ssh_target = env.ssh_target();

    let mut steps = vec![
        DeployStep {
            kind: StepKind::Connect,
            command: format!("ssh {}", shell_quote(&ssh_target)),
            workdir: None,
        },
        DeployStep {
            kind: StepKind::Fetch,
            command: format!(
                "if [ -d {dir}/.git ]; then git -C {dir} fetch --all --prune; else git clone {repo} {dir}; fi",
                dir = quoted_dir,
                repo = shell_quote(env.source_repo()),
            ),
            workdir: None,
        },
        DeployStep {
            kind: StepKind::Checkout,
            command: format!(
                "git -C {} checkout --force {}",
                quoted_dir,
                shell_quote(env.source_ref())
            ),
            workdir: None,
        },
    ];

    steps.extend(env.post_deploy_steps().into_iter().map(|command| DeployStep {
        kind: StepKind::PostDeploy,
        command,
        workdir: Some(source_dir.clone()),
    }));

    DeployScript {
        environment: env.name().to_string(),
        ssh_target,
        source_dir,
        steps,
    }
}

/// POSIX シェル向けクォート
pub fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{load, select_environment};
    use serde_json::json;

    fn production_descriptor(post_deploy: &str) -> crate::DeploymentDescriptor {
        load(json!({
            "apps": [{ "name": "TradingDiscordBot", "script": "" }],
            "deploy": {
                "production": {
                    "user": "deployment",
                    "host": "192.46.229.57",
                    "ref": "origin/master",
                    "repo": "git@github.com:Username/repository.git",
                    "path": "/var/www/my-repository/",
                    "post-deploy": post_deploy,
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_render_deploy_script_steps() {
        let descriptor = production_descriptor(
            "cargo build --release && diesel migration run && pm2 startOrRestart ecosystem.config.js",
        );
        let env = select_environment(&descriptor, "production").unwrap();
        let script = render_deploy_script(env);

        assert_eq!(script.environment, "production");
        assert_eq!(script.ssh_target, "deployment@192.46.229.57");
        assert_eq!(script.source_dir, "/var/www/my-repository/source");

        let kinds: Vec<_> = script.steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Connect,
                StepKind::Fetch,
                StepKind::Checkout,
                StepKind::PostDeploy,
                StepKind::PostDeploy,
                StepKind::PostDeploy,
            ]
        );
        assert_eq!(script.steps[0].command, "ssh deployment@192.46.229.57");
        assert!(
            script.steps[1]
                .command
                .contains("git clone git@github.com:Username/repository.git /var/www/my-repository/source")
        );
        assert_eq!(
            script.steps[2].command,
            "git -C /var/www/my-repository/source checkout --force origin/master"
        );
        assert_eq!(script.post_deploy_steps().count(), 3);
        assert!(
            script
                .post_deploy_steps()
                .all(|s| s.workdir.as_deref() == Some("/var/www/my-repository/source"))
        );
    }

    #[test]
    fn test_remote_script_changes_directory_once() {
        let descriptor = production_descriptor("npm install && pm2 restart all");
        let script = render_deploy_script(descriptor.environment("production").unwrap());
        let remote = script.remote_script();

        assert!(remote.starts_with("set -e\n"));
        assert_eq!(remote.matches("cd /var/www/my-repository/source").count(), 1);
        assert!(remote.ends_with("npm install\npm2 restart all"));
        assert!(!remote.contains("ssh "));
    }

    #[test]
    fn test_to_shell_quotes_remote_script() {
        let descriptor = production_descriptor("pm2 restart 'Bot'");
        let script = render_deploy_script(descriptor.environment("production").unwrap());
        let shell = script.to_shell();

        assert!(shell.starts_with("ssh deployment@192.46.229.57 'set -e\n"));
        assert!(shell.contains(r"pm2 restart '\''Bot'\''"));
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("origin/master"), "origin/master");
        assert_eq!(shell_quote("/srv/my app"), "'/srv/my app'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }
}
