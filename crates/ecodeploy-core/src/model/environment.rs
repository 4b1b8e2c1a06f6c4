//! デプロイ環境定義

use super::locator::RepoLocator;
use serde::Serialize;

/// デプロイ環境
///
/// `deploy.<name>` の各エントリに対応する。6つのフィールドはすべて必須で、
/// ロード時に検証済み。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentEnvironment {
    name: String,
    remote_user: String,
    remote_host: String,
    source_ref: String,
    source_repo: String,
    deploy_path: String,
    post_deploy_command: String,
}

/// 検証済みフィールドの組（パーサーから組み立てる）
pub(crate) struct EnvironmentFields {
    pub remote_user: String,
    pub remote_host: String,
    pub source_ref: String,
    pub source_repo: String,
    pub deploy_path: String,
    pub post_deploy_command: String,
}

impl DeploymentEnvironment {
    pub(crate) fn new(name: String, fields: EnvironmentFields) -> Self {
        Self {
            name,
            remote_user: fields.remote_user,
            remote_host: fields.remote_host,
            source_ref: fields.source_ref,
            source_repo: fields.source_repo,
            deploy_path: fields.deploy_path,
            post_deploy_command: fields.post_deploy_command,
        }
    }

    /// 環境名（例: production）
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn remote_user(&self) -> &str {
        &self.remote_user
    }

    pub fn remote_host(&self) -> &str {
        &self.remote_host
    }

    /// デプロイするブランチ/タグ（例: origin/master）
    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }

    pub fn source_repo(&self) -> &str {
        &self.source_repo
    }

    /// リモートホスト上の絶対パス
    pub fn deploy_path(&self) -> &str {
        &self.deploy_path
    }

    pub fn post_deploy_command(&self) -> &str {
        &self.post_deploy_command
    }

    /// SSH 接続先（`user@host`）
    pub fn ssh_target(&self) -> String {
        format!("{}@{}", self.remote_user, self.remote_host)
    }

    /// リポジトリロケーターの解析結果
    ///
    /// ロード時に検証済みのため、通常は常に Some を返す。
    pub fn repo_locator(&self) -> Option<RepoLocator> {
        RepoLocator::parse(&self.source_repo)
    }

    /// post-deploy コマンドを `&&` 区切りのステップに分割
    ///
    /// クォート内や `( ... )` / `{ ...; }` / `$( ... )` の内側の `&&` は区切りとして扱わない。
    pub fn post_deploy_steps(&self) -> Vec<String> {
        split_and_chain(&self.post_deploy_command)
    }
}

/// シェルの `&&` 連結をトップレベルで分割
fn split_and_chain(command: &str) -> Vec<String> {
    let mut steps = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', q) if q != Some('\'') => {
                current.push(c);
                escaped = true;
            }
            ('\'' | '"', None) => {
                quote = Some(c);
                current.push(c);
            }
            (c, Some(q)) if c == q => {
                quote = None;
                current.push(c);
            }
            ('(' | '{', None) => {
                depth += 1;
                current.push(c);
            }
            (')' | '}', None) => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ('&', None) if depth == 0 && chars.peek() == Some(&'&') => {
                chars.next();
                push_step(&mut steps, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_step(&mut steps, &current);

    steps
}

fn push_step(steps: &mut Vec<String>, step: &str) {
    let trimmed = step.trim();
    if !trimmed.is_empty() {
        steps.push(trimmed.to_string());
    }
}
