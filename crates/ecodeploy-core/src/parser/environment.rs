//! deploy エントリのパース

use crate::error::{DescriptorError, Result};
use crate::model::{DeploymentEnvironment, EnvironmentFields, RepoLocator};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

const FIELD_USER: &str = "user";
const FIELD_HOST: &str = "host";
const FIELD_REF: &str = "ref";
const FIELD_REPO: &str = "repo";
const FIELD_PATH: &str = "path";
const FIELD_POST_DEPLOY: &str = "post-deploy";

/// deploy オブジェクトをパース
pub fn parse_environments(
    deploy: Option<&Value>,
) -> Result<BTreeMap<String, DeploymentEnvironment>> {
    let entries = match deploy {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(DescriptorError::MalformedDescriptor(format!(
                "deploy はオブジェクトである必要があります（実際: {}）",
                super::kind_of(other)
            )));
        }
    };

    let mut environments = BTreeMap::new();
    for (name, entry) in entries {
        let environment = parse_environment(name, entry)?;
        debug!(
            environment = name.as_str(),
            ssh_target = %environment.ssh_target(),
            "Parsed deployment environment"
        );
        environments.insert(name.clone(), environment);
    }

    Ok(environments)
}

/// deploy.<name> をパース
///
/// 不正なフィールドをすべて集めてからエラーにする。
fn parse_environment(name: &str, entry: &Value) -> Result<DeploymentEnvironment> {
    let invalid = |problems: Vec<String>| DescriptorError::InvalidEnvironment {
        name: name.to_string(),
        problems,
    };

    if name.trim().is_empty() {
        return Err(invalid(vec!["環境名が空です".to_string()]));
    }

    let Value::Object(fields) = entry else {
        return Err(invalid(vec![format!(
            "オブジェクトである必要があります（実際: {}）",
            super::kind_of(entry)
        )]));
    };

    let mut problems = Vec::new();
    let user = required_field(fields, FIELD_USER, &mut problems);
    let host = required_field(fields, FIELD_HOST, &mut problems);
    let source_ref = required_field(fields, FIELD_REF, &mut problems);
    let repo = required_field(fields, FIELD_REPO, &mut problems);
    let path = required_field(fields, FIELD_PATH, &mut problems);
    let post_deploy = required_field(fields, FIELD_POST_DEPLOY, &mut problems);

    if let Some(repo) = &repo
        && RepoLocator::parse(repo).is_none()
    {
        problems.push(format!(
            "{FIELD_REPO} '{repo}' は git リモートの形式（user@host:path または scheme://host/path）ではありません"
        ));
    }

    // リモートホストは POSIX 前提
    if let Some(path) = &path
        && !path.starts_with('/')
    {
        problems.push(format!("{FIELD_PATH} '{path}' は絶対パスである必要があります"));
    }

    match (user, host, source_ref, repo, path, post_deploy) {
        (
            Some(remote_user),
            Some(remote_host),
            Some(source_ref),
            Some(source_repo),
            Some(deploy_path),
            Some(post_deploy_command),
        ) if problems.is_empty() => {
            Ok(DeploymentEnvironment::new(
                name.to_string(),
                EnvironmentFields {
                    remote_user,
                    remote_host,
                    source_ref,
                    source_repo,
                    deploy_path,
                    post_deploy_command,
                },
            ))
        }
        _ => Err(invalid(problems)),
    }
}

/// 必須の文字列フィールドを取得（問題があれば problems に追加して None）
fn required_field(
    fields: &Map<String, Value>,
    key: &str,
    problems: &mut Vec<String>,
) -> Option<String> {
    match fields.get(key) {
        None | Some(Value::Null) => {
            problems.push(format!("{key} がありません"));
            None
        }
        Some(Value::String(value)) if value.trim().is_empty() => {
            problems.push(format!("{key} が空です"));
            None
        }
        Some(Value::String(value)) => Some(value.clone()),
        Some(other) => {
            problems.push(format!(
                "{key} は文字列である必要があります（実際: {}）",
                super::kind_of(other)
            ));
            None
        }
    }
}
