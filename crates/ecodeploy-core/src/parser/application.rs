//! apps エントリのパース

use crate::error::{DescriptorError, Result};
use crate::model::{LaunchCommand, ManagedApplication};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// apps 配列をパース
///
/// 配列の順序がそのまま起動順になる。
pub fn parse_applications(apps: Option<&Value>) -> Result<Vec<ManagedApplication>> {
    let entries = match apps {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(DescriptorError::MalformedDescriptor(format!(
                "apps は配列である必要があります（実際: {}）",
                super::kind_of(other)
            )));
        }
    };

    let mut applications = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let app = parse_application(index, entry)?;
        if !seen.insert(app.name().to_string()) {
            return Err(DescriptorError::InvalidApplication {
                index,
                reason: format!(
                    "name '{}' が重複しています（ecodeploy ではアプリ名の重複を許可しません）",
                    app.name()
                ),
            });
        }
        debug!(index, name = app.name(), managed = app.is_managed(), "Parsed application");
        applications.push(app);
    }

    Ok(applications)
}

/// apps の1エントリをパース
fn parse_application(index: usize, entry: &Value) -> Result<ManagedApplication> {
    let Value::Object(fields) = entry else {
        return Err(DescriptorError::MalformedDescriptor(format!(
            "apps[{}] はオブジェクトである必要があります（実際: {}）",
            index,
            super::kind_of(entry)
        )));
    };

    let name = match fields.get("name") {
        None | Some(Value::Null) => {
            return Err(DescriptorError::InvalidApplication {
                index,
                reason: "name がありません".to_string(),
            });
        }
        Some(Value::String(name)) if name.trim().is_empty() => {
            return Err(DescriptorError::InvalidApplication {
                index,
                reason: "name が空です".to_string(),
            });
        }
        Some(Value::String(name)) => name.trim().to_string(),
        Some(other) => {
            return Err(DescriptorError::MalformedDescriptor(format!(
                "apps[{}].name は文字列である必要があります（実際: {}）",
                index,
                super::kind_of(other)
            )));
        }
    };

    // 空の script は「起動コマンドなし」
    let launch_command = match fields.get("script") {
        None | Some(Value::Null) => None,
        Some(Value::String(script)) => LaunchCommand::parse(script),
        Some(other) => {
            return Err(DescriptorError::MalformedDescriptor(format!(
                "apps[{}].script は文字列である必要があります（実際: {}）",
                index,
                super::kind_of(other)
            )));
        }
    };

    Ok(ManagedApplication::new(name, launch_command))
}
