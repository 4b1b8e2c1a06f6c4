//! ディスクリプタパーサー
//!
//! 読み込み済みの値（JSON/YAML/ecosystem.config.js 共通の `serde_json::Value`）を
//! 検証して `DeploymentDescriptor` に変換します。
//! apps と deploy のパース処理はモジュールに分離されています。

mod application;
mod environment;

use application::parse_applications;
use environment::parse_environments;

use crate::error::{DescriptorError, Result};
use crate::model::DeploymentDescriptor;
use serde_json::Value;

/// 値を検証してディスクリプタを生成
///
/// 部分的に正しいディスクリプタは返さない。最初に見つかった問題でエラーになる
/// （ただし環境内の複数フィールドの問題はまとめて報告する）。
pub fn parse_descriptor(value: &Value) -> Result<DeploymentDescriptor> {
    let Value::Object(root) = value else {
        return Err(DescriptorError::MalformedDescriptor(format!(
            "トップレベルはオブジェクトである必要があります（実際: {}）",
            kind_of(value)
        )));
    };

    let applications = parse_applications(root.get("apps"))?;
    let environments = parse_environments(root.get("deploy"))?;

    Ok(DeploymentDescriptor::new(applications, environments))
}

/// エラーメッセージ用の型名
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "真偽値",
        Value::Number(_) => "数値",
        Value::String(_) => "文字列",
        Value::Array(_) => "配列",
        Value::Object(_) => "オブジェクト",
    }
}
