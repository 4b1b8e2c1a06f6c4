//! 起動プラン
//!
//! 外部のプロセススーパーバイザーが使う (アプリ名, 起動コマンド) の並びを生成する。
//! プロセスは起動しない。

use crate::model::{DeploymentDescriptor, LaunchCommand};
use serde::Serialize;

/// 起動プランの1ステップ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchStep {
    pub application: String,
    /// None の場合、スーパーバイザーは何も起動しない
    pub command: Option<LaunchCommand>,
}

impl LaunchStep {
    pub fn as_pair(&self) -> (&str, Option<&str>) {
        (
            self.application.as_str(),
            self.command.as_ref().map(LaunchCommand::as_str),
        )
    }
}

/// ディスクリプタから起動プランを生成（apps の順序を保持）
pub fn render_launch_plan(descriptor: &DeploymentDescriptor) -> Vec<LaunchStep> {
    descriptor
        .applications()
        .iter()
        .map(|app| LaunchStep {
            application: app.name().to_string(),
            command: app.launch_command().cloned(),
        })
        .collect()
}
