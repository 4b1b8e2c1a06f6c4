//! 管理対象アプリケーション定義

use serde::Serialize;
use std::fmt;

/// プロセスマネージャーが起動するコマンドライン
///
/// 空文字列からは生成されない。空の `script` は「起動コマンドなし」として
/// `Option::None` で表現する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LaunchCommand(String);

impl LaunchCommand {
    /// コマンドラインから生成（空白のみの場合は None）
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 実行ファイル部分（先頭トークン）
    pub fn program(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or(&self.0)
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 管理対象アプリケーション
///
/// `apps` の各エントリに対応する。ロード時に一度だけ生成され、以後変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedApplication {
    name: String,
    launch_command: Option<LaunchCommand>,
}

impl ManagedApplication {
    pub(crate) fn new(name: String, launch_command: Option<LaunchCommand>) -> Self {
        Self {
            name,
            launch_command,
        }
    }

    /// プロセス名（監視・ログ相関用の論理名）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 起動コマンド（None の場合はプロセスマネージャー自身は何も起動しない）
    pub fn launch_command(&self) -> Option<&LaunchCommand> {
        self.launch_command.as_ref()
    }

    pub fn is_managed(&self) -> bool {
        self.launch_command.is_some()
    }
}
