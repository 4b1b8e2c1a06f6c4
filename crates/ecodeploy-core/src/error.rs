use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("ディスクリプタの構造が不正です: {0}")]
    MalformedDescriptor(String),

    #[error("アプリケーション #{index} が不正です: {reason}")]
    InvalidApplication { index: usize, reason: String },

    #[error("環境 '{name}' の設定が不正です: {}", .problems.join(", "))]
    InvalidEnvironment { name: String, problems: Vec<String> },

    #[error("環境が見つかりません: {0}")]
    UnknownEnvironment(String),

    #[error("IO エラー: {path}\n理由: {message}")]
    Io { path: PathBuf, message: String },

    #[error("JSONパースエラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAMLパースエラー: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DescriptorError {
    /// 環境エラーの場合、対象の環境名を返す
    pub fn environment_name(&self) -> Option<&str> {
        match self {
            DescriptorError::InvalidEnvironment { name, .. } => Some(name),
            DescriptorError::UnknownEnvironment(name) => Some(name),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DescriptorError>;
