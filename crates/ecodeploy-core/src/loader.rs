//! 統合ローダー
//!
//! 読み込み元の解決、パース、検証を統合

use crate::error::{DescriptorError, Result};
use crate::model::{DeploymentDescriptor, DeploymentEnvironment};
use crate::parser::parse_descriptor;
use crate::source::{DescriptorSource, Format};
use std::path::Path;
use tracing::{info, instrument, warn};

/// 読み込み元からディスクリプタをロード
///
/// 以下の処理を実行:
/// 1. 読み込み元から値を取得（ファイル読み込み・フォーマット判定・パース）
/// 2. apps と deploy の検証
///
/// コマンドは一切実行しない。同じ読み込み元からは常に等しい結果が得られる。
#[instrument(skip(source))]
pub fn load(source: impl Into<DescriptorSource>) -> Result<DeploymentDescriptor> {
    let source = source.into();
    let value = source.read()?;

    let descriptor = parse_descriptor(&value).inspect_err(|e| {
        warn!(error = %e, "Descriptor validation failed");
    })?;

    info!(
        applications = descriptor.applications().len(),
        environments = descriptor.environments().len(),
        "Descriptor loaded successfully"
    );
    Ok(descriptor)
}

/// ファイルからロード
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_file(path: &Path) -> Result<DeploymentDescriptor> {
    load(DescriptorSource::file(path))
}

/// 文字列からロード（フォーマット未指定の場合は内容から判定）
pub fn load_str(content: &str, format: Option<Format>) -> Result<DeploymentDescriptor> {
    load(DescriptorSource::text(content, format))
}

/// 環境名で環境を取得
pub fn select_environment<'a>(
    descriptor: &'a DeploymentDescriptor,
    env_name: &str,
) -> Result<&'a DeploymentEnvironment> {
    descriptor
        .environment(env_name)
        .ok_or_else(|| DescriptorError::UnknownEnvironment(env_name.to_string()))
}
