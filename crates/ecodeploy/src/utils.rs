use colored::Colorize;
use ecodeploy_core::{DeploymentDescriptor, DeploymentEnvironment, DescriptorError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// ディスクリプタファイルを決定する（--file 優先、なければ自動検出）
pub fn resolve_descriptor_path(file: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let path = match file {
        Some(path) => path,
        None => ecodeploy_config::find_descriptor_file()?,
    };
    debug!(path = %path.display(), "Resolved descriptor path");
    Ok(path)
}

/// ディスクリプタを決定してロード
pub fn load_descriptor(file: Option<PathBuf>) -> anyhow::Result<(PathBuf, DeploymentDescriptor)> {
    let path = resolve_descriptor_path(file)?;
    let descriptor = ecodeploy_core::load_file(&path)?;
    debug!(
        applications = descriptor.applications().len(),
        environments = descriptor.environments().len(),
        "Descriptor ready"
    );
    Ok((path, descriptor))
}

/// 環境を取得する（見つからない場合は利用可能な環境を案内）
pub fn select_environment<'a>(
    descriptor: &'a DeploymentDescriptor,
    name: &str,
) -> anyhow::Result<&'a DeploymentEnvironment> {
    match ecodeploy_core::select_environment(descriptor, name) {
        Ok(env) => Ok(env),
        Err(e @ DescriptorError::UnknownEnvironment(_)) => {
            let available = descriptor.environment_names().collect::<Vec<_>>();
            let hint = if available.is_empty() {
                "deploy に環境が定義されていません".to_string()
            } else {
                format!("利用可能な環境: {}", available.join(", "))
            };
            Err(anyhow::anyhow!("{}\n{}", e, hint))
        }
        Err(e) => Err(e.into()),
    }
}

/// 読み込んだディスクリプタファイルを表示
pub fn print_loaded_descriptor(path: &Path) {
    println!("📄 読み込んだディスクリプタ:");
    println!("  • {}", path.display().to_string().cyan());
}
