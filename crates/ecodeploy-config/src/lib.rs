pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// ディスクリプタファイルを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "ECODEPLOY_CONFIG_PATH";

/// プロジェクト内の設定ディレクトリ名
pub const PROJECT_CONFIG_DIR: &str = ".ecodeploy";

/// 各ディレクトリで探すファイル名（優先順）
pub const DESCRIPTOR_CANDIDATES: [&str; 8] = [
    "ecosystem.config.json",
    "ecosystem.config.yaml",
    "ecosystem.config.yml",
    "ecosystem.config.js",
    "ecosystem.config.cjs",
    "ecosystem.json",
    "ecosystem.yaml",
    "ecosystem.yml",
];

/// ecodeployの設定ディレクトリを取得
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("ecodeploy");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// ディスクリプタファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 ECODEPLOY_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリから上に向かって: DESCRIPTOR_CANDIDATES, .ecodeploy/ 内の同名ファイル
/// 3. ~/.config/ecodeploy/ecosystem.yaml (グローバル設定)
pub fn find_descriptor_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(&config_path);
        if path.is_file() {
            info!(path = %path.display(), "Using descriptor from {}", CONFIG_PATH_ENV);
            return Ok(path);
        }
        return Err(ConfigError::ConfigPathMissing(config_path));
    }

    // 2. カレントディレクトリから上に向かって探す
    let current_dir = std::env::current_dir()?;
    if let Some(path) = find_descriptor_file_from(&current_dir) {
        return Ok(path);
    }

    // 3. グローバル設定ファイル
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("ecodeploy").join("ecosystem.yaml");
        if global_config.is_file() {
            info!(path = %global_config.display(), "Using global descriptor");
            return Ok(global_config);
        }
    }

    // どのファイルも見つからなかった
    Err(ConfigError::DescriptorNotFound)
}

/// 指定ディレクトリから親に向かってディスクリプタファイルを探す
pub fn find_descriptor_file_from(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        debug!(checking = %dir.display(), "Looking for descriptor");
        if let Some(path) = find_in_dir(dir) {
            info!(path = %path.display(), "Found descriptor");
            return Some(path);
        }
    }
    None
}

/// 1つのディレクトリ（とその .ecodeploy/）内で探す
fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    let project_dir = dir.join(PROJECT_CONFIG_DIR);
    [dir.to_path_buf(), project_dir]
        .iter()
        .flat_map(|base| DESCRIPTOR_CANDIDATES.iter().map(move |name| base.join(name)))
        .find(|path| path.is_file())
}
