use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error(
        "ディスクリプタファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリとその親: ecosystem.config.{{json,yaml,yml,js,cjs}}, ecosystem.{{json,yaml,yml}}\n\
        - 上記の各ディレクトリの .ecodeploy/\n\
        - ~/.config/ecodeploy/ecosystem.yaml\n\
        または ECODEPLOY_CONFIG_PATH 環境変数で直接指定できます"
    )]
    DescriptorNotFound,

    #[error("ECODEPLOY_CONFIG_PATH が存在しないファイルを指しています: {0}")]
    ConfigPathMissing(String),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
