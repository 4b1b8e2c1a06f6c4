//! ecodeploy-core — デプロイディスクリプタのロードと検証
//!
//! pm2 の `ecosystem.config.js` と同じ形のディスクリプタ
//! （`apps` と `deploy`）を読み込み、検証済みの `DeploymentDescriptor` に変換します。
//!
//! # 概要
//!
//! - **apps**: 管理対象アプリケーション（起動順）
//! - **deploy**: 環境名ごとのリモートデプロイ先
//! - **launch plan / deploy script**: 外部のスーパーバイザー・デプロイエージェント向けのデータ

pub mod deploy;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod plan;
pub mod source;

pub use deploy::*;
pub use error::*;
pub use loader::*;
pub use model::*;
pub use parser::*;
pub use plan::*;
pub use source::*;
