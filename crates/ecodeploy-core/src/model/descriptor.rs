//! Descriptor定義

use super::application::ManagedApplication;
use super::environment::DeploymentEnvironment;
use serde::Serialize;
use std::collections::BTreeMap;

/// DeploymentDescriptor - 検証済みのデプロイ設定
///
/// 管理対象アプリケーションとデプロイ環境は独立した軸で、
/// どの環境を選んでも同じアプリケーション群がデプロイされる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeploymentDescriptor {
    /// 起動順のアプリケーション
    applications: Vec<ManagedApplication>,
    /// 環境名 → 環境
    environments: BTreeMap<String, DeploymentEnvironment>,
}

impl DeploymentDescriptor {
    pub(crate) fn new(
        applications: Vec<ManagedApplication>,
        environments: BTreeMap<String, DeploymentEnvironment>,
    ) -> Self {
        Self {
            applications,
            environments,
        }
    }

    pub fn applications(&self) -> &[ManagedApplication] {
        &self.applications
    }

    pub fn environments(&self) -> &BTreeMap<String, DeploymentEnvironment> {
        &self.environments
    }

    pub fn application(&self, name: &str) -> Option<&ManagedApplication> {
        self.applications.iter().find(|app| app.name() == name)
    }

    pub fn environment(&self, name: &str) -> Option<&DeploymentEnvironment> {
        self.environments.get(name)
    }

    pub fn environment_names(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }

    /// アプリケーションも環境も持たない（何もしない）ディスクリプタか
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty() && self.environments.is_empty()
    }
}
