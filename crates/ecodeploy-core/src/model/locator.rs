//! リポジトリロケーター

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*)://(?:(?P<user>[^@/\s]+)@)?(?P<host>[^/:\s]*)(?::(?P<port>\d+))?(?P<path>/\S*)?$",
    )
    .expect("URL pattern is valid")
});

static SCP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<user>[^@/:\s]+)@)?(?P<host>[^@/:\s]+):(?P<path>[^\s]+)$")
        .expect("scp pattern is valid")
});

/// git リモートの位置指定
///
/// - scp 形式: `git@github.com:owner/repo.git`
/// - URL 形式: `ssh://git@example.com:2222/owner/repo.git`, `https://...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RepoLocator {
    Scp {
        user: Option<String>,
        host: String,
        path: String,
    },
    Url {
        scheme: String,
        host: String,
        path: String,
    },
}

impl RepoLocator {
    /// ロケーター文字列を解析（形式が不正な場合は None）
    pub fn parse(s: &str) -> Option<Self> {
        if s.contains("://") {
            let caps = URL_PATTERN.captures(s)?;
            let scheme = caps["scheme"].to_ascii_lowercase();
            let host = caps["host"].to_string();
            // file:///srv/repo.git のみホスト省略可
            if host.is_empty() && scheme != "file" {
                return None;
            }
            let path = caps
                .name("path")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            return Some(RepoLocator::Url { scheme, host, path });
        }

        let caps = SCP_PATTERN.captures(s)?;
        Some(RepoLocator::Scp {
            user: caps.name("user").map(|m| m.as_str().to_string()),
            host: caps["host"].to_string(),
            path: caps["path"].to_string(),
        })
    }

    pub fn host(&self) -> &str {
        match self {
            RepoLocator::Scp { host, .. } | RepoLocator::Url { host, .. } => host,
        }
    }
}
