use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const PRODUCTION_JS: &str = r#"module.exports = {
  apps : [{
    name   : "TradingDiscordBot",
    script : "./target/release/trading_discord_bot"
  }],
  deploy : {
    production : {
       "user" : "deployment",
       "host" : "192.46.229.57",
       "ref"  : "origin/production",
       "repo" : "git@github.com:Username/repository.git",
       "path" : "/home/deployment/trading-bot",
       "post-deploy" : "cargo build --release && diesel migration run && pm2 startOrRestart ecosystem.config.js"
    }
  }
}
"#;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[allow(dead_code)]
    pub fn write_ecosystem_js(&self, content: &str) -> PathBuf {
        self.write("ecosystem.config.js", content)
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }
}
