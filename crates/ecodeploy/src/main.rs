mod commands;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ecodeploy")]
#[command(about = "デプロイディスクリプタを検証し、起動プランとデプロイ手順を表示する", long_about = None)]
struct Cli {
    /// ディスクリプタファイル（省略時はカレントディレクトリから自動検出）
    #[arg(
        short = 'f',
        long = "file",
        env = "ECODEPLOY_CONFIG_PATH",
        global = true
    )]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ディスクリプタを検証（複数指定時はそれぞれ独立に検証）
    Validate {
        /// 検証するファイル（省略時は --file または自動検出）
        files: Vec<PathBuf>,
    },
    /// 起動プランを表示
    Plan {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },
    /// デプロイ環境の設定を表示
    Env {
        /// 環境名 (production, staging, ...)
        name: String,
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },
    /// デプロイ手順を表示（実行はしない）
    Deploy {
        /// 環境名 (production, staging, ...)
        name: String,
        /// JSONで出力
        #[arg(long, conflicts_with = "shell")]
        json: bool,
        /// 単一のシェルコマンドとして出力
        #[arg(long)]
        shell: bool,
    },
    /// バージョン情報を表示
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout は --json 出力に使うので、ログは stderr に出す
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .init();

    match cli.command {
        Commands::Version => {
            println!("ecodeploy {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate { files } => {
            commands::validate::handle(&files, cli.file)?;
        }
        Commands::Plan { json } => {
            commands::plan::handle(cli.file, json)?;
        }
        Commands::Env { name, json } => {
            commands::env::handle(cli.file, &name, json)?;
        }
        Commands::Deploy { name, json, shell } => {
            commands::deploy::handle(cli.file, &name, json, shell)?;
        }
    }

    Ok(())
}
