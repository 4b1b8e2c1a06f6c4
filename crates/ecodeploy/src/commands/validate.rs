use crate::utils;
use colored::Colorize;
use ecodeploy_core::DeploymentDescriptor;
use std::path::PathBuf;

pub fn handle(files: &[PathBuf], default_file: Option<PathBuf>) -> anyhow::Result<()> {
    println!("{}", "ディスクリプタを検証中...".blue());

    // 複数ファイルはそれぞれ独立したディスクリプタとして扱う（マージしない）
    let targets = if files.is_empty() {
        vec![utils::resolve_descriptor_path(default_file)?]
    } else {
        files.to_vec()
    };

    let mut failed = 0;
    for path in &targets {
        println!();
        println!("ファイル: {}", path.display().to_string().cyan());

        match ecodeploy_core::load_file(path) {
            Ok(descriptor) => {
                println!("{}", "✓ ディスクリプタは正常です！".green().bold());
                print_summary(&descriptor);
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}", "✗ ディスクリプタエラー".red().bold());
                eprintln!("  {}", e);
            }
        }
    }

    if failed > 0 {
        eprintln!();
        eprintln!(
            "{}",
            format!("{}/{} 個のディスクリプタにエラーがあります", failed, targets.len()).red()
        );
        std::process::exit(1);
    }

    Ok(())
}

fn print_summary(descriptor: &DeploymentDescriptor) {
    println!();
    println!("サマリー:");
    println!("  アプリケーション: {}個", descriptor.applications().len());
    for app in descriptor.applications() {
        let command = app
            .launch_command()
            .map(|c| c.as_str())
            .unwrap_or("(起動コマンドなし)");
        println!("    - {} ({})", app.name().cyan(), command);
    }
    println!("  環境: {}個", descriptor.environments().len());
    for (name, env) in descriptor.environments() {
        println!(
            "    - {} ({}, {}, {}個のpost-deployステップ)",
            name.cyan(),
            env.ssh_target(),
            env.source_ref(),
            env.post_deploy_steps().len()
        );
    }
}
