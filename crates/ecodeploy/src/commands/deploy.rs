use crate::utils;
use colored::Colorize;
use ecodeploy_core::StepKind;
use std::path::PathBuf;

pub fn handle(file: Option<PathBuf>, name: &str, json: bool, shell: bool) -> anyhow::Result<()> {
    let (path, descriptor) = utils::load_descriptor(file)?;
    let env = utils::select_environment(&descriptor, name)?;
    let script = ecodeploy_core::render_deploy_script(env);

    if json {
        println!("{}", serde_json::to_string_pretty(&script)?);
        return Ok(());
    }
    if shell {
        println!("{}", script.to_shell());
        return Ok(());
    }

    println!("{}", "デプロイ手順を表示します...".blue().bold());
    utils::print_loaded_descriptor(&path);
    println!("環境: {}", script.environment.cyan());
    println!("接続先: {}", script.ssh_target.cyan());

    let total = script.steps.len();
    for (i, step) in script.steps.iter().enumerate() {
        let label = match step.kind {
            StepKind::Connect => "SSH接続",
            StepKind::Fetch => "ソース取得",
            StepKind::Checkout => "チェックアウト",
            StepKind::PostDeploy => "post-deploy",
        };
        println!();
        println!("{}", format!("【Step {}/{}】{}", i + 1, total, label).yellow());
        if let Some(dir) = &step.workdir {
            println!("  (in {})", dir);
        }
        println!("  $ {}", step.command);
    }

    println!();
    println!(
        "{}",
        "注意: このコマンドは手順を表示するだけで、何も実行しません。".yellow()
    );
    println!("実行する場合: ecodeploy deploy {} --shell | sh", name);

    Ok(())
}
