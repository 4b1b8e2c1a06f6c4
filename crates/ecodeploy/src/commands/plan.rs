use crate::utils;
use colored::Colorize;
use std::path::PathBuf;

pub fn handle(file: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let (path, descriptor) = utils::load_descriptor(file)?;
    let plan = ecodeploy_core::render_launch_plan(&descriptor);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    utils::print_loaded_descriptor(&path);
    println!();
    println!("{}", format!("起動プラン ({} 個):", plan.len()).bold());
    if plan.is_empty() {
        println!("  (アプリケーションがありません)");
    }
    for (i, step) in plan.iter().enumerate() {
        match &step.command {
            Some(command) => {
                println!("  {}. {} → {}", i + 1, step.application.cyan(), command);
            }
            None => {
                println!(
                    "  {}. {} → {}",
                    i + 1,
                    step.application.cyan(),
                    "(起動コマンドなし)".dimmed()
                );
            }
        }
    }

    Ok(())
}
