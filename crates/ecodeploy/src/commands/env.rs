use crate::utils;
use colored::Colorize;
use std::path::PathBuf;

pub fn handle(file: Option<PathBuf>, name: &str, json: bool) -> anyhow::Result<()> {
    let (path, descriptor) = utils::load_descriptor(file)?;
    let env = utils::select_environment(&descriptor, name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(env)?);
        return Ok(());
    }

    utils::print_loaded_descriptor(&path);
    println!();
    println!("環境: {}", env.name().cyan().bold());
    println!("  user:        {}", env.remote_user());
    println!("  host:        {}", env.remote_host());
    println!("  ref:         {}", env.source_ref());
    println!("  repo:        {}", env.source_repo());
    println!("  path:        {}", env.deploy_path());
    println!("  post-deploy: {}", env.post_deploy_command());

    Ok(())
}
