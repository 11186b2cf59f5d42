//! CLI entry point for the dmud console.

mod cli;
mod commands;
mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use dmud_constant::app::{DATA_DIR, ENV_FILE};

use crate::cli::Cli;

/// Load configuration from env files; earlier files win since dotenvy never
/// overrides a variable that is already set.
/// Order: 1) process env  2) ~/.dmud/env  3) nearest .dmud/env  4) nearest .env
fn load_dmud_config() {
    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(DATA_DIR).join(ENV_FILE);
        if config_path.exists() {
            let _ = dotenvy::from_path(&config_path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(project_env) = find_upwards(&cwd, &Path::new(DATA_DIR).join(ENV_FILE)) {
            let _ = dotenvy::from_path(&project_env);
        }
        if let Some(env_file) = find_upwards(&cwd, Path::new(".env")) {
            let _ = dotenvy::from_path(&env_file);
        }
    }
}

/// First `start/…/relative` that exists, walking up at most 32 levels.
fn find_upwards(start: &Path, relative: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.exists())
}

#[tokio::main]
async fn main() {
    load_dmud_config();
    let cli = Cli::parse();
    output::init(cli.output);

    if let Err(e) = commands::handle(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
