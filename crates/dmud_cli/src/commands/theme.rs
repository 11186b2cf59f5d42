//! `dmud theme`: resolve the palette the console would start with and print it.

use anyhow::{Context, Result};
use dmud_core::theme::{MessageOutcome, NoParent, StyleSheet, ThemeRole, ThemeRoot, ThemeSync, ThemeSyncOptions};
use dmud_core::LaunchParams;

use crate::cli::LaunchArgs;
use crate::output;

use super::{resolve_launch, runtime_config};

pub fn handle(args: LaunchArgs, messages: Vec<String>) -> Result<()> {
    let launch = resolve_launch(&args)?;
    let config = runtime_config(&args);
    let style = match &config.style_file {
        Some(path) => StyleSheet::load(path)
            .with_context(|| format!("cannot load style file {}", path.display()))?,
        None => StyleSheet::new(),
    };

    let (root, ignored) = resolve_theme(launch.params, &style, &messages);
    for index in ignored {
        output::warning(&format!("message {} is not a theme update; ignored", index + 1));
    }

    let scheme = root.color_scheme.map(|s| s.as_str()).unwrap_or("unset");
    let mut table = output::table();
    output::table_header(&mut table, &["Role", "Variable", "Value"]);
    let mut items = Vec::with_capacity(ThemeRole::ALL.len());
    for role in ThemeRole::ALL {
        let name = format!("{role:?}");
        let value = root.role(role);
        output::table_row(&mut table, &[name.as_str(), role.css_var(), value]);
        items.push(serde_json::json!({ "role": name, "variable": role.css_var(), "value": value }));
    }

    if output::is_json() {
        output::data("theme", &root);
        return Ok(());
    }
    output::header("Resolved theme");
    output::kv("endpoint", &launch.url);
    output::kv("scheme", scheme);
    output::table_print(&table, &serde_json::Value::Array(items));
    Ok(())
}

/// Startup resolution without a host, then each message in order. Returns
/// the indices of messages that were not theme updates.
fn resolve_theme(params: LaunchParams, style: &StyleSheet, messages: &[String]) -> (ThemeRoot, Vec<usize>) {
    let mut sync = ThemeSync::new(params, NoParent, ThemeSyncOptions { request_parent: false });
    sync.init(style);
    let ignored = messages
        .iter()
        .enumerate()
        .filter(|(_, text)| sync.handle_message_text(text) != MessageOutcome::Applied)
        .map(|(i, _)| i)
        .collect();
    (sync.root().clone(), ignored)
}
