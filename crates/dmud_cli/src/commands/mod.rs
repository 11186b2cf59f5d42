//! Command dispatch and launch resolution shared by every subcommand.

pub mod endpoint;
pub mod theme;
pub mod tui;

use std::time::Duration;

use anyhow::{Context, Result};
use dmud_constant::app::DEFAULT_PAGE_URL;
use dmud_core::{params::parse_override, resolve_websocket_url, LaunchParams, PageLocation};
use dmud_runtime::RuntimeConfig;

use crate::cli::{Cli, Command, LaunchArgs};

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Tui { launch } => tui::handle(launch).await,
        Command::Endpoint { launch } => endpoint::handle(launch),
        Command::Theme { launch, messages } => theme::handle(launch, messages),
    }
}

/// Resolved launch: parameters, page origin and the endpoint they produce.
#[derive(Debug, Clone)]
pub struct Launch {
    pub page_url: String,
    pub params: LaunchParams,
    pub page: PageLocation,
    pub url: String,
}

/// `--page`, then DMUD_PAGE_URL, then the built-in default.
pub fn page_url(args: &LaunchArgs) -> String {
    args.page
        .clone()
        .or_else(|| std::env::var("DMUD_PAGE_URL").ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_PAGE_URL.to_string())
}

pub fn resolve_launch(args: &LaunchArgs) -> Result<Launch> {
    launch_from_page(args, page_url(args))
}

/// Explicit flags win over `--param`, which wins over the page query.
fn launch_from_page(args: &LaunchArgs, page_url: String) -> Result<Launch> {
    let (query, page) = LaunchParams::from_launch_url(&page_url)
        .with_context(|| format!("cannot parse launch url {page_url:?}"))?;

    let flags = [("ws", &args.ws), ("host", &args.host), ("path", &args.path)]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone())));
    let overrides: Vec<(String, String)> = flags
        .chain(args.params.iter().map(|raw| parse_override(raw)))
        .collect();

    let params = query.with_overrides(overrides);
    let url = resolve_websocket_url(&params, &page);
    Ok(Launch {
        page_url,
        params,
        page,
        url,
    })
}

/// Environment configuration with CLI flags applied on top.
pub fn runtime_config(args: &LaunchArgs) -> RuntimeConfig {
    apply_flags(RuntimeConfig::from_env(), args)
}

fn apply_flags(mut config: RuntimeConfig, args: &LaunchArgs) -> RuntimeConfig {
    if let Some(ms) = args.reconnect_delay_ms {
        config = config.with_reconnect_delay(Duration::from_millis(ms));
    }
    if let Some(path) = &args.style_file {
        config = config.with_style_file(path);
    }
    if let Some(path) = &args.theme_feed {
        config = config.with_theme_feed(path);
    }
    if let Some(path) = &args.theme_request {
        config = config.with_theme_request(path);
    }
    if args.no_parent_request {
        config = config.with_request_parent(false);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn launch(args: &LaunchArgs, page: &str) -> Launch {
        launch_from_page(args, page.to_string()).unwrap()
    }

    #[test]
    fn page_origin_is_the_default_host() {
        let l = launch(&LaunchArgs::default(), "http://localhost:4000/");
        assert_eq!(l.url, "ws://localhost:4000/ws");
    }

    #[test]
    fn page_query_supplies_parameters() {
        let l = launch(&LaunchArgs::default(), "https://portal.example/?host=mud.example&path=game");
        assert_eq!(l.url, "wss://mud.example/game");
    }

    #[test]
    fn param_overrides_page_query() {
        let args = LaunchArgs {
            params: vec!["host=other.example:7000".to_string()],
            ..Default::default()
        };
        let l = launch(&args, "http://localhost:4000/?host=mud.example");
        assert_eq!(l.url, "ws://other.example:7000/ws");
    }

    #[test]
    fn explicit_flag_beats_param() {
        let args = LaunchArgs {
            host: Some("flag.example".to_string()),
            params: vec!["host=param.example".to_string()],
            ..Default::default()
        };
        let l = launch(&args, "http://localhost:4000/");
        assert_eq!(l.url, "ws://flag.example/ws");
    }

    #[test]
    fn ws_flag_is_used_verbatim() {
        let args = LaunchArgs {
            ws: Some("wss://game.example/socket?token=a".to_string()),
            host: Some("ignored.example".to_string()),
            ..Default::default()
        };
        let l = launch(&args, "http://localhost:4000/");
        assert_eq!(l.url, "wss://game.example/socket?token=a");
    }

    #[test]
    fn theme_params_are_kept_for_the_runtime() {
        let args = LaunchArgs {
            params: vec!["accent=ff0000".to_string()],
            ..Default::default()
        };
        let l = launch(&args, "http://localhost:4000/?scheme=light");
        assert_eq!(l.params.get("accent"), Some("ff0000"));
        assert_eq!(l.params.get("scheme"), Some("light"));
    }

    #[test]
    fn bad_page_url_is_an_error() {
        assert!(launch_from_page(&LaunchArgs::default(), "not a url".to_string()).is_err());
    }

    #[test]
    fn flags_override_config() {
        let args = LaunchArgs {
            reconnect_delay_ms: Some(250),
            style_file: Some(PathBuf::from("style.toml")),
            no_parent_request: true,
            ..Default::default()
        };
        let config = apply_flags(RuntimeConfig::new(), &args);
        assert_eq!(config.reconnect_delay, Duration::from_millis(250));
        assert_eq!(config.style_file, Some(PathBuf::from("style.toml")));
        assert!(!config.request_parent);
        assert_eq!(config.theme_feed, None);
    }

    #[test]
    fn no_flags_keep_config() {
        let base = RuntimeConfig::new().with_theme_feed("feed.jsonl");
        assert_eq!(apply_flags(base.clone(), &LaunchArgs::default()), base);
    }
}
