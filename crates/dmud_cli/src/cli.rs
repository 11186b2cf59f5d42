//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dmud_constant::app::{DESCRIPTION, NAME, VERSION};

#[derive(Parser)]
#[command(name = NAME, about = DESCRIPTION, version = VERSION, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the interactive console
    Tui {
        #[command(flatten)]
        launch: LaunchArgs,
    },
    /// Print the WebSocket endpoint the console would connect to
    Endpoint {
        #[command(flatten)]
        launch: LaunchArgs,
    },
    /// Print the resolved theme palette
    Theme {
        #[command(flatten)]
        launch: LaunchArgs,
        /// Theme message (JSON) to apply after startup resolution; repeatable
        #[arg(long = "message", value_name = "JSON")]
        messages: Vec<String>,
    },
}

/// Where to connect and how to theme. Flags win over `--param`, which wins
/// over the query string of `--page`.
#[derive(Args, Clone, Debug, Default)]
pub struct LaunchArgs {
    /// Launch URL; its query string supplies parameters, its origin the default host.
    /// Uses DMUD_PAGE_URL env if not set.
    #[arg(long, value_name = "URL")]
    pub page: Option<String>,
    /// Explicit WebSocket endpoint (used verbatim)
    #[arg(long, value_name = "URL")]
    pub ws: Option<String>,
    /// Server host (with optional port) when no endpoint is given
    #[arg(long)]
    pub host: Option<String>,
    /// Socket path on the host (default: /ws)
    #[arg(long)]
    pub path: Option<String>,
    /// Extra launch parameter (KEY=VALUE), e.g. --param accent=ff0000
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
    /// File of CSS custom properties (TOML or JSON) used as computed styles.
    /// Uses DMUD_STYLE_FILE env if not set.
    #[arg(long, value_name = "FILE")]
    pub style_file: Option<PathBuf>,
    /// File or FIFO of newline-delimited theme messages from the host.
    /// Uses DMUD_THEME_FEED env if not set.
    #[arg(long, value_name = "FILE")]
    pub theme_feed: Option<PathBuf>,
    /// File the console appends theme requests to.
    /// Uses DMUD_THEME_REQUEST env if not set.
    #[arg(long, value_name = "FILE")]
    pub theme_request: Option<PathBuf>,
    /// Do not ask the host for its theme at startup
    #[arg(long)]
    pub no_parent_request: bool,
    /// Delay before reconnecting after a drop, in milliseconds.
    /// Uses DMUD_RECONNECT_DELAY_MS env if not set (default 4000).
    #[arg(long, value_name = "MS")]
    pub reconnect_delay_ms: Option<u64>,
}
