//! Application metadata constants

pub const NAME: &str = "dmud";
pub const DISPLAY_NAME: &str = "dmud console";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Reconnecting terminal console for dmud game servers";

/// Directory name for dmud config within home or a project
pub const DATA_DIR: &str = ".dmud";
/// Env file inside DATA_DIR
pub const ENV_FILE: &str = "env";

/// Launch URL used when none is given (origin for endpoint resolution).
pub const DEFAULT_PAGE_URL: &str = "http://localhost:4000/";
/// WebSocket path used when the launch parameters name none.
pub const DEFAULT_WS_PATH: &str = "/ws";
