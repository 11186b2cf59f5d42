//! WebSocket endpoint resolution from launch parameters.

use dmud_constant::app::DEFAULT_WS_PATH;
use url::Url;

use crate::params::LaunchParams;

/// Where the console was "loaded from": decides the default host and scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// True when the launch URL used `https`.
    pub secure: bool,
    /// Host with port, e.g. `localhost:4000`.
    pub host: String,
}

impl PageLocation {
    pub fn new(secure: bool, host: impl Into<String>) -> Self {
        Self {
            secure,
            host: host.into(),
        }
    }

    pub fn from_url(url: &Url) -> Self {
        let host = match (url.host_str(), url.port()) {
            (Some(h), Some(p)) => format!("{h}:{p}"),
            (Some(h), None) => h.to_string(),
            (None, _) => String::new(),
        };
        Self {
            secure: url.scheme() == "https",
            host,
        }
    }

    fn ws_scheme(&self) -> &'static str {
        if self.secure { "wss" } else { "ws" }
    }
}

/// Resolve the endpoint once at startup.
///
/// Priority: `ws` / `endpoint` verbatim, then `host` + `path`, then the page
/// host + `path`. `path` defaults to `/ws`.
pub fn resolve_websocket_url(params: &LaunchParams, page: &PageLocation) -> String {
    if let Some(explicit) = params
        .get_non_empty("ws")
        .or_else(|| params.get_non_empty("endpoint"))
    {
        return explicit.to_string();
    }
    let path = params.get_non_empty("path").unwrap_or(DEFAULT_WS_PATH);
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    let host = params.get_non_empty("host").unwrap_or(page.host.as_str());
    format!("{}://{}{}", page.ws_scheme(), host, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageLocation {
        PageLocation::new(false, "localhost:4000")
    }

    #[test]
    fn explicit_ws_wins() {
        let p = LaunchParams::from_query("ws=wss://a.example/x&endpoint=ws://b&host=c");
        assert_eq!(resolve_websocket_url(&p, &page()), "wss://a.example/x");
    }

    #[test]
    fn endpoint_used_when_ws_missing() {
        let p = LaunchParams::from_query("endpoint=ws://b.example/socket");
        assert_eq!(resolve_websocket_url(&p, &page()), "ws://b.example/socket");
    }

    #[test]
    fn empty_ws_falls_through() {
        let p = LaunchParams::from_query("ws=&host=mud.example");
        assert_eq!(resolve_websocket_url(&p, &page()), "ws://mud.example/ws");
    }

    #[test]
    fn host_with_path_without_slash() {
        let p = LaunchParams::from_query("host=mud.example:9000&path=game");
        assert_eq!(resolve_websocket_url(&p, &page()), "ws://mud.example:9000/game");
    }

    #[test]
    fn secure_page_uses_wss() {
        let p = LaunchParams::from_query("host=mud.example");
        let secure = PageLocation::new(true, "portal.example");
        assert_eq!(resolve_websocket_url(&p, &secure), "wss://mud.example/ws");
    }

    #[test]
    fn falls_back_to_page_origin() {
        let p = LaunchParams::new();
        assert_eq!(resolve_websocket_url(&p, &page()), "ws://localhost:4000/ws");
    }

    #[test]
    fn page_origin_with_custom_path() {
        let p = LaunchParams::from_query("path=/live");
        assert_eq!(resolve_websocket_url(&p, &page()), "ws://localhost:4000/live");
    }

    #[test]
    fn page_location_from_url_without_port() {
        let url = Url::parse("https://mud.example/index.html").unwrap();
        let page = PageLocation::from_url(&url);
        assert_eq!(page, PageLocation::new(true, "mud.example"));
    }
}
