//! `dmud endpoint`: print the resolved WebSocket endpoint.

use anyhow::Result;

use crate::cli::LaunchArgs;
use crate::output;

use super::resolve_launch;

pub fn handle(args: LaunchArgs) -> Result<()> {
    let launch = resolve_launch(&args)?;
    if output::is_json() {
        output::data(
            "endpoint",
            &serde_json::json!({
                "endpoint": launch.url,
                "page": launch.page_url,
                "secure": launch.page.secure,
            }),
        );
    } else {
        println!("{}", launch.url);
    }
    Ok(())
}
