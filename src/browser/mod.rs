pub mod connection;
pub mod headless;

pub use connection::connect_to_browser;
pub use headless::launch_browser;

use anyhow::{Context, Result};
use chromiumoxide::{Browser, Page};
use tracing::debug;

use crate::config::Config;

/// 按配置决定连接已有浏览器还是启动新浏览器，并应用 User-Agent 覆盖
pub async fn open_browser(config: &Config) -> Result<(Browser, Page)> {
    let (browser, page) = match config.browser_debug_port {
        Some(port) => connect_to_browser(port).await?,
        None => launch_browser(config.headless).await?,
    };

    if let Some(user_agent) = config.effective_user_agent() {
        page.set_user_agent(user_agent)
            .await
            .context("设置 User-Agent 失败")?;
        debug!("已设置 User-Agent: {}", user_agent);
    }

    Ok((browser, page))
}
