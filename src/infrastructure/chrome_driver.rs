use async_trait::async_trait;
use chromiumoxide::{Browser, Page};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::browser_driver::BrowserDriver;
use super::js_executor::JsExecutor;
use crate::error::{CollectorError, CollectorResult};

/// 基于 chromiumoxide 的浏览器驱动
pub struct ChromeDriver {
    browser: Mutex<Option<Browser>>,
    executor: JsExecutor,
    /// 连接到外部浏览器时为 false，关闭时只关闭页面
    owns_browser: bool,
}

/// 按文字点击时临时标记目标元素的属性名
const CLICK_MARKER: &str = "data-harvest-click";

impl ChromeDriver {
    pub fn new(browser: Browser, page: Page, owns_browser: bool) -> Self {
        Self {
            browser: Mutex::new(Some(browser)),
            executor: JsExecutor::new(page),
            owns_browser,
        }
    }

    /// 点击第一个匹配选择器的元素，元素已消失时返回 `Ok(false)`
    async fn click_first(&self, selector: &str) -> CollectorResult<bool> {
        match self.executor.page().find_element(selector).await {
            Ok(element) => {
                element.click().await?;
                Ok(true)
            }
            Err(e) => {
                debug!("查找元素 {} 失败: {}", selector, e);
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl BrowserDriver for ChromeDriver {
    async fn goto(&self, url: &str) -> CollectorResult<()> {
        debug!("导航到: {}", url);
        self.executor
            .page()
            .goto(url)
            .await
            .map_err(|e| CollectorError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> CollectorResult<()> {
        self.executor
            .eval("(() => { window.scrollTo(0, document.body.scrollHeight); return true; })()")
            .await?;
        Ok(())
    }

    async fn page_source(&self) -> CollectorResult<String> {
        Ok(self.executor.page().content().await?)
    }

    async fn try_click(&self, selector: &str) -> CollectorResult<bool> {
        // 可见且未禁用才视为可点击
        let probe = format!(
            r#"
            (() => {{
                const el = document.querySelector({});
                if (!el) return false;
                const rect = el.getBoundingClientRect();
                return rect.width > 0 && rect.height > 0 && !el.disabled;
            }})()
            "#,
            serde_json::to_string(selector)?
        );

        let clickable: bool = self.executor.eval_as(probe).await?;
        if !clickable {
            return Ok(false);
        }
        self.click_first(selector).await
    }

    async fn try_click_text(&self, tag: &str, text: &str) -> CollectorResult<bool> {
        // 给命中的元素打上标记，再按标记选择器点击
        let probe = format!(
            r#"
            (() => {{
                document.querySelectorAll('[{marker}]').forEach(el => el.removeAttribute('{marker}'));
                const needle = {text};
                const target = Array.from(document.getElementsByTagName({tag})).find(el => {{
                    const own = Array.from(el.childNodes)
                        .filter(n => n.nodeType === Node.TEXT_NODE)
                        .some(n => n.textContent.includes(needle));
                    if (!own || el.disabled) return false;
                    const rect = el.getBoundingClientRect();
                    return rect.width > 0 && rect.height > 0;
                }});
                if (!target) return false;
                target.setAttribute('{marker}', '1');
                return true;
            }})()
            "#,
            marker = CLICK_MARKER,
            text = serde_json::to_string(text)?,
            tag = serde_json::to_string(tag)?,
        );

        let found: bool = self.executor.eval_as(probe).await?;
        if !found {
            return Ok(false);
        }
        self.click_first(&format!("[{}]", CLICK_MARKER)).await
    }

    async fn close(&self) -> CollectorResult<()> {
        let mut guard = self.browser.lock().await;
        let Some(mut browser) = guard.take() else {
            return Ok(());
        };

        if self.owns_browser {
            browser.close().await?;
            if let Err(e) = browser.wait().await {
                warn!("等待浏览器进程退出失败: {}", e);
            }
            info!("🛑 浏览器已关闭");
        } else {
            self.executor.page().clone().close().await?;
            info!("🛑 已关闭采集页面（外部浏览器保持运行）");
        }
        Ok(())
    }
}
