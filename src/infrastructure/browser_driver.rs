//! 浏览器驱动抽象
//!
//! 采集流程只通过这个 trait 操作浏览器，测试时可替换为内存实现

use async_trait::async_trait;

use crate::error::CollectorResult;

/// 采集流程需要的浏览器能力
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// 导航到指定地址
    async fn goto(&self, url: &str) -> CollectorResult<()>;

    /// 滚动到页面底部，触发懒加载
    async fn scroll_to_bottom(&self) -> CollectorResult<()>;

    /// 当前页面的 HTML 源码
    async fn page_source(&self) -> CollectorResult<String>;

    /// 尝试点击一次匹配选择器的元素
    ///
    /// 元素不存在或当前不可点击时返回 `Ok(false)`
    async fn try_click(&self, selector: &str) -> CollectorResult<bool>;

    /// 尝试点击一次第一个自身文字包含 `text` 的 `tag` 元素
    ///
    /// 只看元素的直接文本节点，不看子元素里的文字
    async fn try_click_text(&self, tag: &str, text: &str) -> CollectorResult<bool>;

    /// 结束浏览器会话
    async fn close(&self) -> CollectorResult<()>;
}
