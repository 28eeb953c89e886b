//! 商品处理流程 - 流程层
//!
//! 核心职责：定义"一个商品页"的完整处理流程
//!
//! 流程顺序：
//! 1. 导航并等待页面稳定
//! 2. 在限定时间内尝试点击评论标签（失败也继续）
//! 3. 点中后在同样的时限内等待评论列表出现
//! 4. 取页面源码提取评论

use std::fmt;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::CollectorResult;
use crate::infrastructure::BrowserDriver;
use crate::logger::truncate_text;
use crate::models::Review;
use crate::services::{ElementFinder, FindOutcome, Pacer, ReviewExtractor};
use crate::workflow::product_ctx::ProductCtx;

/// 单个商品的处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductState {
    NotVisited,
    Visited,
    ReviewsTabAttempted,
    ReviewsScraped,
}

impl ProductState {
    fn advance(self) -> Self {
        match self {
            ProductState::NotVisited => ProductState::Visited,
            ProductState::Visited => ProductState::ReviewsTabAttempted,
            ProductState::ReviewsTabAttempted | ProductState::ReviewsScraped => {
                ProductState::ReviewsScraped
            }
        }
    }
}

/// 评论标签的定位方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabLocator {
    /// 自身文字包含指定内容的链接
    LinkText(String),
    /// CSS 选择器
    Css(String),
}

impl fmt::Display for TabLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabLocator::LinkText(text) => write!(f, "a:text('{}')", text),
            TabLocator::Css(selector) => f.write_str(selector),
        }
    }
}

/// 评论标签的点击结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabOutcome {
    /// 已点击该定位方式对应的标签
    Activated {
        locator: TabLocator,
        /// 时限内是否等到了评论列表
        list_loaded: bool,
    },
    /// 超时仍未找到可点击的标签，直接继续
    NotFoundProceeding,
}

/// 评论标签的点击与等待设置
pub struct TabSettings {
    /// 按优先级排列的定位方式
    pub locators: Vec<TabLocator>,
    /// 点中后等待出现的评论列表，`None` 表示不等待
    pub review_list: Option<ElementFinder>,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl TabSettings {
    /// 文字定位在前，CSS 选择器随后
    pub fn from_config(config: &Config) -> CollectorResult<Self> {
        let mut locators = Vec::new();
        let text = config.review_tab_text.trim();
        if !text.is_empty() {
            locators.push(TabLocator::LinkText(text.to_string()));
        }
        locators.extend(
            config
                .review_tab_selectors
                .iter()
                .map(|s| TabLocator::Css(s.clone())),
        );

        let list_selector = config.review_list_selector.trim();
        let review_list = if list_selector.is_empty() {
            None
        } else {
            Some(ElementFinder::from_selectors(&[list_selector])?)
        };

        Ok(Self {
            locators,
            review_list,
            timeout: config.tab_wait_timeout(),
            poll_interval: config.tab_poll_interval(),
        })
    }
}

/// 单个商品的处理结果
#[derive(Debug, Clone)]
pub struct ProductReport {
    pub state: ProductState,
    pub tab: TabOutcome,
    pub reviews: Vec<Review>,
}

/// 商品处理流程
///
/// - 不持有浏览器资源，通过 `BrowserDriver` 操作页面
/// - 只处理单个商品
pub struct ProductFlow {
    tab: TabSettings,
    extractor: ReviewExtractor,
    pacer: Pacer,
}

impl ProductFlow {
    pub fn new(config: &Config) -> CollectorResult<Self> {
        let extractor = ReviewExtractor::new(
            ElementFinder::from_selectors(&config.review_text_selectors)?,
            config.max_reviews_per_product,
            config.min_review_chars,
        );
        Ok(Self::with_parts(
            TabSettings::from_config(config)?,
            extractor,
            Pacer::from_config(config),
        ))
    }

    pub fn with_parts(tab: TabSettings, extractor: ReviewExtractor, pacer: Pacer) -> Self {
        Self {
            tab,
            extractor,
            pacer,
        }
    }

    pub async fn run(
        &self,
        driver: &dyn BrowserDriver,
        ctx: &ProductCtx,
    ) -> CollectorResult<ProductReport> {
        let mut state = ProductState::NotVisited;

        info!("{} 🔗 打开商品页", ctx);
        driver.goto(&ctx.url).await?;
        self.pacer.settle().await;
        state = state.advance();
        debug!("{} 状态: {:?}", ctx, state);

        let tab = self.activate_review_tab(driver, ctx).await;
        state = state.advance();
        debug!("{} 状态: {:?}", ctx, state);

        let html = driver.page_source().await?;
        let reviews = self.extractor.extract(&ctx.keyword, &ctx.url, &html);
        state = state.advance();

        info!("{} ✓ 提取到 {} 条评论", ctx, reviews.len());
        if let Some(first) = reviews.first() {
            debug!("{} 首条评论: {}", ctx, truncate_text(&first.text, 40));
        }

        Ok(ProductReport {
            state,
            tab,
            reviews,
        })
    }

    /// 轮询所有定位方式，直到点中一个或超时
    pub async fn activate_review_tab(
        &self,
        driver: &dyn BrowserDriver,
        ctx: &ProductCtx,
    ) -> TabOutcome {
        if self.tab.locators.is_empty() {
            return TabOutcome::NotFoundProceeding;
        }

        let deadline = Instant::now() + self.tab.timeout;
        loop {
            for locator in &self.tab.locators {
                let clicked = match locator {
                    TabLocator::LinkText(text) => driver.try_click_text("a", text).await,
                    TabLocator::Css(selector) => driver.try_click(selector).await,
                };
                match clicked {
                    Ok(true) => {
                        debug!("{} 已点击评论标签: {}", ctx, locator);
                        self.pacer.settle().await;
                        let list_loaded = self.wait_for_review_list(driver, ctx).await;
                        return TabOutcome::Activated {
                            locator: locator.clone(),
                            list_loaded,
                        };
                    }
                    Ok(false) => {}
                    Err(e) => debug!("{} 点击 {} 出错: {}", ctx, locator, e),
                }
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }
            sleep(self.tab.poll_interval.min(deadline - now)).await;
        }

        warn!("{} ⚠️ 未找到评论标签，直接解析当前页面", ctx);
        TabOutcome::NotFoundProceeding
    }

    /// 等待评论列表出现，超时只记录日志
    async fn wait_for_review_list(&self, driver: &dyn BrowserDriver, ctx: &ProductCtx) -> bool {
        let Some(finder) = &self.tab.review_list else {
            return true;
        };

        let deadline = Instant::now() + self.tab.timeout;
        loop {
            match driver.page_source().await {
                Ok(html) => {
                    if let FindOutcome::Matched { .. } = finder.find(&html) {
                        debug!("{} 评论列表已加载", ctx);
                        return true;
                    }
                }
                Err(e) => debug!("{} 读取页面源码出错: {}", ctx, e),
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }
            sleep(self.tab.poll_interval.min(deadline - now)).await;
        }

        warn!("{} ⚠️ 等待评论列表超时，继续解析当前页面", ctx);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_text_is_tried_before_selectors() {
        let settings = TabSettings::from_config(&Config::default()).unwrap();
        assert_eq!(settings.locators[0], TabLocator::LinkText("리뷰".to_string()));
        assert!(settings.locators[1..]
            .iter()
            .all(|l| matches!(l, TabLocator::Css(_))));
        assert!(settings.review_list.is_some());
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_text_and_list_selector_are_skipped() {
        let config = Config {
            review_tab_text: "  ".to_string(),
            review_tab_selectors: vec!["a#tab".to_string()],
            review_list_selector: String::new(),
            ..Config::default()
        };

        let settings = TabSettings::from_config(&config).unwrap();
        assert_eq!(settings.locators, vec![TabLocator::Css("a#tab".to_string())]);
        assert!(settings.review_list.is_none());
    }
}
