//! 测试用的内存浏览器驱动

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use scraper::{Html, Selector};
use review_harvest::error::{CollectorError, CollectorResult};
use review_harvest::{BrowserDriver, Config};

/// 按 URL 返回固定 HTML 的驱动
#[derive(Default)]
pub struct FakeDriver {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    clickable: HashSet<String>,
    current: Mutex<String>,
    visits: Mutex<Vec<String>>,
    clicks: Mutex<Vec<String>>,
    closed: AtomicBool,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// 导航到该地址时返回错误
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// 该选择器可以被点击
    pub fn clickable(mut self, selector: &str) -> Self {
        self.clickable.insert(selector.to_string());
        self
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.clicks.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserDriver for FakeDriver {
    async fn goto(&self, url: &str) -> CollectorResult<()> {
        self.visits.lock().unwrap().push(url.to_string());
        if self.failing.contains(url) {
            return Err(CollectorError::Navigation {
                url: url.to_string(),
                reason: "connection reset".to_string(),
            });
        }
        *self.current.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> CollectorResult<()> {
        Ok(())
    }

    async fn page_source(&self) -> CollectorResult<String> {
        let current = self.current.lock().unwrap().clone();
        Ok(self
            .pages
            .get(&current)
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string()))
    }

    async fn try_click(&self, selector: &str) -> CollectorResult<bool> {
        if self.clickable.contains(selector) {
            self.clicks.lock().unwrap().push(selector.to_string());
            return Ok(true);
        }
        Ok(false)
    }

    async fn try_click_text(&self, tag: &str, text: &str) -> CollectorResult<bool> {
        let html = self.page_source().await?;
        let document = Html::parse_document(&html);
        let selector = Selector::parse(tag).unwrap();
        let found = document.select(&selector).any(|el| {
            el.children()
                .filter_map(|node| node.value().as_text())
                .any(|t| t.contains(text))
        });
        if found {
            self.clicks.lock().unwrap().push(format!("text:{}", text));
        }
        Ok(found)
    }

    async fn close(&self) -> CollectorResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub const STORE: &str = "store.example.com";

pub fn search_url(keyword: &str) -> String {
    format!("https://search.example.com/search?q={}", keyword)
}

pub fn product_url(id: usize) -> String {
    format!("https://{}/products/{}", STORE, id)
}

/// 不等待、选择器固定的测试配置
pub fn test_config(keywords: &[&str], output_dir: &Path) -> Config {
    Config {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        max_products_per_keyword: 3,
        max_reviews_per_product: 2,
        min_review_chars: 10,
        output_dir: output_dir.to_path_buf(),
        output_file: "reviews_raw.json".to_string(),
        search_url_template: "https://search.example.com/search?q={query}".to_string(),
        storefront_domain: STORE.to_string(),
        product_link_selectors: vec!["a.missing-link".to_string(), "a.product".to_string()],
        review_tab_text: String::new(),
        review_tab_selectors: vec!["a#review-tab".to_string()],
        review_list_selector: String::new(),
        review_text_selectors: vec!["div.old-review".to_string(), "li.review p".to_string()],
        settle_ms: 0,
        tab_wait_timeout_ms: 30,
        tab_poll_interval_ms: 5,
        min_delay_ms: 0,
        max_delay_ms: 0,
        browser_debug_port: None,
        headless: true,
        user_agent: None,
    }
}

pub fn search_page(links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!("<a class=\"product\" href=\"{}\">item</a>", l))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

pub fn product_page(reviews: &[&str]) -> String {
    format!("<html><body>{}</body></html>", review_items(reviews))
}

/// 带评论标签链接和评论列表容器的商品页
pub fn tabbed_product_page(tab_text: &str, reviews: &[&str]) -> String {
    format!(
        "<html><body><a href=\"#REVIEW\">{}</a><div class=\"review_list\">{}</div></body></html>",
        tab_text,
        review_items(reviews)
    )
}

fn review_items(reviews: &[&str]) -> String {
    let items: String = reviews
        .iter()
        .map(|r| format!("<li class=\"review\"><p>{}</p></li>", r))
        .collect();
    format!("<ul>{}</ul>", items)
}
