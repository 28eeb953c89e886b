use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 采集程序配置
///
/// 默认值即内置常量，可通过环境变量或 TOML 文件覆盖
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 搜索关键词
    pub keywords: Vec<String>,
    /// 每个关键词最多访问的商品数
    pub max_products_per_keyword: usize,
    /// 每个商品最多保留的评论数
    pub max_reviews_per_product: usize,
    /// 评论文本最小长度（字符数，必须严格大于）
    pub min_review_chars: usize,
    /// 输出目录
    pub output_dir: PathBuf,
    /// 输出文件名
    pub output_file: String,
    /// 搜索 URL 模板，`{query}` 会被替换为编码后的关键词
    pub search_url_template: String,
    /// 商品所在的店铺域名
    pub storefront_domain: String,
    /// 搜索结果中商品链接的候选选择器（按优先级）
    pub product_link_selectors: Vec<String>,
    /// 评论标签链接需要包含的文字，优先于选择器尝试；为空时不按文字查找
    pub review_tab_text: String,
    /// 评论标签页的候选选择器（按优先级）
    pub review_tab_selectors: Vec<String>,
    /// 点击评论标签后等待出现的评论列表选择器；为空时不等待
    pub review_list_selector: String,
    /// 评论文本的候选选择器（按优先级）
    pub review_text_selectors: Vec<String>,
    /// 页面加载后的等待时间（毫秒）
    pub settle_ms: u64,
    /// 等待评论标签可点击的超时时间（毫秒）
    pub tab_wait_timeout_ms: u64,
    /// 轮询间隔（毫秒）
    pub tab_poll_interval_ms: u64,
    /// 商品之间的随机延迟下限（毫秒）
    pub min_delay_ms: u64,
    /// 商品之间的随机延迟上限（毫秒）
    pub max_delay_ms: u64,
    /// 浏览器调试端口，设置后连接已有浏览器而不是启动新的
    pub browser_debug_port: Option<u16>,
    /// 是否以无头模式启动
    pub headless: bool,
    /// 覆盖浏览器的 User-Agent
    pub user_agent: Option<String>,
}

/// 桌面版 Chrome 的 User-Agent
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

impl Default for Config {
    fn default() -> Self {
        Self {
            keywords: vec!["샌드위치".to_string(), "케이터링 박스".to_string()],
            max_products_per_keyword: 3,
            max_reviews_per_product: 20,
            min_review_chars: 10,
            output_dir: PathBuf::from("kakao_data/crawled_reviews"),
            output_file: "reviews_raw.json".to_string(),
            search_url_template: "https://search.shopping.naver.com/search/all?query={query}"
                .to_string(),
            storefront_domain: "smartstore.naver.com".to_string(),
            product_link_selectors: vec![
                "a.product_link__TrAac".to_string(),
                "div.basicList_title__3P9Q7 > a".to_string(),
                "a[target='_blank']".to_string(),
            ],
            review_tab_text: "리뷰".to_string(),
            review_tab_selectors: vec![
                "a[href='#REVIEW']".to_string(),
                "li[data-name='REVIEW'] a".to_string(),
            ],
            review_list_selector: "div.review_list".to_string(),
            review_text_selectors: vec![
                "div.review_text".to_string(),
                "p.review_text__2lW2j".to_string(),
                ".reviewItems_text__XIsTc".to_string(),
            ],
            settle_ms: 2000,
            tab_wait_timeout_ms: 5000,
            tab_poll_interval_ms: 500,
            min_delay_ms: 1000,
            max_delay_ms: 3000,
            browser_debug_port: None,
            headless: false,
            user_agent: Some(DESKTOP_USER_AGENT.to_string()),
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置或无法解析的项使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，文件中未出现的项使用默认值
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;
        Ok(config)
    }

    /// 先读取 `REVIEW_CONFIG` 指向的文件（若有），再应用环境变量
    pub fn resolve() -> Result<Self> {
        let base = match std::env::var("REVIEW_CONFIG") {
            Ok(path) => Self::load(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            keywords: std::env::var("REVIEW_KEYWORDS")
                .ok()
                .map(|v| parse_keywords(&v))
                .unwrap_or(self.keywords),
            max_products_per_keyword: env_parse("MAX_PRODUCTS_PER_KEYWORD")
                .unwrap_or(self.max_products_per_keyword),
            max_reviews_per_product: env_parse("MAX_REVIEWS_PER_PRODUCT")
                .unwrap_or(self.max_reviews_per_product),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.output_dir),
            browser_debug_port: env_parse("BROWSER_DEBUG_PORT").or(self.browser_debug_port),
            headless: env_parse("HEADLESS").unwrap_or(self.headless),
            user_agent: std::env::var("REVIEW_USER_AGENT")
                .ok()
                .or(self.user_agent),
            ..self
        }
    }

    /// 结果文件完整路径
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    pub fn settle_time(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn tab_wait_timeout(&self) -> Duration {
        Duration::from_millis(self.tab_wait_timeout_ms)
    }

    pub fn tab_poll_interval(&self) -> Duration {
        Duration::from_millis(self.tab_poll_interval_ms)
    }

    /// 实际生效的 User-Agent，空字符串视为不覆盖
    pub fn effective_user_agent(&self) -> Option<&str> {
        self.user_agent
            .as_deref()
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
