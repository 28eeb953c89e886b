//! 商品发现服务 - 业务能力层
//!
//! 只负责"从搜索结果页找出商品链接"，不负责导航

use url::Url;

use crate::error::{CollectorError, CollectorResult};
use crate::services::element_finder::{ElementFinder, FindOutcome};

/// 商品发现服务
pub struct ProductDiscovery {
    search_url_template: String,
    storefront_domain: String,
    finder: ElementFinder,
}

impl ProductDiscovery {
    pub fn new(
        search_url_template: impl Into<String>,
        storefront_domain: impl Into<String>,
        finder: ElementFinder,
    ) -> Self {
        Self {
            search_url_template: search_url_template.into(),
            storefront_domain: storefront_domain.into().to_ascii_lowercase(),
            finder,
        }
    }

    /// 构造关键词的搜索地址
    pub fn search_url(&self, keyword: &str) -> CollectorResult<String> {
        let encoded: String = url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
        let raw = self.search_url_template.replace("{query}", &encoded);
        Url::parse(&raw)
            .map(String::from)
            .map_err(|source| CollectorError::InvalidUrl { url: raw, source })
    }

    /// 从搜索结果页中挑出店铺域名下的商品链接
    ///
    /// 相对链接按搜索页地址补全，重复链接只保留第一次出现的，最多返回 `limit` 个
    pub fn discover(&self, search_url: &str, html: &str, limit: usize) -> Vec<String> {
        let base = Url::parse(search_url).ok();
        let elements = match self.finder.find(html) {
            FindOutcome::Matched { elements, .. } => elements,
            FindOutcome::Empty => return Vec::new(),
        };

        let mut products: Vec<String> = Vec::new();
        for href in elements.into_iter().filter_map(|el| el.href) {
            if products.len() >= limit {
                break;
            }
            let Some(resolved) = resolve(base.as_ref(), &href) else {
                continue;
            };
            if self.is_storefront(&resolved) && !products.iter().any(|p| p == resolved.as_str()) {
                products.push(resolved.into());
            }
        }
        products
    }

    /// 链接是否属于店铺域名（含子域名）
    pub fn is_storefront(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => {
                let host = host.to_ascii_lowercase();
                host == self.storefront_domain
                    || host.ends_with(&format!(".{}", self.storefront_domain))
            }
            None => false,
        }
    }
}

fn resolve(base: Option<&Url>, href: &str) -> Option<Url> {
    let url = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    matches!(url.scheme(), "http" | "https").then_some(url)
}
