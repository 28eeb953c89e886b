//! 商品处理上下文
//!
//! 封装"我正在处理哪个关键词下的第几个商品"这一信息

use std::fmt::Display;

/// 商品处理上下文
#[derive(Debug, Clone)]
pub struct ProductCtx {
    /// 搜索关键词
    pub keyword: String,

    /// 商品在该关键词下的序号（从1开始，仅用于日志显示）
    pub product_index: usize,

    /// 商品页地址
    pub url: String,
}

impl ProductCtx {
    pub fn new(keyword: impl Into<String>, product_index: usize, url: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            product_index,
            url: url.into(),
        }
    }
}

impl Display for ProductCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[关键词 '{}' 商品#{} {}]",
            self.keyword, self.product_index, self.url
        )
    }
}
