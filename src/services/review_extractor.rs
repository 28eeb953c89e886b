//! 评论提取服务 - 业务能力层
//!
//! 只负责"从商品页源码中取出评论文本"

use crate::models::Review;
use crate::services::element_finder::ElementFinder;

/// 评论提取服务
pub struct ReviewExtractor {
    finder: ElementFinder,
    max_reviews: usize,
    min_chars: usize,
}

impl ReviewExtractor {
    pub fn new(finder: ElementFinder, max_reviews: usize, min_chars: usize) -> Self {
        Self {
            finder,
            max_reviews,
            min_chars,
        }
    }

    /// 提取评论
    ///
    /// 只保留字符数严格大于下限的文本，按页面顺序最多取 `max_reviews` 条
    pub fn extract(&self, keyword: &str, source_url: &str, html: &str) -> Vec<Review> {
        self.finder
            .find(html)
            .into_elements()
            .into_iter()
            .filter(|el| el.text.chars().count() > self.min_chars)
            .take(self.max_reviews)
            .map(|el| Review::new(keyword, source_url, el.text))
            .collect()
    }
}
