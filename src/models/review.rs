use serde::{Deserialize, Serialize};

/// 一条评论记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// 搜索关键词
    pub keyword: String,
    /// 评论所在商品页地址
    pub source_url: String,
    /// 评论正文
    pub text: String,
}

impl Review {
    pub fn new(
        keyword: impl Into<String>,
        source_url: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            source_url: source_url.into(),
            text: text.into(),
        }
    }
}

/// 一次运行中按顺序累积的评论
pub type ReviewCollection = Vec<Review>;
