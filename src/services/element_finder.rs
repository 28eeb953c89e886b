//! 元素查找服务 - 业务能力层
//!
//! 目标站点的页面结构经常变化，所以按优先级准备多个查找策略，
//! 依次尝试，第一个找到元素的策略胜出；全部落空时返回 `FindOutcome::Empty`。

use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{CollectorError, CollectorResult};

/// 页面中找到的一个元素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundElement {
    /// 合并空白并去掉首尾空白后的文本
    pub text: String,
    /// `href` 属性（如果有）
    pub href: Option<String>,
}

impl FoundElement {
    pub fn new(text: impl AsRef<str>, href: Option<String>) -> Self {
        Self {
            text: normalize_text(text.as_ref()),
            href,
        }
    }
}

/// 单个查找策略
pub trait FinderStrategy: Send + Sync {
    /// 策略名称（用于日志）
    fn name(&self) -> &str;

    /// 在文档中查找元素，找不到时返回空列表
    fn find(&self, document: &Html) -> Vec<FoundElement>;
}

/// 基于 CSS 选择器的查找策略
pub struct CssStrategy {
    raw: String,
    selector: Selector,
}

impl CssStrategy {
    pub fn new(selector: &str) -> CollectorResult<Self> {
        let parsed = Selector::parse(selector).map_err(|e| CollectorError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: selector.to_string(),
            selector: parsed,
        })
    }
}

impl FinderStrategy for CssStrategy {
    fn name(&self) -> &str {
        &self.raw
    }

    fn find(&self, document: &Html) -> Vec<FoundElement> {
        document
            .select(&self.selector)
            .map(|el| {
                // 文本节点直接拼接，内联标签不引入额外空格
                let text = el.text().collect::<String>();
                let href = el.value().attr("href").map(str::to_string);
                FoundElement::new(text, href)
            })
            .collect()
    }
}

/// 查找结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOutcome {
    /// 某个策略找到了元素
    Matched {
        strategy: String,
        elements: Vec<FoundElement>,
    },
    /// 所有策略都没有找到
    Empty,
}

impl FindOutcome {
    /// 取出元素列表，`Empty` 时为空
    pub fn into_elements(self) -> Vec<FoundElement> {
        match self {
            FindOutcome::Matched { elements, .. } => elements,
            FindOutcome::Empty => Vec::new(),
        }
    }
}

/// 按优先级排列的策略链
pub struct ElementFinder {
    strategies: Vec<Box<dyn FinderStrategy>>,
}

impl ElementFinder {
    pub fn new(strategies: Vec<Box<dyn FinderStrategy>>) -> Self {
        Self { strategies }
    }

    /// 由一组 CSS 选择器构造，任何一个选择器无效都会报错
    pub fn from_selectors<S: AsRef<str>>(selectors: &[S]) -> CollectorResult<Self> {
        let strategies = selectors
            .iter()
            .map(|s| CssStrategy::new(s.as_ref()).map(|c| Box::new(c) as Box<dyn FinderStrategy>))
            .collect::<CollectorResult<Vec<_>>>()?;
        Ok(Self::new(strategies))
    }

    /// 解析 HTML 后依次尝试各个策略
    pub fn find(&self, html: &str) -> FindOutcome {
        let document = Html::parse_document(html);
        self.find_in(&document)
    }

    pub fn find_in(&self, document: &Html) -> FindOutcome {
        for strategy in &self.strategies {
            let elements = strategy.find(document);
            if !elements.is_empty() {
                debug!("策略 '{}' 命中 {} 个元素", strategy.name(), elements.len());
                return FindOutcome::Matched {
                    strategy: strategy.name().to_string(),
                    elements,
                };
            }
            debug!("策略 '{}' 未命中", strategy.name());
        }
        FindOutcome::Empty
    }
}

/// 合并连续空白并去掉首尾空白
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
