//! # Review Harvest
//!
//! 两个互相独立的数据收集工具：
//!
//! - `review_harvest`：驱动浏览器搜索商品并采集评论，写出 `reviews_raw.json`
//! - `extract_archive`：把压缩包中的文件解压到目标目录，容忍单个条目失败
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动或连接浏览器
//! - `infrastructure/` - `BrowserDriver` 抽象及其 chromiumoxide 实现，`JsExecutor` 持有 page
//!
//! ### ② 业务能力层（Services）
//! - `ElementFinder` - 多选择器依次尝试的元素查找
//! - `ProductDiscovery` - 搜索地址构造与店铺链接过滤
//! - `ReviewExtractor` - 评论文本提取与过滤
//! - `ReviewWriter` - 写 JSON 结果文件
//! - `Pacer` - 固定等待与随机延迟
//!
//! ### ③ 流程层（Workflow）
//! - `ProductFlow` - 单个商品：打开 → 点评论标签 → 提取
//!
//! ### ④ 编排层（Orchestration）
//! - `Collector` - 遍历关键词和商品，保证收尾
//! - `App` - 进程生命周期
//!
//! ### 解压工具
//! - `archive/` - `ArchiveExtractor`

pub mod archive;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use archive::ArchiveExtractor;
pub use config::Config;
pub use error::{CollectorError, ExtractError};
pub use infrastructure::BrowserDriver;
pub use models::{Review, ReviewCollection};
pub use orchestrator::{App, CollectionReport, Collector};
pub use workflow::{ProductFlow, TabOutcome};
