//! 编排层（Orchestration Layer）
//!
//! ```text
//! app (进程生命周期、浏览器资源)
//!     ↓
//! collector (遍历关键词和商品)
//!     ↓
//! workflow::ProductFlow (处理单个商品)
//!     ↓
//! services (能力层：查找 / 发现 / 提取 / 写入)
//!     ↓
//! infrastructure (基础设施：BrowserDriver)
//! ```

pub mod app;
pub mod collector;

pub use app::App;
pub use collector::{CollectionReport, Collector};
