//! 应用入口 - 编排层
//!
//! 负责进程级生命周期：校验配置、打开浏览器、运行采集器。
//! 浏览器打不开时仍会写出空结果文件。

use anyhow::{bail, Context, Result};
use tracing::{error, info};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::ChromeDriver;
use crate::logger;
use crate::orchestrator::collector::{CollectionReport, Collector};

/// 应用主结构
pub struct App {
    collector: Collector,
    driver: ChromeDriver,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logger::log_banner("🚀 评论采集程序启动");
        info!("🔑 关键词数量: {}", config.keywords.len());
        info!(
            "📊 每个关键词最多 {} 个商品, 每个商品最多 {} 条评论",
            config.max_products_per_keyword, config.max_reviews_per_product
        );

        let collector = Collector::new(&config).context("采集配置无效")?;

        let (browser, page) = match browser::open_browser(&config).await {
            Ok(opened) => opened,
            Err(e) => {
                error!("❌ 浏览器启动失败: {}", e);
                collector.writer().write(&[])?;
                return Err(e.context("浏览器启动失败"));
            }
        };

        let owns_browser = config.browser_debug_port.is_none();
        Ok(Self {
            collector,
            driver: ChromeDriver::new(browser, page, owns_browser),
        })
    }

    /// 运行采集，发生致命错误时返回 `Err`（结果文件已写出）
    pub async fn run(&self) -> Result<CollectionReport> {
        let mut report = self
            .collector
            .run(&self.driver)
            .await
            .context("写出采集结果失败")?;

        if let Some(fatal) = report.fatal.take() {
            bail!("采集中止，已保存 {} 条评论: {}", report.reviews_collected, fatal);
        }
        Ok(report)
    }
}
