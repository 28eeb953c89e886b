//! 评论采集器 - 编排层
//!
//! ## 职责
//!
//! 1. **遍历关键词**：搜索、滚动、发现商品链接
//! 2. **流程调度**：每个商品委托给 `ProductFlow`，单个商品失败只记日志
//! 3. **收尾保证**：无论是否发生致命错误，都会关闭浏览器并写出已采集的评论
//! 4. **统计输出**：汇总关键词、商品和评论数量

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{CollectorError, CollectorResult};
use crate::infrastructure::BrowserDriver;
use crate::models::ReviewCollection;
use crate::services::{ElementFinder, Pacer, ProductDiscovery, ReviewWriter};
use crate::workflow::{ProductCtx, ProductFlow, TabOutcome};

/// 一次采集的统计
#[derive(Debug, Default)]
pub struct CollectionReport {
    pub keywords_processed: usize,
    pub products_visited: usize,
    pub products_failed: usize,
    pub tabs_activated: usize,
    pub reviews_collected: usize,
    /// 中止整个采集的错误
    pub fatal: Option<CollectorError>,
}

/// 评论采集器
pub struct Collector {
    keywords: Vec<String>,
    max_products: usize,
    discovery: ProductDiscovery,
    flow: ProductFlow,
    pacer: Pacer,
    writer: ReviewWriter,
}

impl Collector {
    /// 根据配置构造，选择器无效时报错
    pub fn new(config: &Config) -> CollectorResult<Self> {
        let discovery = ProductDiscovery::new(
            config.search_url_template.clone(),
            config.storefront_domain.clone(),
            ElementFinder::from_selectors(&config.product_link_selectors)?,
        );

        Ok(Self {
            keywords: config.keywords.clone(),
            max_products: config.max_products_per_keyword,
            discovery,
            flow: ProductFlow::new(config)?,
            pacer: Pacer::from_config(config),
            writer: ReviewWriter::new(config.output_path()),
        })
    }

    pub fn writer(&self) -> &ReviewWriter {
        &self.writer
    }

    /// 执行完整采集
    ///
    /// 只有结果文件写入失败才返回 `Err`；采集过程中的致命错误记录在 `report.fatal`
    pub async fn run(&self, driver: &dyn BrowserDriver) -> CollectorResult<CollectionReport> {
        let mut reviews = ReviewCollection::new();
        let mut report = CollectionReport::default();

        if let Err(e) = self.collect_all(driver, &mut reviews, &mut report).await {
            error!("❌ 采集中止: {}", e);
            report.fatal = Some(e);
        }

        if let Err(e) = driver.close().await {
            warn!("关闭浏览器失败: {}", e);
        }

        report.reviews_collected = reviews.len();
        self.writer.write(&reviews)?;

        print_final_stats(&report, &self.writer);
        Ok(report)
    }

    async fn collect_all(
        &self,
        driver: &dyn BrowserDriver,
        reviews: &mut ReviewCollection,
        report: &mut CollectionReport,
    ) -> CollectorResult<()> {
        let total_keywords = self.keywords.len();
        if total_keywords == 0 {
            warn!("⚠️ 没有配置关键词，跳过采集");
            return Ok(());
        }

        for (index, keyword) in self.keywords.iter().enumerate() {
            log_keyword_start(index + 1, total_keywords, keyword);

            let products = self.search_products(driver, keyword).await?;
            if products.is_empty() {
                warn!("[关键词 '{}'] ⚠️ 没有找到商品链接", keyword);
            } else {
                info!("[关键词 '{}'] ✓ 找到 {} 个商品", keyword, products.len());
            }

            for (product_index, url) in products.into_iter().enumerate() {
                if report.products_visited > 0 {
                    self.pacer.courtesy_delay().await;
                }
                report.products_visited += 1;

                let ctx = ProductCtx::new(keyword.as_str(), product_index + 1, url);
                match self.flow.run(driver, &ctx).await {
                    Ok(product) => {
                        if matches!(product.tab, TabOutcome::Activated { .. }) {
                            report.tabs_activated += 1;
                        }
                        reviews.extend(product.reviews);
                    }
                    Err(e) => {
                        error!("{} ❌ 处理失败: {}", ctx, e);
                        report.products_failed += 1;
                    }
                }
            }

            report.keywords_processed += 1;
        }

        Ok(())
    }

    /// 打开搜索页并返回商品链接
    async fn search_products(
        &self,
        driver: &dyn BrowserDriver,
        keyword: &str,
    ) -> CollectorResult<Vec<String>> {
        let search_url = self.discovery.search_url(keyword)?;
        info!("[关键词 '{}'] 🔍 搜索: {}", keyword, search_url);

        driver.goto(&search_url).await?;
        self.pacer.settle().await;

        // 滚动一次触发懒加载
        if let Err(e) = driver.scroll_to_bottom().await {
            warn!("[关键词 '{}'] 滚动页面失败: {}", keyword, e);
        }
        self.pacer.settle().await;

        let html = driver.page_source().await?;
        Ok(self
            .discovery
            .discover(&search_url, &html, self.max_products))
    }
}

// ========== 日志辅助函数 ==========

fn log_keyword_start(index: usize, total: usize, keyword: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📦 关键词 {}/{}: {}", index, total, keyword);
    info!("{}", "─".repeat(60));
}

fn print_final_stats(report: &CollectionReport, writer: &ReviewWriter) {
    info!("\n{}", "=".repeat(60));
    info!("📊 采集完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🔑 关键词: {}", report.keywords_processed);
    info!(
        "🛒 商品: 访问 {} / 失败 {} / 点开评论标签 {}",
        report.products_visited, report.products_failed, report.tabs_activated
    );
    info!("💬 评论: {}", report.reviews_collected);
    if let Some(e) = &report.fatal {
        info!("❌ 中止原因: {}", e);
    }
    info!("{}", "=".repeat(60));
    info!("结果已保存至: {}", writer.output_path().display());
}
