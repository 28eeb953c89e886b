//! 等待控制 - 业务能力层
//!
//! 页面加载后的固定等待和商品之间的随机礼貌延迟

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::config::Config;

/// 等待控制
#[derive(Debug, Clone)]
pub struct Pacer {
    settle: Duration,
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl Pacer {
    pub fn new(settle: Duration, min_delay_ms: u64, max_delay_ms: u64) -> Self {
        // 上下限写反时交换
        let (min_delay_ms, max_delay_ms) = if min_delay_ms <= max_delay_ms {
            (min_delay_ms, max_delay_ms)
        } else {
            (max_delay_ms, min_delay_ms)
        };
        Self {
            settle,
            min_delay_ms,
            max_delay_ms,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.settle_time(), config.min_delay_ms, config.max_delay_ms)
    }

    /// 不做任何等待（测试用）
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, 0, 0)
    }

    /// 页面加载后的固定等待
    pub async fn settle(&self) {
        if !self.settle.is_zero() {
            sleep(self.settle).await;
        }
    }

    /// 下一次随机延迟的时长
    pub fn next_delay(&self) -> Duration {
        Duration::from_millis(rand::random_range(self.min_delay_ms..=self.max_delay_ms))
    }

    /// 商品之间的随机延迟
    pub async fn courtesy_delay(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            debug!("随机等待 {} 毫秒", delay.as_millis());
            sleep(delay).await;
        }
    }
}
