//! 评论写入服务 - 业务能力层
//!
//! 只负责"把评论写成 JSON 文件"能力

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CollectorError, CollectorResult};
use crate::models::Review;

/// 评论写入服务
///
/// 每次写入都会覆盖旧文件，不做追加
pub struct ReviewWriter {
    output_path: PathBuf,
}

impl ReviewWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 以带缩进的 UTF-8 JSON 数组写出全部评论
    pub fn write(&self, reviews: &[Review]) -> CollectorResult<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| CollectorError::Output {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(reviews)?;
        debug!("写入 {} 字节到 {}", json.len(), self.output_path.display());

        fs::write(&self.output_path, json).map_err(|source| CollectorError::Output {
            path: self.output_path.clone(),
            source,
        })?;

        info!(
            "💾 已保存 {} 条评论到 {}",
            reviews.len(),
            self.output_path.display()
        );
        Ok(())
    }
}
