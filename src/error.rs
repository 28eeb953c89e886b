use std::path::PathBuf;

use thiserror::Error;

/// 评论采集错误
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 导航失败
    #[error("导航到 {url} 失败: {reason}")]
    Navigation { url: String, reason: String },

    /// 执行页面脚本失败
    #[error("执行脚本失败: {0}")]
    Script(String),

    /// 选择器配置无效
    #[error("无效的选择器 '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// URL 构造失败
    #[error("无效的 URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// 写入结果文件失败
    #[error("写入结果文件失败 ({}): {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 序列化失败
    #[error("JSON 序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<chromiumoxide::error::CdpError> for CollectorError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        CollectorError::Script(err.to_string())
    }
}

/// 压缩包解压错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 文件不是有效的压缩包
    #[error("不是有效的压缩包 ({}): {reason}", .path.display())]
    InvalidArchive { path: PathBuf, reason: String },

    /// 文件系统错误
    #[error("文件操作失败 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 单个条目解压失败
    #[error("条目 {name} 解压失败: {reason}")]
    Entry { name: String, reason: String },

    /// 条目路径越出目标目录
    #[error("条目 {name} 的路径不安全，已拒绝")]
    UnsafePath { name: String },
}

/// 解压程序遇到致命错误时的退出码
///
/// 格式错误与其他错误共用同一个退出码，靠日志消息区分
pub const FATAL_EXIT: u8 = 1;

impl ExtractError {
    /// 是否为压缩包格式错误
    pub fn is_invalid_archive(&self) -> bool {
        matches!(self, ExtractError::InvalidArchive { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type CollectorResult<T> = Result<T, CollectorError>;
pub type ExtractResult<T> = Result<T, ExtractError>;
