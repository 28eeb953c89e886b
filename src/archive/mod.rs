//! 压缩包解压
//!
//! 条目名称按 zip 库解码后的结果原样使用，不做编码修复；
//! 非 UTF-8 标记的旧压缩包中文件名可能出现乱码。

pub mod extractor;

pub use extractor::{ArchiveExtractor, EntryFailure, ExtractReport};
