use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ExtractError, ExtractResult};

/// 解压失败的条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub name: String,
    pub reason: String,
}

/// 一次解压的统计
#[derive(Debug, Default)]
pub struct ExtractReport {
    pub files_written: usize,
    pub directories_skipped: usize,
    pub failures: Vec<EntryFailure>,
}

enum EntryKind {
    File,
    Directory,
}

/// 压缩包解压器
///
/// 单个条目失败只记录日志并继续；压缩包本身打不开或目标目录不可写时整体失败
pub struct ArchiveExtractor {
    archive_path: PathBuf,
    destination: PathBuf,
}

impl ArchiveExtractor {
    pub fn new(archive_path: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            destination: destination.into(),
        }
    }

    pub fn extract(&self) -> ExtractResult<ExtractReport> {
        fs::create_dir_all(&self.destination)
            .map_err(|e| ExtractError::io(&self.destination, e))?;

        let file =
            File::open(&self.archive_path).map_err(|e| ExtractError::io(&self.archive_path, e))?;
        let mut archive = ZipArchive::new(file).map_err(|e| self.open_error(e))?;

        info!(
            "📦 打开压缩包 {} ({} 个条目) → {}",
            self.archive_path.display(),
            archive.len(),
            self.destination.display()
        );

        let mut report = ExtractReport::default();
        for index in 0..archive.len() {
            match self.extract_entry(&mut archive, index) {
                Ok(EntryKind::File) => report.files_written += 1,
                Ok(EntryKind::Directory) => report.directories_skipped += 1,
                Err(e) => {
                    error!("❌ {}", e);
                    report.failures.push(failure_of(index, e));
                }
            }
        }

        log_report(&report);
        Ok(report)
    }

    fn extract_entry<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        index: usize,
    ) -> ExtractResult<EntryKind> {
        let mut entry = archive.by_index(index).map_err(|e| ExtractError::Entry {
            name: format!("#{}", index),
            reason: e.to_string(),
        })?;
        let name = entry.name().to_string();

        // 目录由文件路径隐式创建
        if entry.is_dir() {
            debug!("跳过目录条目: {}", name);
            return Ok(EntryKind::Directory);
        }

        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ExtractError::UnsafePath { name: name.clone() })?;
        let target = self.destination.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| entry_error(&name, &e))?;
        }

        let mut out = File::create(&target).map_err(|e| entry_error(&name, &e))?;
        if let Err(e) = io::copy(&mut entry, &mut out) {
            drop(out);
            remove_partial(&target);
            return Err(entry_error(&name, &e));
        }

        debug!("✓ {} → {}", name, target.display());
        Ok(EntryKind::File)
    }

    fn open_error(&self, err: ZipError) -> ExtractError {
        match err {
            ZipError::Io(e) if e.kind() != io::ErrorKind::UnexpectedEof => {
                ExtractError::io(&self.archive_path, e)
            }
            other => ExtractError::InvalidArchive {
                path: self.archive_path.clone(),
                reason: other.to_string(),
            },
        }
    }
}

fn entry_error(name: &str, err: &io::Error) -> ExtractError {
    ExtractError::Entry {
        name: name.to_string(),
        reason: err.to_string(),
    }
}

fn failure_of(index: usize, err: ExtractError) -> EntryFailure {
    match err {
        ExtractError::Entry { name, reason } => EntryFailure { name, reason },
        ExtractError::UnsafePath { ref name } => EntryFailure {
            name: name.clone(),
            reason: err.to_string(),
        },
        other => EntryFailure {
            name: format!("#{}", index),
            reason: other.to_string(),
        },
    }
}

fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("删除不完整文件 {} 失败: {}", path.display(), e);
    }
}

fn log_report(report: &ExtractReport) {
    info!("{}", "─".repeat(60));
    info!(
        "✅ 写出文件: {} / 跳过目录: {} / 失败: {}",
        report.files_written,
        report.directories_skipped,
        report.failures.len()
    );
    for failure in &report.failures {
        info!("   ❌ {}: {}", failure.name, failure.reason);
    }
    info!("{}", "─".repeat(60));
}
