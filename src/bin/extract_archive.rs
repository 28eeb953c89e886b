use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use review_harvest::archive::ArchiveExtractor;
use review_harvest::error::FATAL_EXIT;
use review_harvest::logger;
use tracing::error;

/// 将压缩包中的文件解压到目标目录，单个文件失败不影响其余文件
#[derive(Parser, Debug)]
#[command(name = "extract_archive")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 压缩包路径
    archive_path: PathBuf,

    /// 目标目录（不存在时自动创建）
    destination_directory: PathBuf,
}

fn main() -> ExitCode {
    logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(FATAL_EXIT),
            };
        }
    };

    match ArchiveExtractor::new(cli.archive_path, cli.destination_directory).extract() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_invalid_archive() {
                error!("❌ 压缩包格式无效: {}", e);
            } else {
                error!("❌ 解压过程中发生意外错误: {}", e);
            }
            ExitCode::from(FATAL_EXIT)
        }
    }
}
