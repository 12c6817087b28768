//! 导出流程 - 流程层
//!
//! 题目文本 → 文档块 → DOCX → 导出目录中的新文件

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{AppError, AppResult, FileError};
use crate::formatter::{self, filename::DEFAULT_FILENAME, StyledBlock};
use crate::services::DocxWriter;

/// 同一秒内重名时最多尝试的后缀数量
const MAX_NAME_ATTEMPTS: usize = 100;

/// 导出结果
#[derive(Debug, Clone)]
pub struct ExportedFile {
    /// 落盘路径
    pub path: PathBuf,
    /// 建议的下载文件名，`_teacher` / `_student` 结尾
    pub download_name: String,
    /// 文件内容
    pub bytes: Vec<u8>,
}

/// 导出流程
pub struct ExportFlow {
    export_dir: PathBuf,
    writer: DocxWriter,
}

impl ExportFlow {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
            writer: DocxWriter::new(),
        }
    }

    /// 导出 DOCX
    ///
    /// # 参数
    /// - `content`: 题目全文
    /// - `filename`: 文件名（可选），同时作为文档标题，为空时使用 `quiz`
    /// - `include_answers`: 是否保留答案区块
    pub async fn export(
        &self,
        content: &str,
        filename: Option<&str>,
        include_answers: bool,
    ) -> AppResult<ExportedFile> {
        if content.trim().is_empty() {
            return Err(AppError::empty_field("content"));
        }

        let filename = filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME);

        let blocks = formatter::format(content, Some(filename), include_answers);

        tokio::fs::create_dir_all(&self.export_dir)
            .await
            .map_err(|e| AppError::create_dir_failed(self.export_dir.display().to_string(), e))?;

        let (path, bytes) = self.save_unique(filename, &blocks).await?;
        let download_name = formatter::download_name(filename, include_answers);

        info!(
            "📄 导出完成: {} ({} 个段落, 下载名: {})",
            path.display(),
            blocks.len(),
            download_name
        );

        Ok(ExportedFile {
            path,
            download_name,
            bytes,
        })
    }

    /// 以时间戳命名保存为新文件，重名时追加 `_1`、`_2`……
    async fn save_unique(
        &self,
        filename: &str,
        blocks: &[StyledBlock],
    ) -> AppResult<(PathBuf, Vec<u8>)> {
        let stamped = formatter::stamped_filename(filename, chrono::Local::now());
        let stem = stamped.trim_end_matches(".docx");

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                stamped.clone()
            } else {
                format!("{}_{}.docx", stem, attempt)
            };
            let path = self.export_dir.join(name);

            match self.writer.save(blocks, &path).await {
                Ok(bytes) => return Ok((path, bytes)),
                Err(AppError::File(FileError::WriteFailed { source, .. }))
                    if source.kind() == ErrorKind::AlreadyExists =>
                {
                    warn!("文件已存在，换名重试: {}", path.display());
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::file_write_failed(
            self.export_dir.join(stamped).display().to_string(),
            std::io::Error::new(ErrorKind::AlreadyExists, "重名文件过多"),
        ))
    }
}
