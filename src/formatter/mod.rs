//! 题目文本排版
//!
//! - `text_formatter` - 逐行分类，生成文档块
//! - `document` - 文档块与段落样式
//! - `filename` - 导出文件名

pub mod document;
pub mod filename;
pub mod text_formatter;

pub use document::{Paragraph, Run, StyledBlock};
pub use filename::{download_name, sanitize_filename, stamped_filename};
pub use text_formatter::format;
