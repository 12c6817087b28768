//! 导出文件名处理

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// 文件名最大长度（字符）
pub const MAX_FILENAME_CHARS: usize = 60;
/// 文件名为空时的默认值
pub const DEFAULT_FILENAME: &str = "quiz";

lazy_static! {
    static ref UNSAFE_CHARS_RE: Regex = Regex::new(r"[^\w\-.]+").unwrap();
}

/// 规范化文件名：NFKD 分解，连续的非法字符替换为 `_`，截断到 60 个字符
pub fn sanitize_filename(name: &str) -> String {
    let normalized: String = name.nfkd().collect();
    let replaced = UNSAFE_CHARS_RE.replace_all(&normalized, "_");
    let truncated: String = replaced.chars().take(MAX_FILENAME_CHARS).collect();
    if truncated.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        truncated
    }
}

/// 带时间戳的落盘文件名，例如 `Unit_3_20250101_120000.docx`
pub fn stamped_filename(hint: &str, now: DateTime<Local>) -> String {
    format!(
        "{}_{}.docx",
        sanitize_filename(hint),
        now.format("%Y%m%d_%H%M%S")
    )
}

/// 下载文件名：答案版为 `_teacher`，学生版为 `_student`
pub fn download_name(filename: &str, include_answers: bool) -> String {
    let suffix = if include_answers { "teacher" } else { "student" };
    format!("{}_{}.docx", sanitize_filename(filename), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_replaces_runs() {
        assert_eq!(sanitize_filename("My Quiz! #1"), "My_Quiz_1");
        assert_eq!(sanitize_filename("unit-3.v2"), "unit-3.v2");
    }

    #[test]
    fn test_sanitize_empty_defaults() {
        assert_eq!(sanitize_filename(""), "quiz");
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "a".repeat(100);
        assert_eq!(sanitize_filename(&long).chars().count(), 60);
    }

    #[test]
    fn test_sanitize_decomposes_compatibility_chars() {
        // 全角字母经 NFKD 变为 ASCII
        assert_eq!(sanitize_filename("ＡＢＣ"), "ABC");
    }

    #[test]
    fn test_stamped_filename() {
        let now = Local.with_ymd_and_hms(2025, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(stamped_filename("Unit 3", now), "Unit_3_20250309_070501.docx");
    }

    #[test]
    fn test_download_name_suffix() {
        assert_eq!(download_name("quiz", true), "quiz_teacher.docx");
        assert_eq!(download_name("My Quiz", false), "My_Quiz_student.docx");
    }
}
