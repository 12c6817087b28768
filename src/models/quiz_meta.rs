//! 题目文本的元信息
//!
//! 题目第一行约定为 `Level: B1 | Type: Reading Exercise`，
//! 修改题目时据此保持原有的等级与题型。

use lazy_static::lazy_static;
use regex::Regex;

use super::Level;

/// 未识别到题头时的默认题型
pub const DEFAULT_QUIZ_TYPE: &str = "reading";
/// 未识别到题号时的默认题目数量
pub const DEFAULT_QUESTION_COUNT: usize = 6;

lazy_static! {
    static ref HEADER_RE: Regex =
        Regex::new(r"(?im)^\s*Level:\s*(A1|A2|B1|B2)\s*\|\s*Type:\s*([A-Za-z]+)").unwrap();
    static ref QUESTION_NUMBER_RE: Regex = Regex::new(r"^\s*(\d+)\.").unwrap();
}

/// 从题头解析出的等级与题型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizMeta {
    pub level: Level,
    /// 小写题型，例如 `grammar`
    pub quiz_type: String,
}

impl Default for QuizMeta {
    fn default() -> Self {
        Self {
            level: Level::B1,
            quiz_type: DEFAULT_QUIZ_TYPE.to_string(),
        }
    }
}

/// 提取题头中的等级与题型，找不到时返回 `(B1, reading)`
pub fn extract_header_meta(quiz_text: &str) -> QuizMeta {
    let Some(caps) = HEADER_RE.captures(quiz_text) else {
        return QuizMeta::default();
    };

    let level = Level::parse(&caps[1]).unwrap_or_default();
    let quiz_type = caps[2].trim().to_lowercase();

    QuizMeta { level, quiz_type }
}

/// 推断题目数量：所有行中 `N.` 开头的最大 N，找不到时返回 6
pub fn infer_question_count(quiz_text: &str) -> usize {
    quiz_text
        .lines()
        .filter_map(|line| QUESTION_NUMBER_RE.captures(line))
        .filter_map(|caps| caps[1].parse::<usize>().ok())
        .max()
        .unwrap_or(DEFAULT_QUESTION_COUNT)
}
