//! 题目文本 → 文档块
//!
//! 单遍、只向前的逐行处理。唯一的状态是 `in_answer_key`：
//! 进入答案区块后，后续非空行都原样输出。

use lazy_static::lazy_static;
use regex::Regex;

use super::document::{StyledBlock, DEFAULT_TITLE};

lazy_static! {
    static ref QUESTION_RE: Regex = Regex::new(r"(?i)^\s*\d+\.\s+(.+)$").unwrap();
    static ref CHOICE_RE: Regex = Regex::new(r"^\s*(\(?[A-D]\)?[.)])\s+(.+)$").unwrap();
}

/// 单行的分类
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    AnswerKeyMarker,
    Question { number: &'a str, text: &'a str },
    Choice { marker: &'a str, text: &'a str },
    Plain,
}

fn is_answer_key_marker(line: &str) -> bool {
    line.trim().to_lowercase().starts_with("answer key")
}

/// 按优先级对一行分类：空行 → 答案标记 → 题目 → 选项 → 普通文本
fn classify_line(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if is_answer_key_marker(line) {
        return LineKind::AnswerKeyMarker;
    }
    if QUESTION_RE.is_match(line) {
        if let Some((number, rest)) = line.split_once('.') {
            return LineKind::Question {
                number,
                text: rest.trim(),
            };
        }
    }
    if let Some(caps) = CHOICE_RE.captures(line) {
        if let (Some(marker), Some(text)) = (caps.get(1), caps.get(2)) {
            return LineKind::Choice {
                marker: marker.as_str(),
                text: text.as_str(),
            };
        }
    }
    LineKind::Plain
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}

/// 按所有 Unicode 行分隔符切分，`\r\n` 视为一个分隔符，末尾分隔符不产生空行
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((idx, c)) => {
                lines.push(&rest[..idx]);
                let width = if rest[idx..].starts_with("\r\n") { 2 } else { c.len_utf8() };
                rest = &rest[idx + width..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// 将题目纯文本转换为文档块序列
///
/// - `title_hint` 为空或 `None` 时使用 `Generated Quiz`，去除首尾空白后为空则不输出标题
/// - `include_answers` 为 `false` 时，遇到 `answer key` 开头的行即停止
pub fn format(text: &str, title_hint: Option<&str>, include_answers: bool) -> Vec<StyledBlock> {
    let mut blocks = Vec::new();

    let title = title_hint
        .filter(|hint| !hint.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .trim();
    if !title.is_empty() {
        blocks.push(StyledBlock::Title(title.to_string()));
    }

    let mut in_answer_key = false;

    for raw in split_lines(text) {
        let line = raw.trim_end();
        let kind = classify_line(line);

        if !include_answers && kind == LineKind::AnswerKeyMarker {
            break;
        }

        let block = match kind {
            LineKind::Blank => StyledBlock::Spacer,
            LineKind::AnswerKeyMarker => {
                in_answer_key = true;
                StyledBlock::AnswerKeyHeader
            }
            _ if in_answer_key => StyledBlock::AnswerLine(line.to_string()),
            LineKind::Question { number, text } => StyledBlock::Question {
                number: number.to_string(),
                text: text.to_string(),
            },
            LineKind::Choice { marker, text } => StyledBlock::Choice {
                marker: marker.to_string(),
                text: text.to_string(),
            },
            LineKind::Plain => StyledBlock::Plain(line.to_string()),
        };
        blocks.push(block);
    }

    blocks
}
