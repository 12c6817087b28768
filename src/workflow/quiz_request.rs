//! 出题与改题请求
//!
//! 封装"为哪个会话、按什么要求出题"这一信息

use std::fmt::Display;

use crate::models::{Level, QuizType};

/// 出题请求
#[derive(Debug, Clone)]
pub struct CreateQuizInput {
    /// 原始材料
    pub source_text: String,
    pub level: Level,
    pub quiz_type: QuizType,
    /// 题目数量（1-15）
    pub question_count: usize,
    /// 会话 ID（可选），提供时记录到会话存储
    pub session_id: Option<String>,
}

impl Display for CreateQuizInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[出题 会话#{} 等级#{} 题型#{} 题数#{}]",
            self.session_id.as_deref().unwrap_or("-"),
            self.level,
            self.quiz_type,
            self.question_count
        )
    }
}

/// 改题请求
#[derive(Debug, Clone)]
pub struct ChatEditInput {
    /// 当前题目全文
    pub quiz_text: String,
    /// 修改要求
    pub message: String,
    pub session_id: Option<String>,
}

impl Display for ChatEditInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[改题 会话#{}]",
            self.session_id.as_deref().unwrap_or("-")
        )
    }
}
