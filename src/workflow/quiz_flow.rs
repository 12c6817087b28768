//! 出题/改题流程 - 流程层
//!
//! 流程顺序：
//! 1. 校验输入
//! 2. 构建提示词 → 调用 LLM
//! 3. 有会话 ID 时写入会话存储

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{extract_header_meta, infer_question_count, Message};
use crate::services::prompt_builder;
use crate::services::{ChatBackend, ConversationStore};
use crate::utils::logging::truncate_text;
use crate::workflow::quiz_request::{ChatEditInput, CreateQuizInput};

/// 原始材料最少字符数
pub const MIN_SOURCE_CHARS: usize = 10;
/// 题目数量下限
pub const MIN_QUESTION_COUNT: usize = 1;
/// 题目数量上限
pub const MAX_QUESTION_COUNT: usize = 15;

/// 出题/改题流程
///
/// - 编排校验、提示词构建与 LLM 调用
/// - 不持有 HTTP 相关的任何东西
/// - 只依赖业务能力（services）
pub struct QuizFlow {
    llm: Arc<dyn ChatBackend>,
    store: Arc<ConversationStore>,
}

impl QuizFlow {
    pub fn new(llm: Arc<dyn ChatBackend>, store: Arc<ConversationStore>) -> Self {
        Self { llm, store }
    }

    /// 根据原始材料生成一份练习
    pub async fn create_quiz(&self, input: &CreateQuizInput) -> AppResult<String> {
        validate_create(input)?;

        info!("{} 📝 开始生成练习", input);

        let messages = vec![
            Message::system(prompt_builder::system_prompt(
                input.level,
                input.quiz_type,
                input.question_count,
            )),
            Message::user(prompt_builder::user_prompt(
                input.source_text.trim(),
                input.level,
                input.quiz_type,
                input.question_count,
            )),
        ];

        let result = self.llm.send(&messages).await?;
        info!("{} ✓ 练习生成完成，共 {} 个字符", input, result.chars().count());
        debug!("{} 生成结果: {}", input, truncate_text(&result, 120));

        if let Some(session_id) = input.session_id.as_deref() {
            self.store
                .start_session(
                    session_id,
                    input.level,
                    input.quiz_type.name(),
                    messages[1].content.clone(),
                    result.clone(),
                )
                .await;
        }

        Ok(result)
    }

    /// 按修改要求对现有练习做最小改动
    ///
    /// 等级与题型取自题头，题目数量取自最大题号。
    pub async fn chat_edit(&self, input: &ChatEditInput) -> AppResult<String> {
        if input.quiz_text.trim().is_empty() {
            return Err(AppError::empty_field("quiz_text"));
        }
        if input.message.trim().is_empty() {
            return Err(AppError::empty_field("message"));
        }

        let meta = extract_header_meta(&input.quiz_text);
        let question_count = infer_question_count(&input.quiz_text);
        info!(
            "{} ✏️ 修改练习 (等级: {}, 题型: {}, 题数: {})",
            input, meta.level, meta.quiz_type, question_count
        );
        debug!("{} 修改要求: {}", input, truncate_text(&input.message, 120));

        let messages = vec![
            Message::system(prompt_builder::chat_edit_system_prompt(&meta, question_count)),
            Message::user(prompt_builder::chat_edit_user_prompt(
                &input.quiz_text,
                &input.message,
                question_count,
            )),
        ];

        let result = self.llm.send(&messages).await?;
        info!("{} ✓ 修改完成", input);

        if let Some(session_id) = input.session_id.as_deref() {
            self.store
                .append_exchange(session_id, input.message.clone(), result.clone())
                .await;
        }

        Ok(result)
    }
}

fn validate_create(input: &CreateQuizInput) -> AppResult<()> {
    if input.source_text.trim().chars().count() < MIN_SOURCE_CHARS {
        return Err(ValidationError::TooShort {
            field: "source_text",
            min: MIN_SOURCE_CHARS,
        }
        .into());
    }
    if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&input.question_count) {
        return Err(ValidationError::QuestionCountOutOfRange {
            count: input.question_count,
            min: MIN_QUESTION_COUNT,
            max: MAX_QUESTION_COUNT,
        }
        .into());
    }
    Ok(())
}
