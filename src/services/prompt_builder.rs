//! 提示词构建 - 业务能力层
//!
//! 只负责拼接发给 LLM 的文本，不发起任何调用

use crate::models::{Level, QuizMeta, QuizType};

/// 会话存储中系统消息的固定模板
pub fn conversation_system_prompt(level: Level, quiz_type: &str) -> String {
    format!(
        "You are a creative English-teacher assistant. \
         Match CEFR level={} and exercise type={}. \
         Always return PLAIN TEXT suitable for DOCX/PDF generation. \
         If multiple-choice, provide 4 options (A–D) and only one correct answer. \
         End with an ANSWER KEY.",
        level, quiz_type
    )
}

/// 各题型的出题要求
pub fn type_spec(quiz_type: QuizType, question_count: usize) -> String {
    let n = question_count;
    match quiz_type {
        QuizType::Grammar => {
            let mc = n.div_ceil(2);
            format!(
                "Create exactly {n} questions:\n\
                 • Q1–Q{mc}: Multiple-choice (A–D) focusing on target grammar or tenses.\n\
                 • Remaining questions: Fill-in-the-blank (e.g., 'He (go) to school ____.').\n\
                 Ensure only ONE correct answer per question."
            )
        }
        QuizType::Reading => {
            let comprehension = n.saturating_sub(2).max(1);
            format!(
                "Create exactly {n} questions based on the source ideas (paraphrased):\n\
                 • Q1–Q{comprehension}: Reading comprehension (who/what/when/where/why/how).\n\
                 • Remaining questions: Vocabulary-in-context (synonym/meaning) with options A–D."
            )
        }
        QuizType::TrueFalse => format!(
            "Create exactly {n} statements based on the source ideas (paraphrased):\n\
             • Each statement is answered with True or False.\n\
             • Mix true and false statements; avoid trick wording."
        ),
        QuizType::Vocabulary => format!(
            "Create exactly {n} questions focusing on vocabulary:\n\
             • At least half multiple-choice (A–D) for meaning/synonym/collocation.\n\
             • The rest may be matching (word → definition) or fill-in-the-blank."
        ),
    }
}

/// 出题的系统消息
pub fn system_prompt(level: Level, quiz_type: QuizType, question_count: usize) -> String {
    format!(
        "You are an expert English teacher assistant who generates classroom-ready exercises.\n\
         CEFR level: {level}. Exercise type: {quiz_type}.\n\
         OUTPUT RULES (MANDATORY):\n\
         - Plain text ONLY (no Markdown, no **bold**, no bullets).\n\
         - Do NOT copy the source text verbatim; paraphrase ideas.\n\
         - Begin with a header line: 'Level: <A1/A2/B1/B2> | Type: <Reading/Grammar/Vocabulary/Truefalse> Exercise'.\n\
         - Provide Title and short Instructions (1–2 sentences).\n\
         - Number questions 1.–{question_count}. (exactly {question_count} questions).\n\
         - Multiple-choice options must be formatted as: A) ..., B) ..., C) ..., D) ...\n\
         - Finish with a section titled exactly: ANSWER KEY (on its own line), then {question_count} lines like '1) B'.\n\
         - Level profile to respect: {profile}",
        profile = level.profile()
    )
}

/// 出题的用户消息
pub fn user_prompt(
    source_text: &str,
    level: Level,
    quiz_type: QuizType,
    question_count: usize,
) -> String {
    let mut format_lines = String::new();
    for i in 1..=question_count {
        format_lines.push_str(&format!("{}. <question>\n", i));
    }
    format_lines.push_str("ANSWER KEY\n");
    for i in 1..=question_count {
        format_lines.push_str(&format!("{}) <A/B/C/D or short answer>\n", i));
    }

    format!(
        "### HEADER ###\n\
         Level: {level} | Type: {type_title} Exercise\n\n\
         ### TASK ###\n\
         Use the source ideas below (do NOT copy sentences) to create an exercise.\n\
         Provide a clear title and short instructions, then {question_count} numbered questions and an ANSWER KEY.\n\n\
         SOURCE TEXT:\n\
         {source_text}\n\n\
         TYPE SPEC:\n\
         {spec}\n\n\
         OUTPUT FORMAT (STRICT):\n\
         Title: <short title>\n\
         Instructions: <1–2 sentences>\n\
         {format_lines}",
        type_title = quiz_type.title(),
        spec = type_spec(quiz_type, question_count),
    )
}

/// 修改题目的系统消息
pub fn chat_edit_system_prompt(meta: &QuizMeta, question_count: usize) -> String {
    format!(
        "You are an assistant that REVISES an existing English exercise.\n\
         HARD REQUIREMENTS:\n\
         1) Do MINIMAL necessary changes to satisfy the user's request. Do NOT rewrite the whole quiz.\n\
         2) PRESERVE the overall format EXACTLY:\n   \
            - First line (header): 'Level: <A1/A2/B1/B2> | Type: <Reading/Grammar/Vocabulary> Exercise'\n   \
            - Then: Title, Instructions, numbered questions 1–{n} (exactly {n}), then 'ANSWER KEY' on its own line with {n} lines '1) ...' to '{n}) ...'.\n\
         3) Keep any text that is not directly affected by the request VERBATIM (unchanged).\n\
         4) If a question becomes multiple-choice, format options exactly: A) ..., B) ..., C) ..., D) ... with ONE correct answer.\n\
         5) No Markdown, no explanations.\n\
         6) Keep CEFR level = {level} and exercise type = {quiz_type}.\n",
        n = question_count,
        level = meta.level,
        quiz_type = meta.quiz_type,
    )
}

/// 修改题目的用户消息
pub fn chat_edit_user_prompt(quiz_text: &str, request: &str, question_count: usize) -> String {
    format!(
        "CURRENT QUIZ (preserve structure and all unchanged lines verbatim):\n\
         {quiz_text}\n\n\
         EDIT REQUEST (apply only what is necessary; if ambiguous, choose the smallest change that satisfies it):\n\
         {request}\n\n\
         Return the FULL revised quiz in the SAME format (header + title + instructions + questions 1–{question_count} + ANSWER KEY)."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_lists_every_question_slot() {
        let prompt = user_prompt("Cats sleep a lot.", Level::A2, QuizType::Reading, 4);
        assert!(prompt.contains("Level: A2 | Type: Reading Exercise"));
        assert!(prompt.contains("4. <question>"));
        assert!(!prompt.contains("5. <question>"));
        assert!(prompt.contains("4) <A/B/C/D or short answer>"));
        assert!(prompt.contains("SOURCE TEXT:\nCats sleep a lot."));
    }

    #[test]
    fn test_system_prompt_carries_level_profile() {
        let prompt = system_prompt(Level::A1, QuizType::Grammar, 6);
        assert!(prompt.contains("CEFR level: A1. Exercise type: grammar."));
        assert!(prompt.contains(Level::A1.profile()));
        assert!(prompt.contains("exactly 6 questions"));
    }

    #[test]
    fn test_type_spec_small_counts() {
        assert!(type_spec(QuizType::Reading, 1).contains("Q1–Q1"));
        assert!(type_spec(QuizType::Grammar, 5).contains("Q1–Q3"));
        assert!(type_spec(QuizType::TrueFalse, 8).contains("True or False"));
    }

    #[test]
    fn test_chat_edit_prompt_keeps_meta() {
        let meta = QuizMeta {
            level: Level::B2,
            quiz_type: "grammar".to_string(),
        };
        let prompt = chat_edit_system_prompt(&meta, 8);
        assert!(prompt.contains("CEFR level = B2 and exercise type = grammar"));
        assert!(prompt.contains("exactly 8"));
    }

    #[test]
    fn test_conversation_template_is_deterministic() {
        assert_eq!(
            conversation_system_prompt(Level::B1, "reading"),
            conversation_system_prompt(Level::B1, "reading")
        );
        assert!(conversation_system_prompt(Level::A2, "grammar").contains("level=A2"));
    }
}
