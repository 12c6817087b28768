//! LLM 服务 - 业务能力层
//!
//! 只负责"消息进、文本出"，不关心提示词如何拼接
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务
//!
//! 调用失败直接向上返回，不做重试、超时或取消，这些策略由调用方决定。

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::{Message, Role};
use crate::utils::logging::truncate_text;

/// 对话模型后端
///
/// 输入完整的消息列表，返回模型回复（已去除首尾空白）。
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, messages: &[Message]) -> AppResult<String>;
}

/// LLM 服务
///
/// 职责：
/// - 把 `Message` 列表转换为 Chat Completions 请求
/// - 提取第一条回复的文本
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // API Key 为空时沿用 async-openai 的默认值（读取 OPENAI_API_KEY）
        let mut openai_config = OpenAIConfig::new().with_api_base(&config.llm_api_base_url);
        if !config.llm_api_key.is_empty() {
            openai_config = openai_config.with_api_key(&config.llm_api_key);
        }

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn to_request_message(message: &Message) -> AppResult<ChatCompletionRequestMessage> {
        let content = message.content.as_str();
        let request_message = match message.role {
            Role::System => ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(AppError::llm_request_failed)?,
            ),
            Role::User => ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(AppError::llm_request_failed)?,
            ),
            Role::Assistant => ChatCompletionRequestMessage::Assistant(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(AppError::llm_request_failed)?,
            ),
        };
        Ok(request_message)
    }
}

#[async_trait]
impl ChatBackend for LlmService {
    async fn send(&self, messages: &[Message]) -> AppResult<String> {
        debug!(
            "调用 LLM API，模型: {}，消息数: {}",
            self.model_name,
            messages.len()
        );

        let request_messages = messages
            .iter()
            .map(Self::to_request_message)
            .collect::<AppResult<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(request_messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(AppError::llm_request_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        debug!("LLM API 调用成功: {}", truncate_text(&content, 80));
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> LlmService {
        let config = Config {
            llm_api_key: "test-key".to_string(),
            ..Config::default()
        };
        LlmService::new(&config)
    }

    #[test]
    fn test_role_mapping() {
        let system = LlmService::to_request_message(&Message::system("s")).unwrap();
        let user = LlmService::to_request_message(&Message::user("u")).unwrap();
        let assistant = LlmService::to_request_message(&Message::assistant("a")).unwrap();

        assert!(matches!(system, ChatCompletionRequestMessage::System(_)));
        assert!(matches!(user, ChatCompletionRequestMessage::User(_)));
        assert!(matches!(assistant, ChatCompletionRequestMessage::Assistant(_)));
    }

    #[test]
    fn test_uses_configured_model() {
        assert_eq!(create_test_service().model_name(), "gpt-4o-mini");
    }

    /// 需要真实的 OPENAI_API_KEY，运行方式：
    /// ```bash
    /// cargo test test_send_to_llm_simple -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_send_to_llm_simple() {
        let _ = tracing_subscriber::fmt::try_init();

        let service = LlmService::new(&Config::from_env());
        let messages = vec![
            Message::system("You are a concise assistant."),
            Message::user("Reply with the single word: ready"),
        ];

        match service.send(&messages).await {
            Ok(response) => {
                println!("LLM 响应: {}", response);
                assert!(!response.is_empty());
            }
            Err(e) => panic!("测试失败: {}", e),
        }
    }
}
