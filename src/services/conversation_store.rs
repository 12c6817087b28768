//! 会话存储 - 业务能力层
//!
//! 按会话 ID 保存有上限的消息历史。第 0 条始终是系统消息，
//! 超出上限时从第 1 条开始淘汰最旧的非系统消息。

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::quiz_meta::DEFAULT_QUIZ_TYPE;
use crate::models::{Level, Message, Role};
use crate::services::prompt_builder::conversation_system_prompt;

/// 单个会话保留的最大消息数（含系统消息）
pub const MAX_MESSAGES: usize = 21;

/// 会话存储
///
/// 在服务启动时创建，通过 `Arc` 交给各个请求处理器共享。
/// 每个操作在一次加锁内完成，同一会话的追加顺序因此得到保证。
pub struct ConversationStore {
    conversations: RwLock<HashMap<String, Vec<Message>>>,
    max_messages: usize,
}

impl ConversationStore {
    /// 创建新的会话存储，`max_messages` 至少为 1
    pub fn new(max_messages: usize) -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            max_messages: max_messages.max(1),
        }
    }

    /// 重置会话，只保留一条由等级和题型生成的系统消息
    pub async fn initialize(&self, session_id: &str, level: Level, quiz_type: &str) {
        let system = Message::system(conversation_system_prompt(level, quiz_type));
        let mut conversations = self.conversations.write().await;
        conversations.insert(session_id.to_string(), vec![system]);
        debug!("会话 {} 已初始化 (等级: {}, 题型: {})", session_id, level, quiz_type);
    }

    /// 追加一条消息
    ///
    /// 会话不存在时先以 `B1` / `reading` 初始化。
    pub async fn append(&self, session_id: &str, role: Role, content: impl Into<String>) {
        let mut conversations = self.conversations.write().await;
        let history = Self::entry_or_default(&mut conversations, session_id);
        self.push_bounded(session_id, history, Message::new(role, content));
    }

    /// 重置会话并写入一轮问答，整个过程只加一次锁
    pub async fn start_session(
        &self,
        session_id: &str,
        level: Level,
        quiz_type: &str,
        user: impl Into<String>,
        assistant: impl Into<String>,
    ) {
        let system = Message::system(conversation_system_prompt(level, quiz_type));
        let mut conversations = self.conversations.write().await;
        let history = conversations.entry(session_id.to_string()).or_default();
        *history = vec![system];
        self.push_bounded(session_id, history, Message::user(user));
        self.push_bounded(session_id, history, Message::assistant(assistant));
        debug!("会话 {} 已开始 (等级: {}, 题型: {})", session_id, level, quiz_type);
    }

    /// 追加一轮问答，两条消息之间不会插入其他请求的消息
    pub async fn append_exchange(
        &self,
        session_id: &str,
        user: impl Into<String>,
        assistant: impl Into<String>,
    ) {
        let mut conversations = self.conversations.write().await;
        let history = Self::entry_or_default(&mut conversations, session_id);
        self.push_bounded(session_id, history, Message::user(user));
        self.push_bounded(session_id, history, Message::assistant(assistant));
    }

    fn entry_or_default<'a>(
        conversations: &'a mut HashMap<String, Vec<Message>>,
        session_id: &str,
    ) -> &'a mut Vec<Message> {
        conversations
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!("会话 {} 不存在，使用默认参数初始化", session_id);
                vec![Message::system(conversation_system_prompt(
                    Level::B1,
                    DEFAULT_QUIZ_TYPE,
                ))]
            })
    }

    /// 追加后从第 1 条开始淘汰，直到不超过上限
    fn push_bounded(&self, session_id: &str, history: &mut Vec<Message>, message: Message) {
        history.push(message);

        let mut evicted = 0;
        while history.len() > self.max_messages && history.len() > 1 {
            history.remove(1);
            evicted += 1;
        }
        if evicted > 0 {
            debug!("会话 {} 超出上限，淘汰 {} 条最旧消息", session_id, evicted);
        }
    }

    /// 返回会话历史的快照，会话不存在时返回空列表
    pub async fn get_history(&self, session_id: &str) -> Vec<Message> {
        self.conversations
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// 会话是否存在
    pub async fn contains(&self, session_id: &str) -> bool {
        self.conversations.read().await.contains_key(session_id)
    }

    /// 删除会话，返回是否存在过
    pub async fn remove(&self, session_id: &str) -> bool {
        self.conversations.write().await.remove(session_id).is_some()
    }

    /// 当前会话数量
    pub async fn session_count(&self) -> usize {
        self.conversations.read().await.len()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(MAX_MESSAGES)
    }
}
