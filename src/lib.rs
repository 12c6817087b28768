//! # Quiz Generator
//!
//! 把原始英文材料交给 LLM，生成按 CEFR 等级定制的练习，
//! 支持对话式修改，并导出为 DOCX 文档。
//!
//! ## 架构设计
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `LlmService` - 消息进、文本出
//! - `ConversationStore` - 有上限的会话历史，系统消息永不淘汰
//! - `DocxWriter` - 段落写成 DOCX
//! - `prompt_builder` - 提示词模板
//!
//! ### ② 排版（Formatter）
//! - `formatter/` - 题目纯文本逐行分类为文档块
//!
//! ### ③ 流程层（Workflow）
//! - `QuizFlow` - 校验 → 提示词 → LLM → 记录会话
//! - `ExportFlow` - 排版 → 渲染 → 落盘
//!
//! ### ④ 接口层（Api）
//! - `api/` - axum 路由与处理器，`App` 负责组装与启动
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Level, Message, QuizType, Role};
pub use services::{ChatBackend, ConversationStore, LlmService};
pub use workflow::{ExportFlow, QuizFlow};
