use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::{self, AppState};
use crate::config::Config;
use crate::services::{ChatBackend, ConversationStore, LlmService};
use crate::utils::logging::log_startup;
use crate::workflow::{ExportFlow, QuizFlow};

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用：创建会话存储、LLM 服务与各流程
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let llm = LlmService::new(&config);
        info!("✓ LLM 服务已就绪 (模型: {})", llm.model_name());
        let state = Self::build_state(&config, Arc::new(llm));

        Ok(Self { config, state })
    }

    /// 使用指定的模型后端组装共享状态
    pub fn build_state(config: &Config, llm: Arc<dyn ChatBackend>) -> AppState {
        let store = Arc::new(ConversationStore::new(config.max_messages));
        AppState {
            quiz_flow: Arc::new(QuizFlow::new(llm, store.clone())),
            export_flow: Arc::new(ExportFlow::new(&config.export_dir)),
            store,
        }
    }

    /// 运行 HTTP 服务，直到收到 Ctrl+C
    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("无法监听地址: {}", addr))?;

        info!("✓ 服务已启动: http://{}", addr);

        axum::serve(listener, api::router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP 服务异常退出")?;

        info!("👋 服务已停止");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("收到退出信号，正在关闭...");
    }
}
