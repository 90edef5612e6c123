use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::services::{EssayModel, LlmService};
use crate::utils::logging;
use crate::web::{self, state::AppState};

/// 应用主结构
///
/// 持有进程级单例（模型客户端、评分流程、模板），请求之间复用
pub struct App {
    config: Config,
    state: Arc<AppState>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        logging::log_startup(&config);

        let model: Arc<dyn EssayModel> = Arc::new(LlmService::new(&config));
        let state = AppState::from_model(model, &config)?;

        Ok(Self { config, state })
    }

    /// 绑定端口并处理请求，直到收到 Ctrl+C
    pub async fn run(self) -> AppResult<()> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!("🌐 监听 http://{}", listener.local_addr()?);

        let router = web::build_router(self.state);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("👋 服务已停止");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听 Ctrl+C 信号: {}", e);
        // 监听失败时不退出，保持服务运行
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在关闭...");
}
