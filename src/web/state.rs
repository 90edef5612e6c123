use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::EssayModel;
use crate::web::render::PageRenderer;
use crate::workflow::EssayFlow;

/// 所有 handler 共享的进程级状态
///
/// 启动时构建一次；请求之间不共享任何评分数据
pub struct AppState {
    pub flow: EssayFlow,
    pub renderer: PageRenderer,
}

impl AppState {
    pub fn new(flow: EssayFlow, renderer: PageRenderer) -> Arc<Self> {
        Arc::new(Self { flow, renderer })
    }

    /// 用给定的模型能力组装状态
    pub fn from_model(model: Arc<dyn EssayModel>, config: &Config) -> AppResult<Arc<Self>> {
        let flow = EssayFlow::new(model, config);
        let renderer = PageRenderer::new()?;
        Ok(Self::new(flow, renderer))
    }
}
