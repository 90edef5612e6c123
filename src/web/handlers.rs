use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::{error, info};

use crate::web::render::IndexView;
use crate::web::state::AppState;

/// 空作文的提示
pub const EMPTY_ESSAY_MESSAGE: &str = "Please enter an essay to evaluate.";

#[derive(Debug, Deserialize)]
pub struct EssayForm {
    #[serde(default)]
    pub essay: String,
}

/// GET / - 空表单
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    render(&state, &IndexView::empty())
}

/// POST / - 提交作文并评分
pub async fn submit(State(state): State<Arc<AppState>>, Form(form): Form<EssayForm>) -> Response {
    let essay = form.essay;

    if essay.trim().is_empty() {
        info!("收到空作文，跳过评分");
        return render(&state, &IndexView::with_error(EMPTY_ESSAY_MESSAGE));
    }

    info!("📥 收到作文提交，长度 {} 字符", essay.chars().count());

    match state.flow.run(&essay).await {
        Ok(result) => render(&state, &IndexView::with_result(&essay, &result)),
        Err(e) => {
            error!("❌ 评分失败: {}", e);
            render(&state, &IndexView::with_error(format!("An error occurred: {}", e)))
        }
    }
}

/// 存活检查
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

fn render(state: &AppState, view: &IndexView<'_>) -> Response {
    match state.renderer.render_index(view) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("页面渲染失败: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "页面渲染失败").into_response()
        }
    }
}
