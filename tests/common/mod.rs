#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use essay_grader::{build_router, AppState, Config, EssayModel, LlmError, Rubric, RubricEvaluation};

/// 可编排的假模型：按维度返回固定分数，统计调用次数
pub struct FakeModel {
    scores: [f64; 3],
    fail_on: Option<Rubric>,
    structured_calls: AtomicUsize,
    unstructured_calls: AtomicUsize,
}

impl FakeModel {
    pub fn with_scores(scores: [f64; 3]) -> Arc<Self> {
        Arc::new(Self {
            scores,
            fail_on: None,
            structured_calls: AtomicUsize::new(0),
            unstructured_calls: AtomicUsize::new(0),
        })
    }

    pub fn failing_on(rubric: Rubric) -> Arc<Self> {
        Arc::new(Self {
            scores: [5.0, 5.0, 5.0],
            fail_on: Some(rubric),
            structured_calls: AtomicUsize::new(0),
            unstructured_calls: AtomicUsize::new(0),
        })
    }

    pub fn total_calls(&self) -> usize {
        self.structured_calls.load(Ordering::SeqCst) + self.unstructured_calls.load(Ordering::SeqCst)
    }

    pub fn unstructured_calls(&self) -> usize {
        self.unstructured_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EssayModel for FakeModel {
    async fn structured(&self, prompt: &str) -> Result<RubricEvaluation, LlmError> {
        self.structured_calls.fetch_add(1, Ordering::SeqCst);

        let idx = Rubric::ALL
            .iter()
            .position(|r| prompt.contains(r.label()))
            .expect("提示词中没有维度名称");
        let rubric = Rubric::ALL[idx];

        if self.fail_on == Some(rubric) {
            return Err(LlmError::EmptyContent {
                model: "fake".to_string(),
            });
        }

        Ok(RubricEvaluation::new(
            format!("Feedback on {}", rubric.label()),
            self.scores[idx],
        ))
    }

    async fn unstructured(&self, prompt: &str) -> Result<String, LlmError> {
        self.unstructured_calls.fetch_add(1, Ordering::SeqCst);
        assert!(prompt.contains("language feedback - Feedback on language quality"));
        Ok("A balanced essay with room to deepen the argument.".to_string())
    }
}

pub fn router_with(model: Arc<FakeModel>) -> Router {
    let state = AppState::from_model(model, &Config::default()).expect("构建 AppState 失败");
    build_router(state)
}

/// 提交表单，返回 (状态码, HTML)
pub async fn post_essay(router: Router, form_body: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
