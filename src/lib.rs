//! # Essay Grader
//!
//! 基于 LLM 的作文评分 Web 服务
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 评分维度、结构化评分结果、评分状态
//! - `EvaluationState` - 一次提交对应一个状态，流程结束后丢弃
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `EssayModel` - 模型能力抽象（结构化 / 纯文本）
//! - `LlmService` - 基于 async-openai 的实现
//! - `ScoringService` - 单维度评分能力
//! - `SummaryService` - 总评 + 平均分能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一篇作文"的评分流程
//! - `EssayFlow` - START → 三个评分节点 → 汇总 → END
//!
//! ### ④ 接入层（Web）
//! - `web/` - 表单提交、页面渲染、存活检查
//! - `App` - 进程生命周期：配置、单例、监听
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod web;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult, EvaluationError, LlmError};
pub use models::{EvaluationState, Rubric, RubricEvaluation};
pub use services::{EssayModel, LlmService};
pub use web::{build_router, state::AppState};
pub use workflow::EssayFlow;
