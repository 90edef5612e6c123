//! 日志工具模块
//!
//! 提供日志初始化和格式化输出的辅助函数

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；未设置时根据 `verbose` 选择 info 或 debug。
/// 重复调用不会 panic（测试中会多次初始化）。
pub fn init(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 未设置 `RUST_LOG` 时的过滤规则
///
/// `TraceLayer` 的请求/响应事件是 DEBUG 级别，tower_http 需要开到 debug 才能看到
fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("essay_grader={},tower_http=debug", level)
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 作文评分服务启动");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 模型: {} ({})", config.llm_model_name, config.llm_api_base_url);
    info!(
        "📊 评分模式: {}",
        if config.parallel_scoring { "并发" } else { "顺序" }
    );
    if config.llm_api_key.is_empty() {
        warn!("⚠️ 未配置 LLM_API_KEY，模型调用将会失败");
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
