use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 评分流程错误
    #[error("评分流程错误: {0}")]
    Evaluation(#[from] EvaluationError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 服务启动 / 监听失败
    #[error("服务错误: {0}")]
    Server(#[from] std::io::Error),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 请求超时
    #[error("LLM API调用超时 (模型: {model}, {secs}秒)")]
    Timeout { model: String, secs: u64 },
    /// 构建请求失败
    #[error("构建LLM请求失败: {source}")]
    RequestBuildFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 结构化输出不符合要求的格式
    #[error("LLM结构化输出无法解析 (响应: {response}): {reason}")]
    InvalidStructuredOutput { response: String, reason: String },
    /// 分数超出 [0, 10]
    #[error("LLM返回的分数 {score} 超出范围 [0, 10]")]
    ScoreOutOfRange { score: f64 },
}

/// 评分流程错误
#[derive(Debug, Error, PartialEq)]
pub enum EvaluationError {
    /// 汇总时分数数量不足
    #[error("汇总需要 {expected} 个分数，当前只有 {actual} 个")]
    MissingScores { expected: usize, actual: usize },
    /// 汇总时某个维度的反馈缺失
    #[error("缺少 {rubric} 的反馈")]
    MissingFeedback { rubric: String },
    /// 同一字段被写入两次
    #[error("字段 {field} 已被写入，不允许重复写入")]
    DuplicateWrite { field: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        AppError::Other(format!("页面渲染失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建环境变量解析错误
    pub fn env_parse_failed(
        var_name: impl Into<String>,
        value: impl Into<String>,
        expected_type: impl Into<String>,
    ) -> Self {
        AppError::Config(ConfigError::EnvVarParseFailed {
            var_name: var_name.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_wraps_into_app_error() {
        let err: AppError = LlmError::ScoreOutOfRange { score: 11.0 }.into();
        assert!(matches!(err, AppError::Llm(LlmError::ScoreOutOfRange { .. })));
        assert!(err.to_string().contains("11"));
    }

    #[test]
    fn test_missing_scores_message() {
        let err = EvaluationError::MissingScores {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "汇总需要 3 个分数，当前只有 2 个");
    }

    #[test]
    fn test_env_parse_failed_constructor() {
        let err = AppError::env_parse_failed("PORT", "abc", "u16");
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("PORT"));
    }
}
