use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 三个维度是否并发评分
    pub parallel_scoring: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    /// 单次 LLM 调用超时（秒），None 表示不限制
    pub llm_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            parallel_scoring: true,
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4".to_string(),
            llm_temperature: 0.3,
            llm_max_tokens: 1024,
            llm_timeout_secs: None,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 启动时会先尝试读取 `.env`，文件不存在时忽略。
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 使用自定义的变量查找函数构建配置
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Ok(Self {
            host: lookup("HOST").unwrap_or(default.host),
            port: parse_var(&lookup, "PORT", default.port, "u16")?,
            parallel_scoring: parse_var(&lookup, "PARALLEL_SCORING", default.parallel_scoring, "bool")?,
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", default.verbose_logging, "bool")?,
            llm_api_key: lookup("LLM_API_KEY")
                .or_else(|| lookup("OPENAI_API_KEY"))
                .unwrap_or(default.llm_api_key),
            llm_api_base_url: lookup("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: lookup("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: parse_var(&lookup, "LLM_TEMPERATURE", default.llm_temperature, "f32")?,
            llm_max_tokens: parse_var(&lookup, "LLM_MAX_TOKENS", default.llm_max_tokens, "u32")?,
            llm_timeout_secs: match lookup("LLM_TIMEOUT_SECS") {
                Some(v) => Some(parse_value("LLM_TIMEOUT_SECS", &v, "u64")?),
                None => default.llm_timeout_secs,
            },
        })
    }

    /// 监听地址（host:port）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T, expected_type: &str) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(v) => parse_value(name, &v, expected_type),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str, expected_type: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::env_parse_failed(name, value, expected_type))
}
