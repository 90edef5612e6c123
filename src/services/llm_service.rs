//! LLM 服务 - 业务能力层
//!
//! 只负责"调用模型"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;
use crate::models::RubricEvaluation;
use crate::services::EssayModel;

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 完成评分和总结
/// - 结构化模式下约束输出格式并校验
/// - 不关心评分维度和流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Option<Duration>,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
            timeout: config.llm_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// 其他所有 LLM 相关功能都基于此函数。
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去掉首尾空白）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(build_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(build_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(build_failed)?;

        let chat = self.client.chat();
        let call = chat.create(request);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| {
                    warn!("LLM API 调用超时: {:?}", limit);
                    LlmError::Timeout {
                        model: self.model_name.clone(),
                        secs: limit.as_secs(),
                    }
                })?,
            None => call.await,
        }
        .map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            LlmError::ApiCallFailed {
                model: self.model_name.clone(),
                source: Box::new(e),
            }
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl EssayModel for LlmService {
    async fn structured(&self, prompt: &str) -> Result<RubricEvaluation, LlmError> {
        let system_message = structured_system_message();
        let response = self.send_to_llm(prompt, Some(&system_message)).await?;
        RubricEvaluation::parse(&response)
    }

    async fn unstructured(&self, prompt: &str) -> Result<String, LlmError> {
        let content = self.send_to_llm(prompt, None).await?;
        if content.is_empty() {
            return Err(LlmError::EmptyContent {
                model: self.model_name.clone(),
            });
        }
        Ok(content)
    }
}

/// 结构化模式的系统消息，内嵌输出格式的 JSON Schema
fn structured_system_message() -> String {
    format!(
        "You are an expert essay examiner. Respond ONLY with a single JSON object that \
         conforms to the following JSON schema. Do not add any other text.\n{}",
        RubricEvaluation::schema_json()
    )
}

fn build_failed(err: OpenAIError) -> LlmError {
    LlmError::RequestBuildFailed {
        source: Box::new(err),
    }
}
