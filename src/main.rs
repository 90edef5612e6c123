use anyhow::Result;
use essay_grader::utils::logging;
use essay_grader::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（含 .env）
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
