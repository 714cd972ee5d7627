// ==========================================
// 种植土用量计算 - HTTP 服务入口
// ==========================================

use anyhow::Context;
use soil_calculator::app::{run_http, AppState};
use soil_calculator::config::AppConfig;
use soil_calculator::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 配置先于日志读取（日志格式由配置决定）
    let config = AppConfig::from_env().context("读取配置失败")?;
    logging::init_with_format(config.log_format);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", soil_calculator::APP_NAME, soil_calculator::VERSION);
    tracing::info!("==================================================");

    match &config.bag_catalog_path {
        Some(path) => tracing::info!("袋装目录种子文件: {}", path.display()),
        None => tracing::info!("袋装目录: 内置种子"),
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config).context("初始化AppState失败")?;

    run_http(state, &bind_addr).await
}
