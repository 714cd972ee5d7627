// ==========================================
// 种植土用量计算 - 应用状态
// ==========================================
// 职责: 组合根，显式装配仓储/引擎/API 实例
// 说明: 启动时装配一次，之后以 Arc 共享给所有请求
// ==========================================

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::api::{CalculatorApi, RequestValidator};
use crate::config::soil_config::AppConfig;
use crate::engine::{GreedyBagOptimizer, SoilCalculator, UnitConverter};
use crate::i18n;
use crate::importer::bag_catalog_file::load_bag_catalog;
use crate::repository::bag_size_repo::InMemoryBagSizeRepository;

/// 应用状态
///
/// 包含API实例和共享资源，作为 axum 路由状态
#[derive(Clone)]
pub struct AppState {
    /// 运行配置
    pub config: Arc<AppConfig>,

    /// 计算API
    pub calculator_api: Arc<CalculatorApi>,

    /// 袋装目录仓储（支持运行时重新加载）
    pub bag_repo: Arc<InMemoryBagSizeRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - config: 运行配置
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err: 种子文件加载失败（ImportError）或目录数据不合格（RepositoryError）
    ///
    /// # 说明
    /// 1. 加载袋装目录（种子文件或内置种子），与运行时重新加载走同一套检查
    /// 2. 初始化所有Engine
    /// 3. 创建API实例
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let bag_repo = match &config.bag_catalog_path {
            Some(path) => {
                let bags = load_bag_catalog(path)
                    .with_context(|| format!("加载袋装目录失败: {}", path.display()))?;
                InMemoryBagSizeRepository::new(bags).context("袋装目录种子数据不合格")?
            }
            None => {
                info!("未指定袋装目录种子文件，使用内置种子");
                InMemoryBagSizeRepository::with_default_seed()
            }
        };
        Ok(Self::with_repository(config, Arc::new(bag_repo)))
    }

    /// 使用已有仓储装配（测试 / 嵌入场景）
    pub fn with_repository(config: AppConfig, bag_repo: Arc<InMemoryBagSizeRepository>) -> Self {
        if !i18n::set_locale(&config.default_locale) {
            warn!(locale = %config.default_locale, "不支持的语言，保持当前语言");
        }

        let calculator_api = CalculatorApi::new(
            bag_repo.clone(),
            Arc::new(SoilCalculator::new(&config.soil)),
            Arc::new(GreedyBagOptimizer::new()),
            Arc::new(UnitConverter::new()),
            RequestValidator::new(&config.soil),
        );

        info!(
            soil_types = config.soil.densities.len(),
            locale = %config.default_locale,
            "AppState 初始化完成"
        );

        Self {
            config: Arc::new(config),
            calculator_api: Arc::new(calculator_api),
            bag_repo,
        }
    }

    /// 从种子文件重新加载袋装目录
    ///
    /// # 返回
    /// - Ok(usize): 加载的规格数量
    pub fn reload_bag_catalog(&self, path: &Path) -> anyhow::Result<usize> {
        let bags = load_bag_catalog(path)
            .with_context(|| format!("加载袋装目录失败: {}", path.display()))?;
        let count = bags.len();
        self.bag_repo.replace_all(bags).context("替换袋装目录失败")?;
        Ok(count)
    }
}
