// ==========================================
// 种植土用量计算 - 核心库
// ==========================================
// 职责: 土方体积/重量计算 + 袋装组合优化
// 技术栈: axum + tokio + rust_decimal
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值类型
pub mod domain;

// 数据仓储层 - 袋装目录数据访问
pub mod repository;

// 引擎层 - 计算规则
pub mod engine;

// 导入层 - 袋装目录种子文件
pub mod importer;

// 配置层 - 密度表与校验上下限
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组合根与 HTTP 接入
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{BagCountEntry, BagDefinition, CombinationResult, LengthUnit, OptimizeObjective};

pub use engine::{
    BagCatalog, BagOptimization, EngineError, GreedyBagOptimizer, SoilCalculation, SoilCalculator,
    UnitConversion, UnitConverter,
};

pub use api::{ApiError, CalculatorApi};
pub use app::AppState;
pub use config::{AppConfig, SoilConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Soil Calculator";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
