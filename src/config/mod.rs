// ==========================================
// 种植土用量计算 - 配置层
// ==========================================
// 职责: 密度表、校验上下限、服务运行参数
// 来源: 默认值 + SOIL_* 环境变量覆写
// ==========================================

pub mod error;
pub mod soil_config;

pub use error::{ConfigError, ConfigResult};
pub use soil_config::{
    config_keys, default_bag_catalog_path, AppConfig, SoilConfig, ValidationLimits,
    LITERS_PER_CUBIC_METER, TONNES_TO_KG,
};
