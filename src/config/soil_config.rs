// ==========================================
// 种植土用量计算 - 系统配置
// ==========================================
// 职责: 密度表、输入校验上下限、服务运行参数
// 来源: 默认值 + 环境变量覆写（SOIL_*）
// 红线: 配置以结构体显式注入，不做全局查找
// ==========================================

use std::path::PathBuf;
use std::str::FromStr;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::error::{ConfigError, ConfigResult};
use crate::logging::LogFormat;

/// 吨 → 千克
pub const TONNES_TO_KG: Decimal = dec!(1000);

/// 每立方米升数
pub const LITERS_PER_CUBIC_METER: Decimal = dec!(1000);

/// 默认监听地址
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// 默认语言
pub const DEFAULT_LOCALE: &str = "en";

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    // 土壤密度（吨/m³）
    pub const INTENSIVE_DENSITY: &str = "SOIL_INTENSIVE_DENSITY";
    pub const EXTENSIVE_DENSITY: &str = "SOIL_EXTENSIVE_DENSITY";

    // 输入校验上下限（米）
    pub const MAX_LENGTH_WIDTH: &str = "SOIL_MAX_LENGTH_WIDTH";
    pub const MAX_DEPTH: &str = "SOIL_MAX_DEPTH";
    pub const MIN_DIMENSION: &str = "SOIL_MIN_DIMENSION";

    // 服务运行
    pub const BIND_ADDR: &str = "SOIL_BIND_ADDR";
    pub const BAG_CATALOG: &str = "SOIL_BAG_CATALOG"; // 袋装目录种子文件 (.json/.csv)
    pub const LOCALE: &str = "SOIL_LOCALE";
    pub const LOG_FORMAT: &str = "SOIL_LOG_FORMAT"; // text / json
}

// ==========================================
// ValidationLimits - 输入校验上下限
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    pub max_length_width: Decimal, // 长/宽上限 (m)
    pub max_depth: Decimal,        // 深度上限 (m)
    pub min_dimension: Decimal,    // 各尺寸下限 (m)
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_length_width: dec!(10000),
            max_depth: dec!(100),
            min_dimension: dec!(0.01),
        }
    }
}

// ==========================================
// SoilConfig - 土方计算配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilConfig {
    /// 土壤类型 → 密度（吨/m³），保持配置顺序（intensive 在前）
    pub densities: IndexMap<String, Decimal>,
    pub limits: ValidationLimits,
}

impl Default for SoilConfig {
    fn default() -> Self {
        let mut densities = IndexMap::new();
        densities.insert("intensive".to_string(), dec!(1.3));
        densities.insert("extensive".to_string(), dec!(1.1));

        Self {
            densities,
            limits: ValidationLimits::default(),
        }
    }
}

impl SoilConfig {
    /// 从环境变量读取（缺省项使用默认值）
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过查找函数读取配置
    ///
    /// # 参数
    /// - lookup: 配置键 → 原始值（None 表示未配置）
    ///
    /// # 返回
    /// - Err(ConfigError::InvalidValue): 值无法解析或不为正数
    /// - Err(ConfigError::Inconsistent): 下限大于上限
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = read_positive(&lookup, config_keys::INTENSIVE_DENSITY)? {
            config.densities.insert("intensive".to_string(), v);
        }
        if let Some(v) = read_positive(&lookup, config_keys::EXTENSIVE_DENSITY)? {
            config.densities.insert("extensive".to_string(), v);
        }

        if let Some(v) = read_positive(&lookup, config_keys::MAX_LENGTH_WIDTH)? {
            config.limits.max_length_width = v;
        }
        if let Some(v) = read_positive(&lookup, config_keys::MAX_DEPTH)? {
            config.limits.max_depth = v;
        }
        if let Some(v) = read_positive(&lookup, config_keys::MIN_DIMENSION)? {
            config.limits.min_dimension = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// 配置一致性校验
    pub fn validate(&self) -> ConfigResult<()> {
        if self.densities.is_empty() {
            return Err(ConfigError::Inconsistent("未配置任何土壤密度".to_string()));
        }
        let limits = &self.limits;
        if limits.min_dimension > limits.max_depth || limits.min_dimension > limits.max_length_width {
            return Err(ConfigError::Inconsistent(format!(
                "min_dimension={} 大于上限 (max_length_width={}, max_depth={})",
                limits.min_dimension, limits.max_length_width, limits.max_depth
            )));
        }
        Ok(())
    }
}

// ==========================================
// AppConfig - 服务运行配置
// ==========================================
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub soil: SoilConfig,
    pub bind_addr: String,
    /// 袋装目录种子文件；None 表示使用内置种子
    pub bag_catalog_path: Option<PathBuf>,
    pub default_locale: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            soil: SoilConfig::default(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            bag_catalog_path: None,
            default_locale: DEFAULT_LOCALE.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let soil = SoilConfig::from_lookup(&lookup)?;

        let bind_addr = read_trimmed(&lookup, config_keys::BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let default_locale = read_trimmed(&lookup, config_keys::LOCALE)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let log_format = match read_trimmed(&lookup, config_keys::LOG_FORMAT) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|message| ConfigError::InvalidValue {
                key: config_keys::LOG_FORMAT.to_string(),
                value: raw.clone(),
                message,
            })?,
            None => LogFormat::Text,
        };

        // 显式指定优先；否则使用用户配置目录下的种子文件（存在时）
        let bag_catalog_path = read_trimmed(&lookup, config_keys::BAG_CATALOG)
            .map(PathBuf::from)
            .or_else(|| default_bag_catalog_path().filter(|p| p.exists()));

        Ok(Self {
            soil,
            bind_addr,
            bag_catalog_path,
            default_locale,
            log_format,
        })
    }
}

/// 默认袋装目录种子文件位置: <config_dir>/soil-calculator/bag_sizes.json
pub fn default_bag_catalog_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("soil-calculator").join("bag_sizes.json"))
}

fn read_trimmed<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_positive<F>(lookup: &F, key: &str) -> ConfigResult<Option<Decimal>>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match read_trimmed(lookup, key) {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let value = Decimal::from_str(&raw).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.clone(),
        message: e.to_string(),
    })?;

    if value <= Decimal::ZERO {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
            message: "必须为正数".to_string(),
        });
    }
    Ok(Some(value))
}
