// ==========================================
// 种植土用量计算 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("配置不一致: {0}")]
    Inconsistent(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
