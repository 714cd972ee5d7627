// ==========================================
// 种植土用量计算 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 引擎只抛出类型化错误，文案转换由 API 层负责
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    // ===== 袋装目录错误 =====
    #[error("没有可用的袋装规格")]
    EmptyCatalog,

    #[error("袋装规格无效 (name={name}): {reason}")]
    InvalidBagDefinition { name: String, reason: String },

    #[error("活跃袋装规格名称重复: {0}")]
    DuplicateBagName(String),

    // ===== 查表错误 =====
    #[error("未知的土壤类型: {soil_type}")]
    UnknownSoilType { soil_type: String },

    #[error("不支持的长度单位: {unit}")]
    UnsupportedUnit { unit: String },

    // ===== 输入/数值错误 =====
    #[error("需求量必须大于 0: {0}")]
    InvalidRequiredMass(String),

    #[error("数值溢出: {0}")]
    NumericOverflow(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
