// ==========================================
// 种植土用量计算 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换引擎/仓储错误
// 红线: 内部细节只进日志，不进入用户可见消息
// ==========================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::engine::error::EngineError;
use crate::i18n;
use crate::repository::error::RepositoryError;

/// 字段 → 错误消息列表（保持字段名字典序，输出稳定）
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误（422）
    // ==========================================
    #[error("输入校验失败: {errors:?}")]
    Validation { errors: FieldErrors },

    #[error("未知的土壤类型: {0}")]
    UnknownSoilType(String),

    #[error("不支持的长度单位: {0}")]
    UnsupportedUnit(String),

    // ==========================================
    // 目录错误（500，带专门提示）
    // ==========================================
    #[error("没有可用的袋装规格")]
    EmptyCatalog,

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据访问失败: {0}")]
    DataAccess(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 单字段校验失败
    pub fn field(field: &str, message: String) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message]);
        ApiError::Validation { errors }
    }

    /// 是否属于调用方输入问题（对应 422）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ApiError::Validation { .. } | ApiError::UnknownSoilType(_) | ApiError::UnsupportedUnit(_)
        )
    }

    /// 面向调用方的字段错误表（非输入错误返回 None）
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            ApiError::Validation { errors } => Some(errors.clone()),
            ApiError::UnknownSoilType(_) => Some(single(
                "soil_type",
                i18n::t("validation.soil_type_invalid"),
            )),
            ApiError::UnsupportedUnit(_) => Some(single("unit", i18n::t("validation.unit_invalid"))),
            _ => None,
        }
    }

    /// 错误代码（日志检索用）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::UnknownSoilType(_) => "UNKNOWN_SOIL_TYPE",
            ApiError::UnsupportedUnit(_) => "UNSUPPORTED_UNIT",
            ApiError::EmptyCatalog => "EMPTY_CATALOG",
            ApiError::DataAccess(_) => "DATA_ACCESS_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

fn single(field: &str, message: String) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![message]);
    errors
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::EmptyCatalog => ApiError::EmptyCatalog,
            EngineError::UnknownSoilType { soil_type } => ApiError::UnknownSoilType(soil_type),
            EngineError::UnsupportedUnit { unit } => ApiError::UnsupportedUnit(unit),

            // 目录数据或数值问题: 调用方无法修正
            other @ (EngineError::InvalidBagDefinition { .. }
            | EngineError::DuplicateBagName(_)
            | EngineError::InvalidRequiredMass(_)
            | EngineError::NumericOverflow(_)) => ApiError::InternalError(other.to_string()),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::LockError(msg) => {
                ApiError::DataAccess(format!("仓储锁获取失败: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DataAccess(format!("字段{}错误: {}", field, message))
            }
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
