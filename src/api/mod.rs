// ==========================================
// 种植土用量计算 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供 HTTP 路由与命令行工具调用
// ==========================================

pub mod calculator_api;
pub mod dto;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use calculator_api::CalculatorApi;
pub use dto::{
    BagCombinationDto, BagLineDto, BagSizeDto, CalculateData, CalculateResponse, ConvertResponse,
    ErrorResponse, HealthResponse,
};
pub use error::{ApiError, ApiResult, FieldErrors};
pub use validator::{CalculateInput, ConvertInput, RequestValidator};
