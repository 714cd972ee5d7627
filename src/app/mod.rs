// ==========================================
// 种植土用量计算 - 应用层
// ==========================================
// 职责: 组合根与 HTTP 接入
// ==========================================

pub mod http_routes;
pub mod state;

// 重导出
pub use http_routes::{router, run_http};
pub use state::AppState;
