// ==========================================
// 种植土用量计算 - 导入层
// ==========================================
// 职责: 外部袋装目录种子文件导入
// 支持: JSON, CSV
// ==========================================

pub mod bag_catalog_file;
pub mod error;

pub use bag_catalog_file::{load_bag_catalog, parse_csv, parse_json};
pub use error::{ImportError, ImportResult};
