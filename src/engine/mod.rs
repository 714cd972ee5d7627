// ==========================================
// 种植土用量计算 - 引擎层
// ==========================================
// 职责: 纯计算规则（目录排序、袋装组合、土方换算、单位换算）
// 红线: 引擎无 I/O、无共享可变状态，输入为不可变快照
// ==========================================

pub mod bag_catalog;
pub mod bag_optimizer;
pub mod error;
pub mod soil_calculator;
pub mod unit_converter;

// 重导出核心引擎
pub use bag_catalog::BagCatalog;
pub use bag_optimizer::{BagOptimization, GreedyBagOptimizer};
pub use error::{EngineError, EngineResult};
pub use soil_calculator::{SoilCalculation, SoilCalculator};
pub use unit_converter::{UnitConversion, UnitConverter};
