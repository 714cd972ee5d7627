// ==========================================
// 种植土用量计算 - 领域模型层
// ==========================================
// 职责: 定义袋装规格、组合结果与枚举型输入
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod bag;
pub mod types;

// 重导出核心类型
pub use bag::{round_half_up, BagCountEntry, BagDefinition, CombinationResult};
pub use types::{LengthUnit, OptimizeObjective};
