// ==========================================
// 种植土用量计算 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供袋装目录数据访问接口，返回值快照
// ==========================================

pub mod bag_size_repo;
pub mod error;

// 重导出核心仓储
pub use bag_size_repo::{default_seed, BagSizeRepository, InMemoryBagSizeRepository};
pub use error::{RepositoryError, RepositoryResult};
