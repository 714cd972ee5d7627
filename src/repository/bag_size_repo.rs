// ==========================================
// 种植土用量计算 - 袋装规格仓储
// ==========================================
// 职责: 袋装规格目录的数据访问，返回值快照
// 红线: Repository 不含业务逻辑（排序视图、规格合法性校验在引擎层），只拒绝空白名称
// ==========================================

use std::sync::RwLock;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::domain::bag::BagDefinition;
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// Trait: BagSizeRepository
// ==========================================
// 实现者: InMemoryBagSizeRepository
#[async_trait]
pub trait BagSizeRepository: Send + Sync {
    /// 活跃规格，按 sort_order → weight 排序
    async fn find_active(&self) -> RepositoryResult<Vec<BagDefinition>>;
}

// ==========================================
// InMemoryBagSizeRepository - 内存实现
// ==========================================
#[derive(Debug, Default)]
pub struct InMemoryBagSizeRepository {
    bags: RwLock<Vec<BagDefinition>>,
}

impl InMemoryBagSizeRepository {
    /// 由规格列表构建（启动种子文件 / 嵌入场景）
    ///
    /// # 返回
    /// - Err(RepositoryError::FieldValueError): 存在空白名称
    pub fn new(bags: Vec<BagDefinition>) -> RepositoryResult<Self> {
        check_names(&bags)?;
        Ok(Self {
            bags: RwLock::new(bags),
        })
    }

    /// 使用内置种子数据构建
    pub fn with_default_seed() -> Self {
        Self {
            bags: RwLock::new(default_seed()),
        }
    }

    /// 整体替换目录（目录管理 / 重新加载种子文件）
    ///
    /// # 返回
    /// - Err(RepositoryError::FieldValueError): 存在空白名称，原目录保持不变
    pub fn replace_all(&self, bags: Vec<BagDefinition>) -> RepositoryResult<()> {
        check_names(&bags)?;

        let mut guard = self
            .bags
            .write()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        info!(count = bags.len(), "袋装目录已替换");
        *guard = bags;
        Ok(())
    }

    fn snapshot(&self) -> RepositoryResult<Vec<BagDefinition>> {
        let guard = self
            .bags
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        let mut bags = guard.clone();
        bags.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.unit_weight_kg.cmp(&b.unit_weight_kg))
        });
        Ok(bags)
    }
}

#[async_trait]
impl BagSizeRepository for InMemoryBagSizeRepository {
    async fn find_active(&self) -> RepositoryResult<Vec<BagDefinition>> {
        let bags: Vec<BagDefinition> = self
            .snapshot()?
            .into_iter()
            .filter(|b| b.is_active)
            .collect();
        debug!(count = bags.len(), "读取活跃袋装规格");
        Ok(bags)
    }
}

// 启动装配与运行时替换共用的数据质量检查
fn check_names(bags: &[BagDefinition]) -> RepositoryResult<()> {
    match bags.iter().position(|b| b.name.trim().is_empty()) {
        Some(pos) => Err(RepositoryError::FieldValueError {
            field: "name".to_string(),
            message: format!("第 {} 条规格名称为空", pos + 1),
        }),
        None => Ok(()),
    }
}

/// 内置种子目录
pub fn default_seed() -> Vec<BagDefinition> {
    vec![
        BagDefinition::new("25kg Standard", dec!(25), dec!(4.00), 1),
        BagDefinition::new("600kg Bulk Bag", dec!(600), dec!(90.00), 2),
        BagDefinition::new("1000kg Tonne Bag", dec!(1000), dec!(140.00), 3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_seed_is_active_and_ordered() {
        let repo = InMemoryBagSizeRepository::with_default_seed();
        let bags = repo.find_active().await.unwrap();
        let names: Vec<&str> = bags.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["25kg Standard", "600kg Bulk Bag", "1000kg Tonne Bag"]);
    }

    #[tokio::test]
    async fn test_find_active_skips_inactive() {
        let repo = InMemoryBagSizeRepository::new(vec![
            BagDefinition::new("50kg Retired", dec!(50), dec!(6.00), 1).inactive(),
            BagDefinition::new("25kg Standard", dec!(25), dec!(4.00), 2),
        ])
        .unwrap();
        let active = repo.find_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "25kg Standard");
    }

    #[tokio::test]
    async fn test_same_sort_order_ordered_by_weight() {
        let repo = InMemoryBagSizeRepository::new(vec![
            BagDefinition::new("Heavy", dec!(100), dec!(10), 0),
            BagDefinition::new("Light", dec!(10), dec!(2), 0),
        ])
        .unwrap();
        let bags = repo.find_active().await.unwrap();
        assert_eq!(bags[0].name, "Light");
        assert_eq!(bags[1].name, "Heavy");
    }

    #[tokio::test]
    async fn test_replace_all_swaps_catalog() {
        let repo = InMemoryBagSizeRepository::with_default_seed();
        repo.replace_all(vec![BagDefinition::new("10kg Mini", dec!(10), dec!(2.50), 1)])
            .unwrap();

        let bags = repo.find_active().await.unwrap();
        assert_eq!(bags.len(), 1);
        assert_eq!(bags[0].name, "10kg Mini");
        assert_eq!(bags[0].unit_price, dec!(2.50));
    }

    #[tokio::test]
    async fn test_replace_all_rejects_blank_name() {
        let repo = InMemoryBagSizeRepository::with_default_seed();
        let result = repo.replace_all(vec![BagDefinition::new("  ", dec!(10), dec!(1), 1)]);
        assert!(matches!(
            result,
            Err(RepositoryError::FieldValueError { ref field, .. }) if field == "name"
        ));
        assert_eq!(repo.find_active().await.unwrap().len(), 3);
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let result = InMemoryBagSizeRepository::new(vec![
            BagDefinition::new("25kg Standard", dec!(25), dec!(4.00), 1),
            BagDefinition::new("", dec!(10), dec!(1), 2),
        ]);
        match result {
            Err(RepositoryError::FieldValueError { field, message }) => {
                assert_eq!(field, "name");
                assert!(message.contains('2'));
            }
            other => panic!("Expected FieldValueError, got {:?}", other.map(|_| ())),
        }
    }
}
