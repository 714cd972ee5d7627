// ==========================================
// 种植土用量计算 - 袋装目录快照
// ==========================================
// 职责: 持有一次请求内的活跃袋装规格快照，提供确定性排序视图
// 输入: 仓储层读取的全部规格（含停用）
// 输出: 按重量降序 / 按每公斤单价升序 / 最小规格
// 红线: 快照只读，计算过程中不重新读取仓储
// ==========================================

use std::cmp::Ordering;
use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::domain::bag::BagDefinition;
use crate::domain::types::OptimizeObjective;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// BagCatalog - 袋装目录快照
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BagCatalog {
    // 仅活跃规格，按展示顺序（sort_order → weight → name）存放
    active: Vec<BagDefinition>,
}

impl BagCatalog {
    /// 由仓储快照构建目录
    ///
    /// # 参数
    /// - definitions: 全部袋装规格（停用规格会被过滤）
    ///
    /// # 返回
    /// - Ok(BagCatalog): 校验通过的活跃目录（可以为空）
    /// - Err(EngineError::InvalidBagDefinition): 活跃规格重量 <= 0 或价格 < 0
    /// - Err(EngineError::DuplicateBagName): 活跃规格名称重复
    pub fn new(definitions: Vec<BagDefinition>) -> EngineResult<Self> {
        let mut seen = HashSet::new();
        let mut active = Vec::with_capacity(definitions.len());

        for bag in definitions.into_iter().filter(|b| b.is_active) {
            if bag.unit_weight_kg <= Decimal::ZERO {
                return Err(EngineError::InvalidBagDefinition {
                    name: bag.name.clone(),
                    reason: format!("weight must be > 0, got {}", bag.unit_weight_kg),
                });
            }
            if bag.unit_price < Decimal::ZERO {
                return Err(EngineError::InvalidBagDefinition {
                    name: bag.name.clone(),
                    reason: format!("price must be >= 0, got {}", bag.unit_price),
                });
            }
            if !seen.insert(bag.name.clone()) {
                return Err(EngineError::DuplicateBagName(bag.name));
            }
            active.push(bag);
        }

        active.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.unit_weight_kg.cmp(&b.unit_weight_kg))
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(Self { active })
    }

    /// 空目录
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// 活跃规格（展示顺序）
    pub fn active_bags(&self) -> &[BagDefinition] {
        &self.active
    }

    /// 按单袋重量降序
    ///
    /// 平局依次按 sort_order 升序、name 升序裁决，保证优化结果可复现
    pub fn sorted_by_weight_descending(&self) -> Vec<&BagDefinition> {
        let mut bags: Vec<&BagDefinition> = self.active.iter().collect();
        bags.sort_by(|a, b| {
            b.unit_weight_kg
                .cmp(&a.unit_weight_kg)
                .then_with(|| tie_break(a, b))
        });
        bags
    }

    /// 按每公斤单价升序（平局规则同上）
    pub fn sorted_by_cost_per_kg_ascending(&self) -> Vec<&BagDefinition> {
        let mut bags: Vec<&BagDefinition> = self.active.iter().collect();
        bags.sort_by(|a, b| {
            a.cost_per_kg()
                .cmp(&b.cost_per_kg())
                .then_with(|| tie_break(a, b))
        });
        bags
    }

    /// 按优化目标选择排序视图
    pub fn sorted_for(&self, objective: OptimizeObjective) -> Vec<&BagDefinition> {
        match objective {
            OptimizeObjective::MinimizeWastage => self.sorted_by_weight_descending(),
            OptimizeObjective::MinimizeCost => self.sorted_by_cost_per_kg_ascending(),
        }
    }

    /// 单袋重量最小的规格（目录为空时返回 None）
    pub fn smallest_by_weight(&self) -> Option<&BagDefinition> {
        self.active.iter().min_by(|a, b| {
            a.unit_weight_kg
                .cmp(&b.unit_weight_kg)
                .then_with(|| tie_break(a, b))
        })
    }
}

fn tie_break(a: &BagDefinition, b: &BagDefinition) -> Ordering {
    a.sort_order
        .cmp(&b.sort_order)
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn default_bags() -> Vec<BagDefinition> {
        vec![
            BagDefinition::new("25kg Standard", dec!(25), dec!(4.00), 1),
            BagDefinition::new("600kg Bulk Bag", dec!(600), dec!(90.00), 2),
            BagDefinition::new("1000kg Tonne Bag", dec!(1000), dec!(140.00), 3),
        ]
    }

    fn names(bags: &[&BagDefinition]) -> Vec<String> {
        bags.iter().map(|b| b.name.clone()).collect()
    }

    #[test]
    fn test_inactive_bags_are_filtered() {
        let mut bags = default_bags();
        bags.push(BagDefinition::new("50kg Retired", dec!(50), dec!(6.00), 4).inactive());

        let catalog = BagCatalog::new(bags).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.active_bags().iter().all(|b| b.is_active));
    }

    #[test]
    fn test_sorted_by_weight_descending() {
        let catalog = BagCatalog::new(default_bags()).unwrap();
        assert_eq!(
            names(&catalog.sorted_by_weight_descending()),
            vec!["1000kg Tonne Bag", "600kg Bulk Bag", "25kg Standard"]
        );
    }

    #[test]
    fn test_sorted_by_cost_per_kg_ascending() {
        // 0.16 / 0.15 / 0.14 每公斤
        let catalog = BagCatalog::new(default_bags()).unwrap();
        assert_eq!(
            names(&catalog.sorted_by_cost_per_kg_ascending()),
            vec!["1000kg Tonne Bag", "600kg Bulk Bag", "25kg Standard"]
        );
    }

    #[test]
    fn test_weight_ties_broken_by_sort_order_then_name() {
        let catalog = BagCatalog::new(vec![
            BagDefinition::new("B Bag", dec!(25), dec!(4.00), 2),
            BagDefinition::new("A Bag", dec!(25), dec!(4.00), 2),
            BagDefinition::new("C Bag", dec!(25), dec!(4.00), 1),
        ])
        .unwrap();

        assert_eq!(
            names(&catalog.sorted_by_weight_descending()),
            vec!["C Bag", "A Bag", "B Bag"]
        );
        assert_eq!(
            names(&catalog.sorted_by_cost_per_kg_ascending()),
            vec!["C Bag", "A Bag", "B Bag"]
        );
        assert_eq!(catalog.smallest_by_weight().unwrap().name, "C Bag");
    }

    #[test]
    fn test_smallest_by_weight() {
        let catalog = BagCatalog::new(default_bags()).unwrap();
        assert_eq!(catalog.smallest_by_weight().unwrap().name, "25kg Standard");
        assert!(BagCatalog::empty().smallest_by_weight().is_none());
    }

    #[test]
    fn test_zero_weight_rejected() {
        let result = BagCatalog::new(vec![BagDefinition::new("Broken", dec!(0), dec!(1), 1)]);
        assert!(matches!(
            result,
            Err(EngineError::InvalidBagDefinition { ref name, .. }) if name == "Broken"
        ));
    }

    #[test]
    fn test_zero_weight_ignored_when_inactive() {
        let catalog =
            BagCatalog::new(vec![BagDefinition::new("Broken", dec!(0), dec!(1), 1).inactive()])
                .unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = BagCatalog::new(vec![BagDefinition::new("Refund", dec!(10), dec!(-1), 1)]);
        assert!(matches!(result, Err(EngineError::InvalidBagDefinition { .. })));
    }

    #[test]
    fn test_duplicate_active_names_rejected() {
        let result = BagCatalog::new(vec![
            BagDefinition::new("25kg Standard", dec!(25), dec!(4.00), 1),
            BagDefinition::new("25kg Standard", dec!(25), dec!(3.50), 2),
        ]);
        assert_eq!(
            result.unwrap_err(),
            EngineError::DuplicateBagName("25kg Standard".to_string())
        );
    }
}
