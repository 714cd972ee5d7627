// ==========================================
// 种植土用量计算 - 袋装组合优化引擎
// ==========================================
// 职责: 给定需求量与优化目标，选出覆盖需求的袋数组合
// 输入: 袋装目录快照 + 需求量 (kg) + 优化目标
// 输出: CombinationResult（总重量 >= 需求量）
// 红线: 不允许欠装；同一快照、同一请求结果必须完全一致
// ==========================================
// 算法: 贪心面额覆盖 + 余量补袋
// 1) 按目标选择排序（重量降序 / 每公斤单价升序）
// 2) 依次取 floor(remaining / weight) 整袋（不超装）
// 3) 仍有余量时补 1 袋排序末位规格
// 说明: 成本目标下为启发式，不保证总价最低
// ==========================================

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::domain::bag::{BagCountEntry, BagDefinition, CombinationResult};
use crate::domain::types::OptimizeObjective;
use crate::engine::bag_catalog::BagCatalog;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// Trait: BagOptimization
// ==========================================
// 实现者: GreedyBagOptimizer
pub trait BagOptimization: Send + Sync {
    /// 计算袋装组合
    ///
    /// # 参数
    /// - catalog: 袋装目录快照
    /// - required_kg: 需求量 (kg)，必须 > 0
    /// - objective: 优化目标
    ///
    /// # 返回
    /// - Ok(CombinationResult): 覆盖需求量的组合
    /// - Err(EngineError::EmptyCatalog): 没有活跃规格
    /// - Err(EngineError::InvalidRequiredMass): 需求量 <= 0
    fn find_combination(
        &self,
        catalog: &BagCatalog,
        required_kg: Decimal,
        objective: OptimizeObjective,
    ) -> EngineResult<CombinationResult>;

    /// 兜底组合：只使用最小规格，袋数 = ceil(required / weight)
    fn fallback_combination(
        &self,
        catalog: &BagCatalog,
        required_kg: Decimal,
    ) -> EngineResult<CombinationResult>;
}

// ==========================================
// GreedyBagOptimizer - 贪心组合优化器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct GreedyBagOptimizer {
    // 无状态引擎，不需要注入依赖
}

impl GreedyBagOptimizer {
    pub fn new() -> Self {
        Self {}
    }
}

impl BagOptimization for GreedyBagOptimizer {
    #[instrument(skip(self, catalog), fields(
        required_kg = %required_kg,
        objective = %objective,
        bag_count = catalog.len()
    ))]
    fn find_combination(
        &self,
        catalog: &BagCatalog,
        required_kg: Decimal,
        objective: OptimizeObjective,
    ) -> EngineResult<CombinationResult> {
        ensure_positive(required_kg)?;
        if catalog.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }

        let ordered = catalog.sorted_for(objective);

        // 累计袋数，保持首次选中顺序
        let mut counts: Vec<(&BagDefinition, u64)> = Vec::new();
        let mut remaining = required_kg;

        // 1. 整袋贪心（只取不超过余量的整袋）
        for bag in ordered.iter().copied() {
            if remaining <= Decimal::ZERO {
                break;
            }

            let n = whole_bags(remaining, bag)?;
            if n > 0 {
                add_count(&mut counts, bag, n);
                remaining -= Decimal::from(n) * bag.unit_weight_kg;
                debug!(bag = %bag.name, count = n, remaining = %remaining, "整袋选取");
            }
        }

        // 2. 余量补袋：排序末位规格 +1
        if remaining > Decimal::ZERO {
            if let Some(last) = ordered.last().copied() {
                add_count(&mut counts, last, 1);
                debug!(bag = %last.name, remaining = %remaining, "余量补袋");
            }
        }

        let entries = counts
            .into_iter()
            .map(|(bag, count)| BagCountEntry {
                bag: bag.clone(),
                count,
            })
            .collect();

        let result = CombinationResult::assemble(entries, required_kg);
        debug!(
            total_weight_kg = %result.total_weight_kg,
            total_cost = %result.total_cost,
            wastage_percent = %result.wastage_percent,
            "组合计算完成"
        );
        Ok(result)
    }

    #[instrument(skip(self, catalog), fields(required_kg = %required_kg, bag_count = catalog.len()))]
    fn fallback_combination(
        &self,
        catalog: &BagCatalog,
        required_kg: Decimal,
    ) -> EngineResult<CombinationResult> {
        ensure_positive(required_kg)?;
        let smallest = catalog.smallest_by_weight().ok_or(EngineError::EmptyCatalog)?;

        let count = (required_kg / smallest.unit_weight_kg)
            .ceil()
            .to_u64()
            .ok_or_else(|| overflow(required_kg, smallest))?;

        Ok(CombinationResult::assemble(
            vec![BagCountEntry {
                bag: smallest.clone(),
                count,
            }],
            required_kg,
        ))
    }
}

fn ensure_positive(required_kg: Decimal) -> EngineResult<()> {
    if required_kg <= Decimal::ZERO {
        return Err(EngineError::InvalidRequiredMass(required_kg.to_string()));
    }
    Ok(())
}

fn whole_bags(remaining: Decimal, bag: &BagDefinition) -> EngineResult<u64> {
    (remaining / bag.unit_weight_kg)
        .floor()
        .to_u64()
        .ok_or_else(|| overflow(remaining, bag))
}

fn overflow(amount: Decimal, bag: &BagDefinition) -> EngineError {
    EngineError::NumericOverflow(format!("{} kg / {} ({} kg)", amount, bag.name, bag.unit_weight_kg))
}

fn add_count<'a>(counts: &mut Vec<(&'a BagDefinition, u64)>, bag: &'a BagDefinition, n: u64) {
    match counts.iter_mut().find(|(b, _)| b.name == bag.name) {
        Some((_, count)) => *count += n,
        None => counts.push((bag, n)),
    }
}
