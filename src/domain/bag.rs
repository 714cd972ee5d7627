// ==========================================
// 种植土用量计算 - 袋装规格领域模型
// ==========================================
// 职责: 袋装规格定义、袋数条目、组合结果
// 红线: 组合结果总重量必须覆盖需求量（不允许欠装）
// ==========================================

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

// ==========================================
// BagDefinition - 袋装规格
// ==========================================
// 字段名与袋装目录种子文件一致（weight/price 单位: kg/£）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagDefinition {
    pub name: String, // 规格名称（活跃目录内唯一）

    #[serde(rename = "weight")]
    pub unit_weight_kg: Decimal, // 单袋重量 (kg)，必须 > 0

    #[serde(rename = "price")]
    pub unit_price: Decimal, // 单袋价格，>= 0

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    pub sort_order: i32, // 展示顺序，同时作为排序平局的第一裁决键
}

fn default_active() -> bool {
    true
}

impl BagDefinition {
    pub fn new(name: impl Into<String>, unit_weight_kg: Decimal, unit_price: Decimal, sort_order: i32) -> Self {
        Self {
            name: name.into(),
            unit_weight_kg,
            unit_price,
            is_active: true,
            sort_order,
        }
    }

    /// 停用副本（目录管理用）
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// 每公斤单价
    ///
    /// 调用方需保证 unit_weight_kg > 0（BagCatalog 构建时已校验）
    pub fn cost_per_kg(&self) -> Decimal {
        self.unit_price / self.unit_weight_kg
    }
}

// ==========================================
// BagCountEntry - 袋数条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagCountEntry {
    pub bag: BagDefinition,
    pub count: u64, // 正整数
}

impl BagCountEntry {
    pub fn subtotal_weight_kg(&self) -> Decimal {
        Decimal::from(self.count) * self.bag.unit_weight_kg
    }

    pub fn subtotal_cost(&self) -> Decimal {
        Decimal::from(self.count) * self.bag.unit_price
    }
}

// ==========================================
// CombinationResult - 袋装组合结果
// ==========================================
// 每次请求重新计算，不可变，不落库
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationResult {
    pub entries: Vec<BagCountEntry>, // 按首次选中顺序
    pub total_weight_kg: Decimal,
    pub total_cost: Decimal,
    pub wastage_percent: Decimal, // 1 位小数
    pub wastage_kg: Decimal,      // 2 位小数
}

impl CombinationResult {
    /// 由袋数条目汇总组合结果
    ///
    /// # 参数
    /// - entries: 袋数条目（保持传入顺序）
    /// - required_kg: 需求量 (kg)，必须 > 0
    ///
    /// # 返回
    /// 汇总后的组合结果：
    /// - wastage_kg = round(total_weight - required, 2)
    /// - wastage_percent = round((total_weight - required) / required × 100, 1)
    pub fn assemble(entries: Vec<BagCountEntry>, required_kg: Decimal) -> Self {
        let total_weight_kg: Decimal = entries.iter().map(BagCountEntry::subtotal_weight_kg).sum();
        let total_cost: Decimal = entries.iter().map(BagCountEntry::subtotal_cost).sum();

        let excess = total_weight_kg - required_kg;
        let wastage_percent = if required_kg.is_zero() {
            Decimal::ZERO
        } else {
            round_half_up(excess / required_kg * Decimal::ONE_HUNDRED, 1)
        };

        Self {
            entries,
            total_weight_kg,
            total_cost,
            wastage_percent,
            wastage_kg: round_half_up(excess, 2),
        }
    }

    /// 某规格的袋数（未使用则为 0）
    pub fn count_of(&self, bag_name: &str) -> u64 {
        self.entries
            .iter()
            .find(|e| e.bag.name == bag_name)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// 总袋数
    pub fn total_bags(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// 四舍五入（远离零方向），与接口层展示口径一致
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
