// ==========================================
// 种植土用量计算 - 接口数据结构
// ==========================================
// 字段名与前端表单约定一致（snake_case）
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::error::FieldErrors;
use crate::domain::bag::{round_half_up, BagCountEntry, BagDefinition, CombinationResult};
use crate::domain::types::LengthUnit;

// ==========================================
// 袋装组合
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagLineDto {
    pub count: u64,
    pub weight: Decimal,
    pub price: Decimal,
    pub name: String,
}

impl From<&BagCountEntry> for BagLineDto {
    fn from(entry: &BagCountEntry) -> Self {
        Self {
            count: entry.count,
            weight: entry.bag.unit_weight_kg,
            price: entry.bag.unit_price,
            name: entry.bag.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagCombinationDto {
    pub bags: Vec<BagLineDto>,
    pub total_weight: Decimal,
    pub total_cost: Decimal,
    pub wastage_percentage: Decimal,
    pub wastage_kg: Decimal,
}

impl From<&CombinationResult> for BagCombinationDto {
    fn from(result: &CombinationResult) -> Self {
        Self {
            bags: result.entries.iter().map(BagLineDto::from).collect(),
            total_weight: result.total_weight_kg,
            total_cost: result.total_cost,
            wastage_percentage: result.wastage_percent,
            wastage_kg: result.wastage_kg,
        }
    }
}

// ==========================================
// POST /calculate
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateData {
    pub cubic_meters: Decimal,     // 2 位小数
    pub liters: i64,               // 取整
    pub soil_required_kg: Decimal, // 2 位小数
    pub bag_combination: BagCombinationDto,
    pub total_cost: Decimal,
    pub wastage_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub success: bool,
    pub data: CalculateData,
}

// ==========================================
// POST /convert-units
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub result: f64, // 4 位小数
    pub from_unit: LengthUnit,
    pub to_unit: LengthUnit,
}

// ==========================================
// GET /bags
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagSizeDto {
    pub name: String,
    pub weight: Decimal,
    pub price: Decimal,
    pub price_per_kg: Decimal, // 4 位小数
    pub sort_order: i32,
}

impl From<&BagDefinition> for BagSizeDto {
    fn from(bag: &BagDefinition) -> Self {
        Self {
            name: bag.name.clone(),
            weight: bag.unit_weight_kg,
            price: bag.unit_price,
            price_per_kg: round_half_up(bag.cost_per_kg(), 4),
            sort_order: bag.sort_order,
        }
    }
}

// ==========================================
// 通用
// ==========================================

/// 失败响应: 422 带 errors，500 只带 message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub errors: Option<FieldErrors>,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(errors: Option<FieldErrors>, message: String) -> Self {
        Self {
            success: false,
            errors,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
