// ==========================================
// 种植土用量计算 - 土方计算引擎
// ==========================================
// 职责: 体积、密度查表、需求重量换算
// 输入: 长/宽/深 (m) + 土壤类型
// 输出: 需求重量 (kg)，作为袋装组合优化的输入
// ==========================================

use indexmap::IndexMap;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::soil_config::{SoilConfig, LITERS_PER_CUBIC_METER, TONNES_TO_KG};
use crate::domain::bag::round_half_up;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// Trait: SoilCalculation
// ==========================================
pub trait SoilCalculation: Send + Sync {
    /// 体积 (m³) = 长 × 宽 × 深
    ///
    /// # 返回
    /// - Err(EngineError::NumericOverflow): 乘积超出十进制表示范围
    fn volume(&self, length: Decimal, width: Decimal, depth: Decimal) -> EngineResult<Decimal>;

    /// 土壤密度 (吨/m³)
    fn density(&self, soil_type: &str) -> EngineResult<Decimal>;

    /// 需求重量 (kg) = 体积 × 密度 × 1000
    fn required_mass(&self, volume: Decimal, soil_type: &str) -> EngineResult<Decimal>;

    /// 体积换算为升（四舍五入取整）
    fn liters_from_volume(&self, volume: Decimal) -> EngineResult<i64>;

    /// 土壤类型 → 展示标签，例如 "Intensive (1.3 tonnes/m³)"，按配置顺序
    fn soil_type_labels(&self) -> IndexMap<String, String>;
}

// ==========================================
// SoilCalculator - 基于配置密度表的实现
// ==========================================
#[derive(Debug, Clone)]
pub struct SoilCalculator {
    densities: IndexMap<String, Decimal>,
}

impl SoilCalculator {
    pub fn new(config: &SoilConfig) -> Self {
        Self {
            densities: config.densities.clone(),
        }
    }
}

impl SoilCalculation for SoilCalculator {
    fn volume(&self, length: Decimal, width: Decimal, depth: Decimal) -> EngineResult<Decimal> {
        length
            .checked_mul(width)
            .and_then(|area| area.checked_mul(depth))
            .ok_or_else(|| {
                EngineError::NumericOverflow(format!("{} × {} × {} m", length, width, depth))
            })
    }

    fn density(&self, soil_type: &str) -> EngineResult<Decimal> {
        self.densities
            .get(soil_type)
            .copied()
            .ok_or_else(|| EngineError::UnknownSoilType {
                soil_type: soil_type.to_string(),
            })
    }

    fn required_mass(&self, volume: Decimal, soil_type: &str) -> EngineResult<Decimal> {
        let density = self.density(soil_type)?;
        volume
            .checked_mul(density)
            .and_then(|t| t.checked_mul(TONNES_TO_KG))
            .ok_or_else(|| EngineError::NumericOverflow(format!("{} m³ × {}", volume, density)))
    }

    fn liters_from_volume(&self, volume: Decimal) -> EngineResult<i64> {
        volume
            .checked_mul(LITERS_PER_CUBIC_METER)
            .and_then(|liters| round_half_up(liters, 0).to_i64())
            .ok_or_else(|| EngineError::NumericOverflow(format!("{} m³ → L", volume)))
    }

    fn soil_type_labels(&self) -> IndexMap<String, String> {
        self.densities
            .iter()
            .map(|(key, density)| {
                (
                    key.clone(),
                    format!("{} ({} tonnes/m³)", capitalize(key), density.normalize()),
                )
            })
            .collect()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
