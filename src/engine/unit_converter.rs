// ==========================================
// 种植土用量计算 - 长度单位换算
// ==========================================
// 换算: value × factor(from) / factor(to)，以米为基准
// 与土方计算数据流无关，独立提供给前端表单
// ==========================================

use crate::domain::types::LengthUnit;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// Trait: UnitConversion
// ==========================================
pub trait UnitConversion: Send + Sync {
    /// 单位换算
    ///
    /// # 参数
    /// - value: 数值
    /// - from_unit / to_unit: 单位名称（meters / feet / inches）
    ///
    /// # 返回
    /// - Err(EngineError::UnsupportedUnit): 单位名称不在支持列表内
    fn convert(&self, value: f64, from_unit: &str, to_unit: &str) -> EngineResult<f64>;

    /// 支持的单位名称
    fn supported_units(&self) -> Vec<&'static str>;
}

#[derive(Debug, Clone, Default)]
pub struct UnitConverter;

impl UnitConverter {
    pub fn new() -> Self {
        Self
    }

    /// 类型化换算（单位已解析）
    pub fn convert_units(&self, value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
        let meters = value * from.meters_factor();
        meters / to.meters_factor()
    }
}

impl UnitConversion for UnitConverter {
    fn convert(&self, value: f64, from_unit: &str, to_unit: &str) -> EngineResult<f64> {
        let from = parse_unit(from_unit)?;
        let to = parse_unit(to_unit)?;
        Ok(self.convert_units(value, from, to))
    }

    fn supported_units(&self) -> Vec<&'static str> {
        LengthUnit::ALL.iter().map(LengthUnit::as_str).collect()
    }
}

fn parse_unit(unit: &str) -> EngineResult<LengthUnit> {
    unit.parse::<LengthUnit>()
        .map_err(|_| EngineError::UnsupportedUnit {
            unit: unit.to_string(),
        })
}
