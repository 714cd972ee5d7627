// ==========================================
// 种植土用量计算 - 领域类型定义
// ==========================================
// 职责: 优化目标、长度单位等枚举型输入
// 红线: 字符串形式与 HTTP 接口保持一致（小写）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 优化目标 (Optimize Objective)
// ==========================================
// wastage: 按单袋重量降序（大袋优先）
// cost: 按每公斤单价升序（性价比优先）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OptimizeObjective {
    #[default]
    #[serde(rename = "wastage")]
    MinimizeWastage,
    #[serde(rename = "cost")]
    MinimizeCost,
}

impl OptimizeObjective {
    /// 接口层使用的字符串值
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizeObjective::MinimizeWastage => "wastage",
            OptimizeObjective::MinimizeCost => "cost",
        }
    }
}

impl fmt::Display for OptimizeObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OptimizeObjective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "wastage" => Ok(OptimizeObjective::MinimizeWastage),
            "cost" => Ok(OptimizeObjective::MinimizeCost),
            other => Err(format!("unknown objective: {}", other)),
        }
    }
}

// ==========================================
// 长度单位 (Length Unit)
// ==========================================
// 换算基准: 米
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Meters, // 米
    Feet,   // 英尺
    Inches, // 英寸
}

impl LengthUnit {
    /// 全部支持的单位（按接口展示顺序）
    pub const ALL: [LengthUnit; 3] = [LengthUnit::Meters, LengthUnit::Feet, LengthUnit::Inches];

    /// 换算为米的系数
    pub fn meters_factor(&self) -> f64 {
        match self {
            LengthUnit::Meters => 1.0,
            LengthUnit::Feet => 0.3048,
            LengthUnit::Inches => 0.0254,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Meters => "meters",
            LengthUnit::Feet => "feet",
            LengthUnit::Inches => "inches",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "meters" => Ok(LengthUnit::Meters),
            "feet" => Ok(LengthUnit::Feet),
            "inches" => Ok(LengthUnit::Inches),
            other => Err(format!("unsupported unit: {}", other)),
        }
    }
}
