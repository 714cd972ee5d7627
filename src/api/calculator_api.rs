// ==========================================
// 种植土用量计算 - 计算 API
// ==========================================
// 职责: 校验输入 → 土方计算 → 袋装组合优化 → 组装响应
// 红线: 每次请求只读取一次目录快照，引擎计算期间不再访问仓储
// ==========================================

use std::sync::Arc;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{info, instrument};

use crate::api::dto::{BagCombinationDto, BagSizeDto, CalculateData, ConvertResponse};
use crate::api::error::ApiResult;
use crate::api::validator::{CalculateInput, RequestValidator};
use crate::domain::bag::{round_half_up, CombinationResult};
use crate::domain::types::OptimizeObjective;
use crate::engine::bag_catalog::BagCatalog;
use crate::engine::bag_optimizer::BagOptimization;
use crate::engine::soil_calculator::SoilCalculation;
use crate::engine::unit_converter::UnitConversion;
use crate::repository::bag_size_repo::BagSizeRepository;

// ==========================================
// CalculatorApi - 计算 API
// ==========================================

/// 计算API
///
/// 职责：
/// 1. 土方计算 + 袋装组合（POST /calculate）
/// 2. 土壤类型标签、袋装规格、支持单位查询
/// 3. 长度单位换算（POST /convert-units）
/// 4. 兜底报价（只用最小规格）
pub struct CalculatorApi {
    bag_repo: Arc<dyn BagSizeRepository>,
    soil_calculator: Arc<dyn SoilCalculation>,
    optimizer: Arc<dyn BagOptimization>,
    unit_converter: Arc<dyn UnitConversion>,
    validator: RequestValidator,
}

impl CalculatorApi {
    /// 创建新的CalculatorApi实例
    pub fn new(
        bag_repo: Arc<dyn BagSizeRepository>,
        soil_calculator: Arc<dyn SoilCalculation>,
        optimizer: Arc<dyn BagOptimization>,
        unit_converter: Arc<dyn UnitConversion>,
        validator: RequestValidator,
    ) -> Self {
        Self {
            bag_repo,
            soil_calculator,
            optimizer,
            unit_converter,
            validator,
        }
    }

    /// 土方计算 + 袋装组合（原始请求体）
    ///
    /// # 返回
    /// - Err(ApiError::Validation): 输入校验失败
    /// - Err(ApiError::EmptyCatalog): 没有活跃袋装规格
    pub async fn calculate(&self, body: &Value) -> ApiResult<CalculateData> {
        let input = self.validator.validate_calculate(body)?;
        self.calculate_validated(&input).await
    }

    /// 土方计算 + 袋装组合（已校验输入）
    #[instrument(skip(self, input), fields(soil_type = %input.soil_type, objective = %input.objective))]
    pub async fn calculate_validated(&self, input: &CalculateInput) -> ApiResult<CalculateData> {
        let volume = self
            .soil_calculator
            .volume(input.length, input.width, input.depth)?;
        let required_kg = self.soil_calculator.required_mass(volume, &input.soil_type)?;
        let liters = self.soil_calculator.liters_from_volume(volume)?;

        let combination = self.quote(required_kg, input.objective).await?;

        info!(
            volume = %volume,
            required_kg = %required_kg,
            total_cost = %combination.total_cost,
            wastage_percent = %combination.wastage_percent,
            "土方计算完成"
        );

        Ok(CalculateData {
            cubic_meters: round_half_up(volume, 2),
            liters,
            soil_required_kg: round_half_up(required_kg, 2),
            total_cost: combination.total_cost,
            wastage_percentage: combination.wastage_percent,
            bag_combination: BagCombinationDto::from(&combination),
        })
    }

    /// 按优化目标计算袋装组合
    pub async fn quote(
        &self,
        required_kg: Decimal,
        objective: OptimizeObjective,
    ) -> ApiResult<CombinationResult> {
        let catalog = self.load_catalog().await?;
        Ok(self.optimizer.find_combination(&catalog, required_kg, objective)?)
    }

    /// 兜底报价: 只使用最小规格
    pub async fn quote_fallback(&self, required_kg: Decimal) -> ApiResult<CombinationResult> {
        let catalog = self.load_catalog().await?;
        Ok(self.optimizer.fallback_combination(&catalog, required_kg)?)
    }

    /// 土壤类型 → 展示标签
    pub fn soil_types(&self) -> IndexMap<String, String> {
        self.soil_calculator.soil_type_labels()
    }

    /// 长度单位换算（结果保留 4 位小数）
    pub fn convert_units(&self, body: &Value) -> ApiResult<ConvertResponse> {
        let input = self.validator.validate_convert(body)?;
        let result = self.unit_converter.convert(
            input.value,
            input.from_unit.as_str(),
            input.to_unit.as_str(),
        )?;

        Ok(ConvertResponse {
            success: true,
            result: round_f64(result, 4),
            from_unit: input.from_unit,
            to_unit: input.to_unit,
        })
    }

    /// 活跃袋装规格（展示顺序）
    pub async fn list_bags(&self) -> ApiResult<Vec<BagSizeDto>> {
        let catalog = self.load_catalog().await?;
        Ok(catalog.active_bags().iter().map(BagSizeDto::from).collect())
    }

    pub fn supported_units(&self) -> Vec<&'static str> {
        self.unit_converter.supported_units()
    }

    async fn load_catalog(&self) -> ApiResult<BagCatalog> {
        let bags = self.bag_repo.find_active().await?;
        Ok(BagCatalog::new(bags)?)
    }
}

fn round_f64(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}
