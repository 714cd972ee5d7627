// ==========================================
// 种植土用量计算 - 请求校验器
// ==========================================
// 职责: 原始 JSON 请求体 → 类型化输入；失败时给出字段错误表
// 规则: required → numeric → min/max，每个字段最多一条消息
// 红线: 校验失败不进入引擎
// ==========================================

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::api::error::{ApiError, ApiResult, FieldErrors};
use crate::config::soil_config::{SoilConfig, ValidationLimits};
use crate::domain::bag::round_half_up;
use crate::domain::types::{LengthUnit, OptimizeObjective};
use crate::i18n::{self, t, t_with_args};

// ==========================================
// 校验后的输入
// ==========================================

/// 土方计算输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculateInput {
    pub length: Decimal,
    pub width: Decimal,
    pub depth: Decimal,
    pub soil_type: String,
    pub objective: OptimizeObjective,
}

/// 单位换算输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertInput {
    pub value: f64,
    pub from_unit: LengthUnit,
    pub to_unit: LengthUnit,
}

// ==========================================
// RequestValidator
// ==========================================
#[derive(Debug, Clone)]
pub struct RequestValidator {
    limits: ValidationLimits,
    soil_types: Vec<String>,
}

/// 尺寸上限的展示方式
#[derive(Clone, Copy)]
enum MaxStyle {
    Grouped, // 10,000
    Plain,   // 100
}

impl RequestValidator {
    pub fn new(config: &SoilConfig) -> Self {
        Self {
            limits: config.limits.clone(),
            soil_types: config.densities.keys().cloned().collect(),
        }
    }

    /// 校验土方计算请求
    ///
    /// # 返回
    /// - Err(ApiError::Validation): 全部字段的错误汇总
    pub fn validate_calculate(&self, body: &Value) -> ApiResult<CalculateInput> {
        let fields = as_object(body)?;
        let mut errors = FieldErrors::new();
        let limits = &self.limits;

        let length = self.dimension(
            fields,
            "length",
            limits.max_length_width,
            MaxStyle::Grouped,
            &mut errors,
        );
        let width = self.dimension(
            fields,
            "width",
            limits.max_length_width,
            MaxStyle::Grouped,
            &mut errors,
        );
        let depth = self.dimension(fields, "depth", limits.max_depth, MaxStyle::Plain, &mut errors);
        let soil_type = self.soil_type(fields, &mut errors);
        let objective = optimize_by(fields, &mut errors);

        match (length, width, depth, soil_type, objective) {
            (Some(length), Some(width), Some(depth), Some(soil_type), Some(objective))
                if errors.is_empty() =>
            {
                Ok(CalculateInput {
                    length,
                    width,
                    depth,
                    soil_type,
                    objective,
                })
            }
            _ => Err(ApiError::Validation { errors }),
        }
    }

    /// 校验单位换算请求
    pub fn validate_convert(&self, body: &Value) -> ApiResult<ConvertInput> {
        let fields = as_object(body)?;
        let mut errors = FieldErrors::new();

        let value = convert_value(fields, &mut errors);
        let from_unit = unit(fields, "from_unit", &mut errors);
        let to_unit = unit(fields, "to_unit", &mut errors);

        match (value, from_unit, to_unit) {
            (Some(value), Some(from_unit), Some(to_unit)) if errors.is_empty() => Ok(ConvertInput {
                value,
                from_unit,
                to_unit,
            }),
            _ => Err(ApiError::Validation { errors }),
        }
    }

    fn dimension(
        &self,
        fields: &Map<String, Value>,
        field: &str,
        max: Decimal,
        max_style: MaxStyle,
        errors: &mut FieldErrors,
    ) -> Option<Decimal> {
        let attribute = i18n::attribute(field);
        let raw = match present(fields, field) {
            Some(raw) => raw,
            None => {
                push(errors, field, t_with_args("validation.required", &[("attribute", &attribute)]));
                return None;
            }
        };

        let min = self.limits.min_dimension;
        let value = match parse_decimal(raw) {
            Some(value) => value,
            None => {
                // 超出十进制范围的数字仍按上下限报错
                let message = match parse_f64(raw) {
                    Some(v) if max.to_f64().is_some_and(|m| v > m) => {
                        max_message(&attribute, max, max_style)
                    }
                    Some(v) if min.to_f64().is_some_and(|m| v < m) => min_message(&attribute, min),
                    _ => t_with_args("validation.numeric", &[("attribute", &attribute)]),
                };
                push(errors, field, message);
                return None;
            }
        };

        if value < min {
            push(errors, field, min_message(&attribute, min));
            return None;
        }
        if value > max {
            push(errors, field, max_message(&attribute, max, max_style));
            return None;
        }
        Some(value)
    }

    fn soil_type(&self, fields: &Map<String, Value>, errors: &mut FieldErrors) -> Option<String> {
        let raw = match present(fields, "soil_type") {
            Some(raw) => raw,
            None => {
                let attribute = i18n::attribute("soil_type");
                push(errors, "soil_type", t_with_args("validation.required", &[("attribute", &attribute)]));
                return None;
            }
        };

        match raw.as_str() {
            Some(s) if self.soil_types.iter().any(|known| known == s) => Some(s.to_string()),
            _ => {
                push(errors, "soil_type", t("validation.soil_type_invalid"));
                None
            }
        }
    }
}

fn optimize_by(fields: &Map<String, Value>, errors: &mut FieldErrors) -> Option<OptimizeObjective> {
    // 可选字段: 缺省为 wastage
    let raw = match fields.get("optimize_by") {
        None | Some(Value::Null) => return Some(OptimizeObjective::default()),
        Some(raw) => raw,
    };

    match raw.as_str().map(OptimizeObjective::from_str) {
        Some(Ok(objective)) => Some(objective),
        _ => {
            push(errors, "optimize_by", t("validation.optimize_by_invalid"));
            None
        }
    }
}

fn convert_value(fields: &Map<String, Value>, errors: &mut FieldErrors) -> Option<f64> {
    let attribute = i18n::attribute("value");
    let raw = match present(fields, "value") {
        Some(raw) => raw,
        None => {
            push(errors, "value", t_with_args("validation.required", &[("attribute", &attribute)]));
            return None;
        }
    };

    let value = match parse_f64(raw) {
        Some(value) => value,
        None => {
            push(errors, "value", t_with_args("validation.numeric", &[("attribute", &attribute)]));
            return None;
        }
    };

    if value < 0.0 {
        push(
            errors,
            "value",
            t_with_args("validation.min_value", &[("attribute", &attribute), ("min", "0")]),
        );
        return None;
    }
    Some(value)
}

fn unit(fields: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<LengthUnit> {
    let raw = match present(fields, field) {
        Some(raw) => raw,
        None => {
            let attribute = i18n::attribute(field);
            push(errors, field, t_with_args("validation.required", &[("attribute", &attribute)]));
            return None;
        }
    };

    match raw.as_str().map(LengthUnit::from_str) {
        Some(Ok(unit)) => Some(unit),
        _ => {
            push(errors, field, t("validation.unit_invalid"));
            None
        }
    }
}

fn as_object(body: &Value) -> ApiResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| ApiError::field("body", t("validation.malformed_body")))
}

/// 缺失、null、空白字符串均视为未填写
fn present<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(value) => Some(value),
    }
}

fn min_message(attribute: &str, min: Decimal) -> String {
    let min_text = min.normalize().to_string();
    t_with_args("validation.min_meters", &[("attribute", attribute), ("min", &min_text)])
}

fn max_message(attribute: &str, max: Decimal, style: MaxStyle) -> String {
    let max_text = match style {
        MaxStyle::Grouped => format_thousands(max),
        MaxStyle::Plain => max.normalize().to_string(),
    };
    t_with_args("validation.max_meters", &[("attribute", attribute), ("max", &max_text)])
}

fn push(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}

/// 数字或数字字符串 → Decimal
fn parse_decimal(raw: &Value) -> Option<Decimal> {
    let text = match raw {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn parse_f64(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// 千分位整数格式，例如 10000 → "10,000"
pub fn format_thousands(value: Decimal) -> String {
    let rounded = round_half_up(value, 0);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{set_locale, tests::LOCALE_TEST_LOCK};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn validator() -> RequestValidator {
        RequestValidator::new(&SoilConfig::default())
    }

    fn errors_of(result: ApiResult<CalculateInput>) -> FieldErrors {
        match result {
            Err(ApiError::Validation { errors }) => errors,
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_calculate_request() {
        let input = validator()
            .validate_calculate(&json!({
                "length": 2, "width": "1.5", "depth": 0.25, "soil_type": "intensive"
            }))
            .unwrap();
        assert_eq!(input.length, dec!(2));
        assert_eq!(input.width, dec!(1.5));
        assert_eq!(input.depth, dec!(0.25));
        assert_eq!(input.objective, OptimizeObjective::MinimizeWastage);
    }

    #[test]
    fn test_all_fields_missing() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let errors = errors_of(validator().validate_calculate(&json!({})));

        assert_eq!(errors["length"], vec!["Length is required"]);
        assert_eq!(errors["width"], vec!["Width is required"]);
        assert_eq!(errors["depth"], vec!["Depth is required"]);
        assert_eq!(errors["soil_type"], vec!["Soil type is required"]);
        assert!(!errors.contains_key("optimize_by"));
    }

    #[test]
    fn test_range_messages() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let errors = errors_of(validator().validate_calculate(&json!({
            "length": "abc",
            "width": 20000,
            "depth": 150,
            "soil_type": "clay",
            "optimize_by": "speed"
        })));

        assert_eq!(errors["length"], vec!["Length must be a number"]);
        assert_eq!(errors["width"], vec!["Width cannot exceed 10,000 meters"]);
        assert_eq!(errors["depth"], vec!["Depth cannot exceed 100 meters"]);
        assert_eq!(errors["soil_type"], vec!["Please select a valid soil type"]);
        assert_eq!(errors.get("optimize_by").map(Vec::len), Some(1));
    }

    #[test]
    fn test_below_min_dimension() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let errors = errors_of(validator().validate_calculate(&json!({
            "length": 0.001, "width": 1, "depth": 0, "soil_type": "extensive"
        })));
        assert_eq!(errors["length"], vec!["Length must be at least 0.01 meters"]);
        assert_eq!(errors["depth"], vec!["Depth must be at least 0.01 meters"]);
        assert!(!errors.contains_key("width"));
    }

    #[test]
    fn test_numbers_beyond_decimal_range_report_limits() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let errors = errors_of(validator().validate_calculate(&json!({
            "length": 1e40, "width": "-1e40", "depth": "1e300", "soil_type": "intensive"
        })));
        assert_eq!(errors["length"], vec!["Length cannot exceed 10,000 meters"]);
        assert_eq!(errors["width"], vec!["Width must be at least 0.01 meters"]);
        assert_eq!(errors["depth"], vec!["Depth cannot exceed 100 meters"]);
    }

    #[test]
    fn test_limits_are_inclusive() {
        let input = validator()
            .validate_calculate(&json!({
                "length": 10000, "width": 0.01, "depth": 100, "soil_type": "extensive",
                "optimize_by": "cost"
            }))
            .unwrap();
        assert_eq!(input.objective, OptimizeObjective::MinimizeCost);
    }

    #[test]
    fn test_non_object_body() {
        let errors = errors_of(validator().validate_calculate(&json!([1, 2, 3])));
        assert!(errors.contains_key("body"));
    }

    #[test]
    fn test_convert_request() {
        let v = validator();
        let input = v
            .validate_convert(&json!({"value": "12.5", "from_unit": "feet", "to_unit": "meters"}))
            .unwrap();
        assert_eq!(input.value, 12.5);
        assert_eq!(input.from_unit, LengthUnit::Feet);

        match v.validate_convert(&json!({"value": -1, "from_unit": "yards"})) {
            Err(ApiError::Validation { errors }) => {
                assert!(errors.contains_key("value"));
                assert!(errors.contains_key("from_unit"));
                assert!(errors.contains_key("to_unit"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(dec!(10000)), "10,000");
        assert_eq!(format_thousands(dec!(100)), "100");
        assert_eq!(format_thousands(dec!(1234567.5)), "1,234,568");
        assert_eq!(format_thousands(dec!(0)), "0");
    }
}
