// ==========================================
// 种植土用量计算 - 袋装目录种子文件
// ==========================================
// 支持: JSON 数组 (.json) / CSV (.csv)
// CSV 表头: name,weight,price,is_active,sort_order
//   is_active / sort_order 可省略（默认 true / 0）
// ==========================================

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::ReaderBuilder;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::bag::BagDefinition;
use crate::importer::error::{ImportError, ImportResult};

/// 从种子文件加载袋装目录（按扩展名选择解析器）
///
/// # 返回
/// - Err(ImportError::FileNotFound): 文件不存在
/// - Err(ImportError::UnsupportedFormat): 扩展名不是 json/csv
pub fn load_bag_catalog(path: &Path) -> ImportResult<Vec<BagDefinition>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let bags = match ext.as_str() {
        "json" => parse_json(&std::fs::read_to_string(path)?)?,
        "csv" => parse_csv(File::open(path)?)?,
        other => return Err(ImportError::UnsupportedFormat(other.to_string())),
    };

    info!(path = %path.display(), count = bags.len(), "袋装目录种子文件已加载");
    Ok(bags)
}

/// 解析 JSON 数组: [{"name":..,"weight":..,"price":..,"is_active":..,"sort_order":..}]
pub fn parse_json(content: &str) -> ImportResult<Vec<BagDefinition>> {
    Ok(serde_json::from_str(content)?)
}

/// 解析 CSV（首行为表头）
pub fn parse_csv<R: Read>(reader: R) -> ImportResult<Vec<BagDefinition>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许省略末尾可选列
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    let mut bags = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = idx + 1;

        let mut row_map = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.as_str(), value.trim());
            }
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }

        bags.push(map_row(row, &row_map)?);
    }

    Ok(bags)
}

fn map_row(row: usize, fields: &HashMap<&str, &str>) -> ImportResult<BagDefinition> {
    let name = required(row, fields, "name")?.to_string();
    let unit_weight_kg = parse_decimal(row, "weight", required(row, fields, "weight")?)?;
    let unit_price = parse_decimal(row, "price", required(row, fields, "price")?)?;

    let is_active = match optional(fields, "is_active") {
        Some(raw) => parse_bool(row, raw)?,
        None => true,
    };
    let sort_order = match optional(fields, "sort_order") {
        Some(raw) => raw.parse::<i32>().map_err(|e| ImportError::TypeConversionError {
            row,
            field: "sort_order".to_string(),
            message: e.to_string(),
        })?,
        None => 0,
    };

    Ok(BagDefinition {
        name,
        unit_weight_kg,
        unit_price,
        is_active,
        sort_order,
    })
}

fn required<'a>(row: usize, fields: &HashMap<&str, &'a str>, field: &str) -> ImportResult<&'a str> {
    optional(fields, field).ok_or_else(|| ImportError::MissingField {
        row,
        field: field.to_string(),
    })
}

fn optional<'a>(fields: &HashMap<&str, &'a str>, field: &str) -> Option<&'a str> {
    fields.get(field).copied().filter(|v| !v.is_empty())
}

fn parse_decimal(row: usize, field: &str, raw: &str) -> ImportResult<Decimal> {
    Decimal::from_str(raw).map_err(|e| ImportError::TypeConversionError {
        row,
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_bool(row: usize, raw: &str) -> ImportResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" => Ok(false),
        _ => Err(ImportError::TypeConversionError {
            row,
            field: "is_active".to_string(),
            message: format!("无法识别的布尔值: {}", raw),
        }),
    }
}
