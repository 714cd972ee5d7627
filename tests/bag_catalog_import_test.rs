// ==========================================
// 袋装目录种子文件导入测试
// ==========================================
// 测试目标: JSON/CSV 种子文件 → 仓储 → 接口
// ==========================================

mod test_helpers;

use std::path::Path;

use rust_decimal_macros::dec;

use soil_calculator::app::AppState;
use soil_calculator::config::AppConfig;
use soil_calculator::domain::OptimizeObjective;
use soil_calculator::importer::{load_bag_catalog, ImportError};
use soil_calculator::repository::RepositoryError;
use test_helpers::{test_state, write_temp_file};

const CSV_CATALOG: &str = "name,weight,price,is_active,sort_order\n\
40kg Sack,40,5.00,true,1\n\
500kg Bulk,500,70.00,true,2\n\
80kg Legacy,80,9.00,false,3\n";

const JSON_CATALOG: &str = r#"[
    {"name": "10kg Mini", "weight": 10, "price": 2.5, "sort_order": 1},
    {"name": "100kg Sack", "weight": 100, "price": 15, "sort_order": 2}
]"#;

#[test]
fn test_load_csv_catalog() {
    let file = write_temp_file(".csv", CSV_CATALOG);
    let bags = load_bag_catalog(file.path()).unwrap();

    assert_eq!(bags.len(), 3);
    assert_eq!(bags[0].name, "40kg Sack");
    assert_eq!(bags[1].unit_weight_kg, dec!(500));
    assert!(!bags[2].is_active);
}

#[test]
fn test_load_json_catalog() {
    let file = write_temp_file(".json", JSON_CATALOG);
    let bags = load_bag_catalog(file.path()).unwrap();

    assert_eq!(bags.len(), 2);
    assert_eq!(bags[0].unit_price, dec!(2.5));
    assert!(bags.iter().all(|b| b.is_active));
}

#[test]
fn test_missing_file() {
    let result = load_bag_catalog(Path::new("/definitely/not/here/bags.csv"));
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

#[test]
fn test_unsupported_extension() {
    let file = write_temp_file(".xlsx", "irrelevant");
    assert!(matches!(
        load_bag_catalog(file.path()),
        Err(ImportError::UnsupportedFormat(ref ext)) if ext == "xlsx"
    ));
}

#[tokio::test]
async fn test_app_state_seeded_from_file() {
    let file = write_temp_file(".csv", CSV_CATALOG);
    let config = AppConfig {
        bag_catalog_path: Some(file.path().to_path_buf()),
        ..AppConfig::default()
    };
    let state = AppState::new(config).unwrap();

    let listed = state.calculator_api.list_bags().await.unwrap();
    let names: Vec<&str> = listed.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["40kg Sack", "500kg Bulk"]);

    // 500 × 1 + 40 × 3 = 620 ≥ 610
    let result = state
        .calculator_api
        .quote(dec!(610), OptimizeObjective::MinimizeWastage)
        .await
        .unwrap();
    assert_eq!(result.count_of("500kg Bulk"), 1);
    assert_eq!(result.count_of("40kg Sack"), 3);
    assert_eq!(result.total_weight_kg, dec!(620));
}

#[test]
fn test_app_state_fails_on_bad_seed() {
    let file = write_temp_file(".csv", "name,weight,price\nBroken,heavy,1\n");
    let config = AppConfig {
        bag_catalog_path: Some(file.path().to_path_buf()),
        ..AppConfig::default()
    };
    let err = AppState::new(config).err().expect("bad seed must be rejected");
    assert!(matches!(
        err.downcast_ref::<ImportError>(),
        Some(ImportError::TypeConversionError { .. })
    ));
}

const BLANK_NAME_CATALOG: &str = r#"[{"name": "  ", "weight": 25, "price": 4}]"#;

#[test]
fn test_app_state_rejects_blank_bag_name() {
    let file = write_temp_file(".json", BLANK_NAME_CATALOG);
    let config = AppConfig {
        bag_catalog_path: Some(file.path().to_path_buf()),
        ..AppConfig::default()
    };

    let err = AppState::new(config).err().expect("blank name must be rejected");
    assert!(matches!(
        err.downcast_ref::<RepositoryError>(),
        Some(RepositoryError::FieldValueError { field, .. }) if field == "name"
    ));
}

#[tokio::test]
async fn test_blank_bag_name_rejected_on_reload_too() {
    let state = test_state();
    let file = write_temp_file(".json", BLANK_NAME_CATALOG);

    // 启动与重新加载对同一文件给出同样结论
    assert!(state.reload_bag_catalog(file.path()).is_err());
    assert_eq!(state.calculator_api.list_bags().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_reload_bag_catalog() {
    let state = test_state();
    let file = write_temp_file(".json", JSON_CATALOG);

    let count = state.reload_bag_catalog(file.path()).unwrap();
    assert_eq!(count, 2);

    let listed = state.calculator_api.list_bags().await.unwrap();
    assert_eq!(listed[0].name, "10kg Mini");
    assert_eq!(listed[1].price_per_kg, dec!(0.15));

    assert!(state.reload_bag_catalog(Path::new("/no/such/file.json")).is_err());
    // 失败时保持原目录
    assert_eq!(state.calculator_api.list_bags().await.unwrap().len(), 2);
}
