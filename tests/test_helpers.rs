// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的袋装目录、应用状态、HTTP 请求封装
// ==========================================
#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use soil_calculator::app::AppState;
use soil_calculator::config::AppConfig;
use soil_calculator::domain::BagDefinition;
use soil_calculator::engine::BagCatalog;
use soil_calculator::repository::InMemoryBagSizeRepository;

/// 默认目录: 25kg/£4.00, 600kg/£90.00, 1000kg/£140.00
pub fn default_bags() -> Vec<BagDefinition> {
    vec![
        BagDefinition::new("25kg Standard", dec!(25), dec!(4.00), 1),
        BagDefinition::new("600kg Bulk Bag", dec!(600), dec!(90.00), 2),
        BagDefinition::new("1000kg Tonne Bag", dec!(1000), dec!(140.00), 3),
    ]
}

pub fn default_catalog() -> BagCatalog {
    BagCatalog::new(default_bags()).expect("default catalog is valid")
}

/// 由 (名称, 重量, 价格, 排序) 构建目录
pub fn catalog_of(bags: &[(&str, Decimal, Decimal, i32)]) -> BagCatalog {
    BagCatalog::new(
        bags.iter()
            .map(|(name, weight, price, order)| BagDefinition::new(*name, *weight, *price, *order))
            .collect(),
    )
    .expect("test catalog is valid")
}

/// 默认配置 + 内置种子目录
pub fn test_state() -> AppState {
    state_with_bags(default_bags())
}

/// 默认配置 + 指定目录
pub fn state_with_bags(bags: Vec<BagDefinition>) -> AppState {
    state_with_config(AppConfig::default(), bags)
}

pub fn state_with_config(config: AppConfig, bags: Vec<BagDefinition>) -> AppState {
    let repo = InMemoryBagSizeRepository::new(bags).expect("test catalog names are not blank");
    AppState::with_repository(config, Arc::new(repo))
}

/// 写入带扩展名的临时文件（需要保持存活）
pub fn write_temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// 发送请求并解析 JSON 响应
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn get_json(router: Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("valid request");
    send(router, request).await
}

pub async fn post_json(router: Router, path: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, path, &body.to_string()).await
}

pub async fn post_raw(router: Router, path: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(router, request).await
}

/// JSON 数值字段（serde-float 输出为浮点）
pub fn num(value: &Value) -> f64 {
    value
        .as_f64()
        .unwrap_or_else(|| panic!("expected number, got {}", value))
}
