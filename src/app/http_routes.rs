// ==========================================
// 种植土用量计算 - HTTP 路由
// ==========================================
// GET  /              静态表单页
// GET  /health        健康检查
// GET  /soil-types    土壤类型标签
// GET  /bags          活跃袋装规格
// GET  /units         支持的长度单位
// POST /calculate     土方计算 + 袋装组合
// POST /convert-units 长度单位换算
// ==========================================
// 状态码: 输入错误 422（带 errors），其余失败 500（只带 message）
// ==========================================

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::dto::{CalculateResponse, ErrorResponse, HealthResponse};
use crate::api::error::{ApiError, FieldErrors};
use crate::app::state::AppState;
use crate::i18n::t;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

const REQUEST_ID_HEADER: &str = "x-request-id";

/// 请求所属操作（决定失败时的提示文案）
#[derive(Debug, Clone, Copy)]
enum Operation {
    Calculate,
    Convert,
}

impl Operation {
    fn invalid_message(self) -> String {
        match self {
            Operation::Calculate => t("message.check_input"),
            Operation::Convert => t("message.conversion_invalid"),
        }
    }

    fn failure_message(self) -> String {
        match self {
            Operation::Calculate => t("message.calculation_failed"),
            Operation::Convert => t("message.conversion_failed"),
        }
    }
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/soil-types", get(handle_soil_types))
        .route("/bags", get(handle_bags))
        .route("/units", get(handle_units))
        .route("/calculate", post(handle_calculate))
        .route("/convert-units", post(handle_convert_units))
        .layer(middleware::from_fn(request_span))
        .with_state(state)
}

/// 启动 HTTP 服务，Ctrl+C / SIGTERM 时优雅退出
pub async fn run_http(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(bind_addr).await?;
    info!("soil calculator listening on {} (Ctrl+C/SIGTERM to stop)", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("soil calculator stopped");
    Ok(())
}

// ==========================================
// 中间件: 每个请求一个 request_id span
// ==========================================
async fn request_span(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "http_request",
        %request_id,
        method = %request.method(),
        path = %request.uri().path()
    );

    async move {
        let mut response = next.run(request).await;
        info!(status = response.status().as_u16(), "请求完成");
        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

// ==========================================
// Handlers
// ==========================================

async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn handle_soil_types(State(state): State<AppState>) -> Response {
    Json(state.calculator_api.soil_types()).into_response()
}

async fn handle_bags(State(state): State<AppState>) -> Response {
    match state.calculator_api.list_bags().await {
        Ok(bags) => Json(bags).into_response(),
        Err(err) => error_response(Operation::Calculate, err, &Value::Null),
    }
}

async fn handle_units(State(state): State<AppState>) -> Response {
    Json(state.calculator_api.supported_units()).into_response()
}

async fn handle_calculate(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return malformed_body(Operation::Calculate, rejection),
    };

    match state.calculator_api.calculate(&body).await {
        Ok(data) => Json(CalculateResponse {
            success: true,
            data,
        })
        .into_response(),
        Err(err) => error_response(Operation::Calculate, err, &body),
    }
}

async fn handle_convert_units(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return malformed_body(Operation::Convert, rejection),
    };

    match state.calculator_api.convert_units(&body) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(Operation::Convert, err, &body),
    }
}

// ==========================================
// 错误映射
// ==========================================

fn malformed_body(operation: Operation, rejection: JsonRejection) -> Response {
    warn!(reason = %rejection.body_text(), "请求体无法解析");
    let mut errors = FieldErrors::new();
    errors.insert("body".to_string(), vec![t("validation.malformed_body")]);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::new(Some(errors), operation.invalid_message())),
    )
        .into_response()
}

fn error_response(operation: Operation, err: ApiError, body: &Value) -> Response {
    if let Some(errors) = err.field_errors() {
        warn!(code = err.code(), errors = ?errors, "输入校验失败");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(Some(errors), operation.invalid_message())),
        )
            .into_response();
    }

    error!(code = err.code(), error = ?err, request = %body, "请求处理失败");
    let message = match err {
        ApiError::EmptyCatalog => t("message.no_bags_configured"),
        _ => operation.failure_message(),
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(None, message)),
    )
        .into_response()
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "无法监听 SIGTERM，仅响应 Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("收到退出信号，开始优雅退出");
}
