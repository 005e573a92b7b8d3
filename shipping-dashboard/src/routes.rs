use crate::middleware::correlation::{CorrelationId, correlation_middleware};
use crate::middleware::logging::logging_middleware;
use crate::state::AppState;
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Extension, Form, Json, Router};
use serde::Deserialize;
use shipping_application::command_bus::CommandBus;
use shipping_application::context::AppContext;
use shipping_application::dto::{OrderDto, ShipmentDto};
use shipping_application::error::AppError;
use shipping_application::orders::{DeleteOrder, GetOrder, ListOrders, PlaceOrder, ShipOrder};
use shipping_application::query_bus::QueryBus;
use shipping_application::shipments::{CreateShipment, ListShipments, UpdateShipmentStatus};
use shipping_domain::order::{NewOrder, OrderId};
use shipping_domain::shipment::ShipmentId;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_shipments))
        .route("/create", post(create_shipment))
        .route("/update/:id", post(update_status))
        .route("/health", get(health))
        .route("/orders", get(list_orders).post(place_order))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/ship", post(ship_order))
        .route("/orders/:id/delete", post(delete_order))
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(correlation_middleware))
        .with_state(state)
}

/// 绑定地址并提供服务，直到收到 Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "dashboard listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| {
            error!(%addr, error = %err, "dashboard terminated unexpectedly");
            err
        })?;
    info!("dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}

/// 应用层错误到 HTTP 状态码的映射
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

// 提取器拒绝（路径参数、表单、JSON 体无法解析）同样按输入非法处理
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.0.is_rejected_input() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

fn app_context(correlation: CorrelationId) -> AppContext {
    AppContext::builder()
        .correlation_id(correlation.0)
        .actor("dashboard")
        .build()
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn list_shipments(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Result<Json<Vec<ShipmentDto>>, ApiError> {
    let shipments = state
        .queries
        .dispatch(&app_context(correlation), ListShipments)
        .await?;
    Ok(Json(shipments))
}

async fn create_shipment(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Result<Redirect, ApiError> {
    state
        .commands
        .dispatch(&app_context(correlation), CreateShipment)
        .await?;
    Ok(Redirect::to("/"))
}

async fn update_status(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<StatusForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Path(id) = id?;
    let Form(form) = form?;
    let cmd = UpdateShipmentStatus {
        id: ShipmentId::new(id),
        status: form.status,
    };
    state.commands.dispatch(&app_context(correlation), cmd).await?;
    Ok(Redirect::to("/"))
}

async fn list_orders(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Result<Json<Vec<OrderDto>>, ApiError> {
    let orders = state
        .queries
        .dispatch(&app_context(correlation), ListOrders)
        .await?;
    Ok(Json(orders))
}

async fn get_order(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OrderDto>, ApiError> {
    let Path(id) = id?;
    let order = state
        .queries
        .dispatch(&app_context(correlation), GetOrder { id: OrderId::new(id) })
        .await?;
    Ok(Json(order))
}

async fn place_order(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    input: Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderDto>), ApiError> {
    let Json(input) = input?;
    let order = state
        .commands
        .dispatch(&app_context(correlation), PlaceOrder(input))
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn ship_order(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OrderDto>, ApiError> {
    let Path(id) = id?;
    let order = state
        .commands
        .dispatch(&app_context(correlation), ShipOrder { id: OrderId::new(id) })
        .await?;
    Ok(Json(order))
}

async fn delete_order(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state
        .commands
        .dispatch(&app_context(correlation), DeleteOrder { id: OrderId::new(id) })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
