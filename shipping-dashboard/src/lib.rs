//! 货运跟踪看板（shipping-dashboard）
//!
//! 加载配置、初始化日志、装配存储与应用服务，并通过 axum 暴露 HTTP 接口。
//!
pub mod config;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::DashboardConfig;
pub use routes::{build_router, serve};
pub use state::AppState;
