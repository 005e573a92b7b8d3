use crate::config::{DashboardConfig, TrackingConfig};
use anyhow::Result;
use shipping_application::{
    InMemoryCommandBus, InMemoryQueryBus, OrderService, ShipmentWorkflowService, orders, shipments,
};
use shipping_domain::clock::{Clock, SystemClock};
use shipping_domain::persist::{InMemoryShippingStore, OrderRepository, ShipmentRepository};
use shipping_domain::tracking::{TimestampTrackingNumbers, TrackingNumberGenerator};
use std::sync::Arc;
use tracing::info;

/// 路由共享状态：命令与查询总线
#[derive(Clone)]
pub struct AppState {
    pub commands: Arc<InMemoryCommandBus>,
    pub queries: Arc<InMemoryQueryBus>,
}

impl AppState {
    /// 按配置选择存储并装配服务
    pub async fn build(config: &DashboardConfig) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let tracking = tracking_numbers(&config.tracking, clock.clone());

        match config.database.url.as_deref() {
            #[cfg(feature = "sqlite")]
            Some(url) => {
                let store = Arc::new(
                    shipping_domain::persist::SqliteShippingStore::connect(
                        url,
                        config.database.auto_migrate,
                        tracking,
                    )
                    .await?,
                );
                info!(database_url = url, "using sqlite store");
                Self::from_parts(store.clone(), store, clock, &config.tracking)
            }
            #[cfg(not(feature = "sqlite"))]
            Some(url) => {
                tracing::warn!(
                    database_url = url,
                    "database.url is set but the sqlite feature is disabled, using in-memory store"
                );
                let store = Arc::new(InMemoryShippingStore::new(tracking));
                Self::from_parts(store.clone(), store, clock, &config.tracking)
            }
            None => {
                info!("using in-memory store");
                let store = Arc::new(InMemoryShippingStore::new(tracking));
                Self::from_parts(store.clone(), store, clock, &config.tracking)
            }
        }
    }

    /// 内存存储 + 系统时钟
    pub fn in_memory(tracking: &TrackingConfig) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = Arc::new(InMemoryShippingStore::new(tracking_numbers(
            tracking,
            clock.clone(),
        )));
        Self::from_parts(store.clone(), store, clock, tracking)
    }

    pub fn from_parts(
        shipment_store: Arc<dyn ShipmentRepository>,
        order_store: Arc<dyn OrderRepository>,
        clock: Arc<dyn Clock>,
        tracking: &TrackingConfig,
    ) -> Result<Self> {
        let workflow = Arc::new(
            ShipmentWorkflowService::new(shipment_store, clock.clone())
                .with_policy(tracking.status_policy)
                .with_default_carrier(tracking.carrier()?),
        );
        let order_service = Arc::new(OrderService::new(order_store, workflow.clone(), clock));

        let commands = InMemoryCommandBus::new();
        let queries = InMemoryQueryBus::new();
        shipments::register(&commands, &queries, workflow)?;
        orders::register(&commands, &queries, order_service)?;

        Ok(Self {
            commands: Arc::new(commands),
            queries: Arc::new(queries),
        })
    }
}

fn tracking_numbers(
    config: &TrackingConfig,
    clock: Arc<dyn Clock>,
) -> Arc<dyn TrackingNumberGenerator> {
    Arc::new(TimestampTrackingNumbers::new(
        config.number_prefix.as_str(),
        clock,
    ))
}
