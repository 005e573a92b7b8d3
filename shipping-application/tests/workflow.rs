use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use shipping_application::command_bus::CommandBus;
use shipping_application::context::AppContext;
use shipping_application::error::AppError;
use shipping_application::orders::{self, DeleteOrder, GetOrder, ListOrders, PlaceOrder, ShipOrder};
use shipping_application::query_bus::QueryBus;
use shipping_application::shipments::{self, CreateShipment, ListShipments, UpdateShipmentStatus};
use shipping_application::{
    InMemoryCommandBus, InMemoryQueryBus, OrderService, ShipmentWorkflowService,
};
use shipping_domain::clock::FixedClock;
use shipping_domain::error::{DomainError, DomainResult};
use shipping_domain::observer::StatusObserver;
use shipping_domain::entity::Entity;
use shipping_domain::order::{NewOrder, Order, OrderId};
use shipping_domain::persist::{InMemoryShippingStore, OrderRepository, ShipmentRepository};
use shipping_domain::shipment::{Shipment, ShipmentId};
use shipping_domain::tracking::TimestampTrackingNumbers;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 统计写入次数的仓储包装
struct CountingRepository {
    inner: Arc<InMemoryShippingStore>,
    saves: AtomicUsize,
}

impl CountingRepository {
    fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ShipmentRepository for CountingRepository {
    async fn save(&self, shipment: Shipment) -> DomainResult<Shipment> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        ShipmentRepository::save(&self.inner, shipment).await
    }

    async fn find_by_id(&self, id: &ShipmentId) -> DomainResult<Option<Shipment>> {
        ShipmentRepository::find_by_id(&self.inner, id).await
    }

    async fn find_all(&self) -> DomainResult<Vec<Shipment>> {
        ShipmentRepository::find_all(&self.inner).await
    }

    async fn delete(&self, id: &ShipmentId) -> DomainResult<bool> {
        ShipmentRepository::delete(&self.inner, id).await
    }
}

/// 记录通知顺序的观察者
struct Recording {
    label: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl StatusObserver for Recording {
    fn name(&self) -> &str {
        self.label
    }

    fn on_status_changed(&self, shipment: &Shipment) -> anyhow::Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.label, shipment.status()));
        Ok(())
    }
}

struct Failing;

impl StatusObserver for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn on_status_changed(&self, _: &Shipment) -> anyhow::Result<()> {
        anyhow::bail!("smtp timeout")
    }
}

/// 订单挂上货运单后写入即失败的仓储
struct ShipWriteFails {
    inner: Arc<InMemoryShippingStore>,
}

#[async_trait]
impl OrderRepository for ShipWriteFails {
    async fn save(&self, order: Order) -> DomainResult<Order> {
        if order.shipment().is_some() {
            return Err(DomainError::Database {
                reason: "disk full".into(),
            });
        }
        OrderRepository::save(&self.inner, order).await
    }

    async fn find_by_id(&self, id: &OrderId) -> DomainResult<Option<Order>> {
        OrderRepository::find_by_id(&self.inner, id).await
    }

    async fn find_all(&self) -> DomainResult<Vec<Order>> {
        OrderRepository::find_all(&self.inner).await
    }

    async fn delete(&self, id: &OrderId) -> DomainResult<bool> {
        OrderRepository::delete(&self.inner, id).await
    }
}

struct Harness {
    clock: Arc<FixedClock>,
    store: Arc<InMemoryShippingStore>,
    repo: Arc<CountingRepository>,
    commands: InMemoryCommandBus,
    queries: InMemoryQueryBus,
}

fn harness_with(
    configure: impl FnOnce(ShipmentWorkflowService) -> ShipmentWorkflowService,
) -> Harness {
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    ));
    let store = Arc::new(InMemoryShippingStore::new(Arc::new(
        TimestampTrackingNumbers::new("TRK", clock.clone()),
    )));
    let repo = Arc::new(CountingRepository {
        inner: store.clone(),
        saves: AtomicUsize::new(0),
    });

    let workflow = Arc::new(configure(ShipmentWorkflowService::new(
        repo.clone(),
        clock.clone(),
    )));
    let order_service = Arc::new(OrderService::new(store.clone(), workflow.clone(), clock.clone()));

    let commands = InMemoryCommandBus::new();
    let queries = InMemoryQueryBus::new();
    shipments::register(&commands, &queries, workflow).unwrap();
    orders::register(&commands, &queries, order_service).unwrap();

    Harness {
        clock,
        store,
        repo,
        commands,
        queries,
    }
}

fn harness() -> Harness {
    harness_with(|service| service)
}

fn ctx() -> AppContext {
    AppContext::builder().correlation_id("test").build()
}

fn new_order(number: &str) -> NewOrder {
    NewOrder {
        order_number: number.into(),
        customer_name: "Grace Hopper".into(),
        customer_email: "grace@example.com".into(),
        shipping_address: "12 Harbour Rd".into(),
        weight: 3.0,
    }
}

#[tokio::test]
async fn created_shipment_is_pending_with_dhl_and_tracking_number() {
    let h = harness();
    let dto = h.commands.dispatch(&ctx(), CreateShipment).await.unwrap();

    assert_eq!(dto.status, "PENDING");
    assert_eq!(dto.carrier, "DHL");
    let tracking = dto.tracking_number.unwrap();
    assert!(tracking.starts_with("TRK"));
    assert!(tracking.len() > 3);
    assert!(tracking[3..].chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn pick_up_scenario() {
    let h = harness();
    let created = h.commands.dispatch(&ctx(), CreateShipment).await.unwrap();

    h.clock.advance(Duration::minutes(5));
    let updated = h
        .commands
        .dispatch(
            &ctx(),
            UpdateShipmentStatus {
                id: ShipmentId::new(created.id),
                status: "PICKED_UP".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, "PICKED_UP");

    let listed = h.queries.dispatch(&ctx(), ListShipments).await.unwrap();
    assert_eq!(listed.len(), 1);
    let reloaded = &listed[0];
    assert_eq!(reloaded.status, "PICKED_UP");
    assert!(reloaded.updated_at > created.updated_at);
    assert_eq!(reloaded.tracking_number, created.tracking_number);
}

#[tokio::test]
async fn unknown_status_is_accepted_verbatim() {
    let h = harness();
    let created = h.commands.dispatch(&ctx(), CreateShipment).await.unwrap();

    let updated = h
        .commands
        .dispatch(
            &ctx(),
            UpdateShipmentStatus {
                id: ShipmentId::new(created.id),
                status: "NOT_A_REAL_STATUS".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, "NOT_A_REAL_STATUS");

    let listed = h.queries.dispatch(&ctx(), ListShipments).await.unwrap();
    assert_eq!(listed[0].status, "NOT_A_REAL_STATUS");
}

#[tokio::test]
async fn missing_shipment_is_not_found_and_nothing_is_written() {
    let h = harness();
    let err = h
        .commands
        .dispatch(
            &ctx(),
            UpdateShipmentStatus {
                id: ShipmentId::new(999),
                status: "DELIVERED".into(),
            },
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(h.repo.saves(), 0);
    assert_eq!(h.store.shipment_count(), 0);
}

#[tokio::test]
async fn observers_are_notified_in_order_on_every_update() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let first: Arc<dyn StatusObserver> = Arc::new(Recording {
        label: "first",
        log: log.clone(),
    });
    let second: Arc<dyn StatusObserver> = Arc::new(Recording {
        label: "second",
        log: log.clone(),
    });
    let h = harness_with(|service| service.with_observers(vec![first.clone(), second, first]));

    let created = h.commands.dispatch(&ctx(), CreateShipment).await.unwrap();
    assert!(log.lock().unwrap().is_empty());

    for status in ["PICKED_UP", "IN_TRANSIT"] {
        h.commands
            .dispatch(
                &ctx(),
                UpdateShipmentStatus {
                    id: ShipmentId::new(created.id),
                    status: status.into(),
                },
            )
            .await
            .unwrap();
    }

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "first:PICKED_UP",
            "second:PICKED_UP",
            "first:PICKED_UP",
            "first:IN_TRANSIT",
            "second:IN_TRANSIT",
            "first:IN_TRANSIT",
        ]
    );
}

#[tokio::test]
async fn observer_failure_fails_the_update_without_saving() {
    let h = harness_with(|service| service.with_observer(Arc::new(Failing)));
    let created = h.commands.dispatch(&ctx(), CreateShipment).await.unwrap();
    let saves_before = h.repo.saves();

    let err = h
        .commands
        .dispatch(
            &ctx(),
            UpdateShipmentStatus {
                id: ShipmentId::new(created.id),
                status: "IN_TRANSIT".into(),
            },
        )
        .await
        .unwrap_err();

    match err {
        AppError::Domain(DomainError::Observer { observer, reason }) => {
            assert_eq!(observer, "failing");
            assert!(reason.contains("smtp timeout"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(h.repo.saves(), saves_before);
    let listed = h.queries.dispatch(&ctx(), ListShipments).await.unwrap();
    assert_eq!(listed[0].status, "PENDING");
}

#[tokio::test]
async fn order_lifecycle_with_owned_shipment() {
    let h = harness();
    let placed = h
        .commands
        .dispatch(&ctx(), PlaceOrder(new_order("ORD-1")))
        .await
        .unwrap();
    assert!(placed.shipment.is_none());

    let id = OrderId::new(placed.id);
    let shipped = h.commands.dispatch(&ctx(), ShipOrder { id }).await.unwrap();
    let shipment = shipped.shipment.clone().unwrap();
    assert_eq!(shipment.status, "PENDING");

    let again = h.commands.dispatch(&ctx(), ShipOrder { id }).await.unwrap_err();
    assert!(again.is_rejected_input());

    let fetched = h.queries.dispatch(&ctx(), GetOrder { id }).await.unwrap();
    assert_eq!(fetched.shipment, Some(shipment));
    assert_eq!(h.queries.dispatch(&ctx(), ListOrders).await.unwrap().len(), 1);

    h.commands.dispatch(&ctx(), DeleteOrder { id }).await.unwrap();
    assert_eq!(h.store.order_count(), 0);
    assert_eq!(h.store.shipment_count(), 0);

    let missing = h.commands.dispatch(&ctx(), DeleteOrder { id }).await.unwrap_err();
    assert!(missing.is_not_found());
}

#[tokio::test]
async fn invalid_order_input_is_rejected() {
    let h = harness();
    let mut input = new_order("ORD-2");
    input.customer_email = "not-an-email".into();

    let err = h
        .commands
        .dispatch(&ctx(), PlaceOrder(input))
        .await
        .unwrap_err();
    assert!(err.is_rejected_input());
    assert_eq!(h.store.order_count(), 0);
}

#[tokio::test]
async fn failed_order_write_discards_the_new_shipment() {
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    ));
    let store = Arc::new(InMemoryShippingStore::new(Arc::new(
        TimestampTrackingNumbers::new("TRK", clock.clone()),
    )));
    let workflow = Arc::new(ShipmentWorkflowService::new(store.clone(), clock.clone()));
    let service = OrderService::new(
        Arc::new(ShipWriteFails {
            inner: store.clone(),
        }),
        workflow,
        clock,
    );

    let placed = service.place_order(new_order("ORD-3")).await.unwrap();
    let err = service.ship_order(placed.id()).await.unwrap_err();

    assert!(matches!(err, DomainError::Database { .. }));
    assert_eq!(store.shipment_count(), 0);
    let reloaded = service.find(placed.id()).await.unwrap();
    assert!(reloaded.shipment().is_none());
}
