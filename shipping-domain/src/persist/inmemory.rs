use super::{OrderRepository, ShipmentRepository};
use crate::clock::SystemClock;
use crate::entity::Entity;
use crate::error::DomainResult;
use crate::order::{Order, OrderId};
use crate::shipment::{Shipment, ShipmentId};
use crate::tracking::{DEFAULT_TRACKING_PREFIX, TimestampTrackingNumbers, TrackingNumberGenerator};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

/// 基于内存的货运存储
/// - 货运单与订单各自存放在 DashMap 中
/// - 订单只记录所属货运单的标识，读取时再拼装
/// - 标识从 1 开始递增；还原出的已有标识会推高计数器，避免后续冲突
pub struct InMemoryShippingStore {
    shipments: DashMap<ShipmentId, Shipment>,
    orders: DashMap<OrderId, (Order, Option<ShipmentId>)>,
    shipment_seq: AtomicI64,
    order_seq: AtomicI64,
    tracking: Arc<dyn TrackingNumberGenerator>,
}

impl Default for InMemoryShippingStore {
    fn default() -> Self {
        Self::new(Arc::new(TimestampTrackingNumbers::new(
            DEFAULT_TRACKING_PREFIX,
            SystemClock,
        )))
    }
}

impl InMemoryShippingStore {
    pub fn new(tracking: Arc<dyn TrackingNumberGenerator>) -> Self {
        Self {
            shipments: DashMap::new(),
            orders: DashMap::new(),
            shipment_seq: AtomicI64::new(0),
            order_seq: AtomicI64::new(0),
            tracking,
        }
    }

    pub fn shipment_count(&self) -> usize {
        self.shipments.len()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    fn store_shipment(&self, mut shipment: Shipment) -> Shipment {
        if shipment.is_transient() {
            let id = self.shipment_seq.fetch_add(1, Ordering::SeqCst) + 1;
            shipment.assign_id(ShipmentId::new(id));
        } else {
            self.shipment_seq
                .fetch_max(*shipment.id().value(), Ordering::SeqCst);
        }

        if shipment.ensure_tracking_number(self.tracking.as_ref()) {
            debug!(
                shipment_id = %shipment.id(),
                tracking_number = ?shipment.tracking_number().map(|t| t.as_str()),
                "tracking number assigned"
            );
        }

        self.shipments.insert(*shipment.id(), shipment.clone());
        debug!(shipment_id = %shipment.id(), status = %shipment.status(), "shipment stored");
        shipment
    }

    fn assemble(&self, order: &Order, shipment_id: Option<ShipmentId>) -> Order {
        // 先复制货运单再拼装，避免持有两个 map 的引用
        let shipment = shipment_id.and_then(|id| self.shipments.get(&id).map(|s| s.clone()));
        let mut order = order.clone();
        order.put_shipment(shipment);
        order
    }
}

#[async_trait]
impl ShipmentRepository for InMemoryShippingStore {
    async fn save(&self, shipment: Shipment) -> DomainResult<Shipment> {
        Ok(self.store_shipment(shipment))
    }

    async fn find_by_id(&self, id: &ShipmentId) -> DomainResult<Option<Shipment>> {
        Ok(self.shipments.get(id).map(|s| s.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Shipment>> {
        let mut all: Vec<Shipment> = self.shipments.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|s| *s.id());
        Ok(all)
    }

    async fn delete(&self, id: &ShipmentId) -> DomainResult<bool> {
        let removed = self.shipments.remove(id).is_some();
        if removed {
            debug!(shipment_id = %id, "shipment deleted");
        }
        Ok(removed)
    }
}

#[async_trait]
impl OrderRepository for InMemoryShippingStore {
    async fn save(&self, mut order: Order) -> DomainResult<Order> {
        let shipment = order.take_shipment().map(|s| self.store_shipment(s));

        if order.is_transient() {
            let id = self.order_seq.fetch_add(1, Ordering::SeqCst) + 1;
            order.assign_id(OrderId::new(id));
        } else {
            self.order_seq.fetch_max(*order.id().value(), Ordering::SeqCst);
        }

        let shipment_id = shipment.as_ref().map(|s| *s.id());
        self.orders.insert(*order.id(), (order.clone(), shipment_id));
        debug!(
            order_id = %order.id(),
            shipment_id = ?shipment_id.map(|id| *id.value()),
            "order stored"
        );

        order.put_shipment(shipment);
        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> DomainResult<Option<Order>> {
        let entry = self.orders.get(id).map(|e| e.value().clone());
        Ok(entry.map(|(order, shipment_id)| self.assemble(&order, shipment_id)))
    }

    async fn find_all(&self) -> DomainResult<Vec<Order>> {
        let mut entries: Vec<(Order, Option<ShipmentId>)> =
            self.orders.iter().map(|e| e.value().clone()).collect();
        entries.sort_by_key(|(order, _)| *order.id());
        Ok(entries
            .iter()
            .map(|(order, shipment_id)| self.assemble(order, *shipment_id))
            .collect())
    }

    async fn delete(&self, id: &OrderId) -> DomainResult<bool> {
        let Some((_, (_, shipment_id))) = self.orders.remove(id) else {
            return Ok(false);
        };
        if let Some(shipment_id) = shipment_id {
            self.shipments.remove(&shipment_id);
        }
        debug!(order_id = %id, shipment_id = ?shipment_id.map(|id| *id.value()), "order deleted");
        Ok(true)
    }
}
