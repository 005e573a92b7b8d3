//! 订单服务
//!
//! 订单独占其货运单：发货时经由工作流服务创建货运单并挂到订单上，
//! 删除订单时级联删除货运单。
//!
use crate::shipment_service::ShipmentWorkflowService;
use shipping_domain::clock::Clock;
use shipping_domain::entity::Entity;
use shipping_domain::error::{DomainError, DomainResult};
use shipping_domain::order::{NewOrder, Order, OrderId};
use shipping_domain::persist::OrderRepository;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    shipments: Arc<ShipmentWorkflowService>,
    clock: Arc<dyn Clock>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        shipments: Arc<ShipmentWorkflowService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            orders,
            shipments,
            clock,
        }
    }

    pub async fn place_order(&self, input: NewOrder) -> DomainResult<Order> {
        let order = Order::place(input, self.clock.now())?;
        let order = self.orders.save(order).await?;
        info!(
            order_id = %order.id(),
            order_number = order.order_number(),
            "order placed"
        );
        Ok(order)
    }

    /// 为订单创建货运单；订单至多一个货运单
    ///
    /// 货运单先于订单落库；订单写入失败时删除刚创建的货运单，不留下无主记录。
    pub async fn ship_order(&self, id: &OrderId) -> DomainResult<Order> {
        let mut order = self.find(id).await?;
        if order.shipment().is_some() {
            return Err(DomainError::InvalidState {
                reason: format!("order {} already has a shipment", order.order_number()),
            });
        }

        let shipment = self.shipments.create_shipment().await?;
        let shipment_id = *shipment.id();
        let saved = match order.attach_shipment(shipment) {
            Ok(()) => self.orders.save(order).await,
            Err(err) => Err(err),
        };

        match saved {
            Ok(order) => {
                info!(order_id = %order.id(), shipment_id = %shipment_id, "order shipped");
                Ok(order)
            }
            Err(err) => {
                warn!(
                    order_id = %id,
                    shipment_id = %shipment_id,
                    error = %err,
                    "shipping order failed"
                );
                if let Err(cleanup) = self.shipments.discard(&shipment_id).await {
                    error!(
                        shipment_id = %shipment_id,
                        error = %cleanup,
                        "orphaned shipment left behind"
                    );
                }
                Err(err)
            }
        }
    }

    pub async fn find(&self, id: &OrderId) -> DomainResult<Order> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("order", id))
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Order>> {
        self.orders.find_all().await
    }

    /// 删除订单及其货运单
    pub async fn delete_order(&self, id: &OrderId) -> DomainResult<()> {
        if !self.orders.delete(id).await? {
            return Err(DomainError::not_found("order", id));
        }
        info!(order_id = %id, "order deleted");
        Ok(())
    }
}
