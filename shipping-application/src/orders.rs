//! 订单用例：命令、查询及其处理器
//!
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::dto::OrderDto;
use crate::error::AppError;
use crate::inmemory_command_bus::InMemoryCommandBus;
use crate::inmemory_query_bus::InMemoryQueryBus;
use crate::order_service::OrderService;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use async_trait::async_trait;
use shipping_domain::order::{NewOrder, OrderId};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PlaceOrder(pub NewOrder);

impl Command for PlaceOrder {
    const NAME: &'static str = "order.place";
    type Output = OrderDto;
}

#[derive(Debug, Clone, Copy)]
pub struct ShipOrder {
    pub id: OrderId,
}

impl Command for ShipOrder {
    const NAME: &'static str = "order.ship";
    type Output = OrderDto;
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteOrder {
    pub id: OrderId,
}

impl Command for DeleteOrder {
    const NAME: &'static str = "order.delete";
    type Output = ();
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListOrders;

impl Query for ListOrders {
    const NAME: &'static str = "order.list";
    type Dto = Vec<OrderDto>;
}

#[derive(Debug, Clone, Copy)]
pub struct GetOrder {
    pub id: OrderId,
}

impl Query for GetOrder {
    const NAME: &'static str = "order.get";
    type Dto = OrderDto;
}

pub struct OrderCommandHandler {
    service: Arc<OrderService>,
}

impl OrderCommandHandler {
    pub fn new(service: Arc<OrderService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler<PlaceOrder> for OrderCommandHandler {
    async fn handle(&self, ctx: &AppContext, cmd: PlaceOrder) -> Result<OrderDto, AppError> {
        debug!(
            correlation_id = ctx.correlation(),
            order_number = cmd.0.order_number.as_str(),
            "placing order"
        );
        let order = self.service.place_order(cmd.0).await?;
        Ok(OrderDto::from(&order))
    }
}

#[async_trait]
impl CommandHandler<ShipOrder> for OrderCommandHandler {
    async fn handle(&self, ctx: &AppContext, cmd: ShipOrder) -> Result<OrderDto, AppError> {
        debug!(correlation_id = ctx.correlation(), order_id = %cmd.id, "shipping order");
        let order = self.service.ship_order(&cmd.id).await?;
        Ok(OrderDto::from(&order))
    }
}

#[async_trait]
impl CommandHandler<DeleteOrder> for OrderCommandHandler {
    async fn handle(&self, ctx: &AppContext, cmd: DeleteOrder) -> Result<(), AppError> {
        debug!(correlation_id = ctx.correlation(), order_id = %cmd.id, "deleting order");
        self.service.delete_order(&cmd.id).await?;
        Ok(())
    }
}

pub struct OrderQueryHandler {
    service: Arc<OrderService>,
}

impl OrderQueryHandler {
    pub fn new(service: Arc<OrderService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl QueryHandler<ListOrders> for OrderQueryHandler {
    async fn handle(&self, _ctx: &AppContext, _q: ListOrders) -> Result<Vec<OrderDto>, AppError> {
        let orders = self.service.find_all().await?;
        Ok(orders.iter().map(OrderDto::from).collect())
    }
}

#[async_trait]
impl QueryHandler<GetOrder> for OrderQueryHandler {
    async fn handle(&self, _ctx: &AppContext, q: GetOrder) -> Result<OrderDto, AppError> {
        let order = self.service.find(&q.id).await?;
        Ok(OrderDto::from(&order))
    }
}

/// 向总线注册全部订单处理器
pub fn register(
    commands: &InMemoryCommandBus,
    queries: &InMemoryQueryBus,
    service: Arc<OrderService>,
) -> Result<(), AppError> {
    let command_handler = Arc::new(OrderCommandHandler::new(service.clone()));
    commands.register::<PlaceOrder, _>(command_handler.clone())?;
    commands.register::<ShipOrder, _>(command_handler.clone())?;
    commands.register::<DeleteOrder, _>(command_handler)?;

    let query_handler = Arc::new(OrderQueryHandler::new(service));
    queries.register::<ListOrders, _>(query_handler.clone())?;
    queries.register::<GetOrder, _>(query_handler)?;
    Ok(())
}
