//! 货运单用例：命令、查询及其处理器
//!
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::dto::ShipmentDto;
use crate::error::AppError;
use crate::inmemory_command_bus::InMemoryCommandBus;
use crate::inmemory_query_bus::InMemoryQueryBus;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use crate::shipment_service::ShipmentWorkflowService;
use async_trait::async_trait;
use shipping_domain::shipment::ShipmentId;
use std::sync::Arc;
use tracing::debug;

/// 新建货运单（无输入）
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateShipment;

impl Command for CreateShipment {
    const NAME: &'static str = "shipment.create";
    type Output = ShipmentDto;
}

/// 推进货运单状态；`status` 为原始字符串，是否接受由状态策略决定
#[derive(Debug, Clone)]
pub struct UpdateShipmentStatus {
    pub id: ShipmentId,
    pub status: String,
}

impl Command for UpdateShipmentStatus {
    const NAME: &'static str = "shipment.update_status";
    type Output = ShipmentDto;
}

/// 列出全部货运单，不分页
#[derive(Debug, Clone, Copy, Default)]
pub struct ListShipments;

impl Query for ListShipments {
    const NAME: &'static str = "shipment.list";
    type Dto = Vec<ShipmentDto>;
}

pub struct ShipmentCommandHandler {
    service: Arc<ShipmentWorkflowService>,
}

impl ShipmentCommandHandler {
    pub fn new(service: Arc<ShipmentWorkflowService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler<CreateShipment> for ShipmentCommandHandler {
    async fn handle(
        &self,
        ctx: &AppContext,
        _cmd: CreateShipment,
    ) -> Result<ShipmentDto, AppError> {
        debug!(correlation_id = ctx.correlation(), "creating shipment");
        let shipment = self.service.create_shipment().await?;
        Ok(ShipmentDto::from(&shipment))
    }
}

#[async_trait]
impl CommandHandler<UpdateShipmentStatus> for ShipmentCommandHandler {
    async fn handle(
        &self,
        ctx: &AppContext,
        cmd: UpdateShipmentStatus,
    ) -> Result<ShipmentDto, AppError> {
        debug!(
            correlation_id = ctx.correlation(),
            shipment_id = %cmd.id,
            status = cmd.status.as_str(),
            "updating shipment status"
        );
        let shipment = self.service.update_status(&cmd.id, &cmd.status).await?;
        Ok(ShipmentDto::from(&shipment))
    }
}

pub struct ShipmentQueryHandler {
    service: Arc<ShipmentWorkflowService>,
}

impl ShipmentQueryHandler {
    pub fn new(service: Arc<ShipmentWorkflowService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl QueryHandler<ListShipments> for ShipmentQueryHandler {
    async fn handle(
        &self,
        _ctx: &AppContext,
        _q: ListShipments,
    ) -> Result<Vec<ShipmentDto>, AppError> {
        let shipments = self.service.find_all().await?;
        Ok(shipments.iter().map(ShipmentDto::from).collect())
    }
}

/// 向总线注册全部货运单处理器
pub fn register(
    commands: &InMemoryCommandBus,
    queries: &InMemoryQueryBus,
    service: Arc<ShipmentWorkflowService>,
) -> Result<(), AppError> {
    let command_handler = Arc::new(ShipmentCommandHandler::new(service.clone()));
    commands.register::<CreateShipment, _>(command_handler.clone())?;
    commands.register::<UpdateShipmentStatus, _>(command_handler)?;
    queries.register::<ListShipments, _>(Arc::new(ShipmentQueryHandler::new(service)))?;
    Ok(())
}
