use crate::error::DomainResult;
use crate::shipment::{Shipment, ShipmentId};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// 保存并返回持久化后的货运单（含分配的标识与运单号）
    async fn save(&self, shipment: Shipment) -> DomainResult<Shipment>;

    async fn find_by_id(&self, id: &ShipmentId) -> DomainResult<Option<Shipment>>;

    /// 全部货运单，按标识升序
    async fn find_all(&self) -> DomainResult<Vec<Shipment>>;

    /// 删除货运单，返回是否存在
    async fn delete(&self, id: &ShipmentId) -> DomainResult<bool>;
}

#[async_trait]
impl<T> ShipmentRepository for Arc<T>
where
    T: ShipmentRepository + ?Sized,
{
    async fn save(&self, shipment: Shipment) -> DomainResult<Shipment> {
        (**self).save(shipment).await
    }

    async fn find_by_id(&self, id: &ShipmentId) -> DomainResult<Option<Shipment>> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> DomainResult<Vec<Shipment>> {
        (**self).find_all().await
    }

    async fn delete(&self, id: &ShipmentId) -> DomainResult<bool> {
        (**self).delete(id).await
    }
}
