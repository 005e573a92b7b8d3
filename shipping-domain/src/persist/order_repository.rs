use crate::error::DomainResult;
use crate::order::{Order, OrderId};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// 保存订单，级联保存其货运单
    async fn save(&self, order: Order) -> DomainResult<Order>;

    async fn find_by_id(&self, id: &OrderId) -> DomainResult<Option<Order>>;

    /// 全部订单，按标识升序
    async fn find_all(&self) -> DomainResult<Vec<Order>>;

    /// 删除订单并级联删除其货运单，返回订单是否存在
    async fn delete(&self, id: &OrderId) -> DomainResult<bool>;
}

#[async_trait]
impl<T> OrderRepository for Arc<T>
where
    T: OrderRepository + ?Sized,
{
    async fn save(&self, order: Order) -> DomainResult<Order> {
        (**self).save(order).await
    }

    async fn find_by_id(&self, id: &OrderId) -> DomainResult<Option<Order>> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> DomainResult<Vec<Order>> {
        (**self).find_all().await
    }

    async fn delete(&self, id: &OrderId) -> DomainResult<bool> {
        (**self).delete(id).await
    }
}
