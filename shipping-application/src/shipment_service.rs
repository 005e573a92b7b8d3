//! 货运单工作流服务
//!
//! 负责创建货运单与推进状态。服务持有配置好的观察者，每次状态更新时
//! 挂接到一次性的 [`ShipmentUpdate`] 上，因此重新加载的货运单同样会触发通知。
//!
use shipping_domain::clock::Clock;
use shipping_domain::entity::Entity;
use shipping_domain::error::{DomainError, DomainResult};
use shipping_domain::observer::{EmailNotificationObserver, StatusObserver};
use shipping_domain::persist::ShipmentRepository;
use shipping_domain::shipment::{Shipment, ShipmentId};
use shipping_domain::status::StatusPolicy;
use shipping_domain::update::ShipmentUpdate;
use shipping_domain::value_object::Carrier;
use std::sync::Arc;
use tracing::info;

pub struct ShipmentWorkflowService {
    shipments: Arc<dyn ShipmentRepository>,
    clock: Arc<dyn Clock>,
    observers: Vec<Arc<dyn StatusObserver>>,
    policy: StatusPolicy,
    default_carrier: Carrier,
}

impl ShipmentWorkflowService {
    /// 默认挂接一个邮件通知观察者，宽松策略，承运商 `DHL`
    pub fn new(shipments: Arc<dyn ShipmentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shipments,
            clock,
            observers: vec![Arc::new(EmailNotificationObserver)],
            policy: StatusPolicy::default(),
            default_carrier: Carrier::default(),
        }
    }

    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_default_carrier(mut self, carrier: Carrier) -> Self {
        self.default_carrier = carrier;
        self
    }

    /// 替换全部观察者
    pub fn with_observers(mut self, observers: Vec<Arc<dyn StatusObserver>>) -> Self {
        self.observers = observers;
        self
    }

    /// 在已有观察者之后追加一个
    pub fn with_observer(mut self, observer: Arc<dyn StatusObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    pub fn observer_names(&self) -> Vec<&str> {
        self.observers.iter().map(|o| o.name()).collect()
    }

    /// 新建货运单（`PENDING`、默认承运商）并持久化；创建本身不触发通知
    pub async fn create_shipment(&self) -> DomainResult<Shipment> {
        let draft = Shipment::draft(self.default_carrier.clone(), self.clock.now());
        let shipment = self.shipments.save(draft).await?;
        info!(
            shipment_id = %shipment.id(),
            tracking_number = shipment.tracking_number().map(|t| t.as_str()),
            carrier = %shipment.carrier(),
            "shipment created"
        );
        Ok(shipment)
    }

    /// 加载货运单、写入新状态、通知观察者、持久化
    ///
    /// 货运单不存在时返回 `NotFound` 且不写入；观察者失败时不持久化。
    pub async fn update_status(&self, id: &ShipmentId, status: &str) -> DomainResult<Shipment> {
        let mut shipment = self
            .shipments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("shipment", id))?;
        let previous = shipment.status().clone();

        {
            let mut update =
                ShipmentUpdate::new(&mut shipment, self.clock.as_ref()).with_policy(self.policy);
            for observer in &self.observers {
                update.attach_observer(observer.clone());
            }
            update.set_status(status)?;
        }

        let shipment = self.shipments.save(shipment).await?;
        info!(
            shipment_id = %shipment.id(),
            from = %previous,
            to = %shipment.status(),
            "shipment status changed"
        );
        Ok(shipment)
    }

    /// 删除尚未被订单引用的货运单；返回是否确有删除
    pub(crate) async fn discard(&self, id: &ShipmentId) -> DomainResult<bool> {
        let removed = self.shipments.delete(id).await?;
        if removed {
            info!(shipment_id = %id, "shipment discarded");
        }
        Ok(removed)
    }

    pub async fn find(&self, id: &ShipmentId) -> DomainResult<Shipment> {
        self.shipments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("shipment", id))
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Shipment>> {
        self.shipments.find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipping_domain::clock::SystemClock;
    use shipping_domain::persist::InMemoryShippingStore;
    use shipping_domain::status::ShipmentStatus;

    fn service() -> ShipmentWorkflowService {
        ShipmentWorkflowService::new(
            Arc::new(InMemoryShippingStore::default()),
            Arc::new(SystemClock),
        )
    }

    #[test]
    fn defaults_wire_one_email_observer() {
        let service = service();
        assert_eq!(service.observer_names(), vec![EmailNotificationObserver::NAME]);
        assert_eq!(service.policy(), StatusPolicy::Permissive);
    }

    #[tokio::test]
    async fn created_shipment_uses_configured_carrier() {
        let service = service().with_default_carrier(Carrier::parse("UPS").unwrap());
        let shipment = service.create_shipment().await.unwrap();
        assert_eq!(shipment.carrier().as_str(), "UPS");
        assert_eq!(shipment.status(), &ShipmentStatus::Pending);
    }

    #[tokio::test]
    async fn linear_policy_rejects_skipping_ahead() {
        let service = service().with_policy(StatusPolicy::Linear);
        let shipment = service.create_shipment().await.unwrap();

        let err = service
            .update_status(shipment.id(), "DELIVERED")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));

        let stored = service.find(shipment.id()).await.unwrap();
        assert_eq!(stored.status(), &ShipmentStatus::Pending);
    }
}
